/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Recyclable highlight palette.
//!
//! A small fixed set of swatch styles is handed out to node keys on
//! demand and returned when the operator removes the highlight. The
//! palette never grows or shrinks: every token is always in exactly
//! one of `assigned` or `available`.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::fmt;

use ratatui::style::Color;
use ratatui::style::Style;

/// One swatch in the highlight palette.
///
/// The derived `Ord` is the allocation order: [`PaletteAssigner`]
/// always hands out the lowest free token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HighlightStyle {
    Blue,
    Cyan,
    Magenta,
    Yellow,
}

impl HighlightStyle {
    /// The full palette.
    pub const ALL: [HighlightStyle; 4] = [
        HighlightStyle::Blue,
        HighlightStyle::Cyan,
        HighlightStyle::Magenta,
        HighlightStyle::Yellow,
    ];

    /// Terminal style used to paint the swatch.
    pub fn style(self) -> Style {
        let bg = match self {
            HighlightStyle::Blue => Color::Blue,
            HighlightStyle::Cyan => Color::Cyan,
            HighlightStyle::Magenta => Color::Magenta,
            HighlightStyle::Yellow => Color::Yellow,
        };
        Style::default().fg(Color::White).bg(bg)
    }
}

impl fmt::Display for HighlightStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightStyle::Blue => write!(f, "blue"),
            HighlightStyle::Cyan => write!(f, "cyan"),
            HighlightStyle::Magenta => write!(f, "magenta"),
            HighlightStyle::Yellow => write!(f, "yellow"),
        }
    }
}

/// Bookkeeping for which node key holds which highlight swatch.
///
/// Only the UI task touches this, so there is no internal locking.
#[derive(Debug, Clone)]
pub struct PaletteAssigner {
    assigned: HashMap<String, HighlightStyle>,
    available: BTreeSet<HighlightStyle>,
}

impl Default for PaletteAssigner {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteAssigner {
    /// A palette with every swatch free.
    pub fn new() -> Self {
        Self {
            assigned: HashMap::new(),
            available: HighlightStyle::ALL.into_iter().collect(),
        }
    }

    /// Give `key` a swatch.
    ///
    /// Returns the existing swatch if `key` already has one. Otherwise
    /// takes the lowest free swatch, or returns `None` when the palette
    /// is exhausted.
    pub fn assign(&mut self, key: &str) -> Option<HighlightStyle> {
        if let Some(style) = self.assigned.get(key) {
            return Some(*style);
        }
        let style = self.available.pop_first()?;
        self.assigned.insert(key.to_string(), style);
        tracing::debug!(key, %style, "assigned highlight");
        Some(style)
    }

    /// Take `key`'s swatch back, returning it. `None` if `key` held
    /// nothing.
    pub fn unassign(&mut self, key: &str) -> Option<HighlightStyle> {
        let style = self.assigned.remove(key)?;
        self.available.insert(style);
        tracing::debug!(key, %style, "reclaimed highlight");
        Some(style)
    }

    /// The swatch currently held by `key`, if any.
    pub fn style_of(&self, key: &str) -> Option<HighlightStyle> {
        self.assigned.get(key).copied()
    }

    /// Number of keys holding a swatch.
    pub fn assigned_len(&self) -> usize {
        self.assigned.len()
    }

    /// Number of free swatches.
    pub fn available_len(&self) -> usize {
        self.available.len()
    }

    /// Whether `style` is currently free.
    pub fn is_available(&self, style: HighlightStyle) -> bool {
        self.available.contains(&style)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn assert_bounded(palette: &PaletteAssigner) {
        assert_eq!(
            palette.assigned_len() + palette.available_len(),
            HighlightStyle::ALL.len()
        );
        for style in palette.assigned.values() {
            assert!(!palette.is_available(*style));
        }
    }

    // Fresh palette has every swatch free.
    #[test]
    fn new_palette_is_fully_available() {
        let palette = PaletteAssigner::new();
        assert_eq!(palette.assigned_len(), 0);
        assert_eq!(palette.available_len(), 4);
        assert_bounded(&palette);
    }

    // Assign hands out swatches lowest-first.
    #[test]
    fn assign_is_deterministic_lowest_first() {
        let mut palette = PaletteAssigner::new();
        assert_eq!(palette.assign("a:1"), Some(HighlightStyle::Blue));
        assert_eq!(palette.assign("b:1"), Some(HighlightStyle::Cyan));
        assert_eq!(palette.assign("c:1"), Some(HighlightStyle::Magenta));
        assert_eq!(palette.assign("d:1"), Some(HighlightStyle::Yellow));
        assert_bounded(&palette);
    }

    // Assign then unassign restores the prior state.
    #[test]
    fn assign_unassign_round_trip() {
        let mut palette = PaletteAssigner::new();
        palette.assign("keep:1");
        let before_available: Vec<_> = palette.available.iter().copied().collect();
        let before_assigned = palette.assigned.clone();

        let given = palette.assign("k:1");
        let taken = palette.unassign("k:1");
        assert_eq!(given, taken);
        assert!(given.is_some());

        let after_available: Vec<_> = palette.available.iter().copied().collect();
        assert_eq!(before_available, after_available);
        assert_eq!(before_assigned, palette.assigned);
    }

    // Assign twice returns the same swatch without using a second slot.
    #[test]
    fn assign_is_idempotent() {
        let mut palette = PaletteAssigner::new();
        let first = palette.assign("k:1");
        let second = palette.assign("k:1");
        assert_eq!(first, second);
        assert_eq!(palette.assigned_len(), 1);
        assert_eq!(palette.available_len(), 3);
    }

    // Exhausted palette grants nothing and leaves state alone.
    #[test]
    fn assign_when_exhausted_returns_none() {
        let mut palette = PaletteAssigner::new();
        for i in 0..4 {
            assert!(palette.assign(&format!("n{}:1", i)).is_some());
        }
        assert_eq!(palette.assign("late:1"), None);
        assert_eq!(palette.style_of("late:1"), None);
        assert_bounded(&palette);
        // Existing holders still resolve while exhausted.
        assert_eq!(palette.assign("n0:1"), Some(HighlightStyle::Blue));
    }

    // Unassign on an unknown key is a no-op.
    #[test]
    fn unassign_unknown_key_returns_none() {
        let mut palette = PaletteAssigner::new();
        palette.assign("a:1");
        assert_eq!(palette.unassign("b:1"), None);
        assert_eq!(palette.assigned_len(), 1);
        assert_bounded(&palette);
    }

    // Reclaimed swatches are reused lowest-first.
    #[test]
    fn reclaimed_swatch_is_reused() {
        let mut palette = PaletteAssigner::new();
        palette.assign("a:1");
        palette.assign("b:1");
        palette.assign("c:1");
        assert_eq!(palette.unassign("a:1"), Some(HighlightStyle::Blue));
        assert_eq!(palette.assign("d:1"), Some(HighlightStyle::Blue));
        assert_eq!(palette.assign("e:1"), Some(HighlightStyle::Yellow));
        assert_eq!(palette.assign("f:1"), None);
    }

    // The bound holds across a long mixed sequence of operations.
    #[test]
    fn palette_bound_holds_under_churn() {
        let mut palette = PaletteAssigner::new();
        let keys = ["a", "b", "c", "d", "e", "f"];
        for round in 0..50usize {
            let key = keys[(round * 7) % keys.len()];
            if round % 3 == 0 {
                palette.unassign(key);
            } else {
                palette.assign(key);
            }
            assert_bounded(&palette);
            let held: HashSet<_> = palette.assigned.values().collect();
            assert_eq!(held.len(), palette.assigned_len());
        }
    }

    // Swatch styles are distinct.
    #[test]
    fn swatch_styles_are_distinct() {
        let styles: HashSet<_> = HighlightStyle::ALL.iter().map(|s| s.style()).collect();
        assert_eq!(styles.len(), HighlightStyle::ALL.len());
    }
}

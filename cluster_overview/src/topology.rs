/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Role-partitioned view over the latest cluster snapshot.
//!
//! # Invariants
//!
//! - **Wholesale rebuild**: every snapshot replaces all three role
//!   lists; each role owns its own `Vec`. `refresh(None)` changes
//!   nothing but still requests a redraw.
//! - **Lazy cursor repair**: refresh never moves the cursor. Reads go
//!   through [`TopologyView::selected_address`], which falls back to
//!   the own address when the cursor points past a list. Navigation
//!   is the only place the cursor is corrected.
//! - **Navigation guard**: all four navigation operations are no-ops
//!   while the selected role's list is empty. This includes
//!   [`TopologyView::goto_first`], even when another role has members.
//! - **Parity padding**: `padding` is 6 for an even longest address
//!   and 5 for an odd one; `column_width` adds it to that length.

use std::collections::HashMap;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::palette::HighlightStyle;
use crate::palette::PaletteAssigner;
use crate::redraw::RedrawSignal;
use crate::role::Role;
use crate::snapshot::DeploymentMode;
use crate::snapshot::Snapshot;
use crate::subscription::SnapshotEvent;

/// Style of the per-section title lines.
const SECTION_HEADER_STYLE: Style = Style::new().fg(Color::Rgb(0xA0, 0xA0, 0xA0));
/// Inverse style of the selected address cell.
const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Gray);

/// Position of the selection within the role lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub role: Role,
    pub index: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            role: Role::Leader,
            index: 0,
        }
    }
}

/// Live panel state: role lists, layout metrics and selection.
#[derive(Debug)]
pub struct TopologyView {
    own_address: String,
    mode: Option<DeploymentMode>,
    members: HashMap<Role, Vec<String>>,
    column_width: usize,
    padding: usize,
    cursor: Cursor,
    palette: PaletteAssigner,
    redraw: RedrawSignal,
}

impl TopologyView {
    /// A view with no snapshot yet, attached to `own_address`.
    pub fn new(own_address: impl Into<String>, palette: PaletteAssigner) -> Self {
        Self {
            own_address: own_address.into(),
            mode: None,
            members: empty_role_table(),
            column_width: 0,
            padding: 0,
            cursor: Cursor::default(),
            palette,
            redraw: RedrawSignal::new(),
        }
    }

    /// Handle the renderer subscribes to for redraw requests.
    pub fn redraw_signal(&self) -> &RedrawSignal {
        &self.redraw
    }

    /// Consume one delivery from a snapshot feed.
    pub fn apply(&mut self, event: &SnapshotEvent) {
        match event {
            SnapshotEvent::Snapshot(snapshot) => self.refresh(Some(snapshot)),
            SnapshotEvent::Unavailable(_) => self.refresh(None),
        }
    }

    /// Rebuild the role lists from `snapshot`.
    ///
    /// `None` means the source is unavailable: the last topology stays
    /// on screen. A redraw is requested either way. The cursor is left
    /// alone.
    pub fn refresh(&mut self, snapshot: Option<&Snapshot>) {
        let Some(snapshot) = snapshot else {
            self.redraw.request();
            return;
        };

        let mut members = empty_role_table();
        match snapshot {
            Snapshot::Standalone => {
                members.insert(Role::Leader, vec![self.own_address.clone()]);
            }
            Snapshot::Cluster { members: records } => {
                for role in Role::ALL {
                    let addresses = records
                        .iter()
                        .filter(|m| m.role == Some(role))
                        .filter_map(|m| m.display_address())
                        .collect();
                    members.insert(role, addresses);
                }
            }
        }

        let widest = members
            .values()
            .flatten()
            .map(|a| a.chars().count())
            .max()
            .unwrap_or(0);
        self.padding = if widest % 2 == 0 { 6 } else { 5 };
        self.column_width = widest + self.padding;
        self.members = members;
        self.mode = Some(snapshot.mode());

        tracing::debug!(
            mode = ?self.mode,
            leaders = self.members(Role::Leader).len(),
            followers = self.members(Role::Follower).len(),
            read_replicas = self.members(Role::ReadReplica).len(),
            column_width = self.column_width,
            "topology refreshed"
        );
        self.redraw.request();
    }

    /// Last observed deployment mode; `None` before the first snapshot.
    pub fn mode(&self) -> Option<DeploymentMode> {
        self.mode
    }

    /// Addresses currently listed under `role`, in snapshot order.
    pub fn members(&self, role: Role) -> &[String] {
        self.members.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of listed addresses across all roles.
    pub fn total_members(&self) -> usize {
        Role::ALL.iter().map(|r| self.members(*r).len()).sum()
    }

    pub fn own_address(&self) -> &str {
        &self.own_address
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    pub fn column_width(&self) -> usize {
        self.column_width
    }

    /// Width the renderer should give this panel.
    pub fn preferred_width(&self) -> usize {
        self.column_width
    }

    pub fn palette(&self) -> &PaletteAssigner {
        &self.palette
    }

    /// Address under the cursor, or the own address when the cursor
    /// does not point at a listed entry.
    pub fn selected_address(&self) -> &str {
        self.members(self.cursor.role)
            .get(self.cursor.index)
            .map(String::as_str)
            .unwrap_or(&self.own_address)
    }

    /// Whether `(role, index)` is the entry the cursor is on.
    fn is_selected(&self, role: Role, index: usize) -> bool {
        self.cursor.role == role && self.cursor.index == index
    }

    fn selected_role_is_empty(&self) -> bool {
        self.members(self.cursor.role).is_empty()
    }

    /// Move to `target`. Returns true if the position changed.
    fn move_to(&mut self, target: Cursor) -> bool {
        if target == self.cursor {
            return false;
        }
        tracing::debug!(from = ?self.cursor, to = ?target, "cursor moved");
        self.cursor = target;
        true
    }

    /// Jump to index 0 of the first role that has members.
    pub fn goto_first(&mut self) -> bool {
        if self.selected_role_is_empty() {
            return false;
        }
        let Some(role) = Role::ALL
            .into_iter()
            .find(|r| !self.members(*r).is_empty())
        else {
            return false;
        };
        self.move_to(Cursor { role, index: 0 })
    }

    /// Jump to the last entry of the last role that has members.
    pub fn goto_last(&mut self) -> bool {
        if self.selected_role_is_empty() {
            return false;
        }
        let mut role = Role::ALL[Role::ALL.len() - 1];
        while self.members(role).is_empty() {
            role = role.prev();
        }
        let index = self.members(role).len() - 1;
        self.move_to(Cursor { role, index })
    }

    /// Step to the previous entry, wrapping into the previous
    /// non-empty role at its last entry.
    pub fn page_backward(&mut self) -> bool {
        if self.selected_role_is_empty() {
            return false;
        }
        let Cursor { mut role, index } = self.cursor;
        // A stale index past the end steps back onto the last entry.
        let index = index.min(self.members(role).len());
        let target = match index.checked_sub(1) {
            Some(index) => Cursor { role, index },
            None => {
                role = role.prev();
                while self.members(role).is_empty() {
                    role = role.prev();
                }
                Cursor {
                    role,
                    index: self.members(role).len() - 1,
                }
            }
        };
        self.move_to(target)
    }

    /// Step to the next entry, wrapping into the next non-empty role
    /// at index 0.
    pub fn page_forward(&mut self) -> bool {
        if self.selected_role_is_empty() {
            return false;
        }
        let Cursor { mut role, index } = self.cursor;
        let index = index + 1;
        let target = if index < self.members(role).len() {
            Cursor { role, index }
        } else {
            role = role.next();
            while self.members(role).is_empty() {
                role = role.next();
            }
            Cursor { role, index: 0 }
        };
        self.move_to(target)
    }

    /// Give the selected address a palette swatch.
    pub fn add_highlight(&mut self) -> Option<HighlightStyle> {
        let key = self.selected_address().to_string();
        let style = self.palette.assign(&key);
        self.redraw.request();
        style
    }

    /// Return the selected address's swatch to the palette.
    pub fn remove_highlight(&mut self) -> Option<HighlightStyle> {
        let key = self.selected_address().to_string();
        let style = self.palette.unassign(&key);
        self.redraw.request();
        style
    }

    fn section_title(&self, role: Role) -> &'static str {
        match role {
            Role::Leader if self.mode == Some(DeploymentMode::Clustered) => "Leader",
            Role::Leader => "Server",
            Role::Follower => "Followers",
            Role::ReadReplica => "Read replicas",
        }
    }

    /// Lay out the panel for a `width` x `height` viewport.
    ///
    /// One section per non-empty role: a title line, one line per
    /// address, then a blank line. `height` does not truncate; the
    /// renderer scrolls or clips.
    pub fn render_content(&self, width: usize, _height: usize) -> RenderedContent {
        let cell_width = width.saturating_sub(self.padding);
        let mut lines = Vec::new();

        for role in Role::ALL {
            let addresses = self.members(role);
            if addresses.is_empty() {
                continue;
            }
            lines.push(Line::from(Span::styled(
                format!("{:<width$}", format!(" {}", self.section_title(role))),
                SECTION_HEADER_STYLE,
            )));
            for (i, address) in addresses.iter().enumerate() {
                let swatch = self
                    .palette
                    .style_of(address)
                    .map(HighlightStyle::style)
                    .unwrap_or_default();
                let cell = if self.is_selected(role, i) {
                    SELECTED_STYLE
                } else {
                    Style::default()
                };
                lines.push(Line::from(vec![
                    Span::raw(" "),
                    Span::styled("  ", swatch),
                    Span::raw(" "),
                    Span::styled(format!("{:<cell_width$}", address), cell),
                    Span::raw(" "),
                ]));
            }
            lines.push(Line::default());
        }

        RenderedContent { lines }
    }
}

/// Fresh role table with an independently owned empty list per role.
fn empty_role_table() -> HashMap<Role, Vec<String>> {
    Role::ALL.into_iter().map(|r| (r, Vec::new())).collect()
}

/// Lines produced by [`TopologyView::render_content`].
///
/// Finite and cheap to rebuild; renderers may fetch lines by index in
/// any order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedContent {
    lines: Vec<Line<'static>>,
}

impl RenderedContent {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line `y`, or `None` past the end.
    pub fn line(&self, y: usize) -> Option<&Line<'static>> {
        self.lines.get(y)
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.lines
    }
}

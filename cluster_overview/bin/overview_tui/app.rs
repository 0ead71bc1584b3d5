/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::io;

use cluster_overview::DeploymentMode;
use cluster_overview::HighlightStyle;
use cluster_overview::OverviewConfig;
use cluster_overview::PaletteAssigner;
use cluster_overview::Role;
use cluster_overview::SnapshotEvent;
use cluster_overview::SnapshotFeed;
use cluster_overview::TopologyView;
use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::KeyResult;
use crate::LangName;
use crate::Theme;
use crate::ThemeName;
use crate::render::ui;

// Application state

/// Outcome of the most recent highlight toggle, shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HighlightOutcome {
    Assigned(HighlightStyle),
    Removed(HighlightStyle),
    Exhausted,
}

/// Runtime state for the overview TUI.
///
/// `App` owns the topology view (and through it the palette) and the
/// chrome around it. Snapshots arrive from a [`SnapshotFeed`] fed by
/// a background poller; `App` is the only thing that mutates the
/// view.
pub(crate) struct App {
    /// Panel settings (own address, refresh interval).
    pub(crate) config: OverviewConfig,
    /// Where snapshots come from, for the header.
    pub(crate) source_label: String,
    /// Set when the user requests exit (e.g. `q` / `Esc` / `Ctrl-C`).
    pub(crate) should_quit: bool,

    /// Role lists, cursor and palette.
    pub(crate) view: TopologyView,
    /// Human-readable refresh interval (e.g. "1s", "5s").
    pub(crate) refresh_interval_label: String,
    /// Last source error; cleared by the next good snapshot. The
    /// topology stays on screen while this is set.
    pub(crate) error: Option<String>,
    /// Result of the last highlight toggle.
    pub(crate) last_highlight: Option<HighlightOutcome>,

    /// Scroll offset for the topology panel (top visible line).
    pub(crate) scroll_offset: usize,
    /// Height of the topology viewport in lines (updated during
    /// rendering).
    pub(crate) viewport_height: usize,

    /// Visual presentation (colors + labels).
    pub(crate) theme: Theme,
    /// Active theme name (for display in header).
    pub(crate) theme_name: ThemeName,
    /// Active language (for display in header).
    pub(crate) lang_name: LangName,
}

impl App {
    pub(crate) fn new(
        config: OverviewConfig,
        source_label: String,
        theme_name: ThemeName,
        lang_name: LangName,
    ) -> Self {
        let view = TopologyView::new(config.own_address.clone(), PaletteAssigner::new());
        let refresh_interval_label = config.refresh_interval_label();
        Self {
            config,
            source_label,
            should_quit: false,
            view,
            refresh_interval_label,
            error: None,
            last_highlight: None,
            scroll_offset: 0,
            viewport_height: 20, // Default, updated during rendering
            theme: Theme::new(theme_name, lang_name),
            theme_name,
            lang_name,
        }
    }

    /// Feed one snapshot delivery into the view.
    pub(crate) fn apply(&mut self, event: SnapshotEvent) {
        match &event {
            SnapshotEvent::Snapshot(_) => self.error = None,
            SnapshotEvent::Unavailable(msg) => self.error = Some(msg.clone()),
        }
        self.view.apply(&event);
        self.ensure_cursor_visible();
    }

    /// Header label for the current deployment mode.
    pub(crate) fn mode_label(&self) -> &'static str {
        let l = &self.theme.labels;
        match self.view.mode() {
            Some(DeploymentMode::Clustered) => l.mode_clustered,
            Some(DeploymentMode::Standalone) => l.mode_standalone,
            None => l.mode_connecting,
        }
    }

    /// Rendered line holding the selected address, if the cursor
    /// points at a listed entry.
    ///
    /// Mirrors the section layout of `render_content`: each non-empty
    /// role contributes a title line, its entries, and a blank line.
    pub(crate) fn selected_line(&self) -> Option<usize> {
        let cursor = self.view.cursor();
        let mut line = 0;
        for role in Role::ALL {
            let len = self.view.members(role).len();
            if len == 0 {
                continue;
            }
            if role == cursor.role {
                return (cursor.index < len).then_some(line + 1 + cursor.index);
            }
            line += len + 2;
        }
        None
    }

    /// Adjust scroll offset so the selected line stays inside the
    /// viewport.
    pub(crate) fn ensure_cursor_visible(&mut self) {
        let Some(pos) = self.selected_line() else {
            return;
        };
        if pos < self.scroll_offset {
            // Keep the section title in view when scrolling up onto
            // the first entry.
            self.scroll_offset = pos.saturating_sub(1);
        } else if self.viewport_height > 0 && pos >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = pos.saturating_sub(self.viewport_height - 1);
        }
    }

    fn navigated(&mut self, changed: bool) -> KeyResult {
        if changed {
            self.ensure_cursor_visible();
            KeyResult::Redraw
        } else {
            KeyResult::None
        }
    }

    /// Handle a single keypress.
    pub(crate) fn on_key(&mut self, key: KeyEvent) -> KeyResult {
        if key.kind == KeyEventKind::Release {
            return KeyResult::None;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                KeyResult::None
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                // Ctrl+C: immediate quit
                self.should_quit = true;
                KeyResult::None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                let changed = self.view.goto_first();
                self.navigated(changed)
            }
            KeyCode::End | KeyCode::Char('G') => {
                let changed = self.view.goto_last();
                self.navigated(changed)
            }
            KeyCode::Up | KeyCode::PageUp | KeyCode::Char('k') => {
                let changed = self.view.page_backward();
                self.navigated(changed)
            }
            KeyCode::Down | KeyCode::PageDown | KeyCode::Char('j') => {
                let changed = self.view.page_forward();
                self.navigated(changed)
            }
            KeyCode::Char('+') | KeyCode::Enter => {
                self.last_highlight = Some(match self.view.add_highlight() {
                    Some(style) => HighlightOutcome::Assigned(style),
                    None => HighlightOutcome::Exhausted,
                });
                KeyResult::Redraw
            }
            KeyCode::Char('-') | KeyCode::Backspace => match self.view.remove_highlight() {
                Some(style) => {
                    self.last_highlight = Some(HighlightOutcome::Removed(style));
                    KeyResult::Redraw
                }
                None => KeyResult::None,
            },
            _ => KeyResult::None,
        }
    }
}

/// Drive the main event loop.
///
/// Applies snapshots as they arrive from `feed` and processes
/// keyboard input until the user exits. Draws only when the view's
/// redraw signal fires, a key changed something, or the terminal
/// resized.
pub(crate) async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut feed: SnapshotFeed,
    mut app: App,
) -> io::Result<()> {
    let mut events = EventStream::new();
    let mut redraw = app.view.redraw_signal().subscribe();
    let mut feed_open = true;
    let mut needs_draw = true;

    loop {
        if needs_draw {
            // Body area is terminal height minus header (3 rows), footer
            // (2 rows) and the panel border (2 rows).
            let terminal_size = terminal.size()?;
            app.viewport_height = terminal_size.height.saturating_sub(7) as usize;
            app.ensure_cursor_visible();
            terminal.draw(|frame| ui(frame, &app))?;
            redraw.borrow_and_update();
            needs_draw = false;
        }

        tokio::select! {
            maybe_snapshot = feed.next(), if feed_open => {
                match maybe_snapshot {
                    Some(event) => app.apply(event),
                    None => {
                        tracing::warn!("snapshot feed closed");
                        feed_open = false;
                        app.apply(SnapshotEvent::Unavailable("snapshot source stopped".to_string()));
                    }
                }
            }
            _ = redraw.changed() => {
                needs_draw = true;
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if app.on_key(key) == KeyResult::Redraw {
                            needs_draw = true;
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        needs_draw = true;
                    }
                    Some(Err(e)) => return Err(e),
                    None => break,
                    _ => {}
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

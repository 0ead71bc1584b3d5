/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;

use crate::App;

/// Narrowest panel interior, so the title fits before the first
/// snapshot arrives.
const MIN_PANEL_WIDTH: u16 = 16;

/// Render the topology panel as a fixed-width block on the left of
/// `area`.
///
/// The panel is sized from the view's preferred width (plus borders)
/// so it does not jitter as the cursor moves; it only changes width
/// when a snapshot changes the longest address.
pub(crate) fn render_topology_pane(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let preferred = u16::try_from(app.view.preferred_width()).unwrap_or(u16::MAX);
    let panel_width = preferred.max(MIN_PANEL_WIDTH).saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(panel_width), Constraint::Min(0)])
        .split(area);
    let panel = chunks[0];

    let block = Block::default()
        .title(app.theme.labels.pane_topology)
        .borders(Borders::ALL)
        .border_style(app.theme.scheme.border);
    let inner = block.inner(panel);

    let content = app
        .view
        .render_content(inner.width as usize, inner.height as usize);
    let offset = u16::try_from(app.scroll_offset).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(content.into_lines())
        .block(block)
        .scroll((offset, 0));
    frame.render_widget(paragraph, panel);
}

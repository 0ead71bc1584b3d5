/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;

use crate::App;
use crate::HighlightOutcome;
use crate::theme::ColorScheme;
use crate::theme::Labels;
use crate::theme::LangName;
use crate::theme::ThemeName;

/// Render the top status/header bar.
///
/// Line 1 carries identity and configuration; line 2 carries the
/// selection and highlight state, or the source error when the last
/// refresh failed (the topology below keeps showing the last good
/// snapshot).
pub(crate) fn render_header(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let l = &app.theme.labels;
    let s = &app.theme.scheme;

    // Line 1: App name • own address • mode • members: 3 • ⟳ 1s • source
    let mut line1_spans = vec![
        Span::styled(l.app_name, s.app_name),
        Span::styled(l.separator, s.stat_label),
        Span::styled(app.view.own_address(), s.stat_url),
        Span::styled(l.separator, s.stat_label),
        Span::styled(app.mode_label(), s.stat_system),
        Span::styled(l.separator, s.stat_label),
        Span::styled(l.members, s.stat_label),
        Span::styled(app.view.total_members().to_string(), s.stat_system),
    ];

    // Show active theme and lang (skip defaults to reduce noise)
    if !matches!(app.theme_name, ThemeName::Nord) {
        line1_spans.extend(vec![
            Span::styled(l.separator, s.stat_label),
            Span::styled(format!("theme:{}", app.theme_name), s.stat_system),
        ]);
    }
    if !matches!(app.lang_name, LangName::En) {
        line1_spans.extend(vec![
            Span::styled(l.separator, s.stat_label),
            Span::styled(format!("lang:{}", app.lang_name), s.stat_system),
        ]);
    }

    if !app.refresh_interval_label.is_empty() {
        line1_spans.extend(vec![
            Span::styled(l.separator, s.stat_label),
            Span::styled(l.refresh_icon, s.stat_timing),
            Span::styled(&app.refresh_interval_label, s.stat_timing),
        ]);
    }
    line1_spans.extend(vec![
        Span::styled(l.separator, s.stat_label),
        Span::styled(&app.source_label, s.stat_url),
    ]);

    // Line 2: selection context, or the source error.
    let line2_spans = if let Some(err) = &app.error {
        vec![Span::styled(format!("{}{}", l.unavailable, err), s.error)]
    } else {
        let selected = app.view.selected_address();
        let mut spans = vec![
            Span::styled(l.selection_caret, s.stat_selection),
            Span::styled(selected, s.stat_selection),
        ];
        if let Some(style) = app.view.palette().style_of(selected) {
            spans.extend(vec![
                Span::styled(l.separator, s.stat_label),
                Span::styled(l.highlight, s.stat_label),
                Span::styled("  ", style.style()),
                Span::styled(format!(" {}", style), s.info),
            ]);
        } else if app.last_highlight == Some(HighlightOutcome::Exhausted) {
            spans.extend(vec![
                Span::styled(l.separator, s.stat_label),
                Span::styled(l.palette_exhausted, s.info),
            ]);
        }
        spans
    };

    let header = Paragraph::new(vec![Line::from(line1_spans), Line::from(line2_spans)]).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(s.border),
    );

    frame.render_widget(header, area);
}

/// Render the bottom help bar showing the keyboard shortcuts.
pub(crate) fn render_footer(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    scheme: &ColorScheme,
    labels: &Labels,
) {
    let footer = Paragraph::new(labels.footer_help_text)
        .style(scheme.footer_help)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default()),
        );
    frame.render_widget(footer, area);
}

/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

/// Selectable color theme.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum ThemeName {
    /// Nord (arctic blue), the default.
    #[default]
    Nord,
    /// doom-nord-light, for light terminal backgrounds.
    DoomNordLight,
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeName::Nord => write!(f, "nord"),
            ThemeName::DoomNordLight => write!(f, "doom-nord-light"),
        }
    }
}

/// Selectable display language.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum LangName {
    /// English (default).
    #[default]
    En,
    /// 简体中文 (Simplified Chinese).
    Zh,
}

impl std::fmt::Display for LangName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LangName::En => write!(f, "en"),
            LangName::Zh => write!(f, "zh"),
        }
    }
}

/// Command-line arguments for the cluster overview TUI.
///
/// Every option can also come from the environment, so the panel can
/// be launched from a dashboard without a command line.
#[derive(Debug, Parser)]
#[command(
    name = "cluster-overview",
    about = "Live cluster topology panel (leader / followers / read replicas)"
)]
pub(crate) struct Args {
    /// Address of the server this panel is attached to (e.g.
    /// localhost:7687). Shown as the only server when standalone.
    #[arg(long, short, env = "CLUSTER_OVERVIEW_ADDR")]
    pub(crate) addr: String,

    /// HTTP endpoint returning the JSON cluster overview.
    #[arg(long, env = "CLUSTER_OVERVIEW_URL", conflicts_with = "snapshot_file")]
    pub(crate) url: Option<String>,

    /// JSON cluster overview file, re-read on every refresh.
    #[arg(long, env = "CLUSTER_OVERVIEW_SNAPSHOT_FILE")]
    pub(crate) snapshot_file: Option<PathBuf>,

    /// Refresh interval in milliseconds
    #[arg(long, env = "CLUSTER_OVERVIEW_REFRESH_MS", default_value_t = 1000)]
    pub(crate) refresh_ms: u64,

    /// Color theme
    #[arg(long, default_value_t = ThemeName::Nord, value_enum)]
    pub(crate) theme: ThemeName,

    /// Display language
    #[arg(long, default_value_t = LangName::En, value_enum)]
    pub(crate) lang: LangName,

    /// Write logs here (the terminal is owned by the UI). Filtered by
    /// RUST_LOG.
    #[arg(long, env = "CLUSTER_OVERVIEW_LOG_FILE")]
    pub(crate) log_file: Option<PathBuf>,
}

/// All user-visible chrome text.
///
/// Section titles inside the topology panel are part of the panel
/// itself and are not localised here.
pub(crate) struct Labels {
    // App identity
    pub(crate) app_name: &'static str,

    // Chrome / decoration
    pub(crate) separator: &'static str,
    pub(crate) selection_caret: &'static str,
    pub(crate) refresh_icon: &'static str,

    // Header stat labels
    pub(crate) mode_clustered: &'static str,
    pub(crate) mode_standalone: &'static str,
    pub(crate) mode_connecting: &'static str,
    pub(crate) members: &'static str,
    pub(crate) highlight: &'static str,
    pub(crate) palette_exhausted: &'static str,
    pub(crate) unavailable: &'static str,

    // Pane titles
    pub(crate) pane_topology: &'static str,

    // Footer
    pub(crate) footer_help_text: &'static str,
}

impl Labels {
    /// English (default) label set.
    pub(crate) fn en() -> Self {
        Self {
            app_name: "cluster-overview",
            separator: " • ",
            selection_caret: "▸ ",
            refresh_icon: "⟳ ",
            mode_clustered: "cluster",
            mode_standalone: "standalone",
            mode_connecting: "connecting",
            members: "members: ",
            highlight: "highlight: ",
            palette_exhausted: "no highlight available",
            unavailable: "UNAVAILABLE: ",
            pane_topology: "Topology",
            footer_help_text: "q: quit | j/k: next/prev | g/G: first/last | +/Enter: highlight | -/Backspace: unhighlight",
        }
    }

    /// 简体中文 (Simplified Chinese) label set.
    pub(crate) fn zh() -> Self {
        Self {
            app_name: "集群概览",
            separator: " • ",
            selection_caret: "▸ ",
            refresh_icon: "⟳ ",
            mode_clustered: "集群",
            mode_standalone: "单机",
            mode_connecting: "连接中",
            members: "成员: ",
            highlight: "高亮: ",
            palette_exhausted: "无可用高亮",
            unavailable: "不可用: ",
            pane_topology: "拓扑",
            footer_help_text: "q: 退出 | j/k: 下一个/上一个 | g/G: 首个/末个 | +/Enter: 高亮 | -/Backspace: 取消高亮",
        }
    }
}

/// Color scheme for the TUI chrome.
///
/// The topology panel paints its own section titles, selection and
/// palette swatches; this only covers header, border and footer.
pub(crate) struct ColorScheme {
    // UI chrome
    pub(crate) app_name: Style,
    pub(crate) border: Style,
    pub(crate) footer_help: Style,

    // Semantic states
    pub(crate) error: Style,
    pub(crate) info: Style,

    // Header stat categories
    pub(crate) stat_timing: Style,    // refresh interval
    pub(crate) stat_selection: Style, // current selection
    pub(crate) stat_system: Style,    // mode, member counts
    pub(crate) stat_url: Style,       // own address, source
    pub(crate) stat_label: Style,     // stat labels/prefixes
}

impl ColorScheme {
    /// Nord color scheme (https://www.nordtheme.com/).
    pub(crate) fn nord() -> Self {
        let polar3 = Color::Rgb(76, 86, 106); // #4C566A
        let snow0 = Color::Rgb(216, 222, 233); // #D8DEE9
        let frost_cyan = Color::Rgb(136, 192, 208); // #88C0D0
        let frost_dark = Color::Rgb(94, 129, 172); // #5E81AC
        let aurora_red = Color::Rgb(191, 97, 106); // #BF616A
        let aurora_yellow = Color::Rgb(235, 203, 139); // #EBCB8B
        let aurora_purple = Color::Rgb(180, 142, 173); // #B48EAD

        Self {
            app_name: Style::default().fg(frost_cyan).add_modifier(Modifier::BOLD),
            border: Style::default().fg(polar3),
            footer_help: Style::default().fg(polar3),

            error: Style::default().fg(aurora_red),
            info: Style::default().fg(frost_cyan),

            stat_timing: Style::default().fg(aurora_yellow),
            stat_selection: Style::default().fg(aurora_purple),
            stat_system: Style::default().fg(frost_dark),
            stat_url: Style::default().fg(polar3),
            stat_label: Style::default().fg(snow0),
        }
    }

    /// doom-nord-light color scheme.
    ///
    /// Desaturated Nord accents adapted for light backgrounds.
    pub(crate) fn doom_nord_light() -> Self {
        let base7 = Color::Rgb(96, 114, 140); // #60728C
        let fg = Color::Rgb(59, 66, 82); // #3B4252
        let red = Color::Rgb(153, 50, 75); // #99324B
        let yellow = Color::Rgb(154, 117, 0); // #9A7500
        let dark_blue = Color::Rgb(82, 114, 175); // #5272AF
        let teal = Color::Rgb(41, 131, 141); // #29838D
        let cyan = Color::Rgb(57, 142, 172); // #398EAC
        let violet = Color::Rgb(132, 40, 121); // #842879

        Self {
            app_name: Style::default().fg(teal).add_modifier(Modifier::BOLD),
            border: Style::default().fg(base7),
            footer_help: Style::default().fg(base7),

            error: Style::default().fg(red),
            info: Style::default().fg(cyan),

            stat_timing: Style::default().fg(yellow),
            stat_selection: Style::default().fg(violet),
            stat_system: Style::default().fg(dark_blue),
            stat_url: Style::default().fg(base7),
            stat_label: Style::default().fg(fg),
        }
    }
}

/// Chrome colors plus the label set for one language.
pub(crate) struct Theme {
    pub(crate) scheme: ColorScheme,
    pub(crate) labels: Labels,
}

impl Theme {
    /// Build a theme for the given theme and language.
    pub(crate) fn new(theme_name: ThemeName, lang_name: LangName) -> Self {
        let scheme = match theme_name {
            ThemeName::Nord => ColorScheme::nord(),
            ThemeName::DoomNordLight => ColorScheme::doom_nord_light(),
        };
        let labels = match lang_name {
            LangName::En => Labels::en(),
            LangName::Zh => Labels::zh(),
        };
        Self { scheme, labels }
    }
}

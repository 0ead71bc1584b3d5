/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Tests that exercise the shell modules together (App + render +
//! fetch + args). Library behavior is covered by the unit tests in
//! each `cluster_overview` module.

use std::io::Write;

use cluster_overview::HighlightStyle;
use cluster_overview::MemberRecord;
use cluster_overview::Role;
use cluster_overview::Snapshot;
use cluster_overview::SnapshotEvent;
use cluster_overview::SnapshotSource;
use cluster_overview::SourceError;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use ratatui::backend::TestBackend;

use super::*;
use crate::render::ui;

const OWN: &str = "localhost:7687";

fn app() -> App {
    App::new(
        OverviewConfig::new(OWN),
        "test".to_string(),
        ThemeName::Nord,
        LangName::En,
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn three_node_cluster() -> SnapshotEvent {
    SnapshotEvent::Snapshot(Snapshot::Cluster {
        members: vec![
            MemberRecord::new("bolt://10.0.0.1:7687", Role::Leader),
            MemberRecord::new("bolt://10.0.0.2:7687", Role::Follower),
            MemberRecord::new("bolt://10.0.0.3:7687", Role::Follower),
        ],
    })
}

fn draw(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| ui(frame, app)).unwrap();
    let buf = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

// A good snapshot clears a previous error.
#[test]
fn apply_snapshot_clears_error() {
    let mut app = app();
    app.apply(SnapshotEvent::Unavailable("HTTP 503".into()));
    assert_eq!(app.error.as_deref(), Some("HTTP 503"));
    app.apply(three_node_cluster());
    assert!(app.error.is_none());
    assert_eq!(app.view.total_members(), 3);
}

// An error keeps the last topology on screen.
#[test]
fn apply_unavailable_keeps_topology() {
    let mut app = app();
    app.apply(three_node_cluster());
    app.apply(SnapshotEvent::Unavailable("connection refused".into()));
    assert_eq!(app.view.total_members(), 3);
    assert_eq!(app.view.members(Role::Leader), ["10.0.0.1:7687"]);

    let screen = draw(&app, 100, 16);
    assert!(screen.contains("UNAVAILABLE: connection refused"));
    assert!(screen.contains("10.0.0.1:7687"));
}

// Navigation keys report whether anything moved.
#[test]
fn navigation_keys_report_changes() {
    let mut app = app();
    assert_eq!(app.on_key(key(KeyCode::Char('j'))), KeyResult::None);

    app.apply(three_node_cluster());
    assert_eq!(app.on_key(key(KeyCode::Char('j'))), KeyResult::Redraw);
    assert_eq!(app.view.selected_address(), "10.0.0.2:7687");
    assert_eq!(app.on_key(key(KeyCode::End)), KeyResult::Redraw);
    assert_eq!(app.view.selected_address(), "10.0.0.3:7687");
    assert_eq!(app.on_key(key(KeyCode::Char('G'))), KeyResult::None);
    assert_eq!(app.on_key(key(KeyCode::Down)), KeyResult::Redraw);
    assert_eq!(app.view.selected_address(), "10.0.0.1:7687");
    assert_eq!(app.on_key(key(KeyCode::Char('k'))), KeyResult::Redraw);
    assert_eq!(app.view.selected_address(), "10.0.0.3:7687");
    assert_eq!(app.on_key(key(KeyCode::Home)), KeyResult::Redraw);
    assert_eq!(app.on_key(key(KeyCode::Char('g'))), KeyResult::None);
    assert_eq!(app.on_key(key(KeyCode::Char('x'))), KeyResult::None);
}

// q, Esc and Ctrl-C all quit.
#[test]
fn quit_keys_set_should_quit() {
    for event in [
        key(KeyCode::Char('q')),
        key(KeyCode::Esc),
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    ] {
        let mut app = app();
        app.on_key(event);
        assert!(app.should_quit);
    }
}

// Highlight keys assign, reuse, and reclaim palette swatches.
#[test]
fn highlight_keys_drive_palette() {
    let mut app = app();
    app.apply(three_node_cluster());

    assert_eq!(app.on_key(key(KeyCode::Char('+'))), KeyResult::Redraw);
    assert_eq!(
        app.last_highlight,
        Some(HighlightOutcome::Assigned(HighlightStyle::Blue))
    );
    app.on_key(key(KeyCode::Char('j')));
    app.on_key(key(KeyCode::Enter));
    assert_eq!(
        app.view.palette().style_of("10.0.0.2:7687"),
        Some(HighlightStyle::Cyan)
    );

    assert_eq!(app.on_key(key(KeyCode::Char('-'))), KeyResult::Redraw);
    assert_eq!(
        app.last_highlight,
        Some(HighlightOutcome::Removed(HighlightStyle::Cyan))
    );
    assert_eq!(app.on_key(key(KeyCode::Backspace)), KeyResult::None);
}

// Exhausting the palette is reported, not an error.
#[test]
fn highlight_exhaustion_is_reported() {
    let mut app = app();
    let mut members = vec![MemberRecord::new("bolt://10.0.0.1:7687", Role::Leader)];
    members.extend(
        (2..=5).map(|i| MemberRecord::new(format!("bolt://10.0.0.{}:7687", i), Role::Follower)),
    );
    app.apply(SnapshotEvent::Snapshot(Snapshot::Cluster { members }));
    for _ in 0..4 {
        app.on_key(key(KeyCode::Char('+')));
        app.on_key(key(KeyCode::Char('j')));
    }
    app.on_key(key(KeyCode::Char('+')));
    assert_eq!(app.last_highlight, Some(HighlightOutcome::Exhausted));
    assert_eq!(app.view.palette().available_len(), 0);

    let screen = draw(&app, 100, 16);
    assert!(screen.contains("no highlight available"));
}

// Selected line accounts for titles and separators of earlier sections.
#[test]
fn selected_line_follows_section_layout() {
    let mut app = app();
    assert_eq!(app.selected_line(), None);
    app.apply(three_node_cluster());
    // 0 Leader, 1 leader, 2 blank, 3 Followers, 4 f1, 5 f2, 6 blank.
    assert_eq!(app.selected_line(), Some(1));
    app.view.page_forward();
    assert_eq!(app.selected_line(), Some(4));
    app.view.page_forward();
    assert_eq!(app.selected_line(), Some(5));

    // A refresh that shrinks the list leaves no selected line.
    app.apply(SnapshotEvent::Snapshot(Snapshot::Cluster {
        members: vec![MemberRecord::new("bolt://10.0.0.2:7687", Role::Follower)],
    }));
    assert_eq!(app.selected_line(), None);
}

// Scrolling keeps the selected line inside a short viewport.
#[test]
fn ensure_cursor_visible_scrolls() {
    let mut app = app();
    let mut members = vec![MemberRecord::new("bolt://10.0.0.1:7687", Role::Leader)];
    members.extend(
        (1..=10)
            .map(|i| MemberRecord::new(format!("bolt://10.0.1.{}:7687", i), Role::ReadReplica)),
    );
    app.apply(SnapshotEvent::Snapshot(Snapshot::Cluster { members }));
    app.viewport_height = 4;
    assert_eq!(app.selected_line(), Some(1));
    assert_eq!(app.scroll_offset, 0);

    app.on_key(key(KeyCode::End));
    // 0 Leader, 1 leader, 2 blank, 3 Read replicas, 4..=13 replicas.
    assert_eq!(app.selected_line(), Some(13));
    assert_eq!(app.scroll_offset, 10);

    app.on_key(key(KeyCode::Home));
    assert_eq!(app.scroll_offset, 0);
}

// Full frame shows header stats and role sections.
#[test]
fn render_frame_shows_topology() {
    let mut app = app();
    app.apply(three_node_cluster());
    let screen = draw(&app, 100, 16);
    assert!(screen.contains("cluster-overview"));
    assert!(screen.contains(OWN));
    assert!(screen.contains("• cluster •"));
    assert!(screen.contains("members: 3"));
    assert!(screen.contains("Topology"));
    assert!(screen.contains("Leader"));
    assert!(screen.contains("Followers"));
    assert!(!screen.contains("Read replicas"));
    assert!(screen.contains("▸ 10.0.0.1:7687"));
}

// Before any snapshot the frame renders with the own address selected.
#[test]
fn render_frame_before_first_snapshot() {
    let app = app();
    let screen = draw(&app, 100, 12);
    assert!(screen.contains("connecting"));
    assert!(screen.contains("members: 0"));
    assert!(screen.contains(&format!("▸ {}", OWN)));
}

// Standalone mode titles the single section "Server".
#[test]
fn render_frame_standalone() {
    let mut app = app();
    app.apply(SnapshotEvent::Snapshot(Snapshot::Standalone));
    let screen = draw(&app, 100, 12);
    assert!(screen.contains("standalone"));
    assert!(screen.contains("Server"));
    assert!(!screen.contains("Leader"));
}

// Tiny terminals render without panicking.
#[test]
fn render_frame_tiny_terminal() {
    let mut app = app();
    app.apply(three_node_cluster());
    let _ = draw(&app, 10, 6);
}

// File source decodes the overview JSON on every fetch.
#[tokio::test]
async fn file_source_reads_overview() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"mode": "CORE", "members": [{{"addresses": ["bolt://10.0.0.9:7687"], "role": "READ_REPLICA"}}]}}"#
    )
    .unwrap();
    let source = FileSnapshotSource::new(file.path().to_path_buf());
    let snapshot = source.fetch().await.unwrap();
    assert_eq!(
        snapshot,
        Snapshot::Cluster {
            members: vec![MemberRecord::new("bolt://10.0.0.9:7687", Role::ReadReplica)],
        }
    );
    assert_eq!(source.describe(), file.path().display().to_string());
}

// File source maps missing files and bad JSON to source errors.
#[tokio::test]
async fn file_source_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = FileSnapshotSource::new(dir.path().join("absent.json"));
    assert!(matches!(missing.fetch().await, Err(SourceError::Io(_))));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    let garbled = FileSnapshotSource::new(file.path().to_path_buf());
    assert!(matches!(garbled.fetch().await, Err(SourceError::Parse(_))));
}

// HTTP source assumes http:// for bare endpoints.
#[test]
fn http_source_normalizes_scheme() {
    let client = reqwest::Client::new();
    assert_eq!(
        HttpSnapshotSource::new(client.clone(), "127.0.0.1:7474/cluster/overview").describe(),
        "http://127.0.0.1:7474/cluster/overview"
    );
    assert_eq!(
        HttpSnapshotSource::new(client, "https://db.example:7473/overview").describe(),
        "https://db.example:7473/overview"
    );
}

// HTTP source reports connection failures as request errors.
#[tokio::test]
async fn http_source_unreachable_is_request_error() {
    // Port 9 (discard) on localhost is almost never listening.
    let source = HttpSnapshotSource::new(reqwest::Client::new(), "http://127.0.0.1:9/overview");
    assert!(matches!(source.fetch().await, Err(SourceError::Request(_))));
}

// Args parse with defaults and reject conflicting sources.
#[test]
fn args_parse_and_conflict() {
    let args = Args::try_parse_from(["cluster-overview", "--addr", OWN]).unwrap();
    assert_eq!(args.addr, OWN);
    assert_eq!(args.refresh_ms, 1000);
    assert!(matches!(args.theme, ThemeName::Nord));

    let conflict = Args::try_parse_from([
        "cluster-overview",
        "--addr",
        OWN,
        "--url",
        "http://x/overview",
        "--snapshot-file",
        "overview.json",
    ]);
    assert!(conflict.is_err());
}

// Chinese labels swap in the chrome text.
#[test]
fn zh_labels_render() {
    let mut app = App::new(
        OverviewConfig::new(OWN),
        "test".to_string(),
        ThemeName::DoomNordLight,
        LangName::Zh,
    );
    app.apply(three_node_cluster());
    assert_eq!(app.mode_label(), "集群");
    assert_eq!(app.theme.labels.pane_topology, "拓扑");
}

// Subscriber installation failures are reported on both writer paths.
#[test]
fn init_logging_reports_install_failure() {
    let log = tempfile::NamedTempFile::new().unwrap();
    let to_file = Args::try_parse_from([
        "cluster-overview",
        "--addr",
        OWN,
        "--log-file",
        log.path().to_str().unwrap(),
    ])
    .unwrap();
    assert!(init_logging(&to_file).is_ok());

    // A global subscriber is now set, so a second install must fail.
    let to_sink = Args::try_parse_from(["cluster-overview", "--addr", OWN]).unwrap();
    let err = init_logging(&to_sink).unwrap_err();
    assert!(err.to_string().contains("installing tracing subscriber"));
    assert!(init_logging(&to_file).is_err());
}

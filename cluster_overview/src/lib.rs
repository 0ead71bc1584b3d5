/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Live cluster-topology panel.
//!
//! Shows the current membership of a database cluster as three
//! role sections (leader, followers, read replicas) and lets an
//! operator move a cursor across them and pin palette highlights to
//! individual servers, while snapshots keep arriving underneath.
//!
//! The pieces:
//!
//! - [`PaletteAssigner`]: a fixed set of highlight swatches handed
//!   out to and reclaimed from server addresses.
//! - [`TopologyView`]: role lists rebuilt from each [`Snapshot`],
//!   the selection [`Cursor`], and [`TopologyView::render_content`].
//! - [`spawn_poller`] / [`SnapshotFeed`]: move snapshots from a
//!   [`SnapshotSource`] running on its own task to the UI owner.
//! - [`RedrawSignal`]: last-write-wins "content is stale"
//!   notification for the renderer.
//!
//! Everything except the source runs on one UI task; nothing here
//! blocks, and nothing here is persisted.

pub mod config;
pub mod error;
pub mod palette;
pub mod redraw;
pub mod role;
pub mod snapshot;
pub mod subscription;
pub mod topology;

pub use config::OverviewConfig;
pub use error::SourceError;
pub use palette::HighlightStyle;
pub use palette::PaletteAssigner;
pub use redraw::RedrawSignal;
pub use role::Role;
pub use snapshot::DeploymentMode;
pub use snapshot::MemberRecord;
pub use snapshot::Snapshot;
pub use subscription::SnapshotEvent;
pub use subscription::SnapshotFeed;
pub use subscription::SnapshotPublisher;
pub use subscription::SnapshotSource;
pub use subscription::StandaloneSource;
pub use subscription::spawn_poller;
pub use topology::Cursor;
pub use topology::RenderedContent;
pub use topology::TopologyView;

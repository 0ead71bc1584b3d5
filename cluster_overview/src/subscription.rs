/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Delivery of snapshots from a producer task to the UI owner.
//!
//! A [`SnapshotSource`] runs on its own tokio task via
//! [`spawn_poller`] and never touches the view. Results arrive on a
//! [`SnapshotFeed`] that the UI task drains and hands to
//! [`crate::TopologyView::apply`].

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::SourceError;
use crate::snapshot::Snapshot;

/// Bounded depth of the feed. Snapshots are whole-state, so a slow
/// consumer only needs the most recent few.
const FEED_CAPACITY: usize = 4;

/// One delivery from a snapshot source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotEvent {
    /// A fresh topology.
    Snapshot(Snapshot),
    /// The source could not produce a topology this round.
    Unavailable(String),
}

impl From<Result<Snapshot, SourceError>> for SnapshotEvent {
    fn from(result: Result<Snapshot, SourceError>) -> Self {
        match result {
            Ok(snapshot) => SnapshotEvent::Snapshot(snapshot),
            Err(e) => SnapshotEvent::Unavailable(e.to_string()),
        }
    }
}

/// Something that can produce cluster snapshots on demand.
#[async_trait]
pub trait SnapshotSource: Send + Sync + 'static {
    /// Fetch the current topology.
    async fn fetch(&self) -> Result<Snapshot, SourceError>;

    /// Short description for logs and the status header.
    fn describe(&self) -> String;
}

/// Receiving end of a snapshot source.
#[derive(Debug)]
pub struct SnapshotFeed {
    rx: mpsc::Receiver<SnapshotEvent>,
}

/// Sending end of a [`SnapshotFeed`], for producers that push rather
/// than poll.
#[derive(Debug, Clone)]
pub struct SnapshotPublisher {
    tx: mpsc::Sender<SnapshotEvent>,
}

impl SnapshotPublisher {
    /// Deliver an event. Returns false once the feed has been dropped.
    pub async fn publish(&self, event: SnapshotEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }

    /// Whether the receiving feed has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl SnapshotFeed {
    /// Create a connected publisher/feed pair.
    pub fn channel() -> (SnapshotPublisher, SnapshotFeed) {
        let (tx, rx) = mpsc::channel(FEED_CAPACITY);
        (SnapshotPublisher { tx }, SnapshotFeed { rx })
    }

    /// Next event, or `None` once every publisher has stopped.
    pub async fn next(&mut self) -> Option<SnapshotEvent> {
        self.rx.recv().await
    }

    /// Non-blocking poll for an already-delivered event.
    pub fn try_next(&mut self) -> Option<SnapshotEvent> {
        self.rx.try_recv().ok()
    }
}

/// Poll `source` every `interval` on a background task.
///
/// The first fetch happens immediately. The task exits when the
/// returned feed is dropped.
pub fn spawn_poller<S: SnapshotSource>(
    source: S,
    interval: Duration,
) -> (SnapshotFeed, JoinHandle<()>) {
    let (publisher, feed) = SnapshotFeed::channel();
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let description = source.describe();
        loop {
            tokio::select! {
                _ = publisher.tx.closed() => break,
                _ = ticker.tick() => {}
            }
            let result = source.fetch().await;
            if let Err(e) = &result {
                tracing::warn!(source = %description, "snapshot fetch failed: {}", e);
            }
            if !publisher.publish(result.into()).await {
                break;
            }
        }
        tracing::debug!(source = %description, "snapshot poller stopped");
    });
    (feed, handle)
}

/// Source for a server that is not part of a cluster.
#[derive(Debug, Clone, Default)]
pub struct StandaloneSource;

#[async_trait]
impl SnapshotSource for StandaloneSource {
    async fn fetch(&self) -> Result<Snapshot, SourceError> {
        Ok(Snapshot::Standalone)
    }

    fn describe(&self) -> String {
        "standalone".to_string()
    }
}

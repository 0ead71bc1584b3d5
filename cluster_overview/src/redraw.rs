/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use tokio::sync::watch;

/// Fire-and-forget "content is stale" notification.
///
/// Backed by a `watch` generation counter: requests never block or
/// queue, and a renderer that falls behind only ever sees the latest
/// generation. Clones share the same channel.
#[derive(Debug, Clone)]
pub struct RedrawSignal {
    tx: watch::Sender<u64>,
}

impl Default for RedrawSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl RedrawSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// Mark rendered content as stale.
    pub fn request(&self) {
        self.tx.send_modify(|generation| *generation += 1);
    }

    /// Number of requests made so far.
    pub fn generation(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Register a renderer. The receiver observes every request made
    /// after this call.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

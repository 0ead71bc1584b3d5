/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::path::PathBuf;

use async_trait::async_trait;
use cluster_overview::Snapshot;
use cluster_overview::SnapshotSource;
use cluster_overview::SourceError;

/// Polls an HTTP endpoint that serves the JSON cluster overview.
pub(crate) struct HttpSnapshotSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSnapshotSource {
    /// `url` should include the scheme (e.g.
    /// `http://host:port/cluster/overview`); a bare `host:port/...`
    /// is assumed to be plain HTTP.
    pub(crate) fn new(client: reqwest::Client, url: &str) -> Self {
        let url = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("http://{}", url)
        };
        Self { client, url }
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch(&self) -> Result<Snapshot, SourceError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status().as_u16()));
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;
        Ok(Snapshot::from_json(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Re-reads a JSON cluster overview from disk on every fetch.
pub(crate) struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn fetch(&self) -> Result<Snapshot, SourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(Snapshot::from_json(&bytes)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

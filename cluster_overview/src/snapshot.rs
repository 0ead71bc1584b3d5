/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Point-in-time cluster membership as delivered by a snapshot source.
//!
//! The wire shape is the JSON cluster overview:
//!
//! ```json
//! {"mode": "CORE",
//!  "members": [{"addresses": ["bolt://10.0.0.1:7687"], "role": "LEADER"}]}
//! ```
//!
//! `CORE` and `READ_REPLICA` are clustered deployments; any other
//! mode is treated as a single standalone server.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::role::Role;

/// Deployment mode of the server that produced the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentMode {
    /// A lone server with no role partitioning.
    Standalone,
    /// A member of a clustered deployment.
    Clustered,
}

/// One member record from the cluster overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Advertised addresses in server preference order. Only the
    /// first is displayed. Non-string entries are dropped.
    #[serde(default, deserialize_with = "lenient_addresses")]
    pub addresses: Vec<String>,
    /// Membership role, or `None` when the server reported a role
    /// this viewer does not know about.
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
}

impl MemberRecord {
    /// Convenience constructor for a member with one advertised
    /// address.
    pub fn new(address: impl Into<String>, role: Role) -> Self {
        Self {
            addresses: vec![address.into()],
            role: Some(role),
        }
    }

    /// Network location of the first advertised address, if any.
    pub fn display_address(&self) -> Option<String> {
        self.addresses.first().map(|a| network_location(a))
    }
}

/// Cluster membership at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    /// Single server; the viewer's own address stands in for it.
    Standalone,
    /// Clustered deployment with its member list in server order.
    Cluster { members: Vec<MemberRecord> },
}

impl Snapshot {
    /// Mode implied by this snapshot's shape.
    pub fn mode(&self) -> DeploymentMode {
        match self {
            Snapshot::Standalone => DeploymentMode::Standalone,
            Snapshot::Cluster { .. } => DeploymentMode::Clustered,
        }
    }

    /// Decode the JSON cluster overview.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let wire: WireSnapshot = serde_json::from_slice(bytes)?;
        Ok(wire.into())
    }
}

/// Serialized form of [`Snapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSnapshot {
    /// Absent or non-string modes decode as `None` (standalone).
    #[serde(default, deserialize_with = "lenient_string")]
    pub mode: Option<String>,
    /// Entries that are not member objects are dropped.
    #[serde(default, deserialize_with = "lenient_members")]
    pub members: Vec<MemberRecord>,
}

impl From<WireSnapshot> for Snapshot {
    fn from(wire: WireSnapshot) -> Self {
        match wire.mode.as_deref() {
            Some("CORE" | "READ_REPLICA") => Snapshot::Cluster {
                members: wire.members,
            },
            _ => Snapshot::Standalone,
        }
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        WireSnapshot::deserialize(deserializer).map(Snapshot::from)
    }
}

// The lenient_* helpers accept any JSON value so that one odd field
// costs at most its member, never the whole snapshot.

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).map(str::to_string))
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok()))
}

fn lenient_addresses<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_members<'de, D>(deserializer: D) -> Result<Vec<MemberRecord>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Reduce an advertised address to its network location,
/// `[user[:password]@]host[:port]`.
///
/// `bolt://10.0.0.1:7687/` becomes `10.0.0.1:7687`. A port written
/// out in the address is kept even when it is the scheme's default
/// (`http://10.0.0.1:80` stays `10.0.0.1:80`). Strings that do not
/// parse as a URL with a host (e.g. a bare `10.0.0.1:7687`) are
/// returned unchanged.
pub fn network_location(address: &str) -> String {
    let Ok(url) = Url::parse(address) else {
        return address.to_string();
    };
    let Some(host) = url.host_str().filter(|h| !h.is_empty()) else {
        return address.to_string();
    };

    let mut netloc = String::new();
    if !url.username().is_empty() {
        netloc.push_str(url.username());
        if let Some(password) = url.password() {
            netloc.push(':');
            netloc.push_str(password);
        }
        netloc.push('@');
    }
    netloc.push_str(host);
    if let Some(port) = url.port().or_else(|| written_default_port(address, &url)) {
        netloc.push_str(&format!(":{}", port));
    }
    netloc
}

/// `Url` elides a port equal to the scheme default; recover it when
/// the authority in `address` spells it out.
fn written_default_port(address: &str, url: &Url) -> Option<u16> {
    let port = url.port_or_known_default()?;
    let (_, rest) = address.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    authority
        .ends_with(&format!(":{}", port))
        .then_some(port)
}

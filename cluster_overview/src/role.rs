/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Cluster membership category for a single server.
///
/// Declaration order is significant: it is the order in which roles
/// are navigated and rendered, and never changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Leader,
    Follower,
    ReadReplica,
}

impl Role {
    /// All roles in navigation/render order.
    pub const ALL: [Role; 3] = [Role::Leader, Role::Follower, Role::ReadReplica];

    /// Position of this role within [`Role::ALL`].
    pub fn ordinal(self) -> usize {
        match self {
            Role::Leader => 0,
            Role::Follower => 1,
            Role::ReadReplica => 2,
        }
    }

    /// The role after this one, wrapping from the last back to the first.
    pub fn next(self) -> Role {
        Role::ALL[(self.ordinal() + 1) % Role::ALL.len()]
    }

    /// The role before this one, wrapping from the first to the last.
    pub fn prev(self) -> Role {
        Role::ALL[(self.ordinal() + Role::ALL.len() - 1) % Role::ALL.len()]
    }

    /// Wire name as reported by the cluster overview.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Leader => "LEADER",
            Role::Follower => "FOLLOWER",
            Role::ReadReplica => "READ_REPLICA",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role string is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEADER" => Ok(Role::Leader),
            "FOLLOWER" => Ok(Role::Follower),
            "READ_REPLICA" => Ok(Role::ReadReplica),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Action names and the lifecycle states that gate them.
//!
//! A volume is either unstarted or running, and the set of actions it
//! advertises is a fixed function of that state. Replicas advertise the
//! same actions in every mode; the controller decides whether a rebuild
//! request is legal when it receives it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

/// Actions a volume can advertise.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VolumeAction {
    /// Attach replicas and bring the volume up
    Start,
    /// Stop serving I/O and detach all replicas
    Shutdown,
    /// Take a named snapshot
    Snapshot,
    /// Revert to a named snapshot
    Revert,
}

impl VolumeAction {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Actions a replica advertises.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReplicaAction {
    /// Ask the replica which disks need to be synced before it can join
    PrepareRebuild,
    /// Confirm a finished rebuild and promote the replica
    VerifyRebuild,
}

impl ReplicaAction {
    /// Every replica action, in the order links are requested.
    pub const ALL: &'static [ReplicaAction] =
        &[ReplicaAction::PrepareRebuild, ReplicaAction::VerifyRebuild];

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Lifecycle state of a volume as seen through its representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum VolumeState {
    /// No replicas are attached; the volume has never been started or has
    /// been shut down
    Unstarted,
    /// At least one replica is attached
    Running,
}

impl VolumeState {
    /// Derive the state from the number of attached replicas.
    pub fn from_replica_count(replica_count: u32) -> Self {
        if replica_count == 0 {
            VolumeState::Unstarted
        } else {
            VolumeState::Running
        }
    }

    /// The actions legal in this state.
    pub const fn actions(self) -> &'static [VolumeAction] {
        match self {
            VolumeState::Unstarted => &[VolumeAction::Start],
            VolumeState::Running => &[
                VolumeAction::Shutdown,
                VolumeAction::Snapshot,
                VolumeAction::Revert,
            ],
        }
    }
}

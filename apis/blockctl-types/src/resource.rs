// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Representation builders
//!
//! Builders turn controller state into a representation and attach one
//! action link per legal action. They never construct URLs themselves: the
//! HTTP layer that serves the representation knows its own base URL and
//! routing, so it supplies an [`ActionLinker`].

use crate::actions::{ReplicaAction, VolumeState};
use crate::id::encode_id;
use crate::model::{Replica, ReplicaMode, ResourceHeader, Volume};

/// Registry type name of volumes
pub const VOLUME_TYPE: &str = "volume";

/// Registry type name of replicas
pub const REPLICA_TYPE: &str = "replica";

/// The canonical location of a resource: its type and encoded id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRef<'a> {
    pub resource_type: &'a str,
    pub id: &'a str,
}

impl<'a> From<&'a ResourceHeader> for ResourceRef<'a> {
    fn from(header: &'a ResourceHeader) -> Self {
        ResourceRef {
            resource_type: &header.resource_type,
            id: &header.id,
        }
    }
}

/// Builds the URL a client invokes to run `action` on `resource`.
pub trait ActionLinker {
    fn action_link(&self, resource: ResourceRef<'_>, action: &str) -> String;
}

impl<F> ActionLinker for F
where
    F: Fn(ResourceRef<'_>, &str) -> String,
{
    fn action_link(&self, resource: ResourceRef<'_>, action: &str) -> String {
        self(resource, action)
    }
}

fn attach_actions<L, I>(linker: &L, header: &mut ResourceHeader, actions: I)
where
    L: ActionLinker + ?Sized,
    I: IntoIterator<Item = &'static str>,
{
    for action in actions {
        let url = linker.action_link(ResourceRef::from(&*header), action);
        header.actions.insert(action.to_string(), url);
    }
}

impl Volume {
    /// Build the representation of a volume from its current state.
    ///
    /// A volume with no replicas is unstarted and only offers `start`; once
    /// replicas are attached it offers `shutdown`, `snapshot` and `revert`.
    pub fn new<L>(linker: &L, name: &str, read_only: bool, replica_count: u32) -> Volume
    where
        L: ActionLinker + ?Sized,
    {
        let state = VolumeState::from_replica_count(replica_count);
        let mut resource = ResourceHeader::new(VOLUME_TYPE, encode_id(name));
        attach_actions(
            linker,
            &mut resource,
            state.actions().iter().map(|a| a.as_str()),
        );

        tracing::trace!(name, %state, replica_count, "built volume representation");

        Volume {
            resource,
            name: name.to_string(),
            replica_count,
            read_only,
        }
    }

    /// The lifecycle state this representation reflects.
    pub fn state(&self) -> VolumeState {
        VolumeState::from_replica_count(self.replica_count)
    }
}

impl Replica {
    /// Build the representation of a replica.
    ///
    /// Rebuild actions are offered in every mode.
    pub fn new<L>(linker: &L, address: &str, mode: ReplicaMode) -> Replica
    where
        L: ActionLinker + ?Sized,
    {
        let mut resource = ResourceHeader::new(REPLICA_TYPE, encode_id(address));
        attach_actions(
            linker,
            &mut resource,
            ReplicaAction::ALL.iter().map(|a| a.as_str()),
        );

        tracing::trace!(address, %mode, "built replica representation");

        Replica {
            resource,
            address: address.to_string(),
            mode,
        }
    }
}

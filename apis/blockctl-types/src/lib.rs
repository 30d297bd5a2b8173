// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Resource model for the block volume controller management API.
//!
//! The controller exposes two resources, volumes and the replicas backing
//! them, plus a handful of action payloads. This crate describes their wire
//! shape, decides which actions a resource currently advertises, and builds
//! the schema catalog clients use to discover the API surface. It does not
//! talk to the volume engine; callers hand in the engine's current state and
//! get a representation back.
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |---|---|
//! | [`id`] | Reversible base64 resource identifiers. |
//! | [`actions`] | Action names and the state to action-set mapping. |
//! | [`model`] | Volume, replica and payload types. |
//! | [`resource`] | Representation builders and the [`ActionLinker`] seam. |
//! | [`links`] | [`BaseUrlLinker`], a configurable [`ActionLinker`]. |
//! | [`schema`] | The build-once [`Registry`] of types, methods and actions. |
//! | [`error`] | [`IdError`] and [`ConfigError`]. |
//!
//! ## Example
//!
//! ```
//! use blockctl_types::{ResourceRef, Volume};
//!
//! let linker = |r: ResourceRef<'_>, action: &str| {
//!     format!("http://ctl/v1/{}s/{}?action={}", r.resource_type, r.id, action)
//! };
//! let volume = Volume::new(&linker, "vol-1", false, 0);
//! assert_eq!(volume.resource.id, "dm9sLTE=");
//! assert!(volume.resource.actions.contains_key("start"));
//! ```

pub mod actions;
pub mod error;
pub mod id;
pub mod links;
pub mod model;
pub mod resource;
pub mod schema;

pub use actions::{ReplicaAction, VolumeAction, VolumeState};
pub use error::{ConfigError, IdError};
pub use id::{decode_id, encode_id};
pub use links::{BaseUrlLinker, LinkConfig};
pub use model::*;
pub use resource::{ActionLinker, ResourceRef};
pub use schema::{ActionSchema, Field, Method, Registry, Schema, WriteOp};

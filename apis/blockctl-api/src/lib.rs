// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Dropshot API trait for the block volume controller.
//!
//! The controller fronts a single volume and the replicas that back it.
//! Resources are returned as hypermedia representations built by
//! `blockctl-types`: every volume and replica carries an encoded `id`, a
//! `type` and a map of action links valid for its current state.
//!
//! ## Endpoints
//!
//! - `GET /v1/volumes` - List volumes
//! - `GET /v1/volumes/{id}` - Get a volume
//! - `POST /v1/volumes/{id}?action=...` - Start, shut down, snapshot or revert
//! - `GET /v1/replicas` - List replicas
//! - `POST /v1/replicas` - Add a replica
//! - `GET /v1/replicas/{id}` - Get a replica
//! - `PUT /v1/replicas/{id}` - Change a replica's mode
//! - `DELETE /v1/replicas/{id}` - Remove a replica
//! - `POST /v1/replicas/{id}?action=...` - Rebuild coordination
//! - `GET /v1/schemas` and `GET /v1/schemas/{id}` - Type catalog
//! - `GET /v1/stats` - I/O statistics
//! - `POST /v1/journal`, `/v1/resize`, `/v1/delete`, `/v1/timeout` - Maintenance
//!
//! `{id}` is the base64 encoding of the volume name or replica address.
//! Ids that do not decode are answered with 404.

use blockctl_types::{
    DeleteReplicaOutput, JournalInput, Replica, ResizeInput, Schema, Timeout, Volume, VolumeStats,
};
use dropshot::{
    HttpError, HttpResponseCreated, HttpResponseDeleted, HttpResponseOk,
    HttpResponseUpdatedNoContent, Path, Query, RequestContext, TypedBody,
};

pub mod types;
pub use types::*;

/// Block Volume Controller API
///
/// Manages one block volume and its replicas.
#[dropshot::api_description]
pub trait BlockctlApi {
    /// Context type for request handlers
    type Context: Send + Sync + 'static;

    // ------------------------------------------------------------------
    // Volumes
    // ------------------------------------------------------------------

    /// List volumes
    #[endpoint {
        method = GET,
        path = "/v1/volumes",
        tags = ["volumes"],
    }]
    async fn list_volumes(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<Collection<Volume>>, HttpError>;

    /// Get a volume
    ///
    /// Returns 404 if the id does not decode or names no volume.
    #[endpoint {
        method = GET,
        path = "/v1/volumes/{id}",
        tags = ["volumes"],
    }]
    async fn get_volume(
        rqctx: RequestContext<Self::Context>,
        path: Path<IdPath>,
    ) -> Result<HttpResponseOk<Volume>, HttpError>;

    /// Perform a volume action
    ///
    /// `start`, `shutdown` and `revert` return the updated volume;
    /// `snapshot` returns the snapshot result. Returns 409 if the action is
    /// not offered in the volume's current state.
    #[endpoint {
        method = POST,
        path = "/v1/volumes/{id}",
        tags = ["volumes"],
    }]
    async fn volume_action(
        rqctx: RequestContext<Self::Context>,
        path: Path<IdPath>,
        query: Query<VolumeActionQuery>,
        body: TypedBody<serde_json::Value>,
    ) -> Result<HttpResponseOk<VolumeActionOutput>, HttpError>;

    // ------------------------------------------------------------------
    // Replicas
    // ------------------------------------------------------------------

    /// List replicas
    #[endpoint {
        method = GET,
        path = "/v1/replicas",
        tags = ["replicas"],
    }]
    async fn list_replicas(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<Collection<Replica>>, HttpError>;

    /// Add a replica
    #[endpoint {
        method = POST,
        path = "/v1/replicas",
        tags = ["replicas"],
    }]
    async fn create_replica(
        rqctx: RequestContext<Self::Context>,
        body: TypedBody<CreateReplicaInput>,
    ) -> Result<HttpResponseCreated<Replica>, HttpError>;

    /// Get a replica
    #[endpoint {
        method = GET,
        path = "/v1/replicas/{id}",
        tags = ["replicas"],
    }]
    async fn get_replica(
        rqctx: RequestContext<Self::Context>,
        path: Path<IdPath>,
    ) -> Result<HttpResponseOk<Replica>, HttpError>;

    /// Change a replica's mode
    #[endpoint {
        method = PUT,
        path = "/v1/replicas/{id}",
        tags = ["replicas"],
    }]
    async fn update_replica(
        rqctx: RequestContext<Self::Context>,
        path: Path<IdPath>,
        body: TypedBody<UpdateReplicaInput>,
    ) -> Result<HttpResponseOk<Replica>, HttpError>;

    /// Remove a replica
    #[endpoint {
        method = DELETE,
        path = "/v1/replicas/{id}",
        tags = ["replicas"],
    }]
    async fn delete_replica(
        rqctx: RequestContext<Self::Context>,
        path: Path<IdPath>,
    ) -> Result<HttpResponseDeleted, HttpError>;

    /// Perform a replica action
    ///
    /// `preparerebuild` returns the disks to rebuild from;
    /// `verifyrebuild` returns the replica.
    #[endpoint {
        method = POST,
        path = "/v1/replicas/{id}",
        tags = ["replicas"],
    }]
    async fn replica_action(
        rqctx: RequestContext<Self::Context>,
        path: Path<IdPath>,
        query: Query<ReplicaActionQuery>,
    ) -> Result<HttpResponseOk<ReplicaActionOutput>, HttpError>;

    // ------------------------------------------------------------------
    // Schemas
    // ------------------------------------------------------------------

    /// List all registered types
    #[endpoint {
        method = GET,
        path = "/v1/schemas",
        tags = ["schemas"],
    }]
    async fn list_schemas(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<Collection<Schema>>, HttpError>;

    /// Get one registered type
    #[endpoint {
        method = GET,
        path = "/v1/schemas/{id}",
        tags = ["schemas"],
    }]
    async fn get_schema(
        rqctx: RequestContext<Self::Context>,
        path: Path<SchemaPath>,
    ) -> Result<HttpResponseOk<Schema>, HttpError>;

    // ------------------------------------------------------------------
    // Maintenance
    // ------------------------------------------------------------------

    /// Get volume I/O statistics
    #[endpoint {
        method = GET,
        path = "/v1/stats",
        tags = ["maintenance"],
    }]
    async fn get_stats(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<VolumeStats>, HttpError>;

    /// Dump the request journal
    #[endpoint {
        method = POST,
        path = "/v1/journal",
        tags = ["maintenance"],
    }]
    async fn list_journal(
        rqctx: RequestContext<Self::Context>,
        body: TypedBody<JournalInput>,
    ) -> Result<HttpResponseUpdatedNoContent, HttpError>;

    /// Resize the volume
    #[endpoint {
        method = POST,
        path = "/v1/resize",
        tags = ["maintenance"],
    }]
    async fn resize_volume(
        rqctx: RequestContext<Self::Context>,
        body: TypedBody<ResizeInput>,
    ) -> Result<HttpResponseUpdatedNoContent, HttpError>;

    /// Remove replicas that are in error mode
    #[endpoint {
        method = POST,
        path = "/v1/delete",
        tags = ["maintenance"],
    }]
    async fn delete_failed_replicas(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<DeleteReplicaOutput>, HttpError>;

    /// Set the replica I/O timeout
    #[endpoint {
        method = POST,
        path = "/v1/timeout",
        tags = ["maintenance"],
    }]
    async fn set_timeout(
        rqctx: RequestContext<Self::Context>,
        body: TypedBody<Timeout>,
    ) -> Result<HttpResponseUpdatedNoContent, HttpError>;
}

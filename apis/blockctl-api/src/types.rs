// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Request and response types of the controller API

use blockctl_types::{
    IdError, PrepareRebuildOutput, Registry, Replica, ReplicaAction, ReplicaMode, RevertInput,
    SnapshotInput, SnapshotOutput, StartInput, Volume, VolumeAction, WriteOp, decode_id,
};
use dropshot::HttpError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Path and query parameters
// ============================================================================

/// Path parameter for a single volume or replica
#[derive(Debug, Deserialize, JsonSchema)]
pub struct IdPath {
    /// Base64 encoded volume name or replica address
    pub id: String,
}

/// Path parameter for a schema entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SchemaPath {
    /// Type name, e.g. "volume"
    pub id: String,
}

/// Query parameter for volume actions
#[derive(Debug, Deserialize, JsonSchema)]
pub struct VolumeActionQuery {
    pub action: VolumeAction,
}

/// Query parameter for replica actions
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReplicaActionQuery {
    pub action: ReplicaAction,
}

// ============================================================================
// Bodies
// ============================================================================

/// Request to add a replica to the volume
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateReplicaInput {
    /// Network endpoint of the new replica
    pub address: String,
}

/// Request to change a replica's mode
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateReplicaInput {
    pub mode: ReplicaMode,
}

/// List response envelope
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Collection<T> {
    /// Always "collection"
    #[serde(rename = "type")]
    pub collection_type: String,
    /// Type name of the items
    pub resource_type: String,
    pub data: Vec<T>,
}

impl<T> Collection<T> {
    pub fn new(resource_type: impl Into<String>, data: Vec<T>) -> Self {
        Self {
            collection_type: "collection".to_string(),
            resource_type: resource_type.into(),
            data,
        }
    }
}

/// Parsed input of a volume action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeActionRequest {
    Start(StartInput),
    Shutdown,
    Snapshot(SnapshotInput),
    Revert(RevertInput),
}

impl VolumeActionRequest {
    /// Interpret the raw body of `POST /v1/volumes/{id}?action=<action>`.
    ///
    /// An empty or null body is accepted for every action whose input has
    /// defaults.
    pub fn parse(action: VolumeAction, body: Value) -> Result<Self, HttpError> {
        let body = if body.is_null() {
            Value::Object(Default::default())
        } else {
            body
        };

        let parsed = match action {
            VolumeAction::Start => serde_json::from_value(body).map(VolumeActionRequest::Start),
            VolumeAction::Shutdown => Ok(VolumeActionRequest::Shutdown),
            VolumeAction::Snapshot => {
                serde_json::from_value(body).map(VolumeActionRequest::Snapshot)
            }
            VolumeAction::Revert => serde_json::from_value(body).map(VolumeActionRequest::Revert),
        };

        parsed.map_err(|e| {
            HttpError::for_bad_request(None, format!("Invalid {} input: {}", action, e))
        })
    }

    pub fn action(&self) -> VolumeAction {
        match self {
            VolumeActionRequest::Start(_) => VolumeAction::Start,
            VolumeActionRequest::Shutdown => VolumeAction::Shutdown,
            VolumeActionRequest::Snapshot(_) => VolumeAction::Snapshot,
            VolumeActionRequest::Revert(_) => VolumeAction::Revert,
        }
    }
}

/// Result of a volume action
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum VolumeActionOutput {
    Volume(Volume),
    Snapshot(SnapshotOutput),
}

/// Result of a replica action
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ReplicaActionOutput {
    PrepareRebuild(PrepareRebuildOutput),
    Replica(Replica),
}

// ============================================================================
// Helpers for implementations
// ============================================================================

/// Decode an `{id}` path parameter.
///
/// An id that is not valid codec output cannot name any resource, so it is
/// reported as 404 rather than as a malformed request.
pub fn decode_path_id(id: &str) -> Result<String, HttpError> {
    decode_id(id).map_err(id_not_found)
}

/// Map an [`IdError`] to the HTTP error returned to the client
pub fn id_not_found(err: IdError) -> HttpError {
    HttpError::for_not_found(None, err.to_string())
}

/// Reject a create/update body that sets fields the client may not write.
pub fn check_writable(
    registry: &Registry,
    resource_type: &str,
    op: WriteOp,
    body: &Value,
) -> Result<(), HttpError> {
    let schema = registry.get(resource_type).ok_or_else(|| {
        HttpError::for_internal_error(format!("No schema registered for {}", resource_type))
    })?;

    let Some(object) = body.as_object() else {
        return Err(HttpError::for_bad_request(
            None,
            format!("Expected a JSON object for {}", resource_type),
        ));
    };

    let rejected = schema.unwritable_fields(op, object.keys().map(String::as_str));
    if rejected.is_empty() {
        return Ok(());
    }

    tracing::debug!(resource_type, ?op, ?rejected, "rejecting unwritable fields");
    Err(HttpError::for_bad_request(
        None,
        format!(
            "Field(s) {} of {} cannot be set on {}",
            rejected.join(", "),
            resource_type,
            match op {
                WriteOp::Create => "create",
                WriteOp::Update => "update",
            }
        ),
    ))
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Resource and payload types.
//!
//! Representations are projections of live controller state. They are built
//! fresh for every response (see [`crate::resource`]) and never stored.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use strum::{Display, EnumIter, EnumString, VariantNames};

// ============================================================================
// Resource header
// ============================================================================

/// Common header carried by every resource representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceHeader {
    /// Encoded natural key of the resource
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Registry type name, e.g. "volume"
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub resource_type: String,
    /// Related resources, by relation name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, String>,
    /// Actions currently legal on the resource, name to invocation URL
    #[serde(default)]
    pub actions: BTreeMap<String, String>,
}

impl ResourceHeader {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
            links: BTreeMap::new(),
            actions: BTreeMap::new(),
        }
    }
}

// ============================================================================
// Volumes and replicas
// ============================================================================

/// One logical block device managed by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(flatten)]
    pub resource: ResourceHeader,
    /// Volume name, immutable once created
    pub name: String,
    /// Number of replicas currently attached; zero until the volume starts
    pub replica_count: u32,
    /// Whether the volume rejects writes. Sent as "true"/"false".
    #[serde(with = "bool_string")]
    #[schemars(with = "String")]
    pub read_only: bool,
}

/// Replication role of a replica.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
    VariantNames,
)]
pub enum ReplicaMode {
    /// Serving reads and writes
    #[serde(rename = "RW")]
    #[strum(serialize = "RW")]
    ReadWrite,
    /// Receiving writes while it is rebuilt
    #[serde(rename = "WO")]
    #[strum(serialize = "WO")]
    WriteOnly,
    /// Failed and removed from the I/O path
    #[serde(rename = "ERR")]
    #[strum(serialize = "ERR")]
    Error,
}

/// One replica endpoint in a volume's replication set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Replica {
    #[serde(flatten)]
    pub resource: ResourceHeader,
    /// Network endpoint of the replica, e.g. "tcp://10.0.0.2:9502"
    pub address: String,
    /// Current replication role
    pub mode: ReplicaMode,
}

// ============================================================================
// Action payloads
// ============================================================================

/// Input of the volume `start` action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StartInput {
    /// Addresses of the replicas to attach
    #[serde(default)]
    pub replicas: Vec<String>,
}

/// Input of the volume `snapshot` action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SnapshotInput {
    /// Snapshot name; the controller picks one when empty
    #[serde(default)]
    pub name: String,
}

/// Output of the volume `snapshot` action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SnapshotOutput {
    /// Name of the snapshot that was taken
    pub message: String,
}

/// Input of the volume `revert` action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RevertInput {
    /// Snapshot to revert to
    pub name: String,
}

/// Request to grow a volume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResizeInput {
    /// Volume name
    pub name: String,
    /// New size, with optional unit suffix (e.g. "10G")
    pub size: String,
}

/// Request for the tail of the controller's operation journal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct JournalInput {
    /// Maximum number of entries to print
    pub limit: u32,
}

/// Output of the replica `preparerebuild` action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PrepareRebuildOutput {
    /// Disk files that must be synced to the rebuilding replica
    pub disks: Vec<String>,
}

/// Output of the delete-replica request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DeleteReplicaOutput {
    /// Addresses of the replicas that were removed
    pub replicas: Vec<String>,
}

/// Request to change the controller's replica I/O timeout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Timeout {
    /// Timeout duration, e.g. "15s"
    pub timeout: String,
}

// ============================================================================
// Statistics and errors
// ============================================================================

/// I/O statistics of the volume served by the controller.
///
/// Field names are PascalCase on the wire; existing monitoring clients
/// depend on them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct VolumeStats {
    pub revision_counter: i64,
    pub replica_counter: i64,
    /// Outstanding SCSI I/O count, keyed by opcode
    #[serde(rename = "SCSIIOCount")]
    pub scsi_io_count: BTreeMap<i32, i64>,

    #[serde(rename = "ReadIOPS")]
    pub read_iops: String,
    pub total_read_time: String,
    pub total_read_block_count: String,

    #[serde(rename = "WriteIOPS")]
    pub write_iops: String,
    pub total_write_time: String,
    pub total_write_block_count: String,

    pub used_logical_blocks: String,
    pub used_blocks: String,
    pub sector_size: String,
    pub size: String,
    /// Seconds since the controller started
    pub up_time: f64,
    pub name: String,
}

/// Registration record a replica reports to the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct RegReplica {
    /// Network endpoint of the replica
    pub address: String,
    /// Revision counter of the replica's data
    pub rev_count: String,
    /// Replica backend type
    pub rep_type: String,
    /// Replica state as reported by the replica itself
    pub rep_state: String,
    /// Time since the replica process started. Integer nanoseconds on the wire.
    #[serde(with = "duration_nanos")]
    #[schemars(with = "u64")]
    pub up_time: Duration,
}

/// Error body returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Machine readable error code, e.g. "NotFound"
    pub code: String,
    /// Human readable message
    pub message: String,
    /// Optional extra detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Serde adapter that writes a `bool` as the string "true" or "false".
pub(crate) mod bool_string {
    use serde::de::{self, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(de::Error::invalid_value(
                Unexpected::Str(other),
                &r#""true" or "false""#,
            )),
        }
    }
}

/// Serde adapter that writes a [`Duration`] as integer nanoseconds.
pub(crate) mod duration_nanos {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_nanos()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_nanos)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn volume(read_only: bool) -> Volume {
        Volume {
            resource: ResourceHeader::new("volume", "dm9sLTE="),
            name: "vol-1".to_string(),
            replica_count: 2,
            read_only,
        }
    }

    #[test]
    fn test_read_only_is_a_string() {
        let value = serde_json::to_value(volume(false)).expect("serialize volume");
        assert_eq!(
            value,
            json!({
                "id": "dm9sLTE=",
                "type": "volume",
                "actions": {},
                "name": "vol-1",
                "replicaCount": 2,
                "readOnly": "false",
            })
        );

        let value = serde_json::to_value(volume(true)).expect("serialize volume");
        assert_eq!(value["readOnly"], json!("true"));
    }

    #[test]
    fn test_read_only_parses_strings_only() {
        let parsed: Volume = serde_json::from_value(json!({
            "id": "dm9sLTE=",
            "type": "volume",
            "actions": {},
            "name": "vol-1",
            "replicaCount": 2,
            "readOnly": "true",
        }))
        .expect("parse volume");
        assert!(parsed.read_only);

        for bad in [json!(true), json!("yes"), json!("TRUE")] {
            let result = serde_json::from_value::<Volume>(json!({
                "name": "vol-1",
                "replicaCount": 0,
                "readOnly": bad,
            }));
            assert!(result.is_err(), "readOnly {bad} should be rejected");
        }
    }

    #[test]
    fn test_replica_mode_wire_names() {
        assert_eq!(
            serde_json::to_value(ReplicaMode::WriteOnly).expect("serialize mode"),
            json!("WO")
        );
        assert_eq!(ReplicaMode::Error.to_string(), "ERR");
        assert_eq!("RW".parse::<ReplicaMode>().ok(), Some(ReplicaMode::ReadWrite));
        assert!(serde_json::from_value::<ReplicaMode>(json!("rw")).is_err());
    }

    #[test]
    fn test_input_payloads_tolerate_missing_fields() {
        let start: StartInput = serde_json::from_value(json!({})).expect("parse start");
        assert!(start.replicas.is_empty());

        let snapshot: SnapshotInput =
            serde_json::from_value(json!({"name": "snap-1"})).expect("parse snapshot");
        assert_eq!(snapshot.name, "snap-1");
    }

    #[test]
    fn test_stats_wire_names() {
        let stats = VolumeStats {
            scsi_io_count: BTreeMap::from([(42, 3)]),
            read_iops: "10".to_string(),
            up_time: 1.5,
            ..Default::default()
        };
        let value = serde_json::to_value(&stats).expect("serialize stats");
        assert_eq!(value["SCSIIOCount"], json!({"42": 3}));
        assert_eq!(value["ReadIOPS"], json!("10"));
        assert_eq!(value["UpTime"], json!(1.5));
        assert!(value.get("RevisionCounter").is_some());
        assert!(value.get("TotalWriteBlockCount").is_some());
    }

    #[test]
    fn test_reg_replica_wire_names() {
        let reg = RegReplica {
            address: "tcp://10.0.0.2:9502".to_string(),
            rev_count: "7".to_string(),
            rep_type: "tcp".to_string(),
            rep_state: "open".to_string(),
            up_time: Duration::from_secs(90),
        };
        let value = serde_json::to_value(&reg).expect("serialize registration");
        assert_eq!(
            value,
            json!({
                "Address": "tcp://10.0.0.2:9502",
                "RevCount": "7",
                "RepType": "tcp",
                "RepState": "open",
                "UpTime": 90_000_000_000u64,
            })
        );

        let parsed: RegReplica = serde_json::from_value(value).expect("parse registration");
        assert_eq!(parsed.up_time, Duration::from_secs(90));

        let negative = serde_json::from_value::<RegReplica>(json!({
            "Address": "tcp://a:1",
            "RevCount": "0",
            "RepType": "tcp",
            "RepState": "open",
            "UpTime": -1,
        }));
        assert!(negative.is_err());
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

// Allow expect/unwrap in tests - they provide clear panic messages on failure
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Schema registry consistency and representation wire-format tests.

use std::collections::BTreeSet;

use blockctl_types::{
    ActionSchema, BaseUrlLinker, LinkConfig, Method, Registry, Replica, ReplicaMode, Volume,
    WriteOp,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn action(input: Option<&str>, output: Option<&str>) -> ActionSchema {
    ActionSchema {
        input: input.map(str::to_string),
        output: output.map(str::to_string),
    }
}

#[test]
fn registers_every_type() {
    let registry = Registry::build();
    let ids: BTreeSet<&str> = registry.iter().map(|s| s.id()).collect();

    let expected = BTreeSet::from([
        "apiVersion",
        "delete",
        "error",
        "journalInput",
        "prepareRebuildOutput",
        "replica",
        "resizeInput",
        "revertInput",
        "schema",
        "snapshotInput",
        "snapshotOutput",
        "startInput",
        "stats",
        "timeout",
        "volume",
    ]);
    assert_eq!(ids, expected);
    assert_eq!(registry.len(), expected.len());
}

#[test]
fn volume_actions() {
    let registry = Registry::build();
    let volume = registry.get("volume").expect("volume schema");

    assert_eq!(
        volume.action("snapshot"),
        Some(&action(Some("snapshotInput"), Some("snapshotOutput")))
    );
    assert_eq!(
        volume.action("start"),
        Some(&action(Some("startInput"), Some("volume")))
    );
    assert_eq!(volume.action("shutdown"), Some(&action(None, Some("volume"))));
    assert_eq!(
        volume.action("revert"),
        Some(&action(Some("revertInput"), Some("volume")))
    );
    assert_eq!(volume.resource_actions.len(), 4);
    assert_eq!(volume.collection_methods, vec![Method::Get]);
    assert_eq!(volume.resource_methods, vec![Method::Get]);
}

#[test]
fn replica_schema() {
    let registry = Registry::build();
    let replica = registry.get("replica").expect("replica schema");

    assert_eq!(replica.resource_actions.len(), 1);
    assert_eq!(
        replica.action("preparerebuild"),
        Some(&action(None, Some("prepareRebuildOutput")))
    );
    assert!(replica.allows_collection_method(Method::Post));
    assert!(replica.allows_resource_method(Method::Put));
    assert!(!replica.allows_resource_method(Method::Delete));

    let address = replica.field("address").expect("address field");
    assert!(address.create);
    assert!(!address.update);

    let mode = replica.field("mode").expect("mode field");
    assert!(!mode.create);
    assert!(mode.update);
}

#[test]
fn standalone_action_resources_only_accept_post() {
    let registry = Registry::build();
    for id in ["delete", "timeout"] {
        let schema = registry.get(id).expect("schema");
        assert_eq!(schema.resource_methods, vec![Method::Post], "{id}");
        assert!(!schema.allows_resource_method(Method::Get), "{id}");
    }
}

#[test]
fn action_types_are_registered() {
    let registry = Registry::build();
    for schema in &registry {
        for (name, action) in &schema.resource_actions {
            for type_name in action.input.iter().chain(action.output.iter()) {
                assert!(
                    registry.get(type_name).is_some(),
                    "{}.{} refers to unregistered type {}",
                    schema.id(),
                    name,
                    type_name
                );
            }
        }
    }
}

#[test]
fn only_replica_fields_are_writable() {
    let registry = Registry::build();
    for schema in &registry {
        for (name, field) in &schema.resource_fields {
            let writable = (schema.id(), name.as_str());
            if writable == ("replica", "address") || writable == ("replica", "mode") {
                continue;
            }
            assert!(
                field.is_read_only(),
                "{}.{} should be read-only",
                schema.id(),
                name
            );
        }
    }
}

#[test]
fn volume_fields_are_read_only_for_clients() {
    let registry = Registry::build();
    let volume = registry.get("volume").expect("volume schema");
    assert_eq!(
        volume.unwritable_fields(WriteOp::Update, ["name", "readOnly"]),
        vec!["name", "readOnly"]
    );
}

#[test]
fn schema_entry_wire_format() {
    let registry = Registry::build();
    let value = serde_json::to_value(registry.get("replica").expect("replica schema"))
        .expect("serialize schema");

    assert_eq!(
        value,
        json!({
            "id": "replica",
            "type": "schema",
            "actions": {},
            "pluralName": "replicas",
            "collectionMethods": ["GET", "POST"],
            "resourceMethods": ["GET", "PUT"],
            "resourceFields": {
                "address": {"type": "string", "create": true, "update": false},
                "mode": {
                    "type": "enum",
                    "create": false,
                    "update": true,
                    "options": ["RW", "WO", "ERR"],
                },
            },
            "resourceActions": {
                "preparerebuild": {"output": "prepareRebuildOutput"},
            },
        })
    );
}

#[test]
fn registry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry>();

    let registry = std::sync::Arc::new(Registry::build());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = std::sync::Arc::clone(&registry);
            std::thread::spawn(move || registry.get("volume").map(|s| s.resource_actions.len()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("thread panicked"), Some(4));
    }
}

#[test]
fn unstarted_volume_representation() {
    let linker = BaseUrlLinker::new(&LinkConfig::default()).expect("linker");
    let volume = Volume::new(&linker, "vol-1", false, 0);

    assert_eq!(
        serde_json::to_value(&volume).expect("serialize volume"),
        json!({
            "id": "dm9sLTE=",
            "type": "volume",
            "actions": {
                "start": "http://localhost:9501/v1/volumes/dm9sLTE=?action=start",
            },
            "name": "vol-1",
            "replicaCount": 0,
            "readOnly": "false",
        })
    );
}

#[test]
fn running_volume_representation() {
    let linker = BaseUrlLinker::new(&LinkConfig::default()).expect("linker");
    let volume = Volume::new(&linker, "vol-1", false, 2);
    let value = serde_json::to_value(&volume).expect("serialize volume");

    let actions: BTreeSet<&str> = value["actions"]
        .as_object()
        .expect("actions object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(actions, BTreeSet::from(["revert", "shutdown", "snapshot"]));
}

#[test]
fn replica_representation() {
    let linker = BaseUrlLinker::new(&LinkConfig::default()).expect("linker");
    let replica = Replica::new(&linker, "tcp://10.0.0.2:9502", ReplicaMode::WriteOnly);

    assert_eq!(
        serde_json::to_value(&replica).expect("serialize replica"),
        json!({
            "id": "dGNwOi8vMTAuMC4wLjI6OTUwMg==",
            "type": "replica",
            "actions": {
                "preparerebuild": "http://localhost:9501/v1/replicas/dGNwOi8vMTAuMC4wLjI6OTUwMg==?action=preparerebuild",
                "verifyrebuild": "http://localhost:9501/v1/replicas/dGNwOi8vMTAuMC4wLjI6OTUwMg==?action=verifyrebuild",
            },
            "address": "tcp://10.0.0.2:9502",
            "mode": "WO",
        })
    );
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Schema registry
//!
//! The registry describes every resource and payload type the API speaks:
//! which HTTP methods are allowed on the collection and on a single
//! resource, which fields a client may set at creation or update time, and
//! which actions exist with which input and output types. The HTTP layer
//! serves it for schema discovery and consults it when validating request
//! bodies.
//!
//! Field descriptors are not written by hand. Each type is registered with
//! its Rust definition and the fields are read off the type's JSON schema,
//! so the catalog cannot drift from the structs that are actually
//! serialized.
//!
//! The registry is built once with [`Registry::build`] and is immutable
//! afterwards; share it by reference.

use schemars::JsonSchema;
use schemars::r#gen::SchemaSettings;
use schemars::schema::{InstanceType, Schema as SchemaNode, SchemaObject, SingleOrVec};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use strum::{Display, EnumString, IntoEnumIterator};

use crate::actions::{ReplicaAction, VolumeAction};
use crate::model::{
    ApiError, DeleteReplicaOutput, JournalInput, PrepareRebuildOutput, Replica, ResizeInput,
    ResourceHeader, RevertInput, SnapshotInput, SnapshotOutput, StartInput, Timeout, Volume,
    VolumeStats,
};
use crate::resource::{REPLICA_TYPE, VOLUME_TYPE};

/// Registry type name of schema entries themselves
pub const SCHEMA_TYPE: &str = "schema";

/// Header keys every resource carries. They are server computed and are
/// not listed as fields.
const HEADER_FIELDS: &[&str] = &["id", "type", "links", "actions"];

/// Header key clients echo back in request bodies. Accepted and ignored.
const CLIENT_TYPE_FIELD: &str = "type";

// ============================================================================
// Schema entries
// ============================================================================

/// HTTP methods a collection or resource accepts.
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
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Which kind of client write a payload is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    /// Creating a new resource
    Create,
    /// Updating an existing resource
    Update,
}

/// Descriptor of one field of a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Field {
    /// Wire type: "string", "int", "float", "boolean", "enum",
    /// "array[<item>]", "map[<value>]" or "json"
    #[serde(rename = "type")]
    pub field_type: String,
    /// Clients may set the field when creating the resource
    #[serde(default)]
    pub create: bool,
    /// Clients may change the field on an existing resource
    #[serde(default)]
    pub update: bool,
    /// The field may be null
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,
    /// Allowed values of an enum field
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Field {
    fn of_type(field_type: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            ..Default::default()
        }
    }

    /// Whether a client may supply this field for `op`.
    pub fn is_writable(&self, op: WriteOp) -> bool {
        match op {
            WriteOp::Create => self.create,
            WriteOp::Update => self.update,
        }
    }

    /// Server computed: never accepted from a client.
    pub fn is_read_only(&self) -> bool {
        !self.create && !self.update
    }
}

/// Input and output type names of an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActionSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Registry entry for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(flatten)]
    pub resource: ResourceHeader,
    pub plural_name: String,
    pub collection_methods: Vec<Method>,
    pub resource_methods: Vec<Method>,
    pub resource_fields: BTreeMap<String, Field>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resource_actions: BTreeMap<String, ActionSchema>,
}

impl Schema {
    fn new(id: &str, resource_fields: BTreeMap<String, Field>) -> Self {
        Self {
            resource: ResourceHeader::new(SCHEMA_TYPE, id),
            plural_name: plural_name(id),
            collection_methods: vec![Method::Get],
            resource_methods: vec![Method::Get],
            resource_fields,
            resource_actions: BTreeMap::new(),
        }
    }

    /// The type name this entry describes.
    pub fn id(&self) -> &str {
        &self.resource.id
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.resource_fields.get(name)
    }

    pub fn action(&self, name: &str) -> Option<&ActionSchema> {
        self.resource_actions.get(name)
    }

    pub fn allows_collection_method(&self, method: Method) -> bool {
        self.collection_methods.contains(&method)
    }

    pub fn allows_resource_method(&self, method: Method) -> bool {
        self.resource_methods.contains(&method)
    }

    /// Return the keys of a client payload that the client is not allowed to
    /// set for `op`.
    ///
    /// `type` is ignored. The other header keys (`id`, `links`, `actions`)
    /// are server computed and always reported, as are keys that are not
    /// fields of the type at all.
    pub fn unwritable_fields<'a, I>(&self, op: WriteOp, keys: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter()
            .filter(|key| *key != CLIENT_TYPE_FIELD)
            .filter(|key| !self.field(key).is_some_and(|f| f.is_writable(op)))
            .collect()
    }

    fn set_methods(&mut self, collection: &[Method], resource: &[Method]) {
        self.collection_methods = collection.to_vec();
        self.resource_methods = resource.to_vec();
    }

    fn set_writable(&mut self, field: &str, op: WriteOp) {
        match self.resource_fields.get_mut(field) {
            Some(f) => match op {
                WriteOp::Create => f.create = true,
                WriteOp::Update => f.update = true,
            },
            None => tracing::warn!(schema = self.id(), field, "no such field to mark writable"),
        }
    }

    fn set_action(&mut self, name: &str, input: Option<&str>, output: Option<&str>) {
        self.resource_actions.insert(
            name.to_string(),
            ActionSchema {
                input: input.map(str::to_string),
                output: output.map(str::to_string),
            },
        );
    }
}

/// Guess the collection name of a type.
pub fn plural_name(name: &str) -> String {
    const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

    if name.ends_with("ss") || name.ends_with("sh") || name.ends_with("ch") || name.ends_with('x')
    {
        return format!("{name}es");
    }
    if name.ends_with('s') {
        return name.to_string();
    }
    if let Some(stem) = name.strip_suffix('y') {
        if !stem.is_empty() && !stem.ends_with(VOWELS) {
            return format!("{stem}ies");
        }
    }
    format!("{name}s")
}

// ============================================================================
// Registry
// ============================================================================

/// Immutable catalog of every type the API exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    schemas: BTreeMap<String, Schema>,
}

impl Registry {
    /// Build the catalog. Call once during startup.
    pub fn build() -> Registry {
        let mut builder = RegistryBuilder::new();

        builder.add_type::<ApiError>("error");
        builder.add_type::<ResourceHeader>("apiVersion");
        builder.add_type::<Schema>(SCHEMA_TYPE);
        builder.add_type::<StartInput>("startInput");
        builder.add_type::<SnapshotOutput>("snapshotOutput");
        builder.add_type::<SnapshotInput>("snapshotInput");
        builder.add_type::<RevertInput>("revertInput");
        builder.add_type::<ResizeInput>("resizeInput");
        builder.add_type::<JournalInput>("journalInput");
        builder.add_type::<PrepareRebuildOutput>("prepareRebuildOutput");

        let replica = builder.add_type::<Replica>(REPLICA_TYPE);
        replica.set_methods(&[Method::Get, Method::Post], &[Method::Get, Method::Put]);
        replica.set_writable("address", WriteOp::Create);
        replica.set_writable("mode", WriteOp::Update);
        replica.set_action(
            ReplicaAction::PrepareRebuild.as_str(),
            None,
            Some("prepareRebuildOutput"),
        );

        builder.add_type::<VolumeStats>("stats");

        let volume = builder.add_type::<Volume>(VOLUME_TYPE);
        for action in VolumeAction::iter() {
            let (input, output) = volume_action_types(action);
            volume.set_action(action.as_str(), input, Some(output));
        }

        let delete = builder.add_type::<DeleteReplicaOutput>("delete");
        delete.set_methods(&[Method::Get], &[Method::Post]);

        let timeout = builder.add_type::<Timeout>("timeout");
        timeout.set_methods(&[Method::Get], &[Method::Post]);

        let registry = builder.finish();
        tracing::debug!(types = registry.len(), "built schema registry");
        registry
    }

    /// Look up the entry for a type name.
    pub fn get(&self, id: &str) -> Option<&Schema> {
        self.schemas.get(id)
    }

    /// All entries, ordered by type name.
    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Schema;
    type IntoIter = std::collections::btree_map::Values<'a, String, Schema>;

    fn into_iter(self) -> Self::IntoIter {
        self.schemas.values()
    }
}

/// Input and output type of each volume action.
fn volume_action_types(action: VolumeAction) -> (Option<&'static str>, &'static str) {
    match action {
        VolumeAction::Start => (Some("startInput"), VOLUME_TYPE),
        VolumeAction::Shutdown => (None, VOLUME_TYPE),
        VolumeAction::Snapshot => (Some("snapshotInput"), "snapshotOutput"),
        VolumeAction::Revert => (Some("revertInput"), VOLUME_TYPE),
    }
}

struct RegistryBuilder {
    settings: SchemaSettings,
    schemas: BTreeMap<String, Schema>,
}

impl RegistryBuilder {
    fn new() -> Self {
        Self {
            settings: SchemaSettings::draft07().with(|s| s.inline_subschemas = true),
            schemas: BTreeMap::new(),
        }
    }

    /// Register `T` under `id` with default methods and no writable fields.
    fn add_type<T: JsonSchema>(&mut self, id: &str) -> &mut Schema {
        let schema = Schema::new(id, self.reflect_fields::<T>());
        match self.schemas.entry(id.to_string()) {
            Entry::Vacant(slot) => slot.insert(schema),
            Entry::Occupied(mut slot) => {
                slot.insert(schema);
                slot.into_mut()
            }
        }
    }

    fn reflect_fields<T: JsonSchema>(&self) -> BTreeMap<String, Field> {
        let root = self
            .settings
            .clone()
            .into_generator()
            .into_root_schema_for::<T>();

        root.schema
            .object
            .iter()
            .flat_map(|object| object.properties.iter())
            .filter(|(name, _)| !HEADER_FIELDS.contains(&name.as_str()))
            .map(|(name, node)| (name.clone(), describe(node)))
            .collect()
    }

    fn finish(self) -> Registry {
        Registry {
            schemas: self.schemas,
        }
    }
}

// ============================================================================
// JSON schema reflection
// ============================================================================

fn describe(node: &SchemaNode) -> Field {
    let SchemaNode::Object(object) = node else {
        return Field::of_type("json");
    };

    // A documented field of a named type comes wrapped as `allOf: [<type>]`.
    if let Some([inner]) = object
        .subschemas
        .as_ref()
        .and_then(|s| s.all_of.as_deref())
    {
        if object.instance_type.is_none() {
            return describe(inner);
        }
    }

    let (instance, nullable) = primary_instance_type(object);
    let options = enum_options(object);

    let field_type = match instance {
        _ if !options.is_empty() => "enum".to_string(),
        Some(InstanceType::String) => "string".to_string(),
        Some(InstanceType::Integer) => "int".to_string(),
        Some(InstanceType::Number) => "float".to_string(),
        Some(InstanceType::Boolean) => "boolean".to_string(),
        Some(InstanceType::Array) => format!("array[{}]", item_type(object)),
        Some(InstanceType::Object) => match map_value_type(object) {
            Some(value) => format!("map[{}]", value),
            None => "json".to_string(),
        },
        Some(InstanceType::Null) | None => "json".to_string(),
    };

    Field {
        field_type,
        nullable,
        options,
        ..Default::default()
    }
}

/// The non-null instance type, and whether null is also allowed.
fn primary_instance_type(object: &SchemaObject) -> (Option<InstanceType>, bool) {
    match &object.instance_type {
        Some(SingleOrVec::Single(t)) => (Some(**t), false),
        Some(SingleOrVec::Vec(types)) => (
            types.iter().copied().find(|t| *t != InstanceType::Null),
            types.contains(&InstanceType::Null),
        ),
        None => (None, false),
    }
}

/// String values of an enum, whether written as `enum` or, for documented
/// variants, as a `oneOf` of single-value enums.
fn enum_options(object: &SchemaObject) -> Vec<String> {
    let direct = object.enum_values.iter().flatten();
    let one_of = object
        .subschemas
        .iter()
        .flat_map(|s| s.one_of.iter().flatten())
        .filter_map(|s| match s {
            SchemaNode::Object(o) => o.enum_values.as_ref(),
            SchemaNode::Bool(_) => None,
        })
        .flatten();

    direct
        .chain(one_of)
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn item_type(object: &SchemaObject) -> String {
    match object.array.as_ref().and_then(|a| a.items.as_ref()) {
        Some(SingleOrVec::Single(item)) => describe(item).field_type,
        _ => "json".to_string(),
    }
}

fn map_value_type(object: &SchemaObject) -> Option<String> {
    object
        .object
        .as_ref()
        .and_then(|o| o.additional_properties.as_deref())
        .map(|values| describe(values).field_type)
}

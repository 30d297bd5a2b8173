// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Resource identifiers
//!
//! Volume names and replica addresses can contain characters that do not
//! belong in a URL path (`tcp://10.0.0.2:9502` has slashes and a colon), so
//! the `id` of a resource is the standard base64 encoding of its natural
//! key's UTF-8 bytes. Clients can compute ids offline, and the encoding is
//! part of the wire contract: changing it needs a new API version.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::IdError;

/// Encode a natural key (volume name, replica address) as a resource id.
///
/// ```
/// assert_eq!(blockctl_types::encode_id("vol-1"), "dm9sLTE=");
/// ```
pub fn encode_id(key: &str) -> String {
    STANDARD.encode(key.as_bytes())
}

/// Decode a resource id back into its natural key.
///
/// Only canonical, padded standard base64 is accepted, so every key has
/// exactly one id.
pub fn decode_id(id: &str) -> Result<String, IdError> {
    let bytes = STANDARD.decode(id).map_err(|e| {
        tracing::debug!(id, error = %e, "rejecting malformed resource id");
        IdError::Malformed {
            id: id.to_string(),
            reason: e.to_string(),
        }
    })?;

    String::from_utf8(bytes).map_err(|_| {
        tracing::debug!(id, "rejecting resource id with non UTF-8 payload");
        IdError::NotUtf8 { id: id.to_string() }
    })
}

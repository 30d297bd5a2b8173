// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for blockctl-types

use thiserror::Error;

/// A client-supplied resource id that is not valid codec output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The id is not canonical standard base64
    #[error("Invalid resource id {id:?}: {reason}")]
    Malformed { id: String, reason: String },

    /// The id decodes to bytes that are not UTF-8 text
    #[error("Resource id {id:?} does not decode to UTF-8 text")]
    NotUtf8 { id: String },
}

impl IdError {
    /// The offending id, as the client sent it
    pub fn id(&self) -> &str {
        match self {
            IdError::Malformed { id, .. } | IdError::NotUtf8 { id } => id,
        }
    }
}

/// Errors raised while loading link configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL could not be parsed or cannot carry path segments
    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

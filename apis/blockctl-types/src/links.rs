// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Action links rooted at a configured base URL

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;
use crate::resource::{ActionLinker, ResourceRef};
use crate::schema::plural_name;

/// Default controller endpoint
const DEFAULT_BASE_URL: &str = "http://localhost:9501";

/// Default API version path segment
const DEFAULT_API_VERSION: &str = "v1";

/// Where the API is served from
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Scheme, host and optional path prefix of the API
    pub base_url: String,
    /// Version segment placed after the base URL
    pub api_version: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl LinkConfig {
    /// Load configuration from environment variables
    ///
    /// `BLOCKCTL_BASE_URL` and `BLOCKCTL_API_VERSION` override the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from a variable source. Unset or empty variables
    /// keep the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            base_url: var("BLOCKCTL_BASE_URL", DEFAULT_BASE_URL),
            api_version: var("BLOCKCTL_API_VERSION", DEFAULT_API_VERSION),
        }
    }
}

/// [`ActionLinker`] producing `<base>/<version>/<plural>/<id>?action=<name>`
#[derive(Clone, Debug)]
pub struct BaseUrlLinker {
    base_url: Url,
    api_version: String,
}

impl BaseUrlLinker {
    /// Validate `config` and build a linker from it.
    pub fn new(config: &LinkConfig) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: "URL cannot carry path segments".to_string(),
            });
        }

        Ok(Self {
            base_url,
            api_version: config.api_version.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a single resource, with the id percent-encoded as one segment.
    pub fn resource_url(&self, resource: ResourceRef<'_>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&self.api_version)
                .push(&plural_name(resource.resource_type))
                .push(resource.id);
        }
        url
    }
}

impl ActionLinker for BaseUrlLinker {
    fn action_link(&self, resource: ResourceRef<'_>, action: &str) -> String {
        let mut url = self.resource_url(resource);
        url.query_pairs_mut().clear().append_pair("action", action);
        url.into()
    }
}

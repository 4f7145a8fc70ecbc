// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server capabilities advertised in the INFO operation.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default max payload when the server does not advertise one (1 MB).
const DEFAULT_MAX_PAYLOAD: usize = 1024 * 1024;

fn default_max_payload() -> usize {
    DEFAULT_MAX_PAYLOAD
}

/// Capabilities parsed from the server's INFO JSON payload.
///
/// Immutable once parsed; owned by the connection for its lifetime.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerInfo {
    /// Server-assigned identifier.
    #[serde(default)]
    pub server_id: String,
    /// Server version string.
    #[serde(default)]
    pub version: String,
    /// Host the server reports listening on.
    #[serde(default)]
    pub host: String,
    /// Port the server reports listening on.
    #[serde(default)]
    pub port: u16,
    /// Whether the server requires credentials in CONNECT.
    #[serde(default)]
    pub auth_required: bool,
    /// Whether the server requires TLS.
    #[serde(default)]
    pub tls_required: bool,
    /// Maximum accepted message payload in bytes.
    #[serde(default = "default_max_payload")]
    pub max_payload: usize,
}

impl ServerInfo {
    /// Parse server info from the raw INFO JSON payload.
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::InvalidServerInfo)
    }
}

#[cfg(test)]
#[path = "server_info_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for natter operations.

use thiserror::Error;

/// All possible errors that can occur in natter operations.
///
/// Callers distinguish kinds by matching on the variant, never by parsing
/// the message text.
#[derive(Debug, Error)]
pub enum Error {
    #[error("at least one host must be configured")]
    NoHosts,

    #[error("missing credentials for host {0}: server requires authentication")]
    MissingCredentials(String),

    #[error("failed to connect to host {host}: {reason}")]
    FailedToConnect { host: String, reason: String },

    #[error("could not establish any connection against the configured hosts")]
    NoConnectionCouldBeEstablished,

    #[error("connection has been disposed")]
    Disposed,

    #[error("can not send or receive: connection has been disconnected")]
    NotConnected,

    #[error("operation cancelled")]
    Cancelled,

    #[error("payload too large: {size} bytes (server max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("protocol error: {0}")]
    Proto(#[from] natter_proto::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Per-host connect failure with a human-readable reason.
    pub fn failed_to_connect(host: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        Error::FailedToConnect {
            host: host.to_string(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for natter operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

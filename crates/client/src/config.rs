// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connection configuration: hosts, credentials, and socket options.

use std::fmt;
use std::time::Duration;

pub use natter_proto::cmd::Credentials;

/// One candidate server endpoint, with optional dedicated credentials.
///
/// Host-specific credentials take precedence over the connection-level
/// default when the handshake resolves what to send in CONNECT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Host name or address.
    pub address: String,
    /// TCP port.
    pub port: u16,
    /// Credentials dedicated to this host, if any.
    pub credentials: Option<Credentials>,
}

impl Host {
    /// Creates a host without dedicated credentials.
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Host {
            address: address.into(),
            port,
            credentials: None,
        }
    }

    /// Creates a host with dedicated credentials.
    pub fn with_credentials(
        address: impl Into<String>,
        port: u16,
        credentials: Credentials,
    ) -> Self {
        Host {
            address: address.into(),
            port,
            credentials: Some(credentials),
        }
    }

    /// The credentials dedicated to this host, ignoring empty ones.
    pub fn effective_credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref().filter(|c| !c.is_empty())
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// Low-level socket configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketOptions {
    /// Bound on each connect attempt.
    pub connect_timeout: Duration,
    /// Read timeout on the connected socket; `None` blocks indefinitely.
    pub read_timeout: Option<Duration>,
    /// Write timeout on the connected socket; `None` blocks indefinitely.
    pub write_timeout: Option<Duration>,
    /// Size of the buffered read stream wrapped around the socket.
    pub recv_buffer_size: usize,
    /// Size of the buffered write stream wrapped around the socket.
    pub send_buffer_size: usize,
}

impl Default for SocketOptions {
    fn default() -> Self {
        SocketOptions {
            connect_timeout: Duration::from_secs(5),
            read_timeout: None,
            write_timeout: Some(Duration::from_secs(5)),
            recv_buffer_size: 64 * 1024,
            send_buffer_size: 64 * 1024,
        }
    }
}

/// Configuration for one connection attempt sequence.
///
/// Immutable for the lifetime of a single [`open_connection`] call.
///
/// [`open_connection`]: crate::ConnectionManager::open_connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Candidate hosts, tried in randomized order.
    pub hosts: Vec<Host>,
    /// Default credentials, used when a host has no dedicated ones.
    pub credentials: Option<Credentials>,
    /// Whether to request verbose mode in CONNECT.
    pub verbose: bool,
    /// Socket configuration applied to every attempt.
    pub socket_options: SocketOptions,
}

impl ConnectionInfo {
    /// Creates connection info for the given hosts with default options.
    pub fn new(hosts: Vec<Host>) -> Self {
        ConnectionInfo {
            hosts,
            credentials: None,
            verbose: false,
            socket_options: SocketOptions::default(),
        }
    }

    /// Resolves the credentials to use for `host`: host-specific credentials
    /// win over the connection-level default; empty credentials count as
    /// absent.
    pub fn credentials_for<'a>(&'a self, host: &'a Host) -> Option<&'a Credentials> {
        host.effective_credentials()
            .or_else(|| self.credentials.as_ref().filter(|c| !c.is_empty()))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

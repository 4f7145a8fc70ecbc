// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Raw command builders.
//!
//! Pure functions that turn client commands into wire bytes. The handshake
//! uses [`connect`] and [`ping`] directly against the raw socket, before any
//! connection object exists; the remaining builders serve the publish and
//! subscribe paths.

use serde::Serialize;

use crate::error::Result;

const CRLF: &[u8] = b"\r\n";

/// Credentials presented in the CONNECT command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

impl Credentials {
    /// Creates credentials from a user/password pair.
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Credentials {
            user: user.into(),
            pass: pass.into(),
        }
    }

    /// True when both fields are empty. Empty credentials are treated the
    /// same as absent ones when resolving what to send in CONNECT.
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.pass.is_empty()
    }
}

/// JSON body of the CONNECT command.
#[derive(Debug, Serialize)]
struct ConnectBody<'a> {
    verbose: bool,
    pedantic: bool,
    name: &'a str,
    lang: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pass: Option<&'a str>,
}

/// Builds a `CONNECT {json}` command.
pub fn connect(verbose: bool, credentials: Option<&Credentials>) -> Result<Vec<u8>> {
    let credentials = credentials.filter(|c| !c.is_empty());
    let body = ConnectBody {
        verbose,
        pedantic: false,
        name: "natter",
        lang: "rust",
        version: env!("CARGO_PKG_VERSION"),
        user: credentials.map(|c| c.user.as_str()),
        pass: credentials.map(|c| c.pass.as_str()),
    };

    let json = serde_json::to_vec(&body)?;
    let mut buf = Vec::with_capacity(8 + json.len() + 2);
    buf.extend_from_slice(b"CONNECT ");
    buf.extend_from_slice(&json);
    buf.extend_from_slice(CRLF);
    Ok(buf)
}

/// Builds a `PING` command.
pub fn ping() -> &'static [u8] {
    b"PING\r\n"
}

/// Builds a `PONG` command.
pub fn pong() -> &'static [u8] {
    b"PONG\r\n"
}

/// Builds a `PUB <subject> [reply-to] <#bytes>` command with payload.
pub fn publish(subject: &str, reply_to: Option<&str>, payload: &[u8]) -> Vec<u8> {
    let head = match reply_to {
        Some(reply) => format!("PUB {} {} {}\r\n", subject, reply, payload.len()),
        None => format!("PUB {} {}\r\n", subject, payload.len()),
    };

    let mut buf = Vec::with_capacity(head.len() + payload.len() + 2);
    buf.extend_from_slice(head.as_bytes());
    buf.extend_from_slice(payload);
    buf.extend_from_slice(CRLF);
    buf
}

/// Builds a `SUB <subject> [queue-group] <sid>` command.
pub fn sub(subject: &str, queue_group: Option<&str>, sid: &str) -> Vec<u8> {
    match queue_group {
        Some(group) => format!("SUB {} {} {}\r\n", subject, group, sid).into_bytes(),
        None => format!("SUB {} {}\r\n", subject, sid).into_bytes(),
    }
}

/// Builds an `UNSUB <sid> [max-msgs]` command.
pub fn unsub(sid: &str, max_msgs: Option<u64>) -> Vec<u8> {
    match max_msgs {
        Some(max) => format!("UNSUB {} {}\r\n", sid, max).into_bytes(),
        None => format!("UNSUB {}\r\n", sid).into_bytes(),
    }
}

#[cfg(test)]
#[path = "cmd_tests.rs"]
mod tests;

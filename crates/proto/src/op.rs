// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parsed protocol operations.
//!
//! Every unit the server sends is parsed into one [`Op`] variant. Ops are
//! immutable once parsed; the client core only inspects them and fans them
//! out to subscribers.

/// One parsed unit of the pub-sub wire protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// `INFO {json}` — server capabilities, sent first on every connection.
    /// Carries the raw JSON payload; see
    /// [`ServerInfo::parse`](crate::ServerInfo::parse).
    Info(String),
    /// `MSG <subject> <sid> [reply-to] <#bytes>` followed by the payload.
    Msg(MsgOp),
    /// `PING` — liveness probe, expects `PONG`.
    Ping,
    /// `PONG` — reply to a `PING`.
    Pong,
    /// `+OK` — verbose-mode acknowledgement.
    Ok,
    /// `-ERR ['message']` — protocol error report.
    Err(String),
}

impl Op {
    /// Short tag for the op, used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Op::Info(_) => "INFO",
            Op::Msg(_) => "MSG",
            Op::Ping => "PING",
            Op::Pong => "PONG",
            Op::Ok => "+OK",
            Op::Err(_) => "-ERR",
        }
    }

    /// Returns the contained [`MsgOp`] if this is a message op.
    pub fn as_msg(&self) -> Option<&MsgOp> {
        match self {
            Op::Msg(msg) => Some(msg),
            _ => None,
        }
    }
}

/// A delivered message: subject, subscription id, optional reply subject,
/// and the raw payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgOp {
    /// Subject the message was published to.
    pub subject: String,
    /// Subscription id the delivery correlates to.
    pub sid: String,
    /// Reply subject, when the publisher requested one.
    pub reply_to: Option<String>,
    /// Payload bytes, opaque to the protocol layer.
    pub payload: Vec<u8>,
}

impl MsgOp {
    /// Creates a new message op.
    pub fn new(
        subject: impl Into<String>,
        sid: impl Into<String>,
        reply_to: Option<String>,
        payload: Vec<u8>,
    ) -> Self {
        MsgOp {
            subject: subject.into(),
            sid: sid.into(),
            reply_to,
            payload,
        }
    }

    /// Payload interpreted as UTF-8, lossily.
    pub fn payload_as_string(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

#[cfg(test)]
#[path = "op_tests.rs"]
mod tests;

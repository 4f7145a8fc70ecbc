// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for natter-proto operations.

use thiserror::Error;

/// All possible errors that can occur while reading or building protocol
/// operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed op: {0}")]
    MalformedOp(String),

    #[error("malformed MSG line: {0}")]
    MalformedMsg(String),

    #[error("control line too long: {len} bytes (max {max})")]
    ControlLineTooLong { len: usize, max: usize },

    #[error("unexpected end of stream while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("invalid server info: {0}")]
    InvalidServerInfo(#[source] serde_json::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for natter-proto operations.
pub type Result<T> = std::result::Result<T, Error>;

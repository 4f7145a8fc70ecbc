// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Serialized writer over the connection's outbound stream.
//!
//! One `StreamWriter` exists per connection, owned by the write locker; all
//! writes go through [`Connection::with_write_lock`] or its async variant,
//! so bytes from concurrent publishers never interleave on the wire.
//!
//! [`Connection::with_write_lock`]: crate::Connection::with_write_lock

use std::io::{BufWriter, Write};

use natter_proto::cmd;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// The buffered write side of a connection.
pub type WriteStream = BufWriter<Box<dyn Write + Send>>;

/// Writes protocol commands to the outbound stream, enforcing the server's
/// max payload and refusing once the connection's cancellation token fires.
pub struct StreamWriter {
    stream: WriteStream,
    max_payload: usize,
    cancel: CancellationToken,
}

impl StreamWriter {
    /// Creates a writer over `stream` with the server-advertised payload
    /// limit, bound to the connection's cancellation token.
    pub fn new(stream: WriteStream, max_payload: usize, cancel: CancellationToken) -> Self {
        StreamWriter {
            stream,
            max_payload,
            cancel,
        }
    }

    /// The server-advertised max payload in bytes.
    pub fn max_payload(&self) -> usize {
        self.max_payload
    }

    /// Writes raw command bytes and flushes, so connection failures surface
    /// at the write site.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_not_cancelled()?;
        self.stream.write_all(bytes)?;
        self.stream.flush()?;
        Ok(())
    }

    /// Writes a `PUB` command, rejecting payloads over the server limit.
    pub fn publish(&mut self, subject: &str, reply_to: Option<&str>, payload: &[u8]) -> Result<()> {
        if payload.len() > self.max_payload {
            return Err(Error::PayloadTooLarge {
                size: payload.len(),
                max: self.max_payload,
            });
        }
        self.write(&cmd::publish(subject, reply_to, payload))
    }

    /// Flushes any buffered bytes.
    pub fn flush(&mut self) -> Result<()> {
        self.ensure_not_cancelled()?;
        self.stream.flush()?;
        Ok(())
    }

    fn ensure_not_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;

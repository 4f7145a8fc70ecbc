// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connection establishment: multi-host failover and handshake verification.
//!
//! The manager tries candidate hosts in randomized order and returns the
//! first connection that completes the INFO → CONNECT/PING → reply
//! handshake, together with the ops observed while the handshake ran (the
//! steady-state read loop only starts afterwards, so those would otherwise
//! be lost).

use std::io::{BufReader, BufWriter};

use natter_proto::{cmd, Op, OpReader, ServerInfo};
use rand::seq::SliceRandom;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::{ConnectionInfo, Host};
use crate::connection::{ConnReader, Connection};
use crate::error::{Error, Result};
use crate::socket::{Socket, SocketFactory, TcpSocketFactory};
use crate::writer::StreamWriter;

/// Opens verified connections against a configured host list.
pub struct ConnectionManager {
    socket_factory: Box<dyn SocketFactory>,
}

impl ConnectionManager {
    /// Creates a manager producing plain TCP sockets.
    pub fn new() -> Self {
        Self::with_factory(Box::new(TcpSocketFactory))
    }

    /// Creates a manager with a custom socket factory.
    pub fn with_factory(socket_factory: Box<dyn SocketFactory>) -> Self {
        ConnectionManager { socket_factory }
    }

    /// Produces one verified, handshake-complete connection, trying hosts in
    /// randomized order until one succeeds or all fail.
    ///
    /// Per-host failures are logged and the next host is tried; only when
    /// every host has failed (or cancellation fired) does this return
    /// [`Error::NoConnectionCouldBeEstablished`]. Also returns the ops
    /// observed during the handshake so the caller can replay them through
    /// its normal dispatch pipeline.
    pub fn open_connection(
        &self,
        info: &ConnectionInfo,
        cancel: &CancellationToken,
    ) -> Result<(Connection, Vec<Op>)> {
        if info.hosts.is_empty() {
            return Err(Error::NoHosts);
        }

        // Randomized per call so failover does not always hammer the first
        // configured host.
        let mut hosts = info.hosts.clone();
        hosts.shuffle(&mut rand::thread_rng());

        for host in &hosts {
            if cancel.is_cancelled() {
                break;
            }
            match self.establish(host, info, cancel) {
                Ok(established) => return Ok(established),
                Err(e) => {
                    warn!(host = %host, error = %e, "error while connecting; trying next host (if any)");
                }
            }
        }

        Err(Error::NoConnectionCouldBeEstablished)
    }

    /// Runs the full establishment sequence against one host. On any
    /// failure the attempt's streams and socket are torn down before the
    /// error propagates, so retries never leak descriptors.
    fn establish(
        &self,
        host: &Host,
        info: &ConnectionInfo,
        cancel: &CancellationToken,
    ) -> Result<(Connection, Vec<Op>)> {
        let mut socket = self.socket_factory.create(&info.socket_options);
        let mut observed = Vec::new();

        let handshake = (|| -> Result<(ConnReader, ServerInfo, StreamWriter)> {
            socket.connect(host, cancel)?;

            let read_stream =
                BufReader::with_capacity(socket.recv_buffer_size(), socket.read_stream()?);
            let mut reader = OpReader::new(read_stream);

            let server_info =
                verify_connection(host, info, socket.as_mut(), &mut reader, &mut observed)?;

            // The write side is only wrapped after verification; handshake
            // bytes went out raw on the socket.
            let write_stream =
                BufWriter::with_capacity(socket.send_buffer_size(), socket.write_stream()?);
            let writer = StreamWriter::new(write_stream, server_info.max_payload, cancel.clone());

            Ok((reader, server_info, writer))
        })();

        match handshake {
            Ok((reader, server_info, writer)) => {
                let connection =
                    Connection::new(server_info, socket, reader, writer, cancel.clone());
                Ok((connection, observed))
            }
            Err(e) => {
                // Stream handles died with the closure; release the socket
                // itself and re-raise the original failure.
                socket.shutdown();
                Err(e)
            }
        }
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives the handshake over a connected socket: INFO in, CONNECT and PING
/// out, then a non-error reply. Every op read along the way is pushed to
/// `observed`.
fn verify_connection(
    host: &Host,
    info: &ConnectionInfo,
    socket: &mut dyn Socket,
    reader: &mut ConnReader,
    observed: &mut Vec<Op>,
) -> Result<ServerInfo> {
    if !socket.is_connected() {
        return Err(Error::failed_to_connect(
            host,
            "no connection could be established",
        ));
    }

    let op = reader
        .next_op()?
        .ok_or_else(|| Error::failed_to_connect(host, "expected INFO after connecting, got nothing"))?;
    observed.push(op.clone());

    let json = match &op {
        Op::Info(json) => json,
        other => {
            return Err(Error::failed_to_connect(
                host,
                format!("expected INFO after connecting, got {}", other.kind()),
            ))
        }
    };
    debug!(host = %host, "got INFO during connect");

    let server_info = ServerInfo::parse(json)?;

    let credentials = info.credentials_for(host);
    if server_info.auth_required && credentials.is_none() {
        return Err(Error::MissingCredentials(host.to_string()));
    }

    socket.send(&cmd::connect(info.verbose, credentials)?)?;
    socket.send(cmd::ping())?;

    let op = reader.next_op()?.ok_or_else(|| {
        Error::failed_to_connect(host, "expected a reply after CONNECT and PING, got nothing")
    })?;
    observed.push(op.clone());

    if let Op::Err(message) = &op {
        return Err(Error::failed_to_connect(
            host,
            format!("expected PONG after CONNECT and PING, got -ERR '{}'", message),
        ));
    }
    // Anything else is accepted: a verbose server acknowledges with +OK
    // before PONG, and the check only rejects errors and silence.

    if !socket.is_connected() {
        return Err(Error::failed_to_connect(
            host,
            "connection dropped during handshake",
        ));
    }

    Ok(server_info)
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;

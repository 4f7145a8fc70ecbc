// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Socket factory and the TCP socket implementation.
//!
//! The [`Socket`] and [`SocketFactory`] traits abstract over the actual
//! transport mechanism so connection establishment can be exercised against
//! scripted sockets in tests. Production uses [`TcpSocketFactory`] over
//! blocking `std::net::TcpStream`.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

use tokio_util::sync::CancellationToken;

use crate::config::{Host, SocketOptions};
use crate::error::{Error, Result};

/// A configured, connectable low-level socket.
pub trait Socket: Send {
    /// Connects to `host` within the configured timeout, honoring `cancel`
    /// between resolution attempts.
    fn connect(&mut self, host: &Host, cancel: &CancellationToken) -> Result<()>;

    /// Whether the socket currently reports connected. Computed fresh from
    /// socket state on every call, never cached.
    fn is_connected(&self) -> bool;

    /// Sends raw bytes directly on the socket (handshake traffic only).
    fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// A read handle over the socket's receive side.
    fn read_stream(&mut self) -> Result<Box<dyn Read + Send>>;

    /// A write handle over the socket's send side.
    fn write_stream(&mut self) -> Result<Box<dyn Write + Send>>;

    /// Size for the buffered read stream wrapped around [`read_stream`].
    ///
    /// [`read_stream`]: Socket::read_stream
    fn recv_buffer_size(&self) -> usize;

    /// Size for the buffered write stream wrapped around [`write_stream`].
    ///
    /// [`write_stream`]: Socket::write_stream
    fn send_buffer_size(&self) -> usize;

    /// Shuts the socket down (both directions) and releases it.
    /// Best-effort and idempotent.
    fn shutdown(&mut self);
}

/// Produces configured, unconnected sockets.
pub trait SocketFactory: Send + Sync {
    /// Creates a socket configured with `options`.
    fn create(&self, options: &SocketOptions) -> Box<dyn Socket>;
}

/// The production factory: plain TCP sockets.
#[derive(Debug, Default)]
pub struct TcpSocketFactory;

impl SocketFactory for TcpSocketFactory {
    fn create(&self, options: &SocketOptions) -> Box<dyn Socket> {
        Box::new(TcpSocket::new(options.clone()))
    }
}

/// Blocking TCP socket with bounded connect and configured I/O timeouts.
pub struct TcpSocket {
    options: SocketOptions,
    stream: Option<TcpStream>,
}

impl TcpSocket {
    fn new(options: SocketOptions) -> Self {
        TcpSocket {
            options,
            stream: None,
        }
    }

    fn stream(&mut self) -> Result<&mut TcpStream> {
        self.stream.as_mut().ok_or(Error::NotConnected)
    }
}

impl Socket for TcpSocket {
    fn connect(&mut self, host: &Host, cancel: &CancellationToken) -> Result<()> {
        let addrs = (host.address.as_str(), host.port)
            .to_socket_addrs()
            .map_err(|e| Error::failed_to_connect(host, format!("resolve failed: {}", e)))?;

        let mut last_err: Option<std::io::Error> = None;
        for addr in addrs {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            match TcpStream::connect_timeout(&addr, self.options.connect_timeout) {
                Ok(stream) => {
                    stream.set_nodelay(true)?;
                    stream.set_read_timeout(self.options.read_timeout)?;
                    stream.set_write_timeout(self.options.write_timeout)?;
                    self.stream = Some(stream);
                    return Ok(());
                }
                Err(e) => last_err = Some(e),
            }
        }

        let reason = match last_err {
            Some(e) => e.to_string(),
            None => "no addresses resolved".to_string(),
        };
        Err(Error::failed_to_connect(host, reason))
    }

    fn is_connected(&self) -> bool {
        match &self.stream {
            Some(stream) => {
                let broken = matches!(stream.take_error(), Ok(Some(_)) | Err(_));
                !broken && stream.peer_addr().is_ok()
            }
            None => false,
        }
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        let stream = self.stream()?;
        stream.write_all(bytes)?;
        stream.flush()?;
        Ok(())
    }

    fn read_stream(&mut self) -> Result<Box<dyn Read + Send>> {
        Ok(Box::new(self.stream()?.try_clone()?))
    }

    fn write_stream(&mut self) -> Result<Box<dyn Write + Send>> {
        Ok(Box::new(self.stream()?.try_clone()?))
    }

    fn recv_buffer_size(&self) -> usize {
        self.options.recv_buffer_size
    }

    fn send_buffer_size(&self) -> usize {
        self.options.send_buffer_size
    }

    fn shutdown(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.shutdown(Shutdown::Both) {
                tracing::debug!("socket shutdown failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
#[path = "socket_tests.rs"]
mod tests;

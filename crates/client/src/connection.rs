// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The live connection: one socket, one reader, one locked writer.
//!
//! A `Connection` is created only by successful handshake completion (see
//! [`ConnectionManager`](crate::ConnectionManager)). It owns the socket and
//! both stream sides exclusively, serializes writes behind a locker, and
//! tears everything down exactly once on [`dispose`](Connection::dispose).

use std::fmt;
use std::future::Future;
use std::io::{BufReader, Read};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use natter_proto::{Op, OpReader, ServerInfo};
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::locker::Locker;
use crate::socket::Socket;
use crate::writer::StreamWriter;

/// The buffered read side of a connection.
pub type ReadStream = BufReader<Box<dyn Read + Send>>;

/// Op reader over the connection's read stream.
pub type ConnReader = OpReader<ReadStream>;

/// A verified, handshake-complete connection to one server.
///
/// Reads are single-consumer by design: the host application drives one
/// dedicated read loop per connection. Writes from any number of call sites
/// are serialized through the write lock.
pub struct Connection {
    server_info: ServerInfo,
    socket: Mutex<Option<Box<dyn Socket>>>,
    reader: Mutex<Option<ConnReader>>,
    writer: Locker<Option<StreamWriter>>,
    cancel: CancellationToken,
    disposed: AtomicBool,
}

impl Connection {
    /// Assembles a connection from handshake-verified parts. Only the
    /// connection manager creates these.
    pub(crate) fn new(
        server_info: ServerInfo,
        socket: Box<dyn Socket>,
        reader: ConnReader,
        writer: StreamWriter,
        cancel: CancellationToken,
    ) -> Self {
        Connection {
            server_info,
            socket: Mutex::new(Some(socket)),
            reader: Mutex::new(Some(reader)),
            writer: Locker::new(Some(writer)),
            cancel,
            disposed: AtomicBool::new(false),
        }
    }

    /// Capabilities the server advertised during the handshake.
    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Whether the underlying socket currently reports connected.
    ///
    /// Computed fresh from socket state on every call, never cached; a
    /// live-but-broken socket reports false here while the connection is
    /// still not disposed.
    pub fn is_connected(&self) -> bool {
        lock(&self.socket)
            .as_ref()
            .map_or(false, |socket| socket.is_connected())
    }

    /// Whether the read side is usable: connected, reader present, and
    /// cancellation not requested.
    ///
    /// Never waits on the reader lock; a read loop blocked inside the
    /// socket holds that lock for as long as the socket stays quiet.
    pub fn can_read(&self) -> bool {
        let reader_present = match self.reader.try_lock() {
            Ok(guard) => guard.is_some(),
            // Held by an active read loop, so a reader necessarily exists.
            Err(TryLockError::WouldBlock) => true,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().is_some(),
        };
        self.is_connected() && reader_present && !self.cancel.is_cancelled()
    }

    /// Starts a lazy sequence of parsed ops off the read stream.
    ///
    /// Each call begins a fresh pull-based sequence bound to the current
    /// stream state; the sequence runs until the stream ends or errors. The
    /// returned iterator holds the reader for its lifetime (reads are
    /// single-consumer).
    pub fn read_ops(&self) -> Result<Ops<'_>> {
        self.ensure_usable()?;

        let guard = lock(&self.reader);
        if guard.is_none() {
            return Err(Error::NotConnected);
        }
        Ok(Ops { guard })
    }

    /// Runs `action` with exclusive access to the stream writer, blocking
    /// until the write lock is free.
    ///
    /// This and [`with_write_lock_async`](Self::with_write_lock_async) are
    /// the only sanctioned write paths; the lock is released on every exit
    /// path, including an error from `action`.
    pub fn with_write_lock<T, F>(&self, action: F) -> Result<T>
    where
        F: FnOnce(&mut StreamWriter) -> Result<T>,
    {
        self.ensure_usable()?;

        let mut guard = self.writer.lock();
        let writer = guard.as_mut().ok_or(Error::NotConnected)?;
        action(writer)
    }

    /// Async variant of [`with_write_lock`](Self::with_write_lock): the lock
    /// wait suspends cooperatively and is abandoned with
    /// [`Error::Cancelled`] if the connection's cancellation token fires.
    pub async fn with_write_lock_async<T, F>(&self, action: F) -> Result<T>
    where
        F: for<'a> FnOnce(
            &'a mut StreamWriter,
        ) -> Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>,
    {
        self.ensure_usable()?;

        let mut guard = self.writer.lock_cancellable(&self.cancel).await?;
        let writer = guard.as_mut().ok_or(Error::NotConnected)?;
        action(writer).await
    }

    /// Tears the connection down: socket first (shutdown-both), then reader
    /// and writer, best-effort past individual failures.
    ///
    /// The socket goes down before the stream locks are taken: a read loop
    /// blocked inside the socket wakes with end-of-stream and releases the
    /// reader lock, so teardown always makes progress. The writer flush is
    /// likewise best-effort; bytes still buffered at this point may be lost.
    ///
    /// Calling dispose twice is an error ([`Error::Disposed`]) — a second
    /// teardown indicates a lifecycle bug, not a benign repeat. After
    /// disposal every operation fails and liveness reports disconnected.
    /// Acquires the writer lock blockingly; call from a blocking context
    /// (a teardown thread or `spawn_blocking`), not from an async task.
    pub fn dispose(&self) -> Result<()> {
        if self
            .disposed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::Disposed);
        }

        if let Some(mut socket) = lock(&self.socket).take() {
            socket.shutdown();
        }

        // Each remaining step is independent; one failing to release must
        // not keep the others alive.
        drop(lock(&self.reader).take());

        if let Some(mut writer) = self.writer.lock().take() {
            if let Err(e) = writer.flush() {
                tracing::debug!("flush during dispose failed: {}", e);
            }
        }

        Ok(())
    }

    /// True once [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.is_disposed() {
            return Err(Error::Disposed);
        }
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        Ok(())
    }
}

// Manual impl: the socket and stream fields are trait objects.
impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("server_info", &self.server_info)
            .field("disposed", &self.disposed.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

/// Lazy iterator over parsed ops. See [`Connection::read_ops`].
pub struct Ops<'a> {
    guard: MutexGuard<'a, Option<ConnReader>>,
}

impl Iterator for Ops<'_> {
    type Item = Result<Op>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.guard.as_mut()?;
        match reader.next_op() {
            Ok(Some(op)) => Some(Ok(op)),
            Ok(None) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}

/// Locks a std mutex, recovering the guard if a holder panicked. Handlers
/// in this crate do not panic; poisoning is theoretical.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;

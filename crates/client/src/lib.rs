// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! natter - A lightweight client core for a NATS-style pub-sub protocol.
//!
//! This crate opens a TCP connection to one of several candidate servers,
//! performs the INFO → CONNECT/PING → PONG handshake, and provides a
//! bidirectional channel: serialized write access on one side, a continuous
//! stream of parsed operations fanned out to subscribers on the other.
//!
//! # Main Components
//!
//! - [`ConnectionManager`] - Multi-host failover and handshake verification
//! - [`Connection`] - The live socket wrapper: reads, locked writes, teardown
//! - [`OpMediator`] - Fan-out of received ops to independent subscriber sets
//! - [`ConnectionInfo`] - Host list, credentials, and socket options
//! - [`Error`] - Error types for all operations
//!
//! # Connecting
//!
//! ```rust,ignore
//! use natter::{ConnectionInfo, ConnectionManager, Host, OpMediator};
//! use tokio_util::sync::CancellationToken;
//!
//! let info = ConnectionInfo::new(vec![Host::new("demo.example.net", 4222)]);
//! let cancel = CancellationToken::new();
//!
//! let manager = ConnectionManager::new();
//! let (connection, observed) = manager.open_connection(&info, &cancel)?;
//!
//! let mediator = OpMediator::new();
//! for op in &observed {
//!     mediator.dispatch(op);
//! }
//! for op in connection.read_ops()? {
//!     mediator.dispatch(&op?);
//! }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod locker;
pub mod manager;
pub mod mediator;
pub mod socket;
pub mod writer;

pub use config::{ConnectionInfo, Credentials, Host, SocketOptions};
pub use connection::Connection;
pub use error::{Error, Result};
pub use locker::Locker;
pub use manager::ConnectionManager;
pub use mediator::{HandlerError, OpMediator, Subject, SubscriptionId};
pub use natter_proto::{MsgOp, Op, ServerInfo};
pub use writer::StreamWriter;

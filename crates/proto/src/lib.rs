// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! natter-proto: Wire protocol primitives for the natter pub-sub client.
//!
//! This crate implements the text/binary wire grammar shared by the client
//! crate: the parsed operation model, the incremental op stream reader,
//! server INFO parsing, and the raw command builders.

pub mod cmd;
pub mod error;
pub mod op;
pub mod reader;
pub mod server_info;

pub use error::{Error, Result};
pub use op::{MsgOp, Op};
pub use reader::OpReader;
pub use server_info::ServerInfo;

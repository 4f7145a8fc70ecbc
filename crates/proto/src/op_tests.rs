// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    info = { Op::Info("{}".into()), "INFO" },
    msg = { Op::Msg(MsgOp::new("a", "1", None, vec![])), "MSG" },
    ping = { Op::Ping, "PING" },
    pong = { Op::Pong, "PONG" },
    ok = { Op::Ok, "+OK" },
    err = { Op::Err("bad".into()), "-ERR" },
)]
fn op_kind(op: Op, expected: &str) {
    assert_eq!(op.kind(), expected);
}

#[test]
fn as_msg_narrows_only_msg_ops() {
    let msg = MsgOp::new("sub", "9", Some("reply".into()), b"hi".to_vec());
    let op = Op::Msg(msg.clone());

    assert_eq!(op.as_msg(), Some(&msg));
    assert_eq!(Op::Ping.as_msg(), None);
    assert_eq!(Op::Err("x".into()).as_msg(), None);
}

#[test]
fn payload_as_string_is_lossy() {
    let msg = MsgOp::new("sub", "1", None, vec![0x68, 0x69, 0xff]);
    assert_eq!(msg.payload_as_string(), "hi\u{fffd}");
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn failed_to_connect_carries_host_and_reason() {
    let err = Error::failed_to_connect("demo:4222", "connection refused");
    assert!(
        matches!(&err, Error::FailedToConnect { host, reason }
            if host == "demo:4222" && reason == "connection refused")
    );
    assert_eq!(
        err.to_string(),
        "failed to connect to host demo:4222: connection refused"
    );
}

#[test]
fn io_errors_convert() {
    let io = std::io::Error::other("boom");
    let err: Error = io.into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn proto_errors_convert() {
    let err: Error = natter_proto::Error::MalformedOp("x".into()).into();
    assert!(matches!(err, Error::Proto(_)));
}

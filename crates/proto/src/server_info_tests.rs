// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn parses_full_info_payload() {
    let info = ServerInfo::parse(
        r#"{"server_id":"abc123","version":"2.10.0","host":"0.0.0.0","port":4222,"auth_required":true,"tls_required":false,"max_payload":2048}"#,
    )
    .unwrap();

    assert_eq!(info.server_id, "abc123");
    assert_eq!(info.version, "2.10.0");
    assert_eq!(info.host, "0.0.0.0");
    assert_eq!(info.port, 4222);
    assert!(info.auth_required);
    assert!(!info.tls_required);
    assert_eq!(info.max_payload, 2048);
}

#[test]
fn missing_fields_use_defaults() {
    let info = ServerInfo::parse(r#"{"server_id":"abc123"}"#).unwrap();

    assert!(!info.auth_required);
    assert!(!info.tls_required);
    assert_eq!(info.max_payload, 1024 * 1024);
    assert_eq!(info.port, 0);
}

#[test]
fn unknown_fields_are_ignored() {
    let info = ServerInfo::parse(r#"{"max_payload":512,"proto":1,"headers":true}"#).unwrap();
    assert_eq!(info.max_payload, 512);
}

#[test]
fn invalid_json_is_rejected() {
    let err = ServerInfo::parse("not json").unwrap_err();
    assert!(matches!(err, Error::InvalidServerInfo(_)));
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn connect_without_credentials_omits_user_and_pass() {
    let bytes = connect(false, None).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.starts_with("CONNECT {"));
    assert!(text.ends_with("\r\n"));
    assert!(text.contains(r#""verbose":false"#));
    assert!(text.contains(r#""lang":"rust""#));
    assert!(!text.contains("user"));
    assert!(!text.contains("pass"));
}

#[test]
fn connect_with_credentials_includes_user_and_pass() {
    let creds = Credentials::new("alice", "s3cret");
    let bytes = connect(true, Some(&creds)).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.contains(r#""verbose":true"#));
    assert!(text.contains(r#""user":"alice""#));
    assert!(text.contains(r#""pass":"s3cret""#));
}

#[test]
fn connect_treats_empty_credentials_as_absent() {
    let creds = Credentials::new("", "");
    let bytes = connect(false, Some(&creds)).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(!text.contains("user"));
}

#[test]
fn ping_and_pong_are_bare_control_lines() {
    assert_eq!(ping(), b"PING\r\n");
    assert_eq!(pong(), b"PONG\r\n");
}

#[test]
fn publish_without_reply_to() {
    let bytes = publish("greet.joe", None, b"hello");
    assert_eq!(bytes, b"PUB greet.joe 5\r\nhello\r\n");
}

#[test]
fn publish_with_reply_to() {
    let bytes = publish("greet.joe", Some("inbox.1"), b"hi");
    assert_eq!(bytes, b"PUB greet.joe inbox.1 2\r\nhi\r\n");
}

#[test]
fn publish_with_empty_payload() {
    let bytes = publish("greet", None, b"");
    assert_eq!(bytes, b"PUB greet 0\r\n\r\n");
}

#[test]
fn sub_and_unsub() {
    assert_eq!(sub("greet.*", None, "1"), b"SUB greet.* 1\r\n");
    assert_eq!(sub("greet.*", Some("workers"), "2"), b"SUB greet.* workers 2\r\n");
    assert_eq!(unsub("1", None), b"UNSUB 1\r\n");
    assert_eq!(unsub("1", Some(5)), b"UNSUB 1 5\r\n");
}

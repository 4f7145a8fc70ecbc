// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn host_displays_as_address_and_port() {
    let host = Host::new("demo.example.net", 4222);
    assert_eq!(host.to_string(), "demo.example.net:4222");
}

#[test]
fn host_credentials_win_over_connection_credentials() {
    let host = Host::with_credentials("a", 4222, Credentials::new("host-user", "host-pass"));
    let mut info = ConnectionInfo::new(vec![host.clone()]);
    info.credentials = Some(Credentials::new("conn-user", "conn-pass"));

    let resolved = info.credentials_for(&host).unwrap();
    assert_eq!(resolved.user, "host-user");
}

#[test]
fn connection_credentials_used_when_host_has_none() {
    let host = Host::new("a", 4222);
    let mut info = ConnectionInfo::new(vec![host.clone()]);
    info.credentials = Some(Credentials::new("conn-user", "conn-pass"));

    let resolved = info.credentials_for(&host).unwrap();
    assert_eq!(resolved.user, "conn-user");
}

#[test]
fn empty_credentials_count_as_absent() {
    let host = Host::with_credentials("a", 4222, Credentials::new("", ""));
    let mut info = ConnectionInfo::new(vec![host.clone()]);

    assert!(info.credentials_for(&host).is_none());

    info.credentials = Some(Credentials::new("", ""));
    assert!(info.credentials_for(&host).is_none());
}

#[test]
fn socket_options_defaults() {
    let opts = SocketOptions::default();
    assert_eq!(opts.connect_timeout, std::time::Duration::from_secs(5));
    assert_eq!(opts.recv_buffer_size, 64 * 1024);
    assert_eq!(opts.send_buffer_size, 64 * 1024);
    assert!(opts.read_timeout.is_none());
}

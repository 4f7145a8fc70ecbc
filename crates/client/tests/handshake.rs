// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end tests for the public client surface: handshake against a
//! scripted server, the steady-state read loop, and mediator fan-out.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use natter::{ConnectionInfo, ConnectionManager, Host, Op, OpMediator};
use tokio_util::sync::CancellationToken;

/// Scripted server: completes the handshake, then runs `steady_state`
/// against the still-open stream.
fn spawn_server(
    info_json: &'static str,
    steady_state: impl FnOnce(TcpStream) + Send + 'static,
) -> Host {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind scripted server");
    let host = Host::new("127.0.0.1", listener.local_addr().unwrap().port());

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept client");
        stream
            .write_all(format!("INFO {}\r\n", info_json).as_bytes())
            .unwrap();

        // Consume the client's CONNECT and PING lines.
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        for _ in 0..2 {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
        }
        stream.write_all(b"PONG\r\n").unwrap();

        steady_state(stream);
    });

    host
}

fn hold_open(stream: TcpStream) {
    let mut reader = BufReader::new(stream);
    let mut sink = Vec::new();
    let _ = reader.read_to_end(&mut sink);
}

#[test]
fn open_connection_completes_the_handshake() {
    let host = spawn_server(r#"{"server_id":"it-1","max_payload":2048}"#, hold_open);
    let info = ConnectionInfo::new(vec![host]);

    let manager = ConnectionManager::new();
    let (conn, observed) = manager
        .open_connection(&info, &CancellationToken::new())
        .expect("handshake should succeed");

    assert!(conn.is_connected());
    assert!(conn.can_read());
    assert_eq!(conn.server_info().server_id, "it-1");
    assert_eq!(conn.server_info().max_payload, 2048);
    assert_eq!(observed.len(), 2);
    assert!(matches!(observed[0], Op::Info(_)));
    assert_eq!(observed[1], Op::Pong);
}

#[test]
fn read_loop_feeds_the_mediator() {
    let host = spawn_server(r#"{"server_id":"it-2"}"#, |mut stream| {
        stream.write_all(b"PING\r\n").unwrap();
        stream
            .write_all(b"MSG orders.created 7 reply.1 5\r\nhello\r\n")
            .unwrap();
        stream.write_all(b"MSG orders.created 7 2\r\nok\r\n").unwrap();
        let _ = stream.shutdown(std::net::Shutdown::Write);
        hold_open(stream);
    });
    let info = ConnectionInfo::new(vec![host]);

    let manager = ConnectionManager::new();
    let (conn, observed) = manager
        .open_connection(&info, &CancellationToken::new())
        .unwrap();

    let mediator = OpMediator::new();
    let msg_payloads = Arc::new(std::sync::Mutex::new(Vec::new()));
    let all_seen = Arc::new(AtomicUsize::new(0));

    let all = Arc::clone(&all_seen);
    mediator.all_ops().subscribe(move |_| {
        all.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let payloads = Arc::clone(&msg_payloads);
    mediator.msg_ops().subscribe(move |msg| {
        payloads.lock().unwrap().push(msg.payload_as_string());
        Ok(())
    });

    // Replay the handshake ops, then drive the steady-state read loop.
    for op in &observed {
        mediator.dispatch(op);
    }
    for op in conn.read_ops().unwrap() {
        mediator.dispatch(&op.unwrap());
    }

    // INFO + PONG observed, then PING + two MSGs off the read loop.
    assert_eq!(mediator.op_count(), 5);
    assert_eq!(all_seen.load(Ordering::SeqCst), 5);
    assert_eq!(
        *msg_payloads.lock().unwrap(),
        vec!["hello".to_string(), "ok".to_string()]
    );
    assert!(mediator.last_op_received_at().is_some());
}

#[test]
fn writes_after_the_handshake_reach_the_server() {
    let received = Arc::new(std::sync::Mutex::new(String::new()));
    let slot = Arc::clone(&received);
    let host = spawn_server(r#"{"server_id":"it-3"}"#, move |stream| {
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let mut payload = String::new();
        reader.read_line(&mut payload).unwrap();
        *slot.lock().unwrap() = format!("{}{}", line, payload);
    });
    let info = ConnectionInfo::new(vec![host]);

    let (conn, _observed) = ConnectionManager::new()
        .open_connection(&info, &CancellationToken::new())
        .unwrap();

    conn.with_write_lock(|w| w.publish("greet.joe", None, b"hi"))
        .unwrap();

    // Wait for the server thread to record the command.
    for _ in 0..50 {
        if !received.lock().unwrap().is_empty() {
            break;
        }
        thread::sleep(std::time::Duration::from_millis(10));
    }
    assert_eq!(*received.lock().unwrap(), "PUB greet.joe 2\r\nhi\r\n");
}

#[test]
fn dispose_ends_the_connection_for_good() {
    let host = spawn_server(r#"{"server_id":"it-4"}"#, hold_open);
    let info = ConnectionInfo::new(vec![host]);

    let (conn, _observed) = ConnectionManager::new()
        .open_connection(&info, &CancellationToken::new())
        .unwrap();

    conn.dispose().unwrap();
    assert!(!conn.is_connected());
    assert!(conn.dispose().is_err());
    assert!(conn.read_ops().is_err());
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fan-out of received ops to independent subscriber sets.
//!
//! The mediator is the single entry point for "an op arrived": it counts
//! the dispatch, stamps the time, and republishes the op on two independent
//! subjects — every op on one, message ops (narrowed to [`MsgOp`]) on the
//! other. Subscribers are invoked synchronously, in subscription order, each
//! inside its own fault boundary: one subscriber erroring never affects its
//! siblings, the current dispatch, or future dispatches.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use natter_proto::{MsgOp, Op};

/// Error type subscriber handlers may return.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Identifies one subscription on a [`Subject`] for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber<T> {
    id: SubscriptionId,
    on_next: Box<dyn FnMut(&T) -> Result<(), HandlerError> + Send>,
    on_error: Option<Box<dyn FnMut(HandlerError) + Send>>,
}

/// An in-process broadcast subject: ordered, synchronous fan-out with
/// per-subscriber error channels.
///
/// A subscriber whose handler returns an error stays subscribed; the error
/// is routed to its error callback when one was registered, and swallowed
/// (logged at debug level) otherwise.
pub struct Subject<T> {
    subscribers: Mutex<Vec<Subscriber<T>>>,
    next_id: AtomicU64,
}

impl<T> Subject<T> {
    /// Creates a subject with no subscribers.
    pub fn new() -> Self {
        Subject {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Registers a handler, invoked for every published value in
    /// subscription order.
    pub fn subscribe<F>(&self, on_next: F) -> SubscriptionId
    where
        F: FnMut(&T) -> Result<(), HandlerError> + Send + 'static,
    {
        self.add(Box::new(on_next), None)
    }

    /// Registers a handler together with an error callback that receives
    /// any error the handler returns.
    pub fn subscribe_with_error_handler<F, E>(&self, on_next: F, on_error: E) -> SubscriptionId
    where
        F: FnMut(&T) -> Result<(), HandlerError> + Send + 'static,
        E: FnMut(HandlerError) + Send + 'static,
    {
        self.add(Box::new(on_next), Some(Box::new(on_error)))
    }

    /// Removes a subscription. Returns false when the id is unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.lock();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        subscribers.len() != before
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    /// Delivers `value` to every subscriber, in subscription order, each
    /// inside its own fault boundary. Does not return until all subscribers
    /// have been invoked.
    pub fn publish(&self, value: &T) {
        let mut subscribers = self.lock();
        for subscriber in subscribers.iter_mut() {
            if let Err(e) = (subscriber.on_next)(value) {
                match subscriber.on_error.as_mut() {
                    Some(on_error) => on_error(e),
                    None => tracing::debug!("subscriber error swallowed during dispatch: {}", e),
                }
            }
        }
    }

    fn add(
        &self,
        on_next: Box<dyn FnMut(&T) -> Result<(), HandlerError> + Send>,
        on_error: Option<Box<dyn FnMut(HandlerError) + Send>>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push(Subscriber {
            id,
            on_next,
            on_error,
        });
        id
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Subscriber<T>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives every parsed op and fans it out to subscribers, tracking
/// dispatch statistics.
///
/// Dispatch is expected to be driven from a single read-loop thread per
/// mediator; the counters are readable from anywhere.
pub struct OpMediator {
    op_count: AtomicU64,
    last_op_received_at: Mutex<Option<DateTime<Utc>>>,
    all_ops: Subject<Op>,
    msg_ops: Subject<MsgOp>,
}

impl OpMediator {
    /// Creates a mediator with no subscribers and a zero count.
    pub fn new() -> Self {
        OpMediator {
            op_count: AtomicU64::new(0),
            last_op_received_at: Mutex::new(None),
            all_ops: Subject::new(),
            msg_ops: Subject::new(),
        }
    }

    /// Number of ops dispatched so far.
    pub fn op_count(&self) -> u64 {
        self.op_count.load(Ordering::Acquire)
    }

    /// When the most recent op was dispatched; `None` before the first.
    pub fn last_op_received_at(&self) -> Option<DateTime<Utc>> {
        *self
            .last_op_received_at
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The subject receiving every op, message ops included, un-narrowed.
    pub fn all_ops(&self) -> &Subject<Op> {
        &self.all_ops
    }

    /// The subject receiving only message ops, narrowed to [`MsgOp`].
    pub fn msg_ops(&self) -> &Subject<MsgOp> {
        &self.msg_ops
    }

    /// Delivers one op: bumps the count, stamps the time, publishes on the
    /// all-ops subject and, for message ops, on the msg-ops subject too.
    pub fn dispatch(&self, op: &Op) {
        self.op_count.fetch_add(1, Ordering::AcqRel);
        *self
            .last_op_received_at
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Utc::now());

        self.all_ops.publish(op);
        if let Op::Msg(msg) = op {
            self.msg_ops.publish(msg);
        }
    }
}

impl Default for OpMediator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "mediator_tests.rs"]
mod tests;

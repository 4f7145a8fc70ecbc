// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mutual exclusion with blocking and cancellable-awaitable acquisition.
//!
//! One lock type, two entry points over the same internal state: [`lock`]
//! blocks the calling thread, [`lock_cancellable`] suspends the task until
//! the lock is free or the cancellation token fires. Both release on guard
//! drop, on every exit path.
//!
//! [`lock`]: Locker::lock
//! [`lock_cancellable`]: Locker::lock_cancellable

use tokio::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// A mutual-exclusion primitive guarding a value of type `T`.
#[derive(Debug, Default)]
pub struct Locker<T> {
    inner: Mutex<T>,
}

impl<T> Locker<T> {
    /// Creates a locker guarding `value`.
    pub fn new(value: T) -> Self {
        Locker {
            inner: Mutex::new(value),
        }
    }

    /// Acquires the lock, blocking the calling thread until it is free.
    ///
    /// Must not be called from within an async task; use
    /// [`lock_cancellable`](Self::lock_cancellable) there.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.blocking_lock()
    }

    /// Acquires the lock cooperatively, abandoning the wait with
    /// [`Error::Cancelled`] if `cancel` fires first.
    pub async fn lock_cancellable(
        &self,
        cancel: &CancellationToken,
    ) -> Result<MutexGuard<'_, T>> {
        tokio::select! {
            // Deterministic: a fired token wins even if the lock is free.
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            guard = self.inner.lock() => Ok(guard),
        }
    }
}

#[cfg(test)]
#[path = "locker_tests.rs"]
mod tests;

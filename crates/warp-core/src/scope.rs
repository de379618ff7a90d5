// ── Cancellable Scope ──
//
// A scope is a shared cancellation flag with an optional parent and an
// optional deadline. Work running under a scope polls `is_cancelled()` at
// its own check points; nothing is interrupted preemptively.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// ── Types ──

/// Cloneable handle to a cancellable unit of work.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    parent: Option<Scope>,
    deadline: Option<Instant>,
}

/// Cancels its scope when dropped.
#[derive(Debug)]
#[must_use = "the scope is cancelled as soon as the guard is dropped"]
pub struct DropGuard {
    scope: Scope,
}

// ── Public API ──

impl Scope {
    /// A root scope: never cancelled unless `cancel()` is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A root scope that counts as cancelled once `deadline` has passed.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            inner: Arc::new(Inner {
                deadline: Some(deadline),
                ..Inner::default()
            }),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A scope cancelled whenever this one is, but which can also be
    /// cancelled on its own without affecting this one.
    pub fn child(&self) -> Self {
        Self {
            inner: Arc::new(Inner {
                parent: Some(self.clone()),
                ..Inner::default()
            }),
        }
    }

    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        let mut current = Some(self);
        while let Some(scope) = current {
            if scope.inner.cancelled.load(Ordering::Acquire) {
                return true;
            }
            if scope
                .inner
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
            {
                return true;
            }
            current = scope.inner.parent.as_ref();
        }
        false
    }

    /// Whether this scope or an ancestor has a deadline that has passed.
    /// Explicit `cancel()` calls don't count.
    pub fn deadline_expired(&self) -> bool {
        let now = Instant::now();
        let mut current = Some(self);
        while let Some(scope) = current {
            if scope.inner.deadline.is_some_and(|deadline| now >= deadline) {
                return true;
            }
            current = scope.inner.parent.as_ref();
        }
        false
    }

    pub fn drop_guard(&self) -> DropGuard {
        DropGuard {
            scope: self.clone(),
        }
    }
}

impl Drop for DropGuard {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

// ── Tests ──

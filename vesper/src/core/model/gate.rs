use std::{
    collections::VecDeque,
    fmt::Debug,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use futures::future::BoxFuture;
use tokio::runtime::Handle;

use crate::{
    core::{
        timer::{Timer, TimerHandle},
        traced,
    },
    error::core::AckError,
};

/// Work that may only start once an interaction has been acknowledged.
pub trait Gated: Send + 'static {
    /// Performs the work. Runs at most once, after the gate became ready.
    fn run(self: Box<Self>) -> BoxFuture<'static, ()>;
    /// Resolves the work with the gate's terminal failure instead.
    fn fail(self: Box<Self>, cause: AckError);
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateStatus {
    Pending,
    Ready,
    Failed(AckError),
}

impl GateStatus {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

struct State {
    status: GateStatus,
    queue: VecDeque<Box<dyn Gated>>,
    draining: bool,
    timeout: Option<TimerHandle>,
}

/// Tracks the acknowledgment of one interaction.
///
/// The gate moves from [`GateStatus::Pending`] to either
/// [`GateStatus::Ready`] or [`GateStatus::Failed`] exactly once. Work handed
/// to [`AckGate::enqueue_or_run`] waits while the gate is pending, then runs
/// one item at a time in submission order on a single drain task. If the gate
/// fails instead, every waiting item and every later one is resolved with the
/// same recorded cause.
///
/// An armed gate is kept alive by its own timeout until it reaches a terminal
/// state, so dropping every handle to a pending gate still fails its queue with
/// [`AckError::Timeout`].
pub struct AckGate {
    acknowledged: AtomicBool,
    state: Mutex<State>,
    runtime: Option<Handle>,
}

impl Default for AckGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AckGate {
    /// A pending gate without a timeout.
    ///
    /// Drains run on the tokio runtime current at construction, if any,
    /// otherwise on the one current when the drain starts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            runtime: Handle::try_current().ok(),
            acknowledged: AtomicBool::new(false),
            state: Mutex::new(State {
                status: GateStatus::Pending,
                queue: VecDeque::new(),
                draining: false,
                timeout: None,
            }),
        }
    }

    /// A pending gate that fails with [`AckError::Timeout`] unless it becomes
    /// ready within `timeout`.
    pub fn arm(timeout: Duration, timer: &dyn Timer) -> Arc<Self> {
        let gate = Arc::new(Self::new());
        let pending = gate.clone();
        let handle = timer.schedule(
            timeout,
            Box::new(move || {
                if pending.fail(AckError::Timeout(timeout)) {
                    tracing::debug!(?timeout, "interaction was not acknowledged in time");
                }
            }),
        );

        let mut state = gate.lock();
        if state.status.is_pending() {
            state.timeout = Some(handle);
            drop(state);
        } else {
            drop(state);
            handle.cancel();
        }
        gate
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims the one acknowledgment of this interaction. Returns whether it
    /// had **already** been claimed; only the first caller sees `false`.
    pub fn try_ack(&self) -> bool {
        self.acknowledged.swap(true, Ordering::AcqRel)
    }

    #[must_use]
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn status(&self) -> GateStatus {
        self.lock().status.clone()
    }

    /// The recorded cause, if the gate has failed.
    #[must_use]
    pub fn failure(&self) -> Option<AckError> {
        match &self.lock().status {
            GateStatus::Failed(cause) => Some(cause.clone()),
            GateStatus::Pending | GateStatus::Ready => None,
        }
    }

    /// Runs `op` once the gate is ready, or fails it if the gate has failed.
    pub fn enqueue_or_run(self: &Arc<Self>, op: Box<dyn Gated>) {
        let mut state = self.lock();
        match &state.status {
            GateStatus::Failed(cause) => {
                let cause = cause.clone();
                drop(state);
                op.fail(cause);
            }
            GateStatus::Pending => {
                state.queue.push_back(op);
                tracing::trace!(queued = state.queue.len(), "queued gated operation");
            }
            GateStatus::Ready => {
                state.queue.push_back(op);
                if !state.draining {
                    state.draining = true;
                    drop(state);
                    self.spawn_drain();
                }
            }
        }
    }

    /// Marks the gate ready, cancels its timeout and starts running whatever
    /// was queued. Returns whether this call made the transition.
    pub fn ready(self: &Arc<Self>) -> bool {
        let (timeout, drain) = {
            let mut state = self.lock();
            if !state.status.is_pending() {
                return false;
            }
            state.status = GateStatus::Ready;
            let drain = !state.queue.is_empty() && !state.draining;
            state.draining |= drain;
            tracing::trace!(queued = state.queue.len(), "gate ready");
            (state.timeout.take(), drain)
        };

        if let Some(timeout) = timeout {
            timeout.cancel();
        }
        if drain {
            self.spawn_drain();
        }
        true
    }

    /// Marks the gate failed and fails everything queued with `cause`.
    /// Returns whether this call made the transition.
    pub fn fail(&self, cause: AckError) -> bool {
        let (queue, timeout) = {
            let mut state = self.lock();
            if !state.status.is_pending() {
                return false;
            }
            state.status = GateStatus::Failed(cause.clone());
            tracing::trace!(%cause, "gate failed");
            (std::mem::take(&mut state.queue), state.timeout.take())
        };

        if let Some(timeout) = timeout {
            timeout.cancel();
        }
        if !queue.is_empty() {
            tracing::warn!(dropped = queue.len(), %cause, "failing queued followups");
        }
        for op in queue {
            op.fail(cause.clone());
        }
        true
    }

    fn spawn_drain(self: &Arc<Self>) {
        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            let mut state = self.lock();
            state.draining = false;
            tracing::warn!(
                queued = state.queue.len(),
                "no tokio runtime to run gated operations on, keeping them queued"
            );
            return;
        };
        let gate = self.clone();
        traced::tokio_spawn_on(&runtime, async move { gate.drain().await });
    }

    async fn drain(&self) {
        loop {
            let op = {
                let mut state = self.lock();
                let Some(op) = state.queue.pop_front() else {
                    state.draining = false;
                    return;
                };
                op
            };
            op.run().await;
        }
    }
}

impl Debug for AckGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("AckGate")
            .field("acknowledged", &self.is_acknowledged())
            .field("status", &state.status)
            .field("queued", &state.queue.len())
            .field("draining", &state.draining)
            .finish_non_exhaustive()
    }
}

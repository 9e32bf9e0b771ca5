use std::{
    collections::BTreeMap,
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use super::traced;

pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Schedules one-shot tasks.
///
/// Every [`AckGate`](crate::AckGate) arms its acknowledgment timeout through
/// one of these, so tests can swap real time for a [`ManualTimer`].
pub trait Timer: Send + Sync {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle;
}

/// Cancels a scheduled task. Dropping the handle does *not* cancel it.
pub struct TimerHandle {
    cancel: Box<dyn FnOnce() + Send + 'static>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Box::new(cancel),
        }
    }

    pub fn cancel(self) {
        (self.cancel)();
    }
}

impl Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle").finish_non_exhaustive()
    }
}

/// Runs tasks on the ambient tokio runtime after a real delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let handle = traced::tokio_spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        let abort = handle.abort_handle();
        TimerHandle::new(move || abort.abort())
    }
}

struct Entry {
    deadline: Duration,
    task: TimerTask,
}

#[derive(Default)]
struct ManualTimerState {
    now: Duration,
    next_id: u64,
    entries: BTreeMap<u64, Entry>,
}

/// A timer whose clock only moves when told to.
#[derive(Default, Clone)]
pub struct ManualTimer {
    state: Arc<Mutex<ManualTimerState>>,
}

impl ManualTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualTimerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moves the clock forward and runs every task that became due, earliest
    /// deadline first. Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let due = {
            let mut state = self.lock();
            state.now += by;
            let now = state.now;

            let mut due_ids = state
                .entries
                .iter()
                .filter(|(_, entry)| entry.deadline <= now)
                .map(|(id, entry)| (entry.deadline, *id))
                .collect::<Vec<_>>();
            due_ids.sort_unstable();

            due_ids
                .into_iter()
                .filter_map(|(_, id)| state.entries.remove(&id))
                .collect::<Vec<_>>()
        };

        let ran = due.len();
        for entry in due {
            (entry.task)();
        }
        ran
    }

    /// Runs every pending task regardless of its deadline.
    pub fn fire_all(&self) -> usize {
        let entries = std::mem::take(&mut self.lock().entries);
        let ran = entries.len();
        for entry in entries.into_values() {
            (entry.task)();
        }
        ran
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().entries.len()
    }
}

impl Debug for ManualTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("ManualTimer")
            .field("now", &state.now)
            .field("pending", &state.entries.len())
            .finish()
    }
}

impl Timer for ManualTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let id = {
            let mut state = self.lock();
            let id = state.next_id;
            state.next_id += 1;
            let deadline = state.now + delay;
            state.entries.insert(id, Entry { deadline, task });
            id
        };

        let state: Weak<Mutex<ManualTimerState>> = Arc::downgrade(&self.state);
        TimerHandle::new(move || {
            if let Some(state) = state.upgrade() {
                state
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .entries
                    .remove(&id);
            }
        })
    }
}

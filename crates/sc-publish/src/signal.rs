//! Settable, clearable, awaitable boolean flags.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// A boolean event flag.
///
/// Any number of tasks may [`wait`](Self::wait) for it; all of them wake
/// when it is set.  Clearing never wakes anyone.
#[derive(Debug, Default)]
pub struct Signal {
    flag:   AtomicBool,
    notify: Notify,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.flag.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn clear(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Resolve once the flag is set.  Returns immediately if it already is.
    pub async fn wait(&self) {
        loop {
            // Created before the check so a `set` in between is not missed.
            let notified = self.notify.notified();
            if self.is_set() {
                return;
            }
            notified.await;
        }
    }
}

//! Cooperative cancellation shared between the poll loop and signal handlers.
//!
//! Triggering drops the only sender of an internal channel, which wakes every
//! thread blocked in `wait_timeout` at once. Waiting never spins.
use crossbeam_channel as xch;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
struct Inner {
    stopped: AtomicBool,
    tx: Mutex<Option<xch::Sender<()>>>,
    rx: xch::Receiver<()>,
}

/// Cloneable stop token. All clones observe the same trigger.
#[derive(Debug, Clone)]
pub struct StopSignal {
    inner: Arc<Inner>,
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, rx) = xch::bounded(0);
        Self {
            inner: Arc::new(Inner {
                stopped: AtomicBool::new(false),
                tx: Mutex::new(Some(tx)),
                rx,
            }),
        }
    }

    /// Request a stop. Idempotent; safe to call from a signal-handler thread.
    pub fn trigger(&self) {
        self.inner.stopped.store(true, Ordering::SeqCst);
        if let Ok(mut tx) = self.inner.tx.lock() {
            tx.take();
        }
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }

    /// Block for up to `d`. Returns `true` if the signal fired (before or during the wait).
    pub fn wait_timeout(&self, d: Duration) -> bool {
        if self.is_stopped() {
            return true;
        }
        match self.inner.rx.recv_timeout(d) {
            Err(xch::RecvTimeoutError::Timeout) => self.is_stopped(),
            // Disconnected: the sender was dropped by trigger().
            Ok(()) | Err(xch::RecvTimeoutError::Disconnected) => true,
        }
    }
}

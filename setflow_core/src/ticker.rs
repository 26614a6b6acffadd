//! Cancellable periodic tick scheduler.
//!
//! Drives the rest timer on a fixed wall-clock cadence. The worker thread
//! waits on a cancel channel with a timeout equal to the tick period, so
//! cancellation is observed at the next wakeup and the worker is joined
//! before `cancel` returns: no tick can fire after cancellation.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Handle to a running periodic task
///
/// At most one ticker should be live per session; dropping the handle
/// cancels the task. Starting a new rest period means dropping the old
/// handle and spawning a fresh one.
pub struct Ticker {
    cancel_tx: mpsc::Sender<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a worker that invokes `on_tick` once per `period`
    ///
    /// The callback returns `false` to stop the ticker from within (for
    /// example when the countdown it drives has expired).
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            match cancel_rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    if !on_tick() {
                        tracing::debug!("Ticker stopped by callback");
                        break;
                    }
                }
                // Cancelled explicitly, or the handle was dropped
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        Self {
            cancel_tx,
            handle: Some(handle),
        }
    }

    /// Stop the periodic task and wait for the worker to finish
    ///
    /// After this returns, no further tick will be delivered.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Send may fail if the worker already stopped itself
        let _ = self.cancel_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

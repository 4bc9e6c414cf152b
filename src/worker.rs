//! Start/stop protocol shared by background workers.
//!
//! A worker owns one named OS thread. Stopping drops the stop channel's
//! sender, which the thread observes as a disconnect, then joins the thread
//! before anything it touches is released. Stopping is idempotent.

use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use tracing::{error, info};

use crate::error::Result;

/// Handed to the worker body; reports when the owner asked it to stop.
#[derive(Clone)]
pub struct StopSignal {
    rx: Receiver<()>,
}

impl StopSignal {
    pub fn is_stopped(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// The raw channel, for use in `crossbeam_channel::select!`. It never
    /// carries a message; it only disconnects.
    pub fn receiver(&self) -> &Receiver<()> {
        &self.rx
    }
}

/// Owning handle for a worker thread.
pub struct WorkerHandle {
    name: String,
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Spawns `body` on a new thread named `name`.
    ///
    /// Fails if the OS refuses to create the thread; nothing is left running
    /// in that case.
    pub fn spawn<F>(name: impl Into<String>, body: F) -> Result<Self>
    where
        F: FnOnce(StopSignal) + Send + 'static,
    {
        let name = name.into();
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);
        let signal = StopSignal { rx: stop_rx };

        let thread = std::thread::Builder::new()
            .name(name.clone())
            .spawn(move || body(signal))?;

        info!(worker = %name, "worker started");
        Ok(Self {
            name,
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// False once stopped, and also once the thread has exited on its own
    /// (returned or panicked).
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Signals the thread and waits for it to exit. Safe to call repeatedly.
    pub fn stop(&mut self) {
        drop(self.stop_tx.take());
        if let Some(thread) = self.thread.take() {
            match thread.join() {
                Ok(()) => info!(worker = %self.name, "worker stopped"),
                Err(_) => error!(worker = %self.name, "worker thread panicked"),
            }
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Lifecycle shared by every background worker.
pub trait ThreadedWorker {
    /// Stops the worker and waits for its thread. Idempotent.
    fn stop(&mut self);

    fn is_running(&self) -> bool;
}

/// Stops `worker` if there is one and returns the null handle.
///
/// ```ignore
/// self.flight = stop_threaded_worker(self.flight.take());
/// ```
pub fn stop_threaded_worker<W: ThreadedWorker>(worker: Option<W>) -> Option<W> {
    if let Some(mut worker) = worker {
        worker.stop();
    }
    None
}

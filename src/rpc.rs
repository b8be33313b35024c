//! Synchronous cross-thread calls into the event-loop thread.
//!
//! # Purpose
//!
//! The player lives on a single-threaded event loop and is not touchable from
//! anywhere else. HTTP handlers run on the server's worker threads, so every
//! player read or mutation is shipped across as a closure and executed by the
//! loop, with the handler blocked until the result comes back.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐      task channel       ┌─────────────────────┐
//! │  HTTP worker thread  │ ── boxed closure ─────▶ │  Event-loop thread  │
//! │                      │                         │                     │
//! │  RpcHandle::call(f)  │ ◀─ result / error ───── │  RpcQueue::run_tick │
//! │  (blocks on reply)   │      one-shot reply     │  / drain            │
//! └──────────────────────┘                         └─────────────────────┘
//! ```
//!
//! The handle is cloneable; concurrent callers are serialized by the single
//! queue consumer. Within one caller, sequential calls execute in submission
//! order because each blocks until completion before the next is issued.
//!
//! # Caveats
//!
//! - Calling from the event-loop thread itself deadlocks: the loop would be
//!   waiting on a reply only it can produce. Caller responsibility.
//! - There is no reply timeout. If the loop stops draining (modal dialog,
//!   livelock), callers block until it resumes. If the loop *exits* and the
//!   queue is dropped, pending and future callers get
//!   [`RpcError::Disconnected`] instead of hanging.

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

type Task<P> = Box<dyn FnOnce(&mut P) + Send>;

/// Error surfaced to the calling thread.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The event loop has exited and dropped its queue.
    #[error("event-loop thread is gone")]
    Disconnected,

    /// The invoked closure returned an error on the event-loop thread; it is
    /// re-surfaced here, in the caller, unchanged.
    #[error(transparent)]
    Call(anyhow::Error),
}

/// Create a connected handle/queue pair.
///
/// The queue end belongs to the event-loop thread; handles may be cloned
/// freely onto any other thread.
pub fn channel<P>() -> (RpcHandle<P>, RpcQueue<P>) {
    let (tx, rx) = unbounded();
    (RpcHandle { tx }, RpcQueue { rx })
}

/// Caller side: submits closures and blocks for their results.
pub struct RpcHandle<P> {
    tx: Sender<Task<P>>,
}

impl<P> Clone for RpcHandle<P> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<P: 'static> RpcHandle<P> {
    /// Run `f` on the event-loop thread and return its result.
    ///
    /// Blocks until the loop has executed the closure. Errors raised by `f`
    /// come back as [`RpcError::Call`]; nothing is returned partially.
    ///
    /// Must not be called from the event-loop thread (deadlock).
    pub fn call<R, F>(&self, f: F) -> Result<R, RpcError>
    where
        R: Send + 'static,
        F: FnOnce(&mut P) -> anyhow::Result<R> + Send + 'static,
    {
        let (reply_tx, reply_rx) = bounded(1);
        let task: Task<P> = Box::new(move |target| {
            // A dropped reply receiver just means the caller is gone.
            let _ = reply_tx.send(f(target));
        });

        self.tx.send(task).map_err(|_| RpcError::Disconnected)?;

        match reply_rx.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(RpcError::Call(err)),
            Err(_) => Err(RpcError::Disconnected),
        }
    }
}

/// Event-loop side: the single consumer of submitted tasks.
pub struct RpcQueue<P> {
    rx: Receiver<Task<P>>,
}

impl<P> RpcQueue<P> {
    /// Run all currently queued tasks without blocking. Returns how many ran.
    ///
    /// Suited to loops that already wake regularly (a GUI frame callback).
    pub fn drain(&self, target: &mut P) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task(target);
            ran += 1;
        }
        ran
    }

    /// Block up to `timeout` for one task and run it.
    ///
    /// Returns `false` once all handles are dropped and the queue is empty,
    /// which is the loop's signal to stop servicing remote calls.
    pub fn run_tick(&self, target: &mut P, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(task) => {
                task(target);
                true
            }
            Err(RecvTimeoutError::Timeout) => true,
            Err(RecvTimeoutError::Disconnected) => false,
        }
    }
}

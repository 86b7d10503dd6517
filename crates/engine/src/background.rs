//! Background fetch worker.
//!
//! A single named thread that runs submitted jobs in FIFO order. The result
//! cache hands every fetch to its worker so phrase production never happens
//! on the caller's thread.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::error;

type Job = Box<dyn FnOnce() + Send>;

/// Error returned when submitting to a worker that has been shut down.
#[derive(Debug)]
pub struct WorkerShutdown;

impl std::fmt::Display for WorkerShutdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fetch worker has been shut down")
    }
}

impl std::error::Error for WorkerShutdown {}

struct WorkerInner {
    queue: Mutex<VecDeque<Job>>,
    work_ready: Condvar,
    shutdown: AtomicBool,
    jobs_completed: AtomicU64,
}

/// Single-threaded FIFO job runner.
pub struct FetchWorker {
    inner: Arc<WorkerInner>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl FetchWorker {
    /// Start the worker thread, named `name`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn new(name: &str) -> std::io::Result<Self> {
        let inner = Arc::new(WorkerInner {
            queue: Mutex::new(VecDeque::new()),
            work_ready: Condvar::new(),
            shutdown: AtomicBool::new(false),
            jobs_completed: AtomicU64::new(0),
        });

        let inner_clone = Arc::clone(&inner);
        let handle = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || worker_loop(&inner_clone))?;

        Ok(Self {
            inner,
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Queue a job.
    ///
    /// Returns `Err(WorkerShutdown)` once [`shutdown`](Self::shutdown) has
    /// been called; the job is dropped without running.
    pub fn submit(&self, job: impl FnOnce() + Send + 'static) -> Result<(), WorkerShutdown> {
        {
            let mut queue = self.inner.queue.lock();
            // Checked under the lock so a job can't slip in after the worker exits
            if self.inner.shutdown.load(Ordering::Acquire) {
                return Err(WorkerShutdown);
            }
            queue.push_back(Box::new(job));
        }
        self.inner.work_ready.notify_one();
        Ok(())
    }

    /// Number of jobs that have finished, including ones that panicked.
    pub fn jobs_completed(&self) -> u64 {
        self.inner.jobs_completed.load(Ordering::Relaxed)
    }

    /// Signal the worker to exit and join it.
    ///
    /// Jobs already queued still run. Idempotent.
    pub fn shutdown(&self) {
        {
            let _queue = self.inner.queue.lock();
            self.inner.shutdown.store(true, Ordering::Release);
            self.inner.work_ready.notify_all();
        }

        if let Some(handle) = self.handle.lock().take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FetchWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(inner: &WorkerInner) {
    loop {
        let job = {
            let mut queue = inner.queue.lock();
            loop {
                if let Some(job) = queue.pop_front() {
                    break job;
                }
                if inner.shutdown.load(Ordering::Acquire) {
                    return;
                }
                inner.work_ready.wait(&mut queue);
            }
        };

        // A panicking job must not take the thread down with it
        if let Err(e) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(job)) {
            error!(
                target: "anagram::fetch",
                "fetch job panicked: {}",
                panic_message(e.as_ref())
            );
        }
        inner.jobs_completed.fetch_add(1, Ordering::Relaxed);
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("(non-string panic)")
}

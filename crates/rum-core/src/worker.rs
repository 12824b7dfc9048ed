//! Offloading blocking calls to a dedicated thread.
//!
//! Instead of blocking the host thread, a call is submitted to the
//! worker and the host polls the returned [`Pending`] from its own loop.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use tracing::{debug, warn};

use crate::{Error, Result};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A single background thread that runs submitted jobs one at a time,
/// in submission order.
///
/// Dropping the worker lets queued jobs finish, then joins the thread.
pub struct BlockingWorker {
    jobs: Option<Sender<Job>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl BlockingWorker {
    /// Starts the worker thread.
    pub fn spawn(name: &str) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<Job>();
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                for job in rx {
                    job();
                }
                debug!("blocking worker drained, exiting");
            })?;

        Ok(Self {
            jobs: Some(tx),
            handle: Some(handle),
        })
    }

    /// Queues `f` and returns a handle to its eventual result.
    ///
    /// A panic inside `f` is contained: the worker keeps running and the
    /// returned [`Pending`] reports [`Error::WorkerGone`].
    pub fn submit<T, F>(&self, f: F) -> Result<Pending<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);
        let job: Job = Box::new(move || match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => {
                let _ = reply_tx.send(value);
            }
            Err(_) => warn!("blocking job panicked"),
        });

        let jobs = self.jobs.as_ref().ok_or(Error::WorkerGone)?;
        jobs.send(job).map_err(|_| Error::WorkerGone)?;
        Ok(Pending { reply: reply_rx })
    }
}

impl Drop for BlockingWorker {
    fn drop(&mut self) {
        // Closing the channel ends the worker's receive loop.
        drop(self.jobs.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// The result of a job submitted to a [`BlockingWorker`].
pub struct Pending<T> {
    reply: Receiver<T>,
}

impl<T> Pending<T> {
    /// Non-blocking poll.
    ///
    /// Returns `Ok(None)` while the job runs and `Ok(Some(value))` once.
    /// After the value has been taken, further polls report
    /// [`Error::WorkerGone`].
    pub fn try_take(&self) -> Result<Option<T>> {
        match self.reply.try_recv() {
            Ok(value) => Ok(Some(value)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(Error::WorkerGone),
        }
    }

    /// Blocks the calling thread until the job finishes.
    pub fn wait(self) -> Result<T> {
        self.reply.recv().map_err(|_| Error::WorkerGone)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier, Mutex};
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    fn submitted_job_returns_value() {
        // Arrange
        let worker = BlockingWorker::spawn("test-worker").unwrap();

        // Act
        let pending = worker.submit(|| 6 * 7).unwrap();

        // Assert
        assert_eq!(pending.wait().unwrap(), 42);
    }

    #[test]
    fn try_take_is_empty_while_job_blocks() {
        // Arrange
        let worker = BlockingWorker::spawn("test-worker").unwrap();
        let gate = Arc::new(Barrier::new(2));
        let job_gate = Arc::clone(&gate);

        // Act
        let pending = worker
            .submit(move || {
                job_gate.wait();
                "answered"
            })
            .unwrap();
        let before = pending.try_take().unwrap();
        gate.wait();

        // Assert
        assert_eq!(before, None);
        let deadline = Instant::now() + Duration::from_secs(5);
        let value = loop {
            if let Some(v) = pending.try_take().unwrap() {
                break v;
            }
            assert!(Instant::now() < deadline, "job never finished");
            thread::sleep(Duration::from_millis(1));
        };
        assert_eq!(value, "answered");
        assert!(matches!(pending.try_take(), Err(Error::WorkerGone)));
    }

    #[test]
    fn jobs_run_in_submission_order() {
        // Arrange
        let worker = BlockingWorker::spawn("test-worker").unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));

        // Act
        let pendings: Vec<_> = (0..5)
            .map(|i| {
                let order = Arc::clone(&order);
                worker.submit(move || order.lock().unwrap().push(i)).unwrap()
            })
            .collect();
        for pending in pendings {
            pending.wait().unwrap();
        }

        // Assert
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn panicking_job_does_not_kill_worker() {
        // Arrange
        let worker = BlockingWorker::spawn("test-worker").unwrap();

        // Act
        let failed = worker.submit(|| -> u32 { panic!("boom") }).unwrap();
        let next = worker.submit(|| 7).unwrap();

        // Assert
        assert!(matches!(failed.wait(), Err(Error::WorkerGone)));
        assert_eq!(next.wait().unwrap(), 7);
    }

    #[test]
    fn drop_finishes_queued_jobs() {
        // Arrange
        let worker = BlockingWorker::spawn("test-worker").unwrap();
        let done = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&done);

        // Act
        let pending = worker
            .submit(move || {
                thread::sleep(Duration::from_millis(20));
                *flag.lock().unwrap() = true;
            })
            .unwrap();
        drop(worker);

        // Assert
        assert!(*done.lock().unwrap());
        assert!(pending.wait().is_ok());
    }
}

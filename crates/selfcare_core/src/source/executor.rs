//! Single background worker for disk I/O.
//!
//! # Responsibility
//! - Own the SQLite connection on one dedicated thread.
//! - Run submitted jobs strictly in submission order.
//! - Hand read results back to async callers over oneshot channels.
//!
//! # Invariants
//! - Jobs never run concurrently, so a write queued before a read is always
//!   visible to that read.
//! - Dropping the executor drains queued jobs and joins the worker.

use log::{error, warn};
use rusqlite::Connection;
use std::io;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use tokio::sync::oneshot;

const WORKER_THREAD_NAME: &str = "selfcare-disk-io";

type Job = Box<dyn FnOnce(&Connection) + Send + 'static>;

/// Serial executor bound to one database connection.
pub struct DiskIoExecutor {
    sender: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl DiskIoExecutor {
    /// Moves `conn` onto a freshly spawned worker thread.
    ///
    /// # Errors
    /// - Returns the OS error when the worker thread cannot be spawned.
    pub fn start(conn: Connection) -> io::Result<Self> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                for job in receiver {
                    job(&conn);
                }
            })?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Queues a job without waiting for it.
    ///
    /// Returns `false` when the worker is gone and the job was dropped.
    pub fn execute(&self, job: impl FnOnce(&Connection) + Send + 'static) -> bool {
        let Some(sender) = self.sender.as_ref() else {
            return false;
        };
        match sender.send(Box::new(job)) {
            Ok(()) => true,
            Err(_) => {
                error!("event=disk_io_submit module=source status=error error_code=worker_gone");
                false
            }
        }
    }

    /// Queues a job and resolves with its result.
    ///
    /// Resolves to `None` when the worker stopped before running the job.
    pub async fn submit<T>(&self, job: impl FnOnce(&Connection) -> T + Send + 'static) -> Option<T>
    where
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let queued = self.execute(move |conn| {
            // Receiver may have been dropped by a cancelled caller.
            let _ = reply_tx.send(job(conn));
        });
        if !queued {
            return None;
        }
        reply_rx.await.ok()
    }
}

impl Drop for DiskIoExecutor {
    fn drop(&mut self) {
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("event=disk_io_shutdown module=source status=error error_code=worker_panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DiskIoExecutor;
    use rusqlite::Connection;

    #[tokio::test]
    async fn jobs_run_in_submission_order() {
        let executor = DiskIoExecutor::start(Connection::open_in_memory().unwrap()).unwrap();
        assert!(executor.execute(|conn| {
            conn.execute_batch("CREATE TABLE seq (n INTEGER);").unwrap();
        }));
        for n in 0..5 {
            executor.execute(move |conn| {
                conn.execute("INSERT INTO seq (n) VALUES (?1);", [n]).unwrap();
            });
        }

        let values = executor
            .submit(|conn| {
                let mut stmt = conn.prepare("SELECT n FROM seq ORDER BY rowid;").unwrap();
                stmt.query_map([], |row| row.get::<_, i64>(0))
                    .unwrap()
                    .collect::<Result<Vec<_>, _>>()
                    .unwrap()
            })
            .await
            .unwrap();

        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn submit_runs_on_worker_thread() {
        let executor = DiskIoExecutor::start(Connection::open_in_memory().unwrap()).unwrap();
        let name = executor
            .submit(|_| std::thread::current().name().map(str::to_string))
            .await
            .unwrap();
        assert_eq!(name.as_deref(), Some("selfcare-disk-io"));
    }
}

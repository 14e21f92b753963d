use std::any::Any;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::AnalysisError;
use crate::ports::{Analyzer, JobStore};
use crate::queue::{WorkItem, WorkQueue};

/// Fixed-size worker pool handle.
/// - Each worker runs at most one analysis at a time, so at most `size()`
///   analyses run concurrently.
/// - `shutdown_and_join()` closes the queue; workers finish what is queued
///   and then exit.
pub struct WorkerPool {
    queue: Arc<WorkQueue>,
    joins: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `n` workers (at least one). Must be called inside a tokio runtime.
    pub fn spawn(
        n: usize,
        queue: Arc<WorkQueue>,
        store: Arc<dyn JobStore>,
        analyzer: Arc<dyn Analyzer>,
    ) -> Self {
        let n = n.max(1);
        let mut joins = Vec::with_capacity(n);
        for worker_id in 0..n {
            let q = Arc::clone(&queue);
            let s = Arc::clone(&store);
            let a = Arc::clone(&analyzer);
            joins.push(tokio::spawn(async move {
                worker_loop(worker_id, q, s, a).await;
            }));
        }
        info!(workers = n, policy = ?queue.policy(), "worker pool started");

        Self { queue, joins }
    }

    pub fn size(&self) -> usize {
        self.joins.len()
    }

    /// Stop accepting work. Jobs already queued still run.
    pub async fn request_shutdown(&self) {
        self.queue.close().await;
    }

    /// Shutdown and wait for all workers.
    pub async fn shutdown_and_join(self) {
        self.request_shutdown().await;
        for j in self.joins {
            let _ = j.await;
        }
        info!("worker pool stopped");
    }
}

async fn worker_loop(
    worker_id: usize,
    queue: Arc<WorkQueue>,
    store: Arc<dyn JobStore>,
    analyzer: Arc<dyn Analyzer>,
) {
    while let Some(item) = queue.pop().await {
        run_job(worker_id, item, store.as_ref(), &analyzer).await;
    }
    debug!(worker_id, "worker exiting");
}

/// Execute one job and write the outcome back. Never propagates failures:
/// anything the analyzer does wrong ends up as that job's `failed` status.
async fn run_job(
    worker_id: usize,
    item: WorkItem,
    store: &dyn JobStore,
    analyzer: &Arc<dyn Analyzer>,
) {
    let WorkItem { job_id, text } = item;
    debug!(worker_id, %job_id, "analysis started");

    // 解析は CPU を使うので blocking pool で実行する（panic もここで捕まえる）
    let analyzer = Arc::clone(analyzer);
    let outcome = match tokio::task::spawn_blocking(move || analyzer.analyze(&text)).await {
        Ok(outcome) => outcome,
        Err(join_err) => Err(AnalysisError::Panicked(panic_message(join_err))),
    };

    let written = match outcome {
        Ok(record) => {
            info!(worker_id, %job_id, "job completed");
            store.complete(job_id, record).await
        }
        Err(err) => {
            warn!(worker_id, %job_id, error = %err, "job failed");
            store.fail(job_id, err.to_string()).await
        }
    };

    if let Err(e) = written {
        warn!(worker_id, %job_id, error = %e, "could not record job outcome");
    }
}

fn panic_message(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload: Box<dyn Any + Send> = err.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

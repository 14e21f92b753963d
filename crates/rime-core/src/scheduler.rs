//! JobScheduler - テキストを追跡可能な非同期ジョブに変える
//!
//! # フロー
//! 1. 空白だけの入力は `InvalidInput`（ジョブは作らない）
//! 2. 新しい JobId を発行
//! 3. キューの枠を確保してから JobStore::create（in_flight）
//! 4. WorkItem を commit してすぐに返す（解析はワーカーが非同期に実行）

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::{JobId, JobSnapshot, JobStatus};
use crate::error::RimeError;
use crate::observability::JobCounts;
use crate::ports::{Analyzer, IdGenerator, JobStore};
use crate::queue::{QueuePolicy, WorkItem, WorkQueue};
use crate::worker::WorkerPool;

/// What `submit` hands back synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub job_id: JobId,
    pub status: JobStatus,
}

pub struct JobScheduler {
    store: Arc<dyn JobStore>,
    ids: Arc<dyn IdGenerator>,
    queue: Arc<WorkQueue>,
    pool: Mutex<Option<WorkerPool>>,
    workers: usize,
}

impl JobScheduler {
    /// Start `workers` workers over a fresh queue. Must be called inside a
    /// tokio runtime.
    pub fn new(
        store: Arc<dyn JobStore>,
        ids: Arc<dyn IdGenerator>,
        analyzer: Arc<dyn Analyzer>,
        workers: usize,
        policy: QueuePolicy,
    ) -> Self {
        let queue = Arc::new(WorkQueue::new(policy));
        let pool = WorkerPool::spawn(workers, Arc::clone(&queue), Arc::clone(&store), analyzer);
        let workers = pool.size();

        Self {
            store,
            ids,
            queue,
            pool: Mutex::new(Some(pool)),
            workers,
        }
    }

    /// Register a job for `text` and queue it. Returns as soon as the job is
    /// queued; a status query right after this never answers `unknown`.
    pub async fn submit(&self, text: impl Into<String>) -> Result<Submission, RimeError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(RimeError::InvalidInput);
        }

        let job_id = self.ids.generate_job_id();

        // Busy/Shutdown の判定を create より先に済ませる（拒否されたジョブは作らない）
        let slot = self.queue.reserve().await?;
        self.store.create(job_id, text.clone()).await?;
        slot.commit(WorkItem { job_id, text }).await;

        debug!(%job_id, "job queued");
        Ok(Submission {
            job_id,
            status: JobStatus::InFlight,
        })
    }

    pub async fn status(&self, job_id: JobId) -> JobSnapshot {
        self.store.get(job_id).await
    }

    pub async fn counts(&self) -> JobCounts {
        self.store.counts().await
    }

    /// Jobs queued but not yet picked up by a worker.
    pub async fn queue_depth(&self) -> usize {
        self.queue.len().await
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Stop accepting submissions, let queued jobs finish, and wait for the
    /// workers. Later calls are no-ops.
    pub async fn shutdown(&self) {
        let pool = self.pool.lock().await.take();
        if let Some(pool) = pool {
            info!("scheduler shutting down");
            pool.shutdown_and_join().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisError, AnalysisRecord};
    use crate::impls::InMemoryJobStore;
    use crate::ports::{SystemClock, UlidGenerator};
    use rstest::rstest;
    use std::time::Duration;

    fn echo(text: &str) -> Result<AnalysisRecord, AnalysisError> {
        Ok(AnalysisRecord::new(text))
    }

    fn scheduler(workers: usize, policy: QueuePolicy) -> (JobScheduler, Arc<InMemoryJobStore>) {
        let store = Arc::new(InMemoryJobStore::new());
        let scheduler = JobScheduler::new(
            store.clone(),
            Arc::new(UlidGenerator::new(SystemClock)),
            Arc::new(echo),
            workers,
            policy,
        );
        (scheduler, store)
    }

    async fn wait_terminal(scheduler: &JobScheduler, job_id: JobId) -> JobSnapshot {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let snap = scheduler.status(job_id).await;
                if snap.status.is_terminal() {
                    return snap;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("job did not finish in time")
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t ")]
    #[tokio::test]
    async fn blank_text_is_rejected_without_creating_a_job(#[case] text: &str) {
        let (scheduler, store) = scheduler(1, QueuePolicy::Unbounded);

        assert_eq!(scheduler.submit(text).await, Err(RimeError::InvalidInput));
        assert_eq!(store.counts().await.total(), 0);
        assert_eq!(scheduler.queue_depth().await, 0);
    }

    #[tokio::test]
    async fn submitted_job_is_never_unknown() {
        let (scheduler, _store) = scheduler(2, QueuePolicy::Unbounded);

        let submission = scheduler.submit("Stille skimrer snøen").await.unwrap();
        assert_eq!(submission.status, JobStatus::InFlight);

        let status = scheduler.status(submission.job_id).await.status;
        assert_ne!(status, JobStatus::Unknown);

        let done = wait_terminal(&scheduler, submission.job_id).await;
        assert_eq!(done.status, JobStatus::Completed);
        assert_eq!(done.result.unwrap().text, "Stille skimrer snøen");
    }

    #[tokio::test]
    async fn shutdown_rejects_new_work_and_is_idempotent() {
        let (scheduler, store) = scheduler(1, QueuePolicy::Unbounded);
        scheduler.shutdown().await;
        scheduler.shutdown().await;

        assert_eq!(scheduler.submit("late").await, Err(RimeError::Shutdown));
        assert_eq!(store.counts().await.total(), 0);
    }

    #[tokio::test]
    async fn zero_capacity_still_accepts_work() {
        let (scheduler, _store) = scheduler(4, QueuePolicy::Bounded { capacity: 0 });

        let submission = scheduler.submit("Stille skimrer snøen").await.unwrap();
        let done = wait_terminal(&scheduler, submission.job_id).await;
        assert_eq!(done.status, JobStatus::Completed);
        scheduler.shutdown().await;
    }

    #[tokio::test]
    async fn worker_count_is_reported() {
        let (scheduler, _store) = scheduler(4, QueuePolicy::Unbounded);
        assert_eq!(scheduler.workers(), 4);
    }
}

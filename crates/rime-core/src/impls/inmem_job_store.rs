//! InMemoryJobStore - プロセス内メモリだけで持つ JobStore
//!
//! # 実装詳細
//! - HashMap<JobId, JobRecord> を 1 つの Mutex で守る
//! - ロックを保持したまま await しない（各操作はロック内で完結）
//! - 永続化しない：再起動で全て消える

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{AnalysisRecord, JobId, JobRecord, JobSnapshot};
use crate::error::RimeError;
use crate::observability::JobCounts;
use crate::ports::{Clock, JobStore, SystemClock};

pub struct InMemoryJobStore {
    jobs: Mutex<HashMap<JobId, JobRecord>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for InMemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn create(&self, job_id: JobId, payload: String) -> Result<(), RimeError> {
        let now = self.clock.now();
        let mut jobs = self.jobs.lock().await;
        match jobs.entry(job_id) {
            Entry::Occupied(_) => Err(RimeError::DuplicateJob(job_id)),
            Entry::Vacant(slot) => {
                // pending -> in_flight は同じロックの中で行う（pending は外から見えない）
                let mut record = JobRecord::new(job_id, payload, now);
                record.mark_in_flight(now)?;
                slot.insert(record);
                debug!(%job_id, "job created");
                Ok(())
            }
        }
    }

    async fn complete(&self, job_id: JobId, result: AnalysisRecord) -> Result<(), RimeError> {
        let now = self.clock.now();
        let mut jobs = self.jobs.lock().await;
        let record = jobs
            .get_mut(&job_id)
            .ok_or(RimeError::UnknownJob(job_id))?;
        record.mark_completed(result, now)
    }

    async fn fail(&self, job_id: JobId, message: String) -> Result<(), RimeError> {
        let now = self.clock.now();
        let mut jobs = self.jobs.lock().await;
        let record = jobs
            .get_mut(&job_id)
            .ok_or(RimeError::UnknownJob(job_id))?;
        record.mark_failed(message, now)
    }

    async fn get(&self, job_id: JobId) -> JobSnapshot {
        let jobs = self.jobs.lock().await;
        jobs.get(&job_id)
            .map(JobRecord::snapshot)
            .unwrap_or_else(|| JobSnapshot::unknown(job_id))
    }

    async fn counts(&self) -> JobCounts {
        let jobs = self.jobs.lock().await;
        let mut counts = JobCounts::default();
        for record in jobs.values() {
            counts.record(record.status());
        }
        counts
    }
}

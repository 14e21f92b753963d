//! Job record and status management.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::AnalysisRecord;
use super::ids::JobId;
use crate::error::RimeError;

/// Job status.
///
/// State transitions:
/// - Pending -> InFlight (atomically, at submission)
/// - InFlight -> Completed
/// - InFlight -> Failed
///
/// `Unknown` is never stored. It is what a query answers for an id the store
/// has never seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InFlight,
    Completed,
    Failed,
    Unknown,
}

impl JobStatus {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InFlight => "in_flight",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job record: one submitted text and its lifecycle.
///
/// All state transitions go through methods so that `result` is only ever set
/// on a completed job and `error` only on a failed one.
#[derive(Debug, Clone)]
pub struct JobRecord {
    job_id: JobId,
    status: JobStatus,
    payload: String,
    result: Option<AnalysisRecord>,
    error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl JobRecord {
    pub fn new(job_id: JobId, payload: String, now: DateTime<Utc>) -> Self {
        Self {
            job_id,
            status: JobStatus::Pending,
            payload,
            result: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn result(&self) -> Option<&AnalysisRecord> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Pending -> InFlight.
    pub fn mark_in_flight(&mut self, now: DateTime<Utc>) -> Result<(), RimeError> {
        self.ensure_not_terminal()?;
        self.status = JobStatus::InFlight;
        self.updated_at = now;
        Ok(())
    }

    /// Attach the result. Terminal records are frozen.
    pub fn mark_completed(
        &mut self,
        result: AnalysisRecord,
        now: DateTime<Utc>,
    ) -> Result<(), RimeError> {
        self.ensure_not_terminal()?;
        self.status = JobStatus::Completed;
        self.result = Some(result);
        self.error = None;
        self.updated_at = now;
        Ok(())
    }

    pub fn mark_failed(&mut self, message: String, now: DateTime<Utc>) -> Result<(), RimeError> {
        self.ensure_not_terminal()?;
        self.status = JobStatus::Failed;
        self.result = None;
        self.error = Some(message);
        self.updated_at = now;
        Ok(())
    }

    pub fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            job_id: self.job_id,
            status: self.status,
            result: self.result.clone(),
            error: self.error.clone(),
        }
    }

    fn ensure_not_terminal(&self) -> Result<(), RimeError> {
        if self.status.is_terminal() {
            return Err(RimeError::AlreadyTerminal {
                job_id: self.job_id,
                status: self.status,
            });
        }
        Ok(())
    }
}

/// The combined read view of a job: status plus whichever of result/error
/// the job currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub job_id: JobId,
    pub status: JobStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobSnapshot {
    pub fn unknown(job_id: JobId) -> Self {
        Self {
            job_id,
            status: JobStatus::Unknown,
            result: None,
            error: None,
        }
    }
}

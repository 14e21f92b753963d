use thiserror::Error;

use crate::domain::{JobId, JobStatus};

/// Errors surfaced by the job store and scheduler.
///
/// Everything except `InvalidInput` and `Busy` points at a programmer error
/// in the caller, not at anything an end user did.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RimeError {
    #[error("input text is empty")]
    InvalidInput,

    #[error("duplicate job id={0}")]
    DuplicateJob(JobId),

    #[error("unknown job id={0}")]
    UnknownJob(JobId),

    #[error("job id={job_id} is already {status}")]
    AlreadyTerminal { job_id: JobId, status: JobStatus },

    #[error("work queue is full (capacity={capacity})")]
    Busy { capacity: usize },

    #[error("worker pool is shut down")]
    Shutdown,
}

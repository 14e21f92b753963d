//! Queue module: work items waiting for a worker slot.

mod memory;

pub use memory::{Reservation, WorkQueue};

use tracing::warn;

use crate::domain::JobId;

/// One unit of work: analyze `text` and report under `job_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub job_id: JobId,
    pub text: String,
}

/// What happens when work arrives faster than workers drain it.
///
/// - `Unbounded`: always accept. Memory grows without limit under sustained
///   overload.
/// - `Bounded`: accept while fewer than `capacity` items are waiting or
///   reserved (items a worker already picked up do not count); beyond that
///   reject with `Busy`. Every item passes through the queue, so the capacity
///   is at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueuePolicy {
    #[default]
    Unbounded,
    Bounded {
        capacity: usize,
    },
}

impl QueuePolicy {
    pub fn from_capacity(capacity: Option<usize>) -> Self {
        match capacity {
            Some(capacity) => QueuePolicy::Bounded { capacity }.normalized(),
            None => QueuePolicy::Unbounded,
        }
    }

    /// Zero capacity would reject every submission; raise it to one.
    pub fn normalized(self) -> Self {
        match self {
            QueuePolicy::Bounded { capacity: 0 } => {
                warn!("queue_capacity = 0 would reject every job; using 1");
                QueuePolicy::Bounded { capacity: 1 }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, QueuePolicy::Unbounded)]
    #[case(Some(0), QueuePolicy::Bounded { capacity: 1 })]
    #[case(Some(1), QueuePolicy::Bounded { capacity: 1 })]
    #[case(Some(32), QueuePolicy::Bounded { capacity: 32 })]
    fn policy_from_capacity(#[case] capacity: Option<usize>, #[case] expected: QueuePolicy) {
        assert_eq!(QueuePolicy::from_capacity(capacity), expected);
    }
}

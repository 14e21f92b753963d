//! In-memory work queue shared by the scheduler (producer) and the workers
//! (consumers).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, Notify};

use super::{QueuePolicy, WorkItem};
use crate::error::RimeError;

struct QueueState {
    ready: VecDeque<WorkItem>,
    closed: bool,
}

/// FIFO queue of work items.
///
/// Design:
/// - One mutex guards the items and the closed flag. It is never held across
///   an await outside this module.
/// - Outstanding reservations are counted separately; they take up capacity
///   but do not block other producers or consumers.
/// - `Notify` wakes idle workers.
/// - After `close()` no new reservations are granted, but queued items and
///   items from reservations granted earlier are still handed out. `pop()`
///   returns `None` only once closed, empty and with no reservation left.
pub struct WorkQueue {
    state: Mutex<QueueState>,
    reserved: AtomicUsize,
    notify: Notify,
    policy: QueuePolicy,
}

impl WorkQueue {
    /// A bounded policy with zero capacity is raised to one.
    pub fn new(policy: QueuePolicy) -> Self {
        Self {
            state: Mutex::new(QueueState {
                ready: VecDeque::new(),
                closed: false,
            }),
            reserved: AtomicUsize::new(0),
            notify: Notify::new(),
            policy: policy.normalized(),
        }
    }

    pub fn policy(&self) -> QueuePolicy {
        self.policy
    }

    /// Hold a slot in the queue.
    ///
    /// Capacity and shutdown are checked here, so anything the caller does
    /// while holding the reservation (e.g. registering the job) only happens
    /// when the item is certain to be accepted.
    pub async fn reserve(&self) -> Result<Reservation<'_>, RimeError> {
        let state = self.state.lock().await;
        if state.closed {
            return Err(RimeError::Shutdown);
        }
        if let QueuePolicy::Bounded { capacity } = self.policy
            && state.ready.len() + self.reserved.load(Ordering::SeqCst) >= capacity
        {
            return Err(RimeError::Busy { capacity });
        }
        self.reserved.fetch_add(1, Ordering::SeqCst);
        Ok(Reservation {
            queue: self,
            pending: true,
        })
    }

    pub async fn push(&self, item: WorkItem) -> Result<(), RimeError> {
        self.reserve().await?.commit(item).await;
        Ok(())
    }

    /// Wait for the next item. `None` means the queue is closed and drained.
    pub async fn pop(&self) -> Option<WorkItem> {
        loop {
            // 先に enable() しておくと、状態確認と await の間の notify_waiters() も取りこぼさない
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.state.lock().await;
                if let Some(item) = state.ready.pop_front() {
                    let more = !state.ready.is_empty();
                    drop(state);
                    if more {
                        // 残りがあれば別の待機ワーカーを起こす
                        self.notify.notify_one();
                    }
                    return Some(item);
                }
                if state.closed && self.reserved.load(Ordering::SeqCst) == 0 {
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Stop granting reservations and wake every idle worker.
    pub async fn close(&self) {
        self.state.lock().await.closed = true;
        self.notify.notify_waiters();
    }

    /// Items waiting for a worker.
    pub async fn len(&self) -> usize {
        self.state.lock().await.ready.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn release_reservation(&self) {
        self.reserved.fetch_sub(1, Ordering::SeqCst);
    }
}

/// An accepted-but-not-yet-pushed slot. Dropping it without `commit` pushes
/// nothing and frees the slot.
pub struct Reservation<'a> {
    queue: &'a WorkQueue,
    pending: bool,
}

impl Reservation<'_> {
    pub async fn commit(mut self, item: WorkItem) {
        let queue = self.queue;
        let closed = {
            let mut state = queue.state.lock().await;
            state.ready.push_back(item);
            queue.release_reservation();
            self.pending = false;
            state.closed
        };
        if closed {
            // 閉じた後は、最後の予約を待っていたワーカーも終了判定し直す必要がある
            queue.notify.notify_waiters();
        }
        queue.notify.notify_one();
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if self.pending {
            self.queue.release_reservation();
            self.queue.notify.notify_waiters();
        }
    }
}

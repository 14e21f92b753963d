//! JobStore port - ジョブ状態の正本（source of truth）
//!
//! JobStore は job_id → 状態/結果 の対応を管理します。
//! 生のマップは外に出さず、以下の操作だけを公開します。

use async_trait::async_trait;

use crate::domain::{AnalysisRecord, JobId, JobSnapshot};
use crate::error::RimeError;
use crate::observability::JobCounts;

/// JobStore は状態と結果の正本
///
/// # 設計原則
/// - 各操作は単一の排他ロックの下で実行されたかのように振る舞う
///   （読み手は書き込みの前後どちらかの状態しか見ない）
/// - Job は削除しない（プロセスの寿命の間は残る）
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Register a new job, already `in_flight`.
    ///
    /// Fails with `DuplicateJob` if the id is taken.
    async fn create(&self, job_id: JobId, payload: String) -> Result<(), RimeError>;

    /// `in_flight` -> `completed`, attaching the result.
    async fn complete(&self, job_id: JobId, result: AnalysisRecord) -> Result<(), RimeError>;

    /// `in_flight` -> `failed`, attaching the message.
    async fn fail(&self, job_id: JobId, message: String) -> Result<(), RimeError>;

    /// Current view of a job; `unknown` status for ids never created.
    async fn get(&self, job_id: JobId) -> JobSnapshot;

    async fn counts(&self) -> JobCounts;
}

//! App - アプリケーション層
//!
//! resolver と scheduler を束ねた外向きの入口。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: 設定からのワイヤリング
//! - **App**: submit_input / status / wait_for / shutdown

pub mod builder;

pub use self::builder::{AppBuilder, BuildError};

use std::time::Duration;

use tokio::time::Instant;

use crate::config::RimeConfig;
use crate::domain::{JobId, JobSnapshot, JobStatus};
use crate::error::RimeError;
use crate::resolver::SourceResolver;
use crate::scheduler::{JobScheduler, Submission};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct App {
    config: RimeConfig,
    resolver: SourceResolver,
    scheduler: JobScheduler,
}

impl App {
    pub fn config(&self) -> &RimeConfig {
        &self.config
    }

    pub fn resolver(&self) -> &SourceResolver {
        &self.resolver
    }

    pub fn scheduler(&self) -> &JobScheduler {
        &self.scheduler
    }

    /// Resolve `input` to text and submit it. Blank input is rejected before
    /// any lookup happens.
    pub async fn submit_input(&self, input: &str) -> Result<Submission, RimeError> {
        if input.trim().is_empty() {
            return Err(RimeError::InvalidInput);
        }
        let text = self.resolver.resolve(input).await;
        self.scheduler.submit(text).await
    }

    pub async fn status(&self, job_id: JobId) -> JobSnapshot {
        self.scheduler.status(job_id).await
    }

    /// Poll until the job is terminal. `None` on timeout; an unknown id is
    /// returned as-is since it will never change.
    pub async fn wait_for(&self, job_id: JobId, timeout: Duration) -> Option<JobSnapshot> {
        let deadline = Instant::now() + timeout;
        loop {
            let snapshot = self.status(job_id).await;
            if snapshot.status.is_terminal() || snapshot.status == JobStatus::Unknown {
                return Some(snapshot);
            }
            if Instant::now() >= deadline {
                return None;
            }
            tokio::time::sleep_until((Instant::now() + POLL_INTERVAL).min(deadline)).await;
        }
    }

    /// Stop accepting work and wait for queued jobs to finish.
    pub async fn shutdown(&self) {
        self.scheduler.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogEntry};
    use crate::domain::{AnalysisError, AnalysisRecord};
    use crate::ports::{IdGenerator, SystemClock, UlidGenerator};
    use std::sync::Arc;

    fn echo(text: &str) -> Result<AnalysisRecord, AnalysisError> {
        Ok(AnalysisRecord::new(text))
    }

    fn slow(text: &str) -> Result<AnalysisRecord, AnalysisError> {
        std::thread::sleep(Duration::from_millis(400));
        Ok(AnalysisRecord::new(text))
    }

    fn app_with(analyzer: fn(&str) -> Result<AnalysisRecord, AnalysisError>) -> App {
        let catalog =
            Catalog::from_entries([("Kveld", CatalogEntry::with_text("Stille skimrer snøen"))]);
        AppBuilder::new(RimeConfig::default())
            .catalog(catalog)
            .without_remote()
            .analyzer(Arc::new(analyzer))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn catalog_label_is_analyzed_as_its_text() {
        let app = app_with(echo);

        let submission = app.submit_input("Kveld").await.unwrap();
        let done = app
            .wait_for(submission.job_id, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(done.status, JobStatus::Completed);
        assert_eq!(done.result.unwrap().text, "Stille skimrer snøen");
        app.shutdown().await;
    }

    #[tokio::test]
    async fn blank_input_is_rejected() {
        let app = app_with(echo);
        assert_eq!(app.submit_input(" \n").await, Err(RimeError::InvalidInput));
        app.shutdown().await;
    }

    #[tokio::test]
    async fn wait_for_times_out_on_slow_jobs() {
        let app = app_with(slow);

        let submission = app.submit_input("anything").await.unwrap();
        assert!(
            app.wait_for(submission.job_id, Duration::from_millis(60))
                .await
                .is_none()
        );
        app.shutdown().await;
    }

    #[tokio::test]
    async fn wait_for_unknown_id_returns_immediately() {
        let app = app_with(echo);
        let stranger = UlidGenerator::new(SystemClock).generate_job_id();

        let snapshot = app.wait_for(stranger, Duration::from_secs(5)).await.unwrap();
        assert_eq!(snapshot, JobSnapshot::unknown(stranger));
        app.shutdown().await;
    }
}

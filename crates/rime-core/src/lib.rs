//! rime-core
//!
//! 詩の解析を非同期ジョブとして受け付け、状態を追跡するためのコア。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, job, analysis, errors）
//! - **ports**: 抽象化レイヤー（JobStore, Analyzer, RemoteCatalog, IdGenerator, Clock）
//! - **impls**: 実装（InMemoryJobStore, HttpCatalogClient, LexicalAnalyzer）
//! - **queue**: ワーカー待ちの WorkItem（Unbounded / Bounded）
//! - **worker**: 固定サイズのワーカープール
//! - **scheduler**: submit / status（JobScheduler）
//! - **catalog**: ラベル → 詩 のローカル対応表
//! - **resolver**: 入力 → 解析対象テキスト（カタログ → リモート → 入力そのまま）
//! - **config**: `rime.toml` + `RIME_*` 環境変数
//! - **app**: AppBuilder / App（外向きの入口）
//! - **observability**: 状態別のジョブ数
//! - **error**: 呼び出し側に返すエラー

pub mod app;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod queue;
pub mod resolver;
pub mod scheduler;
pub mod worker;

pub use app::{App, AppBuilder, BuildError};
pub use config::{ConfigError, RimeConfig};
pub use domain::{AnalysisRecord, JobId, JobSnapshot, JobStatus};
pub use error::RimeError;
pub use scheduler::{JobScheduler, Submission};

//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryJobStore**: プロセス内の JobStore
//! - **HttpCatalogClient**: reqwest による RemoteCatalog
//! - **LexicalAnalyzer**: 綴りベースの簡易 Analyzer

pub mod http_catalog;
pub mod inmem_job_store;
pub mod lexical_analyzer;

pub use self::http_catalog::HttpCatalogClient;
pub use self::inmem_job_store::InMemoryJobStore;
pub use self::lexical_analyzer::LexicalAnalyzer;

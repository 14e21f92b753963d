//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部（解析器、リモートカタログ、状態ストア）への
//! インターフェースを提供し、実装の詳細を隠蔽します。

pub mod analyzer;
pub mod clock;
pub mod id_generator;
pub mod job_store;
pub mod remote_catalog;

pub use self::analyzer::Analyzer;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::job_store::JobStore;
pub use self::remote_catalog::{RemoteCatalog, WorkSummary};

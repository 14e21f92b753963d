//! AppBuilder - 設定からアプリケーションを組み立てる
//!
//! 差し替えなかった部品は設定に従ったデフォルト実装になります。
//!
//! | 部品        | デフォルト                                  |
//! |-------------|---------------------------------------------|
//! | catalog     | `Catalog::load(config.catalog_path)`         |
//! | remote      | `HttpCatalogClient`（`remote.enabled` の時） |
//! | analyzer    | `LexicalAnalyzer`                            |
//! | store       | `InMemoryJobStore`                           |
//! | id_generator| `UlidGenerator<SystemClock>`                 |

use std::sync::Arc;

use tracing::info;

use crate::catalog::Catalog;
use crate::config::RimeConfig;
use crate::domain::ResolveError;
use crate::impls::{HttpCatalogClient, InMemoryJobStore, LexicalAnalyzer};
use crate::ports::{Analyzer, IdGenerator, JobStore, RemoteCatalog, SystemClock, UlidGenerator};
use crate::resolver::SourceResolver;
use crate::scheduler::JobScheduler;

use super::App;

/// # 使用例
/// ```ignore
/// let app = AppBuilder::new(RimeConfig::load()?)
///     .without_remote()
///     .build()?;
/// ```
pub struct AppBuilder {
    config: RimeConfig,
    catalog: Option<Catalog>,
    remote: RemoteChoice,
    analyzer: Option<Arc<dyn Analyzer>>,
    store: Option<Arc<dyn JobStore>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

enum RemoteChoice {
    FromConfig,
    Disabled,
    Given(Arc<dyn RemoteCatalog>),
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("cannot create remote catalog client: {0}")]
    Remote(#[source] ResolveError),
}

impl AppBuilder {
    pub fn new(config: RimeConfig) -> Self {
        Self {
            config,
            catalog: None,
            remote: RemoteChoice::FromConfig,
            analyzer: None,
            store: None,
            ids: None,
        }
    }

    /// Use this catalog instead of loading `config.catalog_path`.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn remote(mut self, remote: Arc<dyn RemoteCatalog>) -> Self {
        self.remote = RemoteChoice::Given(remote);
        self
    }

    pub fn without_remote(mut self) -> Self {
        self.remote = RemoteChoice::Disabled;
        self
    }

    pub fn analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn store(mut self, store: Arc<dyn JobStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Wire everything and start the worker pool. Must be called inside a
    /// tokio runtime.
    pub fn build(self) -> Result<App, BuildError> {
        let config = self.config;

        let catalog = self
            .catalog
            .unwrap_or_else(|| Catalog::load(&config.catalog_path));

        let remote: Option<Arc<dyn RemoteCatalog>> = match self.remote {
            RemoteChoice::Given(remote) => Some(remote),
            RemoteChoice::Disabled => None,
            RemoteChoice::FromConfig if !config.remote.enabled => None,
            RemoteChoice::FromConfig => {
                let client =
                    HttpCatalogClient::new(&config.remote.base_url, config.request_timeout())
                        .map_err(BuildError::Remote)?;
                Some(Arc::new(client))
            }
        };

        let analyzer = self
            .analyzer
            .unwrap_or_else(|| Arc::new(LexicalAnalyzer::new()));
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryJobStore::new()));
        let ids = self
            .ids
            .unwrap_or_else(|| Arc::new(UlidGenerator::new(SystemClock)));

        let workers = config.worker_count();
        info!(
            catalog_entries = catalog.len(),
            remote = remote.is_some(),
            workers,
            "building app"
        );

        let resolver = SourceResolver::new(Arc::new(catalog), remote);
        let scheduler = JobScheduler::new(
            store,
            ids,
            analyzer,
            workers,
            config.queue_policy(),
        );

        Ok(App {
            config,
            resolver,
            scheduler,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::domain::{AnalysisError, AnalysisRecord};
    use std::io::Write;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn upper(text: &str) -> Result<AnalysisRecord, AnalysisError> {
        Ok(AnalysisRecord::new(text.to_uppercase()))
    }

    #[tokio::test]
    async fn defaults_follow_config() {
        let config = RimeConfig {
            max_workers: 0,
            catalog_path: "does/not/exist.json".into(),
            ..RimeConfig::default()
        };

        let app = AppBuilder::new(config).build().unwrap();
        assert_eq!(app.scheduler().workers(), 1);
        assert!(app.resolver().catalog().is_empty());
        app.shutdown().await;
    }

    #[tokio::test]
    async fn zero_workers_warns_once() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let config = RimeConfig {
            max_workers: 0,
            ..RimeConfig::default()
        };

        let app = tracing::subscriber::with_default(subscriber, || {
            AppBuilder::new(config)
                .catalog(Catalog::empty())
                .without_remote()
                .build()
        })
        .unwrap();

        assert_eq!(logs.text().matches("max_workers = 0").count(), 1);
        assert_eq!(app.scheduler().workers(), 1);
        app.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_remote_url_fails_the_build() {
        let mut config = RimeConfig::default();
        config.remote.base_url = "not a url".into();

        assert!(matches!(
            AppBuilder::new(config).build(),
            Err(BuildError::Remote(_))
        ));
    }

    #[tokio::test]
    async fn disabled_remote_skips_client_construction() {
        let mut config = RimeConfig::default();
        config.remote.enabled = false;
        config.remote.base_url = "not a url".into();

        let app = AppBuilder::new(config).build().unwrap();
        app.shutdown().await;
    }

    #[tokio::test]
    async fn overrides_are_used() {
        let catalog = Catalog::from_entries([("Kveld", CatalogEntry::with_text("stille"))]);
        let app = AppBuilder::new(RimeConfig::default())
            .catalog(catalog)
            .without_remote()
            .analyzer(Arc::new(upper))
            .build()
            .unwrap();

        assert_eq!(app.resolver().resolve("Kveld").await, "stille");
        app.shutdown().await;
    }
}

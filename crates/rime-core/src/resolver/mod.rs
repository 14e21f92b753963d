//! SourceResolver - ユーザー入力を解析対象のテキストに変換
//!
//! # 試行順（最初に成功したものを採用）
//! 1. カタログのラベルと完全一致し、本文を持っている → そのまま使う
//! 2. カタログのラベルと一致するがメタデータのみ → タイトル/著者を決める
//! 3. リモートの一覧から タイトル（と著者）で検索
//! 4. 見つかった作品の本文を取得（空でなければ採用）
//! 5. それ以外（カタログに無い、リモートが失敗した）→ 入力をそのまま使う
//!
//! どの失敗も呼び出し側には返さず、ログに残して 5 に落ちます。

mod label;

pub use label::{find_work, split_label};

use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::{Catalog, CatalogEntry};
use crate::domain::ResolveError;
use crate::ports::RemoteCatalog;

/// Where the resolved text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Catalog,
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub text: String,
    pub source: Source,
}

impl Resolved {
    fn fallback(input: &str) -> Self {
        Self {
            text: input.to_string(),
            source: Source::Fallback,
        }
    }
}

pub struct SourceResolver {
    catalog: Arc<Catalog>,
    remote: Option<Arc<dyn RemoteCatalog>>,
}

impl SourceResolver {
    /// `remote: None` disables steps 3–4; metadata-only labels then fall
    /// back to the raw input.
    pub fn new(catalog: Arc<Catalog>, remote: Option<Arc<dyn RemoteCatalog>>) -> Self {
        Self { catalog, remote }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Text to analyze for `input`. Never fails.
    pub async fn resolve(&self, input: &str) -> String {
        self.resolve_with_source(input).await.text
    }

    pub async fn resolve_with_source(&self, input: &str) -> Resolved {
        let Some(entry) = self.catalog.get(input) else {
            debug!(input_len = input.len(), "not a catalog label; using input as text");
            return Resolved::fallback(input);
        };

        if let Some(text) = entry.literal_text() {
            debug!(label = input, "resolved from local catalog");
            return Resolved {
                text: text.to_string(),
                source: Source::Catalog,
            };
        }

        match self.fetch_remote(input, entry).await {
            Ok(text) => {
                debug!(label = input, "resolved from remote catalog");
                Resolved {
                    text,
                    source: Source::Remote,
                }
            }
            Err(err) => {
                warn!(
                    label = input,
                    error = %err,
                    "remote lookup failed; analyzing the label itself"
                );
                Resolved::fallback(input)
            }
        }
    }

    async fn fetch_remote(
        &self,
        label: &str,
        entry: &CatalogEntry,
    ) -> Result<String, ResolveError> {
        let remote = self.remote.as_ref().ok_or(ResolveError::Disabled)?;
        let (title, author) = lookup_key(label, entry);

        let works = remote.list_works().await?;
        let work = find_work(&works, &title, &author)
            .ok_or_else(|| ResolveError::NoMatch { title, author })?;

        let body = remote.fetch_body(&work.id).await?;
        if body.trim().is_empty() {
            return Err(ResolveError::EmptyBody(work.id.clone()));
        }
        Ok(body)
    }
}

/// Title/author hints from the entry when it has them, otherwise the label
/// split on its separator.
fn lookup_key(label: &str, entry: &CatalogEntry) -> (String, String) {
    match entry.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => (
            title.to_string(),
            entry.author.as_deref().unwrap_or_default().trim().to_string(),
        ),
        _ => split_label(label),
    }
}

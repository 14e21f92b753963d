//! RemoteCatalog port - タイトル/著者で作品を探すリモート API
//!
//! # 実装
//! - **HttpCatalogClient**: reqwest による HTTP 実装

use async_trait::async_trait;

use crate::domain::ResolveError;

/// One entry of the remote listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSummary {
    pub id: String,
    pub title: String,
    pub author: String,
}

impl WorkSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
        }
    }
}

#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// All known works, in listing order.
    async fn list_works(&self) -> Result<Vec<WorkSummary>, ResolveError>;

    /// Full text of one work. Absent body reads as empty text.
    async fn fetch_body(&self, work_id: &str) -> Result<String, ResolveError>;
}

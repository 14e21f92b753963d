//! Analyzer port - 言語解析への境界
//!
//! 押韻・頭韻・首句反復の解析ロジックはこの trait の向こう側にあり、
//! コアからは不透明な関数として扱います。

use crate::domain::{AnalysisError, AnalysisRecord};

/// Analyzer は 1 つのテキストを解析して AnalysisRecord を返す
///
/// 同期関数です。CPU を使う解析を想定しているので、ワーカーは
/// `spawn_blocking` の上で呼び出します。panic もワーカー側で捕捉されます。
///
/// # 使用例
/// ```ignore
/// let analyzer = |text: &str| Ok(AnalysisRecord::new(text));
/// let scheduler = JobScheduler::new(store, ids, Arc::new(analyzer), 4, QueuePolicy::Unbounded);
/// ```
pub trait Analyzer: Send + Sync + 'static {
    fn analyze(&self, text: &str) -> Result<AnalysisRecord, AnalysisError>;
}

impl<F> Analyzer for F
where
    F: Fn(&str) -> Result<AnalysisRecord, AnalysisError> + Send + Sync + 'static,
{
    fn analyze(&self, text: &str) -> Result<AnalysisRecord, AnalysisError> {
        self(text)
    }
}

//! Errors - 外部コラボレータ（解析器・リモートカタログ）由来のエラー
//!
//! - `AnalysisError`: ジョブ単位で捕捉され、そのジョブの `failed` として記録される
//! - `ResolveError`: Resolver の内部でのみ使われ、呼び出し側には返さない（ログのみ）

use thiserror::Error;

/// Failure raised by an analyzer for one text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("input rejected: {0}")]
    Rejected(String),

    #[error("analysis failed: {0}")]
    Failed(String),

    #[error("analyzer panicked: {0}")]
    Panicked(String),
}

impl AnalysisError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Why a remote lookup did not produce text.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("remote catalog is disabled")]
    Disabled,

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid remote url: {0}")]
    InvalidUrl(String),

    #[error("remote returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no remote work matches title={title:?} author={author:?}")]
    NoMatch { title: String, author: String },

    #[error("remote work {0} has an empty body")]
    EmptyBody(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_error_display() {
        let err = AnalysisError::failed("tokenizer exploded");
        assert_eq!(err.to_string(), "analysis failed: tokenizer exploded");
    }

    #[test]
    fn resolve_error_display() {
        let err = ResolveError::NoMatch {
            title: "Uro".into(),
            author: String::new(),
        };
        assert_eq!(
            err.to_string(),
            r#"no remote work matches title="Uro" author="""#
        );
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalysisError>();
        assert_send_sync::<ResolveError>();
    }
}

//! Catalog - 表示ラベルから既知の詩へのローカル対応表
//!
//! 起動時に一度だけ読み込み、以後は不変（同期不要）。
//! ファイルが無い・壊れている場合は空のカタログとして続行します。

mod collections;

pub use collections::{BookCollection, DEFAULT_POEMS_PER_BOOK, bundled_collections};

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// What the catalog knows about one label: the text itself, or enough to
/// find it remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Source file the poem was harvested from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poem_index: Option<usize>,
}

impl CatalogEntry {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// The literal text, if the entry carries a non-blank one.
    pub fn literal_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, CatalogEntry)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Load a catalog file, degrading to an empty catalog on any problem.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(catalog) => {
                info!(path = %path.display(), entries = catalog.len(), "catalog loaded");
                catalog
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "catalog unavailable; continuing with an empty catalog"
                );
                Self::empty()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Build entries labelled `"<title> - <author>"`, keeping the first
    /// `per_book_limit` poems of each book.
    pub fn from_collections(collections: &[BookCollection], per_book_limit: usize) -> Self {
        let mut entries = BTreeMap::new();
        for book in collections {
            for (idx, title) in book.poems.iter().take(per_book_limit).enumerate() {
                let label = format!("{title} - {}", book.author);
                entries.insert(
                    label,
                    CatalogEntry {
                        text: None,
                        title: Some(title.clone()),
                        author: Some(book.author.clone()),
                        file: Some(book.file.clone()),
                        book_title: Some(book.book_title.clone()),
                        year: Some(book.year.clone()),
                        poem_index: Some(idx),
                    },
                );
            }
        }
        Self { entries }
    }

    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub fn get(&self, label: &str) -> Option<&CatalogEntry> {
        self.entries.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_harvested_catalog_format() {
        let json = r#"{
            "Uro - Mortensson-Egnund, Ivar": {
                "file": "2006081600051.xml",
                "book_title": "Or duldo: draumkvæe",
                "year": "1895",
                "poem_index": 1
            },
            "Kveld": {"text": "Stille skimrer snøen"}
        }"#;

        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);

        let uro = catalog.get("Uro - Mortensson-Egnund, Ivar").unwrap();
        assert_eq!(uro.poem_index, Some(1));
        assert!(uro.literal_text().is_none());

        let kveld = catalog.get("Kveld").unwrap();
        assert_eq!(kveld.literal_text(), Some("Stille skimrer snøen"));
    }

    #[test]
    fn blank_text_is_not_literal() {
        assert!(CatalogEntry::with_text("  \n").literal_text().is_none());
    }

    #[test]
    fn missing_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::load(&dir.path().join("poems.json"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_file_degrades_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();

        assert!(matches!(
            Catalog::try_load(file.path()),
            Err(CatalogError::Json(_))
        ));
        assert!(Catalog::load(file.path()).is_empty());
    }

    #[test]
    fn collections_are_labelled_and_limited() {
        let book = BookCollection {
            file: "a.xml".into(),
            author: "Randers, Kristofer".into(),
            book_title: "En Kjærlighedsvaar".into(),
            year: "1894".into(),
            poems: vec!["Forord".into(), "Aftenhvisken".into(), "Tonerne".into()],
        };

        let catalog = Catalog::from_collections(&[book], 2);
        let labels: Vec<&str> = catalog.labels().collect();
        assert_eq!(
            labels,
            vec![
                "Aftenhvisken - Randers, Kristofer",
                "Forord - Randers, Kristofer"
            ]
        );

        let entry = catalog.get("Aftenhvisken - Randers, Kristofer").unwrap();
        assert_eq!(entry.title.as_deref(), Some("Aftenhvisken"));
        assert_eq!(entry.author.as_deref(), Some("Randers, Kristofer"));
        assert_eq!(entry.poem_index, Some(1));
    }

    #[test]
    fn written_catalog_loads_back() {
        let catalog = Catalog::from_collections(&bundled_collections(), DEFAULT_POEMS_PER_BOOK);
        let json = catalog.to_json_pretty().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        assert_eq!(Catalog::load(file.path()), catalog);
        assert_eq!(catalog.len(), 2 * DEFAULT_POEMS_PER_BOOK);
    }
}

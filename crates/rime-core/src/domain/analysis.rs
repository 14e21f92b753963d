//! Analysis record: the one result shape every analyzer produces.
//!
//! This module only defines the shape. Which annotations get found is up to
//! the `Analyzer` implementation behind the port.

use serde::{Deserialize, Serialize};

/// End-of-line word tagged with a rhyme letter.
///
/// Lines that rhyme with each other share the same `rhyme_tag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndRhyme {
    /// 1-based line number in the original text.
    pub line: usize,
    pub last_word: String,
    pub rhyme_tag: String,
}

/// A run of words in one line sharing their initial sound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alliteration {
    pub line: usize,
    pub symbol: char,
    pub words: Vec<String>,
}

/// A phrase repeated at the start of consecutive lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anaphora {
    pub phrase: String,
    pub lines: Vec<usize>,
    pub count: usize,
}

/// Result of analyzing one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub text: String,

    #[serde(default)]
    pub end_rhymes: Vec<EndRhyme>,

    #[serde(default)]
    pub alliteration: Vec<Alliteration>,

    #[serde(default)]
    pub anaphora: Vec<Anaphora>,
}

impl AnalysisRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            end_rhymes: Vec::new(),
            alliteration: Vec::new(),
            anaphora: Vec::new(),
        }
    }

    pub fn with_end_rhymes(mut self, end_rhymes: Vec<EndRhyme>) -> Self {
        self.end_rhymes = end_rhymes;
        self
    }

    pub fn with_alliteration(mut self, alliteration: Vec<Alliteration>) -> Self {
        self.alliteration = alliteration;
        self
    }

    pub fn with_anaphora(mut self, anaphora: Vec<Anaphora>) -> Self {
        self.anaphora = anaphora;
        self
    }
}

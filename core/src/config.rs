//! Configuration for the conversion pipeline.
//!
//! `ConvertConfig` centralizes the recovery heuristics (keyword filters,
//! stop words, minimum printable-run length) and the classifier
//! vocabularies, so tests can inject alternates instead of relying on
//! hard-coded globals.

use crate::classify::ClassifierVocabulary;
use crate::scan::DEFAULT_MIN_RUN_LEN;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// A printable run must be strictly longer than this to be kept.
    pub min_string_len: usize,
    /// Tokens dropped from legacy field recovery regardless of length.
    pub stop_words: Vec<String>,
    /// Case-sensitive substrings that mark a scanned string as a table name.
    pub table_keywords: Vec<String>,
    /// Substrings matched against lowercased scanned strings for joins.
    pub join_keywords: Vec<String>,
    pub vocabulary: ClassifierVocabulary,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            min_string_len: DEFAULT_MIN_RUN_LEN,
            stop_words: to_strings(&["id", "name", "code", "flag"]),
            table_keywords: to_strings(&[
                "table",
                "TABLE",
                "Table",
                "lookup",
                "fact",
                "dimension",
                "Agg_",
                "Calendar_",
                "Article_",
                "Shop_",
                "promotion_",
            ]),
            join_keywords: to_strings(&["id", "promotion", "week", "shop", "article"]),
            vocabulary: ClassifierVocabulary::default(),
        }
    }
}

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

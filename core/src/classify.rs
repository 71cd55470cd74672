//! Field role classification.
//!
//! Assigns a dimension/measure role to recovered names that carry no
//! authoritative type of their own (all legacy fields, and modern business
//! objects whose `type` attribute was absent or unrecognized).

use crate::model::{FieldRole, UniverseModel};
use serde::{Deserialize, Serialize};

/// Ordered substring vocabularies, one list per role.
///
/// Matching is plain substring containment against the lowercased field
/// name, not token matching: `"Shop_id"` matches the `id` pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierVocabulary {
    pub dimension_patterns: Vec<String>,
    pub measure_patterns: Vec<String>,
}

impl Default for ClassifierVocabulary {
    fn default() -> Self {
        Self {
            dimension_patterns: crate::config::to_strings(&[
                "id", "name", "code", "date", "year", "month", "week", "day", "city", "state",
                "region", "country", "category", "family", "color", "article", "shop",
                "promotion", "type",
            ]),
            measure_patterns: crate::config::to_strings(&[
                "revenue", "sales", "amount", "price", "cost", "margin", "quantity", "count",
                "sum", "total", "profit",
            ]),
        }
    }
}

impl ClassifierVocabulary {
    fn matches_any(patterns: &[String], lowered: &str) -> bool {
        patterns.iter().any(|p| lowered.contains(p.as_str()))
    }

    pub fn matches_dimension(&self, lowered: &str) -> bool {
        Self::matches_any(&self.dimension_patterns, lowered)
    }

    pub fn matches_measure(&self, lowered: &str) -> bool {
        Self::matches_any(&self.measure_patterns, lowered)
    }
}

/// Strategy seam for role assignment; swap in a stricter implementation
/// without touching the pipeline.
pub trait RoleClassifier {
    fn classify(&self, name: &str) -> FieldRole;
}

/// Keyword classifier with a mutually exclusive tie-break:
/// measure patterns win over dimension patterns, and names matching
/// neither vocabulary default to dimension.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    vocabulary: ClassifierVocabulary,
}

impl KeywordClassifier {
    pub fn new(vocabulary: ClassifierVocabulary) -> Self {
        Self { vocabulary }
    }
}

impl RoleClassifier for KeywordClassifier {
    fn classify(&self, name: &str) -> FieldRole {
        let lowered = name.to_lowercase();
        if self.vocabulary.matches_measure(&lowered) {
            FieldRole::Measure
        } else {
            // Dimension patterns and the no-match fallback both land here.
            FieldRole::Dimension
        }
    }
}

/// Routes every object that has no role yet through the classifier.
///
/// Objects the modern reader already typed keep their role; after this
/// pass every object sits in exactly one of the three role partitions.
pub fn classify_unassigned(model: &mut UniverseModel, classifier: &dyn RoleClassifier) {
    let unassigned: Vec<String> = model
        .objects
        .iter()
        .filter(|name| model.role_of(name) == FieldRole::Unclassified)
        .cloned()
        .collect();

    for name in unassigned {
        match classifier.classify(&name) {
            FieldRole::Measure => model.measures.push(name),
            FieldRole::Attribute => model.attributes.push(name),
            FieldRole::Dimension | FieldRole::Unclassified => model.dimensions.push(name),
        }
    }
}

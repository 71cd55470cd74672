//! Recovered universe model.
//!
//! A `UniverseModel` is the single artifact handed from a format reader to
//! the script renderer. It is populated once per conversion run and not
//! mutated afterwards.

use serde::Serialize;

/// Which container format a model was recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Binary `.unv` archives: printable fragments in undocumented blobs.
    Legacy,
    /// XML `.unx` archives: datafoundation + businesslayer documents.
    Modern,
}

impl SourceFormat {
    pub fn label(self) -> &'static str {
        match self {
            SourceFormat::Legacy => "UNV",
            SourceFormat::Modern => "UNX",
        }
    }
}

/// Semantic role assigned to a recovered field or business object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    Dimension,
    Measure,
    /// Modern-format only: descriptive object attached to a dimension.
    Attribute,
    /// No role yet; resolved by the classifier before rendering.
    Unclassified,
}

/// Everything recovered from one universe file.
///
/// `tables`, `joins` and `objects` from the legacy reader are de-duplicated
/// through hash sets, so their order carries no meaning; the modern reader
/// preserves document order. `dimensions`, `measures` and `attributes`
/// partition the classified objects: after classification no name appears
/// in more than one of the three.
#[derive(Debug, Clone, Serialize)]
pub struct UniverseModel {
    pub source_file: String,
    pub format: SourceFormat,
    pub tables: Vec<String>,
    pub joins: Vec<String>,
    pub objects: Vec<String>,
    pub dimensions: Vec<String>,
    pub measures: Vec<String>,
    pub attributes: Vec<String>,
}

impl UniverseModel {
    pub fn new(source_file: impl Into<String>, format: SourceFormat) -> Self {
        Self {
            source_file: source_file.into(),
            format,
            tables: Vec::new(),
            joins: Vec::new(),
            objects: Vec::new(),
            dimensions: Vec::new(),
            measures: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Role already recorded for `name`, if any.
    pub fn role_of(&self, name: &str) -> FieldRole {
        if self.dimensions.iter().any(|d| d == name) {
            FieldRole::Dimension
        } else if self.measures.iter().any(|m| m == name) {
            FieldRole::Measure
        } else if self.attributes.iter().any(|a| a == name) {
            FieldRole::Attribute
        } else {
            FieldRole::Unclassified
        }
    }
}

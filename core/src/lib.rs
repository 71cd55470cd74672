//! universe2qlik: recover BI metadata from BusinessObjects universe files
//! and render Qlik load scripts.
//!
//! This crate handles both universe container formats:
//! - legacy `.unv` archives, where tables and joins live in binary members
//!   and are recovered by scanning for printable fragments;
//! - modern `.unx` archives, where a data-foundation and a business-layer
//!   XML document describe tables, joins and typed business objects.
//!
//! Recovered fields are classified into dimensions, measures and
//! attributes, and the resulting model is rendered into a templated `.qvs`
//! script. Recovery is best-effort by design: the legacy heuristics trade
//! completeness for robustness against an undocumented format.
//!
//! # Quick start
//!
//! ```ignore
//! use universe2qlik::{ConvertConfig, UniversePackage};
//!
//! let pkg = UniversePackage::open("efashion.unx")?;
//! let conversion = pkg.convert(&ConvertConfig::default())?;
//! std::fs::write("efashion.qvs", &conversion.script)?;
//! ```

mod classify;
mod config;
mod container;
mod legacy;
mod model;
mod modern;
mod output;
mod package;
mod scan;

pub use classify::{ClassifierVocabulary, KeywordClassifier, RoleClassifier, classify_unassigned};
pub use config::ConvertConfig;
pub use container::{ArchiveLimits, ContainerError, ExtractedUniverse, UniverseArchive};
pub use legacy::{
    read_fields as read_legacy_fields, read_joins as read_legacy_joins,
    read_tables as read_legacy_tables, read_universe as read_legacy_universe,
};
pub use model::{FieldRole, SourceFormat, UniverseModel};
pub use modern::{
    BUSINESS_LAYER_PATH, DATA_FOUNDATION_PATH, ModernReadError, NAMESPACE_URI,
    read_universe as read_modern_universe,
};
pub use output::json::{ModelReport, ModelSummary, model_report, serialize_model};
pub use output::qvs::render_script;
pub use package::{Conversion, ConvertError, UniversePackage};
pub use scan::{DEFAULT_MIN_RUN_LEN, scan_printable_strings};

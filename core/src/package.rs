//! Conversion pipeline facade.
//!
//! `UniversePackage` dispatches on the source format and drives the
//! strictly sequential pipeline: extract to a temporary directory, recover
//! a model with the format's reader, classify unassigned objects, render
//! the script. The extracted tree is released when the run ends, on
//! success and on every error path.

use crate::classify::{KeywordClassifier, classify_unassigned};
use crate::config::ConvertConfig;
use crate::container::{ArchiveLimits, ContainerError, UniverseArchive};
use crate::model::{SourceFormat, UniverseModel};
use crate::modern::ModernReadError;
use crate::output::qvs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("unsupported universe format: {path} (expected .unv or .unx)")]
    UnsupportedFormat { path: String },
    #[error("container error: {0}")]
    Container(#[from] ContainerError),
    #[error("modern universe error: {0}")]
    Modern(#[from] ModernReadError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of one conversion run: the recovered, classified model and the
/// rendered script text.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub model: UniverseModel,
    pub script: String,
}

#[derive(Debug)]
pub struct UniversePackage {
    path: PathBuf,
    format: SourceFormat,
    limits: ArchiveLimits,
}

impl UniversePackage {
    /// Dispatches on the file extension: `.unv` is the legacy binary
    /// format, `.unx` the modern XML one. No I/O happens until
    /// [`extract_model`](Self::extract_model) or [`convert`](Self::convert).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        Self::open_with_limits(path, ArchiveLimits::default())
    }

    pub fn open_with_limits(
        path: impl AsRef<Path>,
        limits: ArchiveLimits,
    ) -> Result<Self, ConvertError> {
        let path = path.as_ref().to_path_buf();
        let format = match path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .as_deref()
        {
            Some("unv") => SourceFormat::Legacy,
            Some("unx") => SourceFormat::Modern,
            _ => {
                return Err(ConvertError::UnsupportedFormat {
                    path: path.display().to_string(),
                });
            }
        };
        Ok(Self {
            path,
            format,
            limits,
        })
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn source_file(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Extracts the archive, recovers a model and classifies every object
    /// that carries no authoritative role.
    pub fn extract_model(&self, config: &ConvertConfig) -> Result<UniverseModel, ConvertError> {
        let mut archive = UniverseArchive::open_with_limits(&self.path, self.limits)?;
        let extracted = archive.extract_to_temp()?;

        let mut model = match self.format {
            SourceFormat::Legacy => {
                crate::legacy::read_universe(extracted.root(), &self.source_file(), config)?
            }
            SourceFormat::Modern => {
                crate::modern::read_universe(extracted.root(), &self.source_file())?
            }
        };

        let classifier = KeywordClassifier::new(config.vocabulary.clone());
        classify_unassigned(&mut model, &classifier);
        Ok(model)
    }

    /// Full pipeline: extract, read, classify, render. The script is only
    /// produced from a completely recovered model; there is no partial
    /// output on failure.
    pub fn convert(&self, config: &ConvertConfig) -> Result<Conversion, ConvertError> {
        let model = self.extract_model(config)?;
        let script = qvs::render_script(&model);
        Ok(Conversion { model, script })
    }
}

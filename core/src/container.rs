//! Universe archive handling.
//!
//! Both universe formats are ZIP containers. This module opens them with
//! entry-count and decompressed-size limits and extracts their members into
//! a private temporary directory whose lifetime is tied to the returned
//! handle, so the extracted tree is removed on every exit path of a run.

use std::fs;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

#[derive(Debug, Clone, Copy)]
pub struct ArchiveLimits {
    pub max_entries: usize,
    pub max_member_uncompressed_bytes: u64,
    pub max_total_uncompressed_bytes: u64,
}

impl Default for ArchiveLimits {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            max_member_uncompressed_bytes: 100 * 1024 * 1024,
            max_total_uncompressed_bytes: 500 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContainerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a ZIP container")]
    NotZipContainer,
    #[error("failed to read ZIP member '{path}': {reason}")]
    ZipRead { path: String, reason: String },
    #[error("archive has too many entries: {entries} (limit: {max_entries})")]
    TooManyEntries { entries: usize, max_entries: usize },
    #[error("member '{path}' is too large: {size} bytes (limit: {limit} bytes)")]
    MemberTooLarge { path: String, size: u64, limit: u64 },
    #[error("total uncompressed size exceeds limit: would exceed {limit} bytes")]
    TotalTooLarge { limit: u64 },
    #[error("member '{path}' would extract outside the extraction root")]
    UnsafeMemberPath { path: String },
}

pub(crate) trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

pub struct UniverseArchive {
    archive: ZipArchive<Box<dyn ReadSeek>>,
    limits: ArchiveLimits,
}

impl UniverseArchive {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ContainerError> {
        Self::open_with_limits(path, ArchiveLimits::default())
    }

    pub fn open_with_limits(
        path: impl AsRef<Path>,
        limits: ArchiveLimits,
    ) -> Result<Self, ContainerError> {
        let file = fs::File::open(path)?;
        Self::open_from_reader_with_limits(file, limits)
    }

    pub fn open_from_reader<R: Read + Seek + 'static>(reader: R) -> Result<Self, ContainerError> {
        Self::open_from_reader_with_limits(reader, ArchiveLimits::default())
    }

    pub fn open_from_reader_with_limits<R: Read + Seek + 'static>(
        reader: R,
        limits: ArchiveLimits,
    ) -> Result<Self, ContainerError> {
        let reader: Box<dyn ReadSeek> = Box::new(reader);
        let archive = ZipArchive::new(reader).map_err(|err| match err {
            ZipError::InvalidArchive(_) | ZipError::UnsupportedArchive(_) => {
                ContainerError::NotZipContainer
            }
            ZipError::Io(e) => ContainerError::Io(e),
            other => ContainerError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                other.to_string(),
            )),
        })?;

        if archive.len() > limits.max_entries {
            return Err(ContainerError::TooManyEntries {
                entries: archive.len(),
                max_entries: limits.max_entries,
            });
        }

        Ok(Self { archive, limits })
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.archive.file_names()
    }

    /// Decompresses every member into a fresh temporary directory.
    ///
    /// The returned handle owns the directory; dropping it removes the
    /// extracted tree, including when a later pipeline stage fails.
    pub fn extract_to_temp(&mut self) -> Result<ExtractedUniverse, ContainerError> {
        let dir = TempDir::with_prefix("universe_extract_")?;
        let root = dir.path().to_path_buf();
        let mut total_read: u64 = 0;

        for index in 0..self.archive.len() {
            let mut member =
                self.archive
                    .by_index(index)
                    .map_err(|e| ContainerError::ZipRead {
                        path: format!("#{index}"),
                        reason: e.to_string(),
                    })?;
            let raw_name = member.name().to_string();

            let relative = match member.enclosed_name() {
                Some(p) => p,
                None => return Err(ContainerError::UnsafeMemberPath { path: raw_name }),
            };
            let target = root.join(relative);

            if member.is_dir() {
                fs::create_dir_all(&target)?;
                continue;
            }

            let size = member.size();
            if size > self.limits.max_member_uncompressed_bytes {
                return Err(ContainerError::MemberTooLarge {
                    path: raw_name,
                    size,
                    limit: self.limits.max_member_uncompressed_bytes,
                });
            }
            total_read = total_read.saturating_add(size);
            if total_read > self.limits.max_total_uncompressed_bytes {
                return Err(ContainerError::TotalTooLarge {
                    limit: self.limits.max_total_uncompressed_bytes,
                });
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = fs::File::create(&target)?;
            std::io::copy(&mut member, &mut out).map_err(|e| ContainerError::ZipRead {
                path: raw_name,
                reason: e.to_string(),
            })?;
        }

        Ok(ExtractedUniverse { _dir: dir, root })
    }

    pub fn limits(&self) -> &ArchiveLimits {
        &self.limits
    }
}

/// Handle to an extracted universe tree.
///
/// Owns the backing temporary directory; the tree disappears when the
/// handle is dropped.
#[derive(Debug)]
pub struct ExtractedUniverse {
    _dir: TempDir,
    root: PathBuf,
}

impl ExtractedUniverse {
    pub fn root(&self) -> &Path {
        &self.root
    }
}

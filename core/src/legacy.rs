//! Legacy (`.unv`) metadata recovery.
//!
//! The legacy container has no declared schema: member names follow a
//! trailing-semicolon convention (`Columns;`, `Tables;`, `Joins;`) and the
//! table/join members are binary blobs with printable fragments embedded in
//! them. Each recovery step is best-effort: a missing or unreadable member
//! logs a warning and contributes an empty collection, and the run
//! continues with whatever else was recovered.

use crate::config::ConvertConfig;
use crate::model::{SourceFormat, UniverseModel};
use crate::scan::scan_printable_strings;
use log::warn;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn field_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").expect("field token pattern is valid")
    })
}

/// Recovers a model from an extracted legacy tree.
///
/// Only the directory listing itself is fatal; every per-member failure is
/// soft per the legacy recovery policy.
pub fn read_universe(
    root: &Path,
    source_file: &str,
    config: &ConvertConfig,
) -> Result<UniverseModel, std::io::Error> {
    let mut model = UniverseModel::new(source_file, SourceFormat::Legacy);
    model.objects = read_fields(root, config)?;
    model.tables = read_tables(root, config)?;
    model.joins = read_joins(root, config)?;
    Ok(model)
}

/// Field names from the `Columns` member: UTF-8 text, tokenized on
/// identifier boundaries, minus short tokens and stop words. Unordered.
pub fn read_fields(root: &Path, config: &ConvertConfig) -> Result<Vec<String>, std::io::Error> {
    let member = match find_member(root, "Columns", &["Id;", "References;"])? {
        Some(path) => path,
        None => {
            warn!("legacy universe: no Columns member found; field list will be empty");
            return Ok(Vec::new());
        }
    };

    let content = match fs::read_to_string(&member) {
        Ok(content) => content,
        Err(e) => {
            warn!("legacy universe: failed to read {}: {e}", member.display());
            return Ok(Vec::new());
        }
    };

    let fields: HashSet<String> = field_token_pattern()
        .find_iter(&content)
        .map(|m| m.as_str().to_string())
        .filter(|token| token.len() > 2 && !config.stop_words.contains(token))
        .collect();

    Ok(fields.into_iter().collect())
}

/// Table names from the binary `Tables` member: printable-string scan
/// filtered by the case-sensitive table keyword list. Unordered.
pub fn read_tables(root: &Path, config: &ConvertConfig) -> Result<Vec<String>, std::io::Error> {
    let strings = match scan_member(root, "Tables", &["Extensions;"], config)? {
        Some(strings) => strings,
        None => return Ok(Vec::new()),
    };

    let tables: HashSet<String> = strings
        .into_iter()
        .filter(|s| config.table_keywords.iter().any(|k| s.contains(k.as_str())))
        .collect();

    Ok(tables.into_iter().collect())
}

/// Join fragments from the binary `Joins` member: printable-string scan
/// filtered by lowercase containment of the join keyword list. Unordered.
pub fn read_joins(root: &Path, config: &ConvertConfig) -> Result<Vec<String>, std::io::Error> {
    let strings = match scan_member(root, "Joins", &["Extensions;"], config)? {
        Some(strings) => strings,
        None => return Ok(Vec::new()),
    };

    let joins: HashSet<String> = strings
        .into_iter()
        .filter(|s| {
            let lowered = s.to_lowercase();
            config
                .join_keywords
                .iter()
                .any(|k| lowered.contains(k.as_str()))
        })
        .collect();

    Ok(joins.into_iter().collect())
}

fn scan_member(
    root: &Path,
    prefix: &str,
    excluded_suffixes: &[&str],
    config: &ConvertConfig,
) -> Result<Option<Vec<String>>, std::io::Error> {
    let member = match find_member(root, prefix, excluded_suffixes)? {
        Some(path) => path,
        None => {
            warn!("legacy universe: no {prefix} member found");
            return Ok(None);
        }
    };

    match fs::read(&member) {
        Ok(data) => Ok(Some(scan_printable_strings(&data, config.min_string_len))),
        Err(e) => {
            warn!("legacy universe: failed to read {}: {e}", member.display());
            Ok(None)
        }
    }
}

/// Locates a top-level member whose name starts with `prefix`, skipping
/// known non-matching variants such as `Columns Id;`.
fn find_member(
    root: &Path,
    prefix: &str,
    excluded_suffixes: &[&str],
) -> Result<Option<PathBuf>, std::io::Error> {
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(prefix) && !excluded_suffixes.iter().any(|s| name.ends_with(s)) {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}

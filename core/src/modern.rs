//! Modern (`.unx`) metadata recovery.
//!
//! The modern container has a fixed, mandatory layout: a data-foundation
//! document describing tables and joins, and a business-layer document
//! describing typed business objects, both well-formed XML and usually
//! under the `http://www.sap.com/rws/bip` namespace. Unlike the legacy
//! reader, a missing document here aborts the conversion.

use crate::model::{SourceFormat, UniverseModel};
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const NAMESPACE_URI: &str = "http://www.sap.com/rws/bip";
pub const DATA_FOUNDATION_PATH: &str = "datafoundation/datafoundation.xml";
pub const BUSINESS_LAYER_PATH: &str = "businesslayer/businesslayer.xml";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModernReadError {
    #[error("mandatory document missing: {path}")]
    MissingDocument { path: String },
    #[error("XML parse error in {path}: {reason}")]
    Xml { path: String, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Elements collected in one document pass, split by namespace binding.
///
/// The namespaced lookup is authoritative; the plain (unbound) collection
/// is only consulted when the namespaced one came up empty, which covers
/// documents that omit the namespace declaration. Collecting both in a
/// single pass is equivalent to running the lookup twice.
struct ElementScan<T> {
    namespaced: Vec<T>,
    plain: Vec<T>,
}

impl<T> ElementScan<T> {
    fn new() -> Self {
        Self {
            namespaced: Vec::new(),
            plain: Vec::new(),
        }
    }

    fn push(&mut self, in_namespace: bool, value: T) {
        if in_namespace {
            self.namespaced.push(value);
        } else {
            self.plain.push(value);
        }
    }

    fn resolve(self) -> Vec<T> {
        if self.namespaced.is_empty() {
            self.plain
        } else {
            self.namespaced
        }
    }
}

#[derive(Debug, Clone)]
struct BusinessObject {
    name: String,
    object_type: Option<String>,
}

/// Recovers a model from an extracted modern tree. Document order is
/// preserved for every collection.
pub fn read_universe(
    root: &Path,
    source_file: &str,
) -> Result<UniverseModel, ModernReadError> {
    let foundation = read_document(root, DATA_FOUNDATION_PATH)?;
    let layer = read_document(root, BUSINESS_LAYER_PATH)?;

    let mut model = UniverseModel::new(source_file, SourceFormat::Modern);
    model.tables = scan_named_elements(&foundation, DATA_FOUNDATION_PATH, b"table", b"name")?;
    model.joins = scan_named_elements(&foundation, DATA_FOUNDATION_PATH, b"join", b"expression")?;

    for object in scan_business_objects(&layer)? {
        model.objects.push(object.name.clone());
        match object.object_type.as_deref() {
            Some("Dimension") => model.dimensions.push(object.name),
            Some("Measure") => model.measures.push(object.name),
            Some("Attribute") => model.attributes.push(object.name),
            // Untyped objects stay in the generic collection only; the
            // classifier assigns them a role later.
            _ => {}
        }
    }

    Ok(model)
}

fn read_document(root: &Path, relative: &str) -> Result<Vec<u8>, ModernReadError> {
    let path = root.join(relative);
    if !path.is_file() {
        return Err(ModernReadError::MissingDocument {
            path: relative.to_string(),
        });
    }
    Ok(fs::read(&path)?)
}

/// Collects the `primary_attr` attribute (falling back to `id`) of every
/// `local` element in the document, applying the namespace fallback rule.
fn scan_named_elements(
    xml: &[u8],
    doc_path: &str,
    local: &[u8],
    primary_attr: &[u8],
) -> Result<Vec<String>, ModernReadError> {
    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut scan = ElementScan::new();

    loop {
        match reader.read_resolved_event_into(&mut buf) {
            Ok((resolve, Event::Start(e))) | Ok((resolve, Event::Empty(e)))
                if e.local_name().as_ref() == local =>
            {
                if let Some(value) = attr_with_id_fallback(&e, primary_attr, doc_path)? {
                    scan.push(is_universe_namespace(&resolve), value);
                }
            }
            Ok((_, Event::Eof)) => break,
            Err(e) => {
                return Err(ModernReadError::Xml {
                    path: doc_path.to_string(),
                    reason: e.to_string(),
                });
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(scan.resolve())
}

fn scan_business_objects(xml: &[u8]) -> Result<Vec<BusinessObject>, ModernReadError> {
    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut scan = ElementScan::new();

    loop {
        match reader.read_resolved_event_into(&mut buf) {
            Ok((resolve, Event::Start(e))) | Ok((resolve, Event::Empty(e)))
                if e.local_name().as_ref() == b"businessObject" =>
            {
                let name = attr_with_id_fallback(&e, b"name", BUSINESS_LAYER_PATH)?;
                let object_type = attr_value(&e, b"type", BUSINESS_LAYER_PATH)?;
                if let Some(name) = name {
                    scan.push(
                        is_universe_namespace(&resolve),
                        BusinessObject { name, object_type },
                    );
                }
            }
            Ok((_, Event::Eof)) => break,
            Err(e) => {
                return Err(ModernReadError::Xml {
                    path: BUSINESS_LAYER_PATH.to_string(),
                    reason: e.to_string(),
                });
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(scan.resolve())
}

fn is_universe_namespace(resolve: &ResolveResult<'_>) -> bool {
    matches!(resolve, ResolveResult::Bound(Namespace(ns)) if *ns == NAMESPACE_URI.as_bytes())
}

/// `primary` attribute when present and non-empty, else the `id` attribute
/// under the same rule, else `None` (element is skipped).
fn attr_with_id_fallback(
    element: &BytesStart<'_>,
    primary: &[u8],
    doc_path: &str,
) -> Result<Option<String>, ModernReadError> {
    if let Some(value) = attr_value(element, primary, doc_path)? {
        return Ok(Some(value));
    }
    attr_value(element, b"id", doc_path)
}

fn attr_value(
    element: &BytesStart<'_>,
    key: &[u8],
    doc_path: &str,
) -> Result<Option<String>, ModernReadError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| ModernReadError::Xml {
            path: doc_path.to_string(),
            reason: e.to_string(),
        })?;
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| ModernReadError::Xml {
                    path: doc_path.to_string(),
                    reason: e.to_string(),
                })?
                .into_owned();
            if value.is_empty() {
                return Ok(None);
            }
            return Ok(Some(value));
        }
    }
    Ok(None)
}

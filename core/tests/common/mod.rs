//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Builds a ZIP archive in memory. Entries ending in `/` become
/// directories.
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let cursor = Cursor::new(Vec::new());
    let mut writer = ZipWriter::new(cursor);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (name, bytes) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, options)
                .expect("start zip directory");
        } else {
            writer.start_file(*name, options).expect("start zip entry");
            writer.write_all(bytes).expect("write zip entry");
        }
    }

    writer.finish().expect("finish zip").into_inner()
}

/// Writes archive bytes into `dir` under `name` and returns the path.
pub fn write_archive(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("write fixture archive");
    path
}

/// Legacy fixture: `Columns;` text member plus binary `Tables;`/`Joins;`
/// members with printable fragments embedded between junk bytes.
pub fn legacy_archive_bytes() -> Vec<u8> {
    build_zip(&[
        ("Columns;", b"Shop_id Shop_name Sales_revenue\n".as_slice()),
        (
            "Tables;",
            b"\x00\x01\x02Shop_facts\x00\x7f\xffArticle_lookup\x01".as_slice(),
        ),
        (
            "Joins;",
            b"\x00Shop_facts.Shop_id = Shop_details.Shop_id\x00\x01".as_slice(),
        ),
        ("FormatVersion", b"6.0".as_slice()),
    ])
}

pub const DATA_FOUNDATION_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dataFoundation xmlns="http://www.sap.com/rws/bip">
  <table name="Sales_Facts"/>
  <table name="Shop_lookup"/>
  <join expression="Sales_Facts.Shop_id = Shop_lookup.Shop_id"/>
</dataFoundation>
"#;

pub const BUSINESS_LAYER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<businessLayer xmlns="http://www.sap.com/rws/bip">
  <businessObject name="Shop_id" type="Dimension"/>
  <businessObject name="Sales_revenue" type="Measure"/>
  <businessObject name="Shop_note" type="Attribute"/>
</businessLayer>
"#;

/// Modern fixture with the mandatory document layout.
pub fn modern_archive_bytes() -> Vec<u8> {
    build_zip(&[
        ("datafoundation/", b"".as_slice()),
        (
            "datafoundation/datafoundation.xml",
            DATA_FOUNDATION_XML.as_bytes(),
        ),
        ("businesslayer/", b"".as_slice()),
        (
            "businesslayer/businesslayer.xml",
            BUSINESS_LAYER_XML.as_bytes(),
        ),
    ])
}

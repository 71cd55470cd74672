use std::fs;
use std::path::Path;
use tempfile::TempDir;
use universe2qlik::{ModernReadError, SourceFormat, read_modern_universe};

mod common;
use common::{BUSINESS_LAYER_XML, DATA_FOUNDATION_XML};

fn write_tree(foundation: Option<&str>, layer: Option<&str>) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    if let Some(xml) = foundation {
        write_doc(dir.path(), "datafoundation/datafoundation.xml", xml);
    }
    if let Some(xml) = layer {
        write_doc(dir.path(), "businesslayer/businesslayer.xml", xml);
    }
    dir
}

fn write_doc(root: &Path, relative: &str, xml: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("doc has parent")).expect("create doc dir");
    fs::write(path, xml).expect("write document");
}

const EMPTY_LAYER: &str = r#"<businessLayer xmlns="http://www.sap.com/rws/bip"/>"#;

#[test]
fn recovers_tables_joins_and_typed_objects() {
    let dir = write_tree(Some(DATA_FOUNDATION_XML), Some(BUSINESS_LAYER_XML));
    let model = read_modern_universe(dir.path(), "efashion.unx").expect("read universe");

    assert_eq!(model.format, SourceFormat::Modern);
    assert_eq!(
        model.tables,
        vec!["Sales_Facts".to_string(), "Shop_lookup".to_string()]
    );
    assert_eq!(
        model.joins,
        vec!["Sales_Facts.Shop_id = Shop_lookup.Shop_id".to_string()]
    );
    assert_eq!(
        model.objects,
        vec![
            "Shop_id".to_string(),
            "Sales_revenue".to_string(),
            "Shop_note".to_string(),
        ]
    );
    assert_eq!(model.dimensions, vec!["Shop_id".to_string()]);
    assert_eq!(model.measures, vec!["Sales_revenue".to_string()]);
    assert_eq!(model.attributes, vec!["Shop_note".to_string()]);
}

#[test]
fn falls_back_to_unnamespaced_lookup() {
    let foundation = r#"<dataFoundation><table name="T1"/></dataFoundation>"#;
    let dir = write_tree(Some(foundation), Some(EMPTY_LAYER));
    let model = read_modern_universe(dir.path(), "plain.unx").expect("read universe");
    assert_eq!(model.tables, vec!["T1".to_string()]);
}

#[test]
fn namespaced_elements_win_over_plain_ones() {
    let foundation = r#"<root xmlns:bip="http://www.sap.com/rws/bip">
        <bip:table name="Namespaced"/>
        <table name="Plain"/>
    </root>"#;
    let dir = write_tree(Some(foundation), Some(EMPTY_LAYER));
    let model = read_modern_universe(dir.path(), "mixed.unx").expect("read universe");
    assert_eq!(model.tables, vec!["Namespaced".to_string()]);
}

#[test]
fn fallback_applies_independently_per_element_kind() {
    // Tables carry the namespace, joins do not; the join lookup must still
    // fall back on its own.
    let foundation = r#"<root xmlns:bip="http://www.sap.com/rws/bip">
        <bip:table name="T1"/>
        <join expression="T1.a = T2.a"/>
    </root>"#;
    let dir = write_tree(Some(foundation), Some(EMPTY_LAYER));
    let model = read_modern_universe(dir.path(), "split.unx").expect("read universe");
    assert_eq!(model.tables, vec!["T1".to_string()]);
    assert_eq!(model.joins, vec!["T1.a = T2.a".to_string()]);
}

#[test]
fn name_falls_back_to_id_when_absent_or_empty() {
    let foundation = r#"<dataFoundation>
        <table id="TBL_1"/>
        <table name="" id="TBL_2"/>
        <table name="Named" id="ignored"/>
        <table/>
    </dataFoundation>"#;
    let dir = write_tree(Some(foundation), Some(EMPTY_LAYER));
    let model = read_modern_universe(dir.path(), "ids.unx").expect("read universe");
    assert_eq!(
        model.tables,
        vec!["TBL_1".to_string(), "TBL_2".to_string(), "Named".to_string()]
    );
}

#[test]
fn join_expression_falls_back_to_id() {
    let foundation = r#"<dataFoundation>
        <table name="T"/>
        <join id="join_1"/>
    </dataFoundation>"#;
    let dir = write_tree(Some(foundation), Some(EMPTY_LAYER));
    let model = read_modern_universe(dir.path(), "joins.unx").expect("read universe");
    assert_eq!(model.joins, vec!["join_1".to_string()]);
}

#[test]
fn untyped_objects_stay_out_of_role_collections() {
    let layer = r#"<businessLayer>
        <businessObject name="Mystery"/>
        <businessObject name="Oddity" type="Hierarchy"/>
    </businessLayer>"#;
    let dir = write_tree(Some("<dataFoundation/>"), Some(layer));
    let model = read_modern_universe(dir.path(), "untyped.unx").expect("read universe");

    assert_eq!(
        model.objects,
        vec!["Mystery".to_string(), "Oddity".to_string()]
    );
    assert!(model.dimensions.is_empty());
    assert!(model.measures.is_empty());
    assert!(model.attributes.is_empty());
}

#[test]
fn missing_data_foundation_is_fatal() {
    let dir = write_tree(None, Some(BUSINESS_LAYER_XML));
    let err = read_modern_universe(dir.path(), "broken.unx").expect_err("must fail");
    assert!(
        matches!(&err, ModernReadError::MissingDocument { path } if path.contains("datafoundation")),
        "unexpected error: {err}"
    );
}

#[test]
fn missing_business_layer_is_fatal() {
    let dir = write_tree(Some(DATA_FOUNDATION_XML), None);
    let err = read_modern_universe(dir.path(), "broken.unx").expect_err("must fail");
    assert!(
        matches!(&err, ModernReadError::MissingDocument { path } if path.contains("businesslayer")),
        "unexpected error: {err}"
    );
}

#[test]
fn malformed_xml_is_fatal() {
    let dir = write_tree(Some("<dataFoundation><table"), Some(BUSINESS_LAYER_XML));
    let err = read_modern_universe(dir.path(), "malformed.unx").expect_err("must fail");
    assert!(matches!(err, ModernReadError::Xml { .. }), "unexpected error: {err}");
}

#[test]
fn rereading_is_idempotent() {
    let dir = write_tree(Some(DATA_FOUNDATION_XML), Some(BUSINESS_LAYER_XML));
    let a = read_modern_universe(dir.path(), "a.unx").expect("first read");
    let b = read_modern_universe(dir.path(), "b.unx").expect("second read");

    assert_eq!(a.tables, b.tables);
    assert_eq!(a.joins, b.joins);
    assert_eq!(a.objects, b.objects);
}

//! Qlik load-script rendering.
//!
//! Emits a single `.qvs` text document from a recovered model using a
//! fixed, ordered section template. Every placeholder (connection
//! parameters, `lib://` paths) is literal text for a human to edit; the
//! renderer does not validate that table or field names are legal Qlik
//! identifiers.

use crate::model::UniverseModel;

const SECTION_RULE: &str = "// ========================================";

/// Renders the complete script. Output is deterministic for a given model;
/// any order non-determinism comes from the legacy reader's unordered
/// collections, not from rendering.
pub fn render_script(model: &UniverseModel) -> String {
    let mut out = String::new();

    header(&mut out, model);
    connection_section(&mut out);
    table_section(&mut out, model);
    join_section(&mut out, model);
    summary_section(&mut out, model);
    calculation_section(&mut out, model);
    trailer(&mut out);

    out
}

fn banner(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(SECTION_RULE);
    out.push('\n');
    out.push_str(&format!("// {title}\n"));
    out.push_str(SECTION_RULE);
    out.push('\n');
}

fn header(out: &mut String, model: &UniverseModel) {
    out.push_str(&format!(
        "// Qlik Cloud script generated from {} Business Objects universe\n",
        model.format.label()
    ));
    out.push_str(&format!("// Source file: {}\n", model.source_file));
    out.push_str(&format!("// Extracted tables: {}\n", model.tables.len()));
    out.push_str(&format!("// Extracted objects: {}\n", model.objects.len()));
}

fn connection_section(out: &mut String) {
    banner(out, "CONNECTION CONFIGURATION");
    out.push_str("// Replace these parameters for your environment\n");
    out.push_str("LET vServer = 'your_db_server';\n");
    out.push_str("LET vDatabase = 'your_database';\n");
    out.push_str("LET vUsername = 'your_user';\n");
    out.push_str("LET vPassword = 'your_password';\n");

    banner(out, "DATABASE CONNECTION");
    out.push_str("// Example for SQL Server\n");
    out.push_str(
        "// LIB CONNECT TO 'SQL_Server_Connection' (SERVER '$(vServer)', DATABASE '$(vDatabase)', USER '$(vUsername)', PASSWORD '$(vPassword)');\n",
    );
}

fn table_section(out: &mut String, model: &UniverseModel) {
    banner(out, "TABLE LOADING");
    for table in &model.tables {
        out.push_str(&format!(
            "\n// Loading table {table}\n{table}:\nLOAD *\nFROM [{table}]\n;\n"
        ));
    }
}

fn join_section(out: &mut String, model: &UniverseModel) {
    if model.joins.is_empty() {
        return;
    }
    banner(out, "JOINS");
    for join in &model.joins {
        out.push_str(&format!("// Join: {join}\n"));
    }
}

fn summary_section(out: &mut String, model: &UniverseModel) {
    banner(out, "DIMENSIONS AND MEASURES");
    out.push_str(&format!(
        "// Available dimensions: {}\n",
        model.dimensions.join(", ")
    ));
    out.push_str(&format!(
        "// Available measures: {}\n",
        model.measures.join(", ")
    ));
    out.push_str(&format!(
        "// Available attributes: {}\n",
        model.attributes.join(", ")
    ));
}

fn calculation_section(out: &mut String, model: &UniverseModel) {
    banner(out, "CALCULATION EXAMPLES");
    for measure in &model.measures {
        out.push_str(&format!(
            "\n// Calculation for {measure}\n\
             // Sum({measure}) as Total_{measure}\n\
             // Avg({measure}) as Avg_{measure}\n\
             // Count({measure}) as Count_{measure}\n"
        ));
    }
}

fn trailer(out: &mut String) {
    banner(out, "USAGE NOTES");
    out.push_str("// 1. Adjust connection parameters for your environment\n");
    out.push_str("// 2. Edit table names if needed\n");
    out.push_str("// 3. Add your own calculations and transformations\n");
    out.push_str("// 4. Test joins and optimize performance\n");
    out.push_str("// 5. Document your changes\n");

    banner(out, "END OF SCRIPT");
}

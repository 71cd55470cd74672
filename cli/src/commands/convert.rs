use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use universe2qlik::{ConvertConfig, UniversePackage};

pub fn run(input: &str, output: Option<&str>, quiet: bool) -> Result<ExitCode> {
    let pkg = UniversePackage::open(input)
        .with_context(|| format!("Failed to open universe: {}", input))?;

    let conversion = pkg
        .convert(&ConvertConfig::default())
        .with_context(|| format!("Failed to convert universe: {}", input))?;

    let out_path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(input).with_extension("qvs"));
    fs::write(&out_path, &conversion.script)
        .with_context(|| format!("Failed to write script: {}", out_path.display()))?;

    if !quiet {
        let model = &conversion.model;
        println!(
            "Converted {} ({} universe)",
            model.source_file,
            model.format.label()
        );
        println!("  Tables:     {}", model.tables.len());
        println!("  Joins:      {}", model.joins.len());
        println!("  Dimensions: {}", model.dimensions.len());
        println!("  Measures:   {}", model.measures.len());
        println!("  Attributes: {}", model.attributes.len());
        println!("  Script:     {}", out_path.display());
    }

    Ok(ExitCode::from(0))
}

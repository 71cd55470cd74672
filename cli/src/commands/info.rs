use crate::OutputFormat;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::process::ExitCode;
use universe2qlik::{ConvertConfig, UniversePackage, serialize_model};

pub fn run(path: &str, format: OutputFormat) -> Result<ExitCode> {
    let pkg = UniversePackage::open(path)
        .with_context(|| format!("Failed to open universe: {}", path))?;

    let model = pkg
        .extract_model(&ConvertConfig::default())
        .with_context(|| format!("Failed to read universe: {}", path))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Json => {
            let json = serialize_model(&model).context("Failed to serialize model")?;
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Text => {
            writeln!(
                handle,
                "Universe: {} ({} format)",
                model.source_file,
                model.format.label()
            )?;
            write_list(&mut handle, "Tables", &model.tables)?;
            write_list(&mut handle, "Joins", &model.joins)?;
            write_list(&mut handle, "Dimensions", &model.dimensions)?;
            write_list(&mut handle, "Measures", &model.measures)?;
            write_list(&mut handle, "Attributes", &model.attributes)?;
        }
    }

    Ok(ExitCode::from(0))
}

fn write_list(handle: &mut impl Write, label: &str, items: &[String]) -> io::Result<()> {
    writeln!(handle, "{}: {}", label, items.len())?;
    for item in items {
        writeln!(handle, "  - {}", item)?;
    }
    Ok(())
}

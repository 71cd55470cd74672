mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use universe2qlik::{ContainerError, ModernReadError};

#[derive(Parser)]
#[command(name = "universe2qlik")]
#[command(about = "Convert BusinessObjects universes (.unv/.unx) to Qlik load scripts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Convert a universe file to a Qlik load script")]
    Convert {
        #[arg(help = "Path to the .unv or .unx universe file")]
        input: String,
        #[arg(long, short, help = "Output script path (default: input with .qvs extension)")]
        output: Option<String>,
        #[arg(long, short, help = "Quiet mode: suppress the conversion summary")]
        quiet: bool,
    },
    #[command(about = "Show the metadata recovered from a universe file")]
    Info {
        #[arg(help = "Path to the .unv or .unx universe file")]
        path: String,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            quiet,
        } => commands::convert::run(&input, output.as_deref(), quiet),
        Commands::Info { path, format } => commands::info::run(&path, format),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}

fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    if is_internal_error(err) {
        ExitCode::from(3)
    } else {
        ExitCode::from(2)
    }
}

/// Bad input (missing file, wrong extension, not a ZIP, missing mandatory
/// document) exits 2; unexpected parse and limit failures exit 3.
fn is_internal_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if let Some(container) = cause.downcast_ref::<ContainerError>() {
            return !matches!(
                container,
                ContainerError::NotZipContainer | ContainerError::Io(_)
            );
        }
        if let Some(modern) = cause.downcast_ref::<ModernReadError>() {
            return !matches!(modern, ModernReadError::MissingDocument { .. });
        }
        false
    })
}

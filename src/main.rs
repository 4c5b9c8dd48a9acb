use anyhow::Context;
use bitmap_trace::config::{load_config_or_default, Config, ConfigFormat};
use bitmap_trace::logging::init_logging;
use bitmap_trace::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bitmap-trace")]
#[command(about = "Binarize a raster image and trace it into an SVG outline with potrace")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Image to convert; opens a file dialog when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Cutoff intensity (0-255): darker samples become black, the rest white
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Configuration file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// potrace program name or path
    #[arg(long)]
    potrace: Option<String>,

    /// Write a JSON report of the conversion to this file
    #[arg(short, long)]
    report: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration to a file
    InitConfig {
        /// Destination path
        path: PathBuf,

        #[arg(short, long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::InitConfig { path, format }) = &cli.command {
        Config::default()
            .save_to_file(path, *format)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        println!("Default configuration written to {}", path.display());
        return Ok(());
    }

    let mut config = load_config_or_default(cli.config.as_deref());
    config.logging.verbosity = cli.verbose;
    if let Some(program) = cli.potrace {
        config.tracer.program = program;
    }
    let _log_guard = init_logging(&config.logging)?;

    let threshold = cli.threshold.unwrap_or(config.conversion.threshold);
    let converter = Converter::from_config(&config);

    let selector: Box<dyn FileSelector> = match cli.input {
        Some(path) => Box::new(FixedSelector::new(path)),
        None => Box::new(DialogSelector::from_config(&config.selector)),
    };

    match select_and_convert(selector.as_ref(), &converter, threshold)? {
        RunOutcome::Cancelled => {
            tracing::info!("No file selected, nothing to do");
        }
        RunOutcome::Converted(report) => {
            println!("SVG written to {}", report.svg.display());

            if let Some(report_path) = cli.report {
                let json = serde_json::to_string_pretty(&report)?;
                std::fs::write(&report_path, json)
                    .with_context(|| format!("failed to write report to {}", report_path.display()))?;
                println!("Report saved to {}", report_path.display());
            }
        }
    }

    Ok(())
}

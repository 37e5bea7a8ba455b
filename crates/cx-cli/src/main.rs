//! `cx`: replay a CX editing script and export the scene as static HTML.
//!
//! The script stands in for the interactive surface and control panel; the
//! output directory stands in for the browser download.

mod script;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cx_core::export::ExportConfig;
use cx_core::sink::FileSink;
use cx_editor::session::Session;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cx")]
#[command(about = "Replay a canvas editing script and export it as a standalone HTML page")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a script and write the exported page into a directory
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Directory to write the page into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// File name of the page (overrides the config file)
        #[arg(long)]
        file_name: Option<String>,
    },

    /// Replay a script and print the exported page to stdout
    Preview {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// JSON editing script (array of editor events)
    script: PathBuf,

    /// JSON export config (`title`, `lang`, `fileName`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page title (overrides the config file)
    #[arg(long)]
    title: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            out,
            file_name,
        } => {
            let mut session = build_session(&input)?;
            if let Some(name) = file_name {
                session.export_config.file_name = name;
            }
            let mut sink = FileSink::new(&out);
            session
                .export_to(&mut sink)
                .context("Failed to write exported page")?;
            if let Some(path) = sink.last_written() {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Preview { input } => {
            let session = build_session(&input)?;
            print!("{}", session.export());
            Ok(())
        }
    }
}

/// Load config + script and replay the script into a fresh session.
fn build_session(input: &InputArgs) -> Result<Session> {
    let mut config = load_config(input.config.as_deref())?;
    if let Some(title) = &input.title {
        config.title = title.clone();
    }

    let steps = script::load_script(&input.script)?;
    let base_dir = input
        .script
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut session = Session::with_config(config);
    let summary = script::replay(&mut session, steps, &base_dir)?;
    log::info!(
        "replayed {}: {} applied, {} ignored, {} elements",
        input.script.display(),
        summary.applied,
        summary.ignored,
        session.scene().len()
    );
    Ok(session)
}

fn load_config(path: Option<&Path>) -> Result<ExportConfig> {
    let Some(path) = path else {
        return Ok(ExportConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

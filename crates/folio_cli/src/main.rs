//! Folio CLI - render the charts of a Folio document
//!
//! Reads a `folio.toml` document, renders every `[[chart]]` entry to a static
//! SVG file and can print the derived geometry of one chart for debugging.

mod config;
mod render;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Render Folio document charts to accessible SVG", long_about = None)]
struct Cli {
    /// Raise the log level (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every chart of a document to `<out>/<id>.svg`
    Render {
        /// Document file, or a directory containing folio.toml
        #[arg(default_value = ".")]
        document: PathBuf,

        /// Output directory (defaults to the document's `output`)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Override the document locale
        #[arg(long)]
        locale: Option<String>,

        /// Extra string catalog; the file stem names the locale (de.yaml)
        #[arg(long)]
        catalog: Vec<PathBuf>,

        /// Only render the chart with this id
        #[arg(long)]
        chart: Option<String>,
    },

    /// Print pixel points, ticks and path data of one chart
    Inspect {
        /// Document file, or a directory containing folio.toml
        document: PathBuf,

        /// Chart id
        #[arg(long)]
        chart: String,

        /// Override the document locale
        #[arg(long)]
        locale: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            document,
            out,
            locale,
            catalog,
            chart,
        } => {
            let mut loaded = config::load_document(&document)?;
            if let Some(locale) = locale {
                loaded.doc.locale = locale;
            }
            let catalogs = config::load_catalogs(&catalog)?;
            let summary = render::render_document(
                &loaded,
                &catalogs,
                &render::RenderOptions {
                    out,
                    only: chart,
                },
            )?;
            tracing::info!(
                written = summary.written.len(),
                skipped = summary.skipped,
                "render finished"
            );
            Ok(())
        }
        Commands::Inspect {
            document,
            chart,
            locale,
            json,
        } => {
            let mut loaded = config::load_document(&document)?;
            if let Some(locale) = locale {
                loaded.doc.locale = locale;
            }
            let report = render::inspect_chart(&loaded, &chart)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report.to_json())?);
            } else {
                print!("{}", report.to_text());
            }
            Ok(())
        }
    }
}

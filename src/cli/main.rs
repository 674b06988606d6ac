//! stock-pail command line interface

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stock_pail::cli::commands::design::{DesignArgs, handle_design};
use stock_pail::cli::commands::export::{ExportArgs, handle_export};
use stock_pail::cli::commands::import::{ImportArgs, handle_import};
use stock_pail::cli::commands::summary::{SummaryArgs, handle_summary};
use stock_pail::cli::commands::upload::{UploadArgs, handle_upload};
use stock_pail::config::{DEFAULT_CONFIG_FILE, StockPailConfig};

/// Stock Pail inventory tools
#[derive(Parser, Debug)]
#[command(name = "stock-pail")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Local stock file (overrides storage.stock_file)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the stock list (csv, json, sql, xlsx, xls)
    Export {
        #[arg(short, long, default_value = "csv")]
        format: String,
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Import stock rows from CSV text or an .xlsx workbook
    Import {
        file: PathBuf,
        /// Create rows through the configured backend
        #[arg(long, default_value_t = false)]
        remote: bool,
    },
    /// Round-trip CREATE TABLE SQL through the schema designer
    Design {
        /// SQL file, or `-` for stdin
        #[arg(short, long)]
        input: Option<String>,
        /// Start from a built-in template
        #[arg(short, long)]
        template: Option<String>,
        /// Flip row-level security on a table (repeatable)
        #[arg(long = "toggle-rls")]
        toggle_rls: Vec<String>,
        /// Save the script instead of printing it
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        list_templates: bool,
    },
    /// Print inventory analytics
    Summary {
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Group by `stock` or `batch`
        #[arg(short, long)]
        group_by: Option<String>,
        /// List records matching a term
        #[arg(short, long)]
        search: Option<String>,
        /// Sort the listing; repeat a field to flip direction
        #[arg(long)]
        sort: Vec<String>,
    },
    /// Store a document locally and parse it
    Upload {
        file: PathBuf,
        #[arg(long)]
        mime_type: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = StockPailConfig::load(&cli.config)
        .with_context(|| format!("Loading {}", cli.config.display()))?;
    let store = cli
        .store
        .clone()
        .unwrap_or_else(|| config.storage.stock_file.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Starting async runtime")?;

    match cli.command {
        Command::Export { format, output_dir } => {
            handle_export(&ExportArgs {
                store,
                format,
                output_dir,
            })?;
        }
        Command::Import { file, remote } => {
            runtime.block_on(handle_import(
                &ImportArgs {
                    file,
                    store,
                    remote,
                },
                &config,
            ))?;
        }
        Command::Design {
            input,
            template,
            toggle_rls,
            output_dir,
            list_templates,
        } => {
            handle_design(&DesignArgs {
                input,
                template,
                toggle_rls,
                output_dir,
                list_templates,
            })?;
        }
        Command::Summary {
            json,
            group_by,
            search,
            sort,
        } => {
            handle_summary(&SummaryArgs {
                store,
                json,
                group_by,
                search,
                sort,
            })?;
        }
        Command::Upload {
            file,
            mime_type,
            category,
            description,
        } => {
            runtime.block_on(handle_upload(
                &UploadArgs {
                    file,
                    mime_type,
                    category,
                    description,
                },
                &config,
            ))?;
        }
    }
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use catalog_explorer::catalog::{CatalogClient, EgeriaClient, FixtureClient, search_params};
use catalog_explorer::logging::{self, LogTarget};
use catalog_explorer::members::resolve_members;
use catalog_explorer::model::{ExplorerConfig, Record};
use catalog_explorer::navigate::{EngineSettings, NavigationEngine};
use catalog_explorer::normalize::normalize;
use catalog_explorer::project::{CATALOG_COLUMNS, Row, project};

#[derive(Parser)]
#[command(name = "catalog-explorer")]
#[command(about = "Browse metadata catalogs, collections and their members", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Serve canned payloads from a fixture file instead of a live platform
    #[arg(long, global = true, value_name = "PATH")]
    fixture: Option<PathBuf>,

    #[arg(long, global = true, env = "EGERIA_PLATFORM_URL")]
    platform_url: Option<String>,

    #[arg(long, global = true, env = "EGERIA_VIEW_SERVER")]
    view_server: Option<String>,

    #[arg(long, global = true, env = "EGERIA_USER")]
    user: Option<String>,

    #[arg(long, global = true, env = "EGERIA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Accept self-signed platform certificates
    #[arg(long, global = true)]
    insecure: bool,

    /// Write logs to this file (the TUI never logs to the terminal)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse interactively (default)
    Explore {
        /// Append a JSONL session trace to this file
        #[arg(long, value_name = "PATH")]
        trace: Option<PathBuf>,
    },

    /// List catalogs
    List {
        /// Search string (defaults to the configured root search)
        #[arg(long)]
        search: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the member references of a collection
    Members {
        qualified_name: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize a saved payload file and print it as a table
    Normalize {
        path: PathBuf,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, None | Some(Commands::Explore { .. }));
    let target = match (&cli.log_file, interactive) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Off,
        (None, false) => LogTarget::Stderr,
    };
    logging::init(target, cli.verbose)?;

    let config = resolve_config(&cli)?;
    tracing::debug!(platform = %config.platform_url, server = %config.view_server, "configuration resolved");

    match cli.command {
        None => {
            let client = build_client(cli.fixture.as_deref(), &config)?;
            catalog_explorer::tui::run(client, config)?;
        }
        Some(Commands::Explore { trace }) => {
            let client = build_client(cli.fixture.as_deref(), &config)?;
            catalog_explorer::tui::run_with_options(
                client,
                config,
                catalog_explorer::tui::TuiRunOptions { trace },
            )?;
        }
        Some(Commands::List { search, json }) => {
            let client = build_client(cli.fixture.as_deref(), &config)?;
            let mut settings = EngineSettings::from_config(&config);
            if let Some(search) = search {
                settings.root_search = search;
            }
            let engine = NavigationEngine::start(client, settings);
            print_records(engine.current_frame().records(), CATALOG_COLUMNS, json)?;
        }
        Some(Commands::Members {
            qualified_name,
            json,
        }) => {
            let client = build_client(cli.fixture.as_deref(), &config)?;
            let raw = client
                .query(&config.queries.catalogs, &search_params(&qualified_name))
                .with_context(|| format!("query {}", qualified_name))?;
            let result = normalize(&raw);
            let record =
                catalog_explorer::members::resolve_latest(&result.records, &qualified_name);
            let refs = record.and_then(resolve_members).unwrap_or_default();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&refs).context("serialize members json")?
                );
            } else if refs.is_empty() {
                println!("{} has no members", qualified_name);
            } else {
                for r in refs {
                    println!("{}", r);
                }
            }
        }
        Some(Commands::Normalize { path, json }) => {
            let bytes =
                std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
            // A file that is not JSON is handed over as text, like a non-JSON response body.
            let raw: serde_json::Value = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
            });
            let result = normalize(&raw);
            print_records(&result.records, CATALOG_COLUMNS, json)?;
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<ExplorerConfig> {
    let mut config = match &cli.config {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };
    if let Some(url) = &cli.platform_url {
        config.platform_url = url.clone();
    }
    if let Some(server) = &cli.view_server {
        config.view_server = server.clone();
    }
    if let Some(user) = &cli.user {
        config.user = user.clone();
    }
    if let Some(token) = &cli.token {
        config.token = Some(token.clone());
    }
    if cli.insecure {
        config.accept_invalid_certs = true;
    }
    config.validate()?;
    Ok(config)
}

fn build_client(fixture: Option<&Path>, config: &ExplorerConfig) -> Result<Box<dyn CatalogClient>> {
    match fixture {
        Some(path) => Ok(Box::new(FixtureClient::load(path)?)),
        None => Ok(Box::new(EgeriaClient::new(config.clone())?)),
    }
}

fn print_records(records: &[Record], columns: &[&str], json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(records).context("serialize records json")?
        );
        return Ok(());
    }
    let rows = project(records, columns);
    print_table(columns, &rows);
    Ok(())
}

fn print_table(columns: &[&str], rows: &[Row]) {
    const MAX_WIDTH: usize = 40;
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count()).min(MAX_WIDTH);
        }
    }
    let header: Vec<&str> = columns.to_vec();
    println!("{}", format_line(&header, &widths));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        println!("{}", format_line(&cells, &widths));
    }
}

fn format_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<w$}", truncate(c, *w), w = *w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

use std::path::PathBuf;

use anyhow::Result;

use crate::catalog::CatalogClient;
use crate::model::ExplorerConfig;

#[derive(Clone, Debug, Default)]
pub struct TuiRunOptions {
    /// Append a JSONL session trace to this file.
    pub trace: Option<PathBuf>,
}

pub fn run(client: Box<dyn CatalogClient>, config: ExplorerConfig) -> Result<()> {
    run_with_options(client, config, TuiRunOptions::default())
}

pub fn run_with_options(
    client: Box<dyn CatalogClient>,
    config: ExplorerConfig,
    opts: TuiRunOptions,
) -> Result<()> {
    crate::tui_shell::run_with_options(client, config, opts)
}

use anyhow::Result;

use crate::catalog::CatalogClient;
use crate::model::ExplorerConfig;

mod app;
mod view;
mod views;

// Make core TUI helpers available to submodules via `super::...`.
use view::render_view_chrome;

pub fn run_with_options(
    client: Box<dyn CatalogClient>,
    config: ExplorerConfig,
    opts: crate::tui::TuiRunOptions,
) -> Result<()> {
    app::run(client, config, opts)
}

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::{App, event_loop, render};
use crate::catalog::CatalogClient;
use crate::model::ExplorerConfig;

pub(in crate::tui_shell) fn run(
    client: Box<dyn CatalogClient>,
    config: ExplorerConfig,
    opts: crate::tui::TuiRunOptions,
) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let drawn = terminal
        .draw(|f| render::draw_loading(f, &config))
        .map(|_| ())
        .context("draw");
    let res = drawn.and_then(|()| {
            let mut app = App::load(client, config, opts);
            event_loop::run_loop(&mut terminal, &mut app)
        });

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

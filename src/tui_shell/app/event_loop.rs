use std::io;

use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::*;

const PAGE: isize = 10;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.trace_screen_view_if_changed();
        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            app.trace_session_end("quit");
            return Ok(());
        }

        // Keys pressed while a query runs stay buffered and are read here
        // once it has answered.
        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    app.trace_key_action(key);

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit = true;
        return;
    }

    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.quit = true;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }

        KeyCode::Up | KeyCode::Char('k') => app.engine.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.engine.move_cursor(1),
        KeyCode::PageUp => app.engine.move_cursor(-PAGE),
        KeyCode::PageDown => app.engine.move_cursor(PAGE),
        KeyCode::Home | KeyCode::Char('g') => app.engine.move_cursor(isize::MIN),
        KeyCode::End | KeyCode::Char('G') => app.engine.move_cursor(isize::MAX),

        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.select(),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('b') => {
            app.back()
        }
        KeyCode::Char('r') => app.refresh(),

        _ => {}
    }
}

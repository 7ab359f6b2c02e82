use super::*;

const HELP: &[(&str, &str)] = &[
    ("Up/Down j/k", "move"),
    ("PgUp/PgDn Home/End", "jump"),
    ("Enter l", "open: members, or details for a leaf"),
    ("Esc Backspace h b", "back"),
    ("r", "refresh the current view"),
    ("q Ctrl-C", "quit"),
];

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);

    let ctx = RenderCtx {
        now: OffsetDateTime::now_utc(),
    };
    let nav = app.engine.current_frame();
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);
    let loaded = fmt_since(&app.loaded_at, ctx.now).unwrap_or_else(|| fmt_ts_ui(&app.loaded_at));
    render_records(frame, parts[0], nav, &format!("loaded {}", loaded));
    render_details(frame, parts[1], nav.selected_record());

    // Status / last result
    {
        let mut lines = Vec::new();
        if let Some(r) = &app.last_result {
            let style = match r.kind {
                EntryKind::Output => Style::default().fg(Color::White),
                EntryKind::Error => Style::default().fg(Color::Red),
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", fmt_ts_ui(&r.ts)),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(r.text.as_str(), style),
            ]));
        }
        if lines.is_empty() {
            lines.push(Line::from(""));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::TOP).title("Last")),
            chunks[2],
        );
    }

    let hint = if app.engine.depth() > 1 {
        "Enter: open  Esc: back  r: refresh  ?: help  q: quit"
    } else {
        "Enter: open  r: refresh  ?: help  q: quit"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::Gray))),
        chunks[3],
    );

    if app.show_help {
        draw_help(frame, chunks[1]);
    }
}

fn draw_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let server = format!(
        "{} @ {}",
        app.config.view_server,
        app.config.platform_url.trim_end_matches('/')
    );
    let spans = vec![
        Span::styled(
            "Catalog Explorer",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(server, Style::default().fg(Color::Blue)),
        Span::raw("  "),
        Span::raw(app.breadcrumb()),
    ];
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_help(frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
    let width = area.width.min(60);
    let height = (HELP.len() as u16 + 2).min(area.height);
    let popup = ratatui::layout::Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    let lines = HELP
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{:<20}", keys), Style::default().fg(Color::Yellow)),
                Span::raw(*what),
            ])
        })
        .collect::<Vec<_>>();
    frame.render_widget(ratatui::widgets::Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("keys")),
        popup,
    );
}

pub(super) fn draw_loading(frame: &mut ratatui::Frame, config: &ExplorerConfig) {
    let text = format!(
        "Loading {} from {} @ {} ...",
        config.queries.catalogs, config.view_server, config.platform_url
    );
    frame.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Catalog Explorer")),
        frame.area(),
    );
}

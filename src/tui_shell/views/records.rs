use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Row as TableRow, Table, TableState};

use crate::navigate::NavigationFrame;
use crate::project::project;

use super::super::render_view_chrome;

pub(in crate::tui_shell) fn render_records(
    frame: &mut ratatui::Frame,
    area: Rect,
    nav: &NavigationFrame,
    subtitle: &str,
) {
    let title = format!("{} ({})", nav.title(), nav.level().label());
    let inner = render_view_chrome(frame, &title, subtitle, area);

    let columns = nav.level().columns();
    let rows = project(nav.records(), columns);
    let error_style = Style::default().fg(Color::Red);

    let body = nav
        .records()
        .iter()
        .zip(rows)
        .map(|(record, cells)| {
            let row = TableRow::new(cells);
            if record.is_diagnostic() {
                row.style(error_style)
            } else {
                row
            }
        })
        .collect::<Vec<_>>();

    let widths = columns
        .iter()
        .map(|_| Constraint::Fill(1))
        .collect::<Vec<_>>();
    let header = TableRow::new(columns.iter().copied()).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::BOTTOM).title(format!(
            "{} rows  query={}",
            nav.records().len(),
            nav.query()
        )))
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = TableState::default().with_selected(Some(nav.cursor()));
    frame.render_stateful_widget(table, inner, &mut state);
}

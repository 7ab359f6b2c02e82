use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::Record;
use crate::project::project_attributes;

pub(in crate::tui_shell) fn render_details(
    frame: &mut ratatui::Frame,
    area: Rect,
    record: Option<&Record>,
) {
    let lines = match record {
        None => vec![Line::from("(no selection)")],
        Some(record) => {
            let key_style = if record.is_diagnostic() {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Gray)
            };
            project_attributes(record)
                .into_iter()
                .map(|row| {
                    let mut cells = row.into_iter();
                    let key = cells.next().unwrap_or_default();
                    let value = cells.next().unwrap_or_default();
                    Line::from(vec![
                        Span::styled(format!("{}: ", key), key_style),
                        Span::raw(value),
                    ])
                })
                .collect()
        }
    };

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP).title("details")),
        area,
    );
}

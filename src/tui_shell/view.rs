use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use time::OffsetDateTime;

#[derive(Clone, Copy, Debug)]
pub(super) struct RenderCtx {
    pub(super) now: OffsetDateTime,
}

pub(super) fn render_view_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    subtitle: &str,
    area: Rect,
) -> Rect {
    let header = Line::from(vec![
        Span::styled(title.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(subtitle.to_string(), Style::default().fg(Color::Gray)),
    ]);

    let outer = Block::default().borders(Borders::ALL).title(header);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}

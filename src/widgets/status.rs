//! Loading, error, and empty-state panels
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

/// Indeterminate progress bar driven by a tick counter
pub struct Spinner {
    tick: u64,
    width: u16,
}

impl Spinner {
    pub fn new(tick: u64) -> Self {
        Self { tick, width: 30 }
    }

    /// Position of the moving block for a bar of `bar_width` cells.
    ///
    /// Bounces between both ends instead of wrapping.
    pub fn position(tick: u64, bar_width: usize) -> usize {
        if bar_width <= 1 {
            return 0;
        }
        let span = (bar_width - 1) * 2;
        let step = (tick % span as u64) as usize;
        if step >= bar_width {
            span - step
        } else {
            step
        }
    }
}

impl Widget for Spinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 3 {
            return;
        }

        let width = self.width.min(area.width);
        let bar_width = (width - 2) as usize;
        let position = Self::position(self.tick, bar_width);

        let bar: String = std::iter::once('[')
            .chain((0..bar_width).map(|i| if i == position { '█' } else { ' ' }))
            .chain(std::iter::once(']'))
            .collect();

        let x = area.x + (area.width - width) / 2;
        let y = area.y + area.height / 2;
        buf.set_string(x, y, bar, Style::default().fg(Color::Magenta));

        if y + 1 < area.bottom() {
            let label = "Loading avatars...";
            let label_x = area.x + area.width.saturating_sub(label.len() as u16) / 2;
            buf.set_string(label_x, y + 1, label, Style::default().fg(Color::DarkGray));
        }
    }
}

/// Failure message with a full-reload affordance
pub struct ErrorPanel<'a> {
    message: &'a str,
}

impl<'a> ErrorPanel<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl<'a> Widget for ErrorPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red));

        Paragraph::new(vec![
            Line::from(Span::styled(
                self.message,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled("Press r to try again", Style::default().fg(Color::Magenta))),
        ])
        .block(block)
        .wrap(Wrap { trim: true })
        .render(area, buf);
    }
}

/// Shown when a load finished with no records
pub struct EmptyPanel;

impl Widget for EmptyPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow));

        Paragraph::new(vec![
            Line::from(Span::styled(
                "No avatars found",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from("Create your first AI avatar to get started!"),
            Line::default(),
            Line::from(Span::styled(
                "Press n to create a new avatar",
                Style::default().fg(Color::Magenta),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block)
        .wrap(Wrap { trim: true })
        .render(area, buf);
    }
}

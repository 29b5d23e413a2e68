//! Avatar cards
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::Record;

/// Height of a single card, borders included
pub const CARD_HEIGHT: u16 = 9;

/// Cards per row at most
pub const MAX_COLUMNS: usize = 3;

const MIN_CARD_WIDTH: u16 = 28;

/// Shorten `text` to at most `width` columns, marking the cut with an ellipsis
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// A single avatar card
pub struct AvatarCard<'a> {
    record: &'a Record,
    focused: bool,
}

impl<'a> AvatarCard<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self { record, focused: false }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> Widget for AvatarCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(Span::styled(
                " AI ",
                Style::default().fg(Color::White).bg(Color::Magenta),
            )))
            .title_alignment(Alignment::Right);

        let inner = area.width.saturating_sub(2) as usize;
        let name = match self.record.display_name() {
            name if name.is_empty() => "Unknown User".to_string(),
            name => name,
        };

        let edit_style = if self.focused {
            Style::default().fg(Color::Black).bg(Color::Magenta)
        } else {
            Style::default().fg(Color::Magenta)
        };

        let lines = vec![
            Line::from(Span::styled(
                fit(self.record.avatar_uri(), inner),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
            Line::from(Span::styled(fit(&name, inner), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(fit(&self.record.email, inner), Style::default().fg(Color::Gray))),
            Line::from(Span::styled("★ ★ ★", Style::default().fg(Color::Yellow))),
            Line::default(),
            Line::from(Span::styled(" Edit Avatar ", edit_style)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

/// Grid of cards in fetcher order
pub struct CardGrid<'a> {
    records: &'a [Record],
    cursor: usize,
}

impl<'a> CardGrid<'a> {
    pub fn new(records: &'a [Record], cursor: usize) -> Self {
        Self { records, cursor }
    }

    /// Number of columns that fit in the given width
    pub fn columns_for(width: u16) -> usize {
        ((width / MIN_CARD_WIDTH) as usize).clamp(1, MAX_COLUMNS)
    }
}

impl<'a> Widget for CardGrid<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = Self::columns_for(area.width);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.records
                    .chunks(columns)
                    .map(|_| Constraint::Length(CARD_HEIGHT))
                    .chain(std::iter::once(Constraint::Min(0))),
            )
            .split(area);

        for (row, chunk) in self.records.chunks(columns).enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(rows[row]);

            for (col, record) in chunk.iter().enumerate() {
                let index = row * columns + col;
                AvatarCard::new(record).focused(index == self.cursor).render(cells[col], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{fallback_records, PLACEHOLDER_AVATAR};

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_columns_for() {
        assert_eq!(CardGrid::columns_for(10), 1);
        assert_eq!(CardGrid::columns_for(60), 2);
        assert_eq!(CardGrid::columns_for(200), 3);
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("janet.weaver@reqres.in", 40), "janet.weaver@reqres.in");
        assert_eq!(fit("janet.weaver@reqres.in", 8), "janet.w…");
        assert_eq!(fit("漢字漢字", 5), "漢字…");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn test_card_placeholder_avatar() {
        let mut record = fallback_records().remove(0);
        record.avatar = String::new();

        let area = Rect::new(0, 0, 40, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        AvatarCard::new(&record).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains(PLACEHOLDER_AVATAR));
        assert!(text.contains("George Bluth"));
        assert!(text.contains("Edit Avatar"));
    }

    #[test]
    fn test_card_unknown_user() {
        let mut record = fallback_records().remove(1);
        record.first_name.clear();
        record.last_name.clear();

        let area = Rect::new(0, 0, 40, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        AvatarCard::new(&record).render(area, &mut buf);

        assert!(buffer_text(&buf).contains("Unknown User"));
    }

    #[test]
    fn test_grid_renders_in_order() {
        let records = fallback_records();
        let area = Rect::new(0, 0, 120, 20);
        let mut buf = Buffer::empty(area);
        CardGrid::new(&records, 0).render(area, &mut buf);

        let text = buffer_text(&buf);
        let george = text.find("George Bluth").unwrap();
        let janet = text.find("Janet Weaver").unwrap();
        let emma = text.find("Emma Wong").unwrap();
        assert!(george < janet && janet < emma);
    }
}

//! Create/edit avatar modal
//!
//! The form collects a name, an email, and an avatar style, but nothing reads
//! them: submitting only closes the modal.
use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::input::Key;

/// Avatar styles offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarStyle {
    Abstract,
    Human,
    Pixel,
    Anime,
    Robot,
    Fantasy,
}

impl AvatarStyle {
    /// All styles in display order
    pub const ALL: [AvatarStyle; 6] = [
        AvatarStyle::Abstract,
        AvatarStyle::Human,
        AvatarStyle::Pixel,
        AvatarStyle::Anime,
        AvatarStyle::Robot,
        AvatarStyle::Fantasy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AvatarStyle::Abstract => "Abstract",
            AvatarStyle::Human => "Human",
            AvatarStyle::Pixel => "Pixel",
            AvatarStyle::Anime => "Anime",
            AvatarStyle::Robot => "Robot",
            AvatarStyle::Fantasy => "Fantasy",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AvatarStyle::Abstract => Color::LightMagenta,
            AvatarStyle::Human => Color::Blue,
            AvatarStyle::Pixel => Color::LightBlue,
            AvatarStyle::Anime => Color::Magenta,
            AvatarStyle::Robot => Color::Cyan,
            AvatarStyle::Fantasy => Color::Red,
        }
    }
}

/// Focusable parts of the form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Style,
    Cancel,
    Create,
}

impl FormField {
    const ORDER: [FormField; 5] =
        [FormField::Name, FormField::Email, FormField::Style, FormField::Cancel, FormField::Create];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Result of feeding a key to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    /// The form stays open
    Pending,
    /// The user backed out
    Cancelled,
    /// The user pressed Create Avatar
    Submitted,
}

/// Single-line text input with a character cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters, not bytes
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value.char_indices().nth(chars).map_or(self.value.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Handle an editing key. Returns whether the key was consumed.
    fn handle_key(&mut self, key: &Key) -> bool {
        match key.code {
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let at = self.byte_offset(self.cursor - 1);
                    self.value.remove(at);
                    self.cursor -= 1;
                }
                true
            },
            KeyCode::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                }
                true
            },
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            },
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                true
            },
            KeyCode::Home => {
                self.cursor = 0;
                true
            },
            KeyCode::End => {
                self.cursor = self.char_len();
                true
            },
            KeyCode::Char(c) if !key.has_ctrl() => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            },
            _ => false,
        }
    }

    fn line(&self, focused: bool) -> Line<'_> {
        if !focused {
            return Line::from(Span::raw(self.value.as_str()));
        }

        let at = self.byte_offset(self.cursor);
        let (before, after) = self.value.split_at(at);
        let cursor_style = Style::default().bg(Color::White).fg(Color::Black);

        let mut chars = after.chars();
        match chars.next() {
            None => Line::from(vec![Span::raw(before), Span::styled(" ", cursor_style)]),
            Some(c) => Line::from(vec![
                Span::raw(before),
                Span::styled(c.to_string(), cursor_style),
                Span::raw(chars.as_str()),
            ]),
        }
    }
}

/// State for the create/edit modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Dialog title
    pub title: String,
    /// Name input
    pub name: TextInput,
    /// Email input
    pub email: TextInput,
    /// Style under the style cursor
    pub highlighted_style: usize,
    /// Style the user picked, if any
    pub selected_style: Option<AvatarStyle>,
    /// Focused field
    pub focus: FormField,
}

impl FormState {
    /// Form for creating a new avatar
    pub fn create() -> Self {
        Self::with_title("Create New Avatar")
    }

    /// Form for editing the avatar with the given id
    pub fn edit(id: u64) -> Self {
        Self::with_title(format!("Edit Avatar #{}", id))
    }

    fn with_title<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            name: TextInput::default(),
            email: TextInput::default(),
            highlighted_style: 0,
            selected_style: None,
            focus: FormField::Name,
        }
    }

    /// Handle a key
    pub fn handle_key(&mut self, key: &Key) -> FormOutcome {
        match key.code {
            KeyCode::Esc => return FormOutcome::Cancelled,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                return FormOutcome::Pending;
            },
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                return FormOutcome::Pending;
            },
            _ => {},
        }

        match self.focus {
            FormField::Name | FormField::Email => {
                if key.code == KeyCode::Enter {
                    self.focus = self.focus.next();
                } else if self.focus == FormField::Name {
                    self.name.handle_key(key);
                } else {
                    self.email.handle_key(key);
                }
                FormOutcome::Pending
            },
            FormField::Style => {
                let count = AvatarStyle::ALL.len();
                match key.code {
                    KeyCode::Left => {
                        self.highlighted_style = (self.highlighted_style + count - 1) % count;
                    },
                    KeyCode::Right => {
                        self.highlighted_style = (self.highlighted_style + 1) % count;
                    },
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        self.selected_style = Some(AvatarStyle::ALL[self.highlighted_style]);
                    },
                    _ => {},
                }
                FormOutcome::Pending
            },
            FormField::Cancel | FormField::Create => match key.code {
                KeyCode::Left | KeyCode::Right => {
                    self.focus = if self.focus == FormField::Cancel {
                        FormField::Create
                    } else {
                        FormField::Cancel
                    };
                    FormOutcome::Pending
                },
                KeyCode::Enter if self.focus == FormField::Cancel => FormOutcome::Cancelled,
                KeyCode::Enter => FormOutcome::Submitted,
                _ => FormOutcome::Pending,
            },
        }
    }
}

/// Modal widget rendering a [`FormState`]
///
/// The modal carries its own styles; nothing outside it is touched when it
/// is drawn or dropped.
pub struct AvatarForm {
    border_style: Style,
    focus_style: Style,
    width: u16,
    height: u16,
}

impl Default for AvatarForm {
    fn default() -> Self {
        Self {
            border_style: Style::default().fg(Color::Magenta),
            focus_style: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            width: 56,
            height: 22,
        }
    }
}

impl AvatarForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn field_block(&self, title: &'static str, focused: bool) -> Block<'static> {
        let style = if focused { self.focus_style } else { Style::default() };
        Block::default().borders(Borders::ALL).title(title).border_style(style)
    }
}

impl StatefulWidget for AvatarForm {
    type State = FormState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let width = self.width.min(area.width);
        let height = self.height.min(area.height);
        let dialog_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(format!(" {} ", state.title))
            .borders(Borders::ALL)
            .border_style(self.border_style);
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Subtitle
                Constraint::Length(3), // Name
                Constraint::Length(3), // Email
                Constraint::Length(6), // Styles
                Constraint::Min(1),    // Terms
                Constraint::Length(1), // Buttons
            ])
            .split(inner);

        Paragraph::new("Create your perfect AI-generated avatar")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[0], buf);

        let name_focused = state.focus == FormField::Name;
        Paragraph::new(state.name.line(name_focused))
            .block(self.field_block(" Name ", name_focused))
            .render(chunks[1], buf);

        let email_focused = state.focus == FormField::Email;
        Paragraph::new(state.email.line(email_focused))
            .block(self.field_block(" Email ", email_focused))
            .render(chunks[2], buf);

        let styles_focused = state.focus == FormField::Style;
        let styles_block = self.field_block(" Avatar Style ", styles_focused);
        let styles_area = styles_block.inner(chunks[3]);
        styles_block.render(chunks[3], buf);

        let lines: Vec<Line> = AvatarStyle::ALL
            .chunks(3)
            .enumerate()
            .map(|(row, styles)| {
                let spans = styles
                    .iter()
                    .enumerate()
                    .map(|(col, style)| {
                        let idx = row * 3 + col;
                        let marker = if state.selected_style == Some(*style) { '*' } else { ' ' };
                        let mut span_style = Style::default().fg(style.color());
                        if styles_focused && idx == state.highlighted_style {
                            span_style = span_style.add_modifier(Modifier::REVERSED);
                        }
                        Span::styled(format!("{}{:<10}", marker, style.label()), span_style)
                    })
                    .collect::<Vec<_>>();
                Line::from(spans)
            })
            .collect();
        Paragraph::new(lines).render(styles_area, buf);

        Paragraph::new(
            "By creating an avatar, you agree to our Terms of Service and Privacy Policy.",
        )
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
        .render(chunks[4], buf);

        let button = |label: &'static str, field: FormField| {
            let style = if state.focus == field {
                Style::default().bg(Color::Magenta).fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Span::styled(format!("[ {} ]", label), style)
        };
        Paragraph::new(Line::from(vec![
            button("Cancel", FormField::Cancel),
            Span::raw("  "),
            button("Create Avatar", FormField::Create),
        ]))
        .alignment(Alignment::Right)
        .render(chunks[5], buf);
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;

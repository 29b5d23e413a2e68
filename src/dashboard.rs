//! # Dashboard view controller
//!
//! Owns the load state of the single record fetch, the create/edit modal, and
//! the card cursor. Deciding what to show is a pure function of that state
//! ([`Dashboard::view`]); drawing happens in [`Dashboard::render`].
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, error, info, warn};

use crate::api::Record;
use crate::error::LoadError;
use crate::input::Key;
use crate::widgets::{
    card::MAX_COLUMNS, AvatarForm, CardGrid, EmptyPanel, ErrorPanel, FormOutcome, FormState, Spinner,
};

/// Message shown when the load path itself fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load avatars. Please try again later.";

/// Status of the dashboard's single fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// The fetch has not resolved yet
    Loading,
    /// The load path failed; carries the user-visible message
    Failed(String),
    /// Records in fetcher order
    Loaded(Vec<Record>),
}

/// The create/edit modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open {
        /// Record being edited, `None` when creating
        editing: Option<u64>,
        form: FormState,
    },
}

/// What the main area shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Cards(&'a [Record]),
}

/// What the application loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
    /// Tear the whole view down and mount a fresh one
    Reload,
}

/// Part of the day used in the greeting.
pub fn time_of_day(hour: u32) -> &'static str {
    if hour < 12 {
        "morning"
    } else if hour < 18 {
        "afternoon"
    } else {
        "evening"
    }
}

/// Greeting line shown under the title.
pub fn greeting(user_name: &str, hour: u32) -> String {
    format!("Good {}, {}!", time_of_day(hour), user_name)
}

/// The dashboard view controller
#[derive(Debug, Clone)]
pub struct Dashboard {
    load_state: LoadState,
    modal: ModalState,
    cursor: usize,
    columns: usize,
    greeting: String,
}

impl Dashboard {
    /// Create a dashboard in the `Loading` state
    pub fn new<S: Into<String>>(greeting: S) -> Self {
        Self {
            load_state: LoadState::Loading,
            modal: ModalState::Closed,
            cursor: 0,
            columns: MAX_COLUMNS,
            greeting: greeting.into(),
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn is_modal_open(&self) -> bool {
        matches!(self.modal, ModalState::Open { .. })
    }

    /// Record currently being edited, if any
    pub fn selection(&self) -> Option<u64> {
        match &self.modal {
            ModalState::Open { editing, .. } => *editing,
            ModalState::Closed => None,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Settle the load state with the outcome of the fetch.
    ///
    /// Only the first call has any effect; returns whether the state changed.
    pub fn resolve(&mut self, outcome: Result<Vec<Record>, LoadError>) -> bool {
        if self.load_state != LoadState::Loading {
            warn!("Ignoring load outcome for a dashboard that already settled");
            return false;
        }

        self.load_state = match outcome {
            Ok(records) => {
                info!(count = records.len(), "Avatars loaded");
                LoadState::Loaded(records)
            },
            Err(err) => {
                error!(error = %err, "Error loading avatars");
                LoadState::Failed(LOAD_FAILED_MESSAGE.to_string())
            },
        };
        self.cursor = 0;
        true
    }

    /// Decide what the main area shows
    pub fn view(&self) -> View<'_> {
        match &self.load_state {
            LoadState::Loading => View::Loading,
            LoadState::Failed(message) => View::Failed(message),
            LoadState::Loaded(records) if records.is_empty() => View::Empty,
            LoadState::Loaded(records) => View::Cards(records),
        }
    }

    fn records(&self) -> &[Record] {
        match &self.load_state {
            LoadState::Loaded(records) => records.as_slice(),
            _ => &[],
        }
    }

    /// Open the modal to create a new avatar
    pub fn open_create(&mut self) {
        debug!("Opening create modal");
        self.modal = ModalState::Open { editing: None, form: FormState::create() };
    }

    /// Open the modal to edit a loaded record. Unknown ids are ignored.
    pub fn open_edit(&mut self, id: u64) {
        if !self.records().iter().any(|r| r.id == id) {
            warn!(id, "Ignoring edit request for unknown avatar");
            return;
        }

        debug!(id, "Opening edit modal");
        self.modal = ModalState::Open { editing: Some(id), form: FormState::edit(id) };
    }

    /// Close the modal and drop its state
    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
    }

    /// Submit the form. Nothing is persisted; the modal just closes.
    pub fn submit_form(&mut self) {
        debug!(editing = ?self.selection(), "Avatar form submitted");
        self.close_modal();
    }

    fn move_cursor(&mut self, delta: isize) {
        let count = self.records().len();
        if count == 0 {
            return;
        }

        let target = self.cursor as isize + delta;
        if (0..count as isize).contains(&target) {
            self.cursor = target as usize;
        }
    }

    /// Handle a key
    pub fn handle_key(&mut self, key: &Key) -> Command {
        if key.has_ctrl() && key.code == KeyCode::Char('c') {
            return Command::Quit;
        }

        if let ModalState::Open { form, .. } = &mut self.modal {
            match form.handle_key(key) {
                FormOutcome::Pending => {},
                FormOutcome::Cancelled => self.close_modal(),
                FormOutcome::Submitted => self.submit_form(),
            }
            return Command::None;
        }

        let columns = self.columns as isize;
        match key.code {
            KeyCode::Char('q') => return Command::Quit,
            KeyCode::Char('n') | KeyCode::Char('c') => self.open_create(),
            KeyCode::Char('r') if matches!(self.load_state, LoadState::Failed(_)) => {
                return Command::Reload;
            },
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-columns),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(columns),
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(id) = self.records().get(self.cursor).map(|r| r.id) {
                    self.open_edit(id);
                }
            },
            _ => {},
        }

        Command::None
    }

    fn hints(&self) -> &'static str {
        if self.is_modal_open() {
            return "Tab next field · Enter confirm · Esc close";
        }

        match self.view() {
            View::Loading => "n new avatar · q quit",
            View::Failed(_) => "r try again · n new avatar · q quit",
            View::Empty => "n new avatar · q quit",
            View::Cards(_) => "←↑↓→ move · e edit · n new avatar · q quit",
        }
    }

    /// Draw the dashboard
    pub fn render(&mut self, frame: &mut Frame<'_>, tick: u64) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title and greeting
                Constraint::Length(2), // Section heading
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        let accent = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled("AI Avatar Dashboard", accent)),
                Line::from(Span::styled(
                    self.greeting.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
            ]),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Your Avatars", accent),
                Span::styled("  AI-powered ●", Style::default().fg(Color::Green)),
            ])),
            chunks[1],
        );

        let main = chunks[2];
        self.columns = CardGrid::columns_for(main.width);
        match self.view() {
            View::Loading => frame.render_widget(Spinner::new(tick), main),
            View::Failed(message) => frame.render_widget(ErrorPanel::new(message), main),
            View::Empty => frame.render_widget(EmptyPanel, main),
            View::Cards(records) => frame.render_widget(CardGrid::new(records, self.cursor), main),
        }

        frame.render_widget(
            Paragraph::new(self.hints()).style(Style::default().fg(Color::DarkGray)),
            chunks[3],
        );

        if let ModalState::Open { form, .. } = &mut self.modal {
            frame.render_stateful_widget(AvatarForm::new(), area, form);
        }
    }
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;

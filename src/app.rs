//! Terminal application loop
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Timelike;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use tracing::{info, trace};

use crate::api::RecordSource;
use crate::dashboard::{greeting, Command, Dashboard};
use crate::input::Key;
use crate::worker::LoadWorker;

/// Puts the terminal into raw mode on the alternate screen and restores it
/// when dropped, however the program exits.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// The running dashboard and its in-flight load
pub struct App {
    source: Arc<dyn RecordSource>,
    user_name: String,
    tick_rate: Duration,
    dashboard: Dashboard,
    worker: LoadWorker,
    tick: u64,
    mounts: u64,
}

impl App {
    /// Mount the dashboard and start its load. Must be called from within a
    /// tokio runtime.
    pub fn new(source: Arc<dyn RecordSource>, user_name: String, tick_rate: Duration) -> Self {
        let dashboard = Dashboard::new(greeting(&user_name, chrono::Local::now().hour()));
        let worker = LoadWorker::spawn(source.clone());

        Self { source, user_name, tick_rate, dashboard, worker, tick: 0, mounts: 1 }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Number of times the view has been mounted
    pub fn mounts(&self) -> u64 {
        self.mounts
    }

    /// Drop the current view and mount a fresh one with a new load
    fn remount(&mut self) {
        info!("Reloading dashboard");
        self.dashboard = Dashboard::new(greeting(&self.user_name, chrono::Local::now().hour()));
        self.worker = LoadWorker::spawn(self.source.clone());
        self.mounts += 1;
    }

    /// Advance animations and pick up a finished load
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if let Some(outcome) = self.worker.poll() {
            self.dashboard.resolve(outcome);
        }
    }

    /// Wait for the current load and apply it
    pub async fn settle(&mut self) {
        if let Some(outcome) = self.worker.wait().await {
            self.dashboard.resolve(outcome);
        }
    }

    /// Handle a key. Returns `false` when the application should exit.
    pub fn on_key(&mut self, key: Key) -> bool {
        trace!(key = %key, "Key pressed");
        match self.dashboard.handle_key(&key) {
            Command::None => true,
            Command::Quit => false,
            Command::Reload => {
                self.remount();
                true
            },
        }
    }

    /// Draw one frame
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let tick = self.tick;
        terminal.draw(|frame| self.dashboard.render(frame, tick))?;
        Ok(())
    }

    /// Run until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut last_tick = Instant::now();

        loop {
            self.draw(terminal)?;

            let timeout = self.tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(event) = event::read()? {
                    if let Some(key) = Key::from_key_event(event) {
                        if !self.on_key(key) {
                            info!("Exiting");
                            return Ok(());
                        }
                    }
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                self.on_tick();
                last_tick = Instant::now();
            }
        }
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

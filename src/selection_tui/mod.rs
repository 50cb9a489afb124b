pub mod app;
pub mod event;
pub mod input;
pub mod ui;
pub mod widgets;

use std::io::{self, Stdout};

use color_eyre::Result;
use ratatui::crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::matcher::ScoredCandidate;
use crate::ports::presenter::{NavigationDecision, Presenter};
use crate::selection_tui::app::Menu;
use crate::selection_tui::event::{Event, EventReader};
use crate::selection_tui::input::handle_key_event;

/// Raw mode for the duration of one prompt.
///
/// Outside of prompts Ctrl-C reaches the process as an interrupt signal.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Presents menus on the terminal's alternate screen
pub struct TerminalPresenter {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventReader,
}

impl TerminalPresenter {
    /// Switch to the alternate screen. Call [`TerminalPresenter::restore`] when done.
    pub fn start() -> Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        Ok(Self {
            terminal,
            events: EventReader,
        })
    }

    /// Leave the alternate screen and show the cursor again
    pub fn restore(mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn run_menu(&mut self, mut menu: Menu) -> Result<NavigationDecision> {
        let _raw_mode = RawMode::enable()?;

        loop {
            self.terminal.draw(|frame| ui::render(frame, &menu))?;

            match self.events.next()? {
                Event::Key(key) => {
                    if let Some(decision) = handle_key_event(&mut menu, key) {
                        log::debug!("Operator decided {:?}", decision);
                        return Ok(decision);
                    }
                }
                Event::Resize | Event::Tick => {}
            }
        }
    }
}

impl Presenter for TerminalPresenter {
    fn present_choices(
        &mut self,
        prompt: &str,
        choices: &[ScoredCandidate],
    ) -> Result<NavigationDecision> {
        self.run_menu(Menu::choices(prompt, choices))
    }

    fn present_confirm(&mut self, prompt: &str) -> Result<NavigationDecision> {
        self.run_menu(Menu::confirm(prompt))
    }

    fn present_error(&mut self, message: &str) -> Result<NavigationDecision> {
        self.run_menu(Menu::error(message))
    }
}

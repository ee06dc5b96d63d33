//! Application state management for newsdesk
//!
//! Holds the resolved news, the headline selection and the overlay/quit
//! flags, and maps key presses onto them. Side effects (opening links) are
//! returned as `AppAction`s for the caller to perform.

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};

use crate::data::{NewsLink, NewsSnapshot};
use crate::loader::LoadState;

/// Number of columns in the headline grid
pub const GRID_COLUMNS: usize = 2;

/// Side effects requested by a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Open a URL with the platform's default handler
    Open(String),
}

/// Main application struct managing state and data
pub struct App {
    /// Resolved news, or the loading/failed marker
    pub news: LoadState,
    /// Index of the selected headline
    pub selected_index: usize,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Date shown in the page header
    pub today: NaiveDate,
}

impl App {
    /// Creates a new App in the loading state
    pub fn new() -> Self {
        Self::with_date(Local::now().date_naive())
    }

    /// Creates a new App with a fixed header date
    pub fn with_date(today: NaiveDate) -> Self {
        Self {
            news: LoadState::Loading,
            selected_index: 0,
            should_quit: false,
            show_help: false,
            today,
        }
    }

    /// Applies the loader's result
    pub fn apply_load(&mut self, state: LoadState) {
        self.news = state;
        self.selected_index = 0;
    }

    pub fn snapshot(&self) -> Option<&NewsSnapshot> {
        self.news.snapshot()
    }

    /// Number of headlines currently shown
    pub fn headline_count(&self) -> usize {
        self.snapshot().map_or(0, |s| s.news_links.len())
    }

    /// Returns the selected headline, if any
    pub fn selected_headline(&self) -> Option<&NewsLink> {
        self.snapshot()?.headline(self.selected_index)
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q` or `Esc`: Quit the application
    /// - Arrows or `h`/`j`/`k`/`l`: Move through the headline grid
    /// - `Enter`/`o`: Open the selected headline
    /// - `a`: Open the audio summary
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Option<AppAction> {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return None;
        }

        if self.news.is_loading() {
            // Only quit is allowed during loading
            if key_event.code == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return None;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Left | KeyCode::Char('h') => self.move_left(),
            KeyCode::Right | KeyCode::Char('l') => self.move_right(),
            KeyCode::Enter | KeyCode::Char('o') => {
                return self
                    .selected_headline()
                    .map(|headline| AppAction::Open(headline.link.clone()));
            }
            KeyCode::Char('a') => {
                return self
                    .snapshot()
                    .filter(|s| !s.audio_url.is_empty())
                    .map(|s| AppAction::Open(s.audio_url.clone()));
            }
            _ => {}
        }
        None
    }

    fn move_up(&mut self) {
        if self.selected_index >= GRID_COLUMNS {
            self.selected_index -= GRID_COLUMNS;
        }
    }

    fn move_down(&mut self) {
        if self.selected_index + GRID_COLUMNS < self.headline_count() {
            self.selected_index += GRID_COLUMNS;
        }
    }

    fn move_left(&mut self) {
        if self.selected_index % GRID_COLUMNS > 0 {
            self.selected_index -= 1;
        }
    }

    fn move_right(&mut self) {
        let at_row_end = self.selected_index % GRID_COLUMNS == GRID_COLUMNS - 1;
        if !at_row_end && self.selected_index + 1 < self.headline_count() {
            self.selected_index += 1;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

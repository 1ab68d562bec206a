//! Keyboard driven command palette over the page catalog.
//!
//! The palette is a plain value. Every input is fed through
//! [`Palette::update`], which returns the next snapshot together with the
//! effects the host (a UI, a terminal, a test) has to carry out. The palette
//! itself never touches the outside world.

use std::time::Duration;

use clampsite_core_search_contracts::SearchService;
use clampsite_models::search::CatalogEntry;

/// Delay before focusing the query input after opening, so the input is
/// part of the visible layout when it receives focus.
pub const FOCUS_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    open: bool,
    scroll_locked: bool,
    query: String,
    results: Vec<CatalogEntry>,
    active: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteEvent {
    Open,
    Close,
    QueryChanged(String),
    MoveDown,
    MoveUp,
    /// The pointer is over the result at this index.
    Hover(usize),
    /// Navigate to the highlighted result.
    Confirm,
    /// Navigate to the result at this index, e.g. after a click.
    Activate(usize),
    /// A raw key press, anywhere in the application.
    Key(KeyPress),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteEffect {
    /// Suppress scrolling of the page behind the palette.
    LockScroll,
    UnlockScroll,
    FocusInput { delay: Duration },
    Navigate(String),
    ScrollToTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    ArrowUp,
    ArrowDown,
    Other,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    pub fn ctrl(self) -> Self {
        Self { ctrl: true, ..self }
    }

    pub fn meta(self) -> Self {
        Self { meta: true, ..self }
    }

    /// `Ctrl+K` / `Meta+K`, or a bare `/`.
    pub fn is_open_shortcut(&self) -> bool {
        match self.key {
            Key::Char(c) if self.ctrl || self.meta => c.eq_ignore_ascii_case(&'k'),
            Key::Char(c) => c == '/',
            _ => false,
        }
    }
}

impl Palette {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[CatalogEntry] {
        &self.results
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_entry(&self) -> Option<&CatalogEntry> {
        self.results.get(self.active)
    }

    /// Whether the open palette should show its "No matches" placeholder.
    pub fn is_empty_state(&self) -> bool {
        self.open && self.results.is_empty()
    }

    pub fn update(
        self,
        search: &impl SearchService,
        event: PaletteEvent,
    ) -> (Self, Vec<PaletteEffect>) {
        match event {
            PaletteEvent::Open if !self.open => (
                Self {
                    open: true,
                    scroll_locked: true,
                    query: String::new(),
                    results: search.search(""),
                    active: 0,
                },
                vec![
                    PaletteEffect::LockScroll,
                    PaletteEffect::FocusInput { delay: FOCUS_DELAY },
                ],
            ),
            PaletteEvent::Close if self.open => (Self::default(), vec![PaletteEffect::UnlockScroll]),
            PaletteEvent::QueryChanged(query) if self.open => {
                let results = search.search(&query);
                (
                    Self {
                        query,
                        results,
                        active: 0,
                        ..self
                    },
                    Vec::new(),
                )
            }
            PaletteEvent::MoveDown if self.open => {
                let last = self.results.len().saturating_sub(1);
                let active = (self.active + 1).min(last);
                (Self { active, ..self }, Vec::new())
            }
            PaletteEvent::MoveUp if self.open => {
                let active = self.active.saturating_sub(1);
                (Self { active, ..self }, Vec::new())
            }
            PaletteEvent::Hover(index) if self.open && index < self.results.len() => {
                (Self { active: index, ..self }, Vec::new())
            }
            PaletteEvent::Confirm if self.open => {
                let index = self.active;
                self.navigate(index)
            }
            PaletteEvent::Activate(index) if self.open => self.navigate(index),
            PaletteEvent::Key(key) => self.on_key(search, key),
            _ => (self, Vec::new()),
        }
    }

    fn on_key(self, search: &impl SearchService, key: KeyPress) -> (Self, Vec<PaletteEffect>) {
        if !self.open {
            return if key.is_open_shortcut() {
                self.update(search, PaletteEvent::Open)
            } else {
                (self, Vec::new())
            };
        }

        let event = match key.key {
            Key::Escape => PaletteEvent::Close,
            Key::ArrowDown => PaletteEvent::MoveDown,
            Key::ArrowUp => PaletteEvent::MoveUp,
            Key::Enter => PaletteEvent::Confirm,
            // typed characters reach the palette as `QueryChanged`
            Key::Char(_) | Key::Other => return (self, Vec::new()),
        };
        self.update(search, event)
    }

    fn navigate(self, index: usize) -> (Self, Vec<PaletteEffect>) {
        let Some(entry) = self.results.get(index) else {
            return (self, Vec::new());
        };

        let path = entry.path.clone();
        (
            Self::default(),
            vec![
                PaletteEffect::UnlockScroll,
                PaletteEffect::Navigate(path),
                PaletteEffect::ScrollToTop,
            ],
        )
    }
}

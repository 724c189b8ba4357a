use std::path::{Path, PathBuf};

use romshelf_core::GameMetadata;
use romshelf_lib::{Launcher, Spawner, open_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Listing,
    /// The user confirmed the entry at this index.
    Selected(usize),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListInput {
    Up,
    Down,
    Confirm,
    Cancel,
    /// Pointer press on a row.
    Click(usize),
    /// "Read More" on a row.
    OpenLink(usize),
}

/// Side effects requested by the list, carried out by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEffect {
    OpenUrl(String),
}

/// Cursor and selection over the resolved game list.
#[derive(Debug)]
pub struct GameList {
    entries: Vec<GameMetadata>,
    cursor: usize,
    state: ListState,
}

impl GameList {
    pub fn new(entries: Vec<GameMetadata>) -> Self {
        Self {
            entries,
            cursor: 0,
            state: ListState::Listing,
        }
    }

    pub fn entries(&self) -> &[GameMetadata] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    /// Apply one input. Inputs are ignored unless the list is `Listing`.
    pub fn handle(&mut self, input: ListInput) -> Option<ListEffect> {
        if self.state != ListState::Listing {
            return None;
        }

        match input {
            ListInput::Up => self.cursor = self.cursor.saturating_sub(1),
            ListInput::Down => {
                if self.cursor + 1 < self.entries.len() {
                    self.cursor += 1;
                }
            }
            ListInput::Click(index) => {
                if index < self.entries.len() {
                    self.cursor = index;
                }
            }
            ListInput::Confirm => {
                if !self.entries.is_empty() {
                    self.state = ListState::Selected(self.cursor);
                }
            }
            ListInput::Cancel => self.state = ListState::Cancelled,
            ListInput::OpenLink(index) => {
                let url = self.entries.get(index)?.catalog_url.clone()?;
                return Some(ListEffect::OpenUrl(url));
            }
        }
        None
    }

    /// Back to `Listing` after a selection was handled. The cursor stays put.
    pub fn resume(&mut self) {
        if matches!(self.state, ListState::Selected(_)) {
            self.state = ListState::Listing;
        }
    }

    /// Swap in a freshly resolved list, keeping the cursor in range.
    pub fn replace_entries(&mut self, entries: Vec<GameMetadata>) {
        self.entries = entries;
        self.cursor = self.cursor.min(self.entries.len().saturating_sub(1));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The list plus what happens when an entry is picked.
pub struct Shelf<S: Spawner> {
    list: GameList,
    games_dir: PathBuf,
    launcher: Launcher<S>,
    error: Option<String>,
}

impl<S: Spawner> Shelf<S> {
    pub fn new(list: GameList, games_dir: impl Into<PathBuf>, launcher: Launcher<S>) -> Self {
        Self {
            list,
            games_dir: games_dir.into(),
            launcher,
            error: None,
        }
    }

    pub fn list(&self) -> &GameList {
        &self.list
    }

    pub fn games_dir(&self) -> &Path {
        &self.games_dir
    }

    pub fn launcher(&self) -> &Launcher<S> {
        &self.launcher
    }

    /// Message waiting to be acknowledged, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{}", message);
        self.error = Some(message);
    }

    pub fn acknowledge_error(&mut self) {
        self.error = None;
    }

    /// Route input to the error prompt while one is showing, otherwise to
    /// the list.
    pub fn handle(&mut self, input: ListInput) -> Option<ListEffect> {
        if self.error.is_some() {
            if matches!(input, ListInput::Confirm | ListInput::Cancel) {
                self.acknowledge_error();
            }
            return None;
        }
        self.list.handle(input)
    }

    /// Carry out a list effect. Failures are logged, never shown.
    pub fn apply(&self, effect: ListEffect) {
        match effect {
            ListEffect::OpenUrl(url) => {
                if let Err(e) = open_url(self.launcher.spawner(), &url) {
                    log::warn!("Could not open {}: {}", url, e);
                }
            }
        }
    }

    /// Act on the list state reached this frame.
    pub fn settle(&mut self) -> Flow {
        match self.list.state() {
            ListState::Listing => Flow::Continue,
            ListState::Cancelled => Flow::Exit,
            ListState::Selected(index) => {
                if let Some(game) = self.list.entries().get(index) {
                    let rom = self.games_dir.join(&game.filename);
                    if let Err(e) = self.launcher.launch(&rom) {
                        self.show_error(format!("Failed to launch game: {e}"));
                    }
                }
                self.list.resume();
                Flow::Continue
            }
        }
    }

    /// Window close: drop any pending error or selection and cancel.
    pub fn close(&mut self) {
        self.error = None;
        self.list.resume();
        self.list.handle(ListInput::Cancel);
    }

    /// Poll launched processes so exited ones are collected.
    pub fn reap_children(&self) -> usize {
        self.launcher.spawner().reap()
    }

    /// Replace the list after a rescan.
    pub fn replace_games(&mut self, entries: Vec<GameMetadata>) {
        self.list.replace_entries(entries);
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;

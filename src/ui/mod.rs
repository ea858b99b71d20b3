//! UI building blocks for the TUI.
//!
//! This module defines the core UI abstractions:
//! - [`Component`] - Reusable, interactive UI building blocks
//! - [`EventResult`] - Result of handling an input event
//! - [`Keybinding`] - A key hint displayed in the status bar and help overlay

mod components;
mod help;
mod spinner;
mod status_bar;
mod toast;

pub use components::{
    ColumnDef, List, ListEvent, ListRow, Table, TableEvent, TableRow, TextInput,
};
pub use help::HelpOverlay;
pub use spinner::Spinner;
pub use status_bar::StatusBar;
pub use toast::{Toast, ToastManager, ToastType};

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;

/// Result of handling an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<T> {
    /// Input was not handled, parent should process it.
    Ignored,
    /// Input was consumed but produced no event.
    Consumed,
    /// Input was consumed and produced an event.
    Event(T),
}

impl<T> EventResult<T> {
    /// Returns true if the input was consumed (not ignored).
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Returns the event if present.
    pub fn event(self) -> Option<T> {
        match self {
            Self::Event(event) => Some(event),
            _ => None,
        }
    }

    /// Maps the event type using the provided function.
    pub fn map<F, U>(self, f: F) -> EventResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ignored => EventResult::Ignored,
            Self::Consumed => EventResult::Consumed,
            Self::Event(event) => EventResult::Event(f(event)),
        }
    }
}

impl<T> From<T> for EventResult<T> {
    fn from(event: T) -> Self {
        Self::Event(event)
    }
}

/// Interactive UI building block.
///
/// Components are reusable widgets that handle key events and emit generic
/// outputs. They know nothing about business logic.
pub trait Component {
    /// The output type this component produces (e.g., `TableEvent<T>`)
    type Output;

    /// Handle a key event.
    fn handle_key(&mut self, key: KeyEvent) -> EventResult<Self::Output> {
        _ = key;
        EventResult::Ignored
    }

    /// Called on each tick for animations and time-based updates.
    fn handle_tick(&mut self) {}

    /// Render the component to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}

/// A keybinding entry for the status bar and help overlay.
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: String,
    pub description: &'static str,
    /// Whether to surface this binding as a hint in the status bar.
    pub hint: bool,
}

impl Keybinding {
    pub fn new(key: impl Into<String>, description: &'static str) -> Self {
        Self {
            key: key.into(),
            description,
            hint: false,
        }
    }

    pub fn hint(key: impl Into<String>, description: &'static str) -> Self {
        Self {
            key: key.into(),
            description,
            hint: true,
        }
    }
}

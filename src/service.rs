//! Service trait for full-screen application services.
//!
//! Services follow a single-funnel update pattern:
//! - `init()` queues initial message(s)
//! - `handle_input()` queues messages from user input
//! - `handle_tick()` handles animation ticks
//! - `update()` processes all queued messages - THE SINGLE FUNNEL
//!
//! Only `update()` can return commands, close the service, or report errors.
//! This ensures all side effects flow through one place.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::commands::Command;
use crate::tui::Event;
use crate::ui::Keybinding;

/// Result from `update()`
pub enum UpdateResult {
    /// No action needed
    Idle,
    /// Spawn these commands
    Commands(Vec<Box<dyn Command>>),
    /// Close this service (quit the application)
    Close,
    /// Report an error
    Error(String),
}

impl<T: Command> From<T> for UpdateResult {
    fn from(value: T) -> Self {
        Self::Commands(vec![Box::new(value)])
    }
}

/// A full-screen application service.
///
/// Services manage their own internal state and message queue. The App calls
/// methods in this order:
///
/// 1. `init()` - once when the service becomes active
/// 2. `update()` - immediately after init to process startup messages
/// 3. For each event:
///    - `handle_tick()` if tick event
///    - `handle_input()` if input event, then `update()` if consumed
/// 4. When a command completes: `update()`
pub trait Service {
    /// Initialize the service by queuing startup message(s).
    fn init(&mut self) {}

    /// Handle a tick event for animations (spinners, etc.).
    ///
    /// Do NOT queue messages here - just update animation state.
    fn handle_tick(&mut self) {}

    /// Handle an input event.
    ///
    /// Queue internal messages based on user input. Return `true` if the
    /// event was consumed (the App will then call `update()`).
    fn handle_input(&mut self, event: &Event) -> bool;

    /// Process all queued messages and return the result.
    ///
    /// This is the only method that can return commands to spawn, request
    /// to close the service, or report errors.
    fn update(&mut self) -> UpdateResult;

    /// Render the current state to the terminal.
    fn view(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Breadcrumb segments for the navigation bar.
    fn breadcrumbs(&self) -> Vec<String>;

    /// Returns the keybindings for the current view in this service.
    fn keybindings(&self) -> Vec<Keybinding> {
        vec![]
    }
}

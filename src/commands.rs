//! Async command pattern for side effects.
//!
//! Commands represent async operations that run outside the main event loop.
//! Services return commands, and the App spawns them with automatic
//! completion detection.

mod clipboard;

use async_trait::async_trait;
pub use clipboard::CopyToClipboardCmd;
use color_eyre::Result;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::AppMessage;

/// Async command that performs side effects.
///
/// Commands are spawned by the App and typically send results back to the
/// service that issued them via a channel. The `app_tx` sender lets a
/// command talk to the App directly (e.g., to show a toast).
#[async_trait]
pub trait Command: Send + 'static {
    /// Human-readable name for logging and status display.
    fn name(&self) -> String;

    /// Execute the command.
    async fn execute(self: Box<Self>, app_tx: UnboundedSender<AppMessage>) -> Result<()>;
}

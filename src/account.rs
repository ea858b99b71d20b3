//! Login/register overlay and its auth commands.

mod command;
mod message;
mod view;

pub use command::{LoginCmd, RegisterCmd};
pub use message::AuthMsg;
pub use view::{AccountEvent, AccountView};

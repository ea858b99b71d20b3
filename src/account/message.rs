use crate::api::User;

/// Messages for the account overlay.
///
/// Only successful authentication produces a message; a rejected attempt is
/// swallowed and the form stays as it was.
#[derive(Debug, Clone)]
pub enum AuthMsg {
    SignedIn(User),
}

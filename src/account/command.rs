//! Auth commands for the account overlay.
//!
//! Each command is a single fire-and-forget POST. A server rejection sends
//! nothing back; the overlay simply stays where it is.

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

use crate::account::message::AuthMsg;
use crate::api::{ApiClient, Credentials, Registration};
use crate::app::AppMessage;
use crate::commands::Command;

pub struct LoginCmd {
    api: ApiClient,
    credentials: Credentials,
    tx: UnboundedSender<AuthMsg>,
}

impl LoginCmd {
    pub const fn new(api: ApiClient, credentials: Credentials, tx: UnboundedSender<AuthMsg>) -> Self {
        Self {
            api,
            credentials,
            tx,
        }
    }
}

#[async_trait]
impl Command for LoginCmd {
    fn name(&self) -> String {
        format!("Logging in as '{}'", self.credentials.username)
    }

    async fn execute(self: Box<Self>, _app_tx: UnboundedSender<AppMessage>) -> color_eyre::Result<()> {
        match self.api.login(&self.credentials).await {
            Ok(Some(user)) => {
                let _ = self.tx.send(AuthMsg::SignedIn(user));
            }
            Ok(None) => {}
            Err(e) => error!("Error submitting login: {e:#}"),
        }
        Ok(())
    }
}

pub struct RegisterCmd {
    api: ApiClient,
    details: Registration,
    tx: UnboundedSender<AuthMsg>,
}

impl RegisterCmd {
    pub const fn new(api: ApiClient, details: Registration, tx: UnboundedSender<AuthMsg>) -> Self {
        Self { api, details, tx }
    }
}

#[async_trait]
impl Command for RegisterCmd {
    fn name(&self) -> String {
        format!("Registering '{}'", self.details.username)
    }

    async fn execute(self: Box<Self>, _app_tx: UnboundedSender<AppMessage>) -> color_eyre::Result<()> {
        match self.api.register(&self.details).await {
            Ok(Some(user)) => {
                let _ = self.tx.send(AuthMsg::SignedIn(user));
            }
            Ok(None) => {}
            Err(e) => error!("Error submitting registration: {e:#}"),
        }
        Ok(())
    }
}

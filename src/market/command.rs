//! Fetch commands for the marketplace service.
//!
//! These commands perform the REST calls off the event loop and send their
//! results back through the service's message channel. Failures are written
//! to the log only; stale or empty data stays on screen.

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

use crate::api::ApiClient;
use crate::app::AppMessage;
use crate::commands::Command;
use crate::market::message::MarketMsg;

/// Fetch the category list.
pub struct FetchCategoriesCmd {
    api: ApiClient,
    tx: UnboundedSender<MarketMsg>,
}

impl FetchCategoriesCmd {
    pub const fn new(api: ApiClient, tx: UnboundedSender<MarketMsg>) -> Self {
        Self { api, tx }
    }
}

#[async_trait]
impl Command for FetchCategoriesCmd {
    fn name(&self) -> String {
        "Fetching categories".to_string()
    }

    async fn execute(self: Box<Self>, _app_tx: UnboundedSender<AppMessage>) -> color_eyre::Result<()> {
        match self.api.categories().await {
            Ok(categories) => {
                let _ = self.tx.send(MarketMsg::CategoriesLoaded(categories));
            }
            Err(e) => error!("Error fetching categories: {e:#}"),
        }
        Ok(())
    }
}

/// Fetch the featured professionals subset for the home screen.
pub struct FetchFeaturedCmd {
    api: ApiClient,
    tx: UnboundedSender<MarketMsg>,
}

impl FetchFeaturedCmd {
    pub const fn new(api: ApiClient, tx: UnboundedSender<MarketMsg>) -> Self {
        Self { api, tx }
    }
}

#[async_trait]
impl Command for FetchFeaturedCmd {
    fn name(&self) -> String {
        "Fetching featured professionals".to_string()
    }

    async fn execute(self: Box<Self>, _app_tx: UnboundedSender<AppMessage>) -> color_eyre::Result<()> {
        match self.api.featured_professionals().await {
            Ok(professionals) => {
                let _ = self.tx.send(MarketMsg::FeaturedLoaded(professionals));
            }
            Err(e) => error!("Error fetching featured professionals: {e:#}"),
        }
        Ok(())
    }
}

/// Fetch the professionals for a category.
pub struct FetchProfessionalsCmd {
    api: ApiClient,
    category: String,
    tx: UnboundedSender<MarketMsg>,
}

impl FetchProfessionalsCmd {
    pub const fn new(api: ApiClient, category: String, tx: UnboundedSender<MarketMsg>) -> Self {
        Self { api, category, tx }
    }
}

#[async_trait]
impl Command for FetchProfessionalsCmd {
    fn name(&self) -> String {
        format!("Fetching professionals for '{}'", self.category)
    }

    async fn execute(self: Box<Self>, _app_tx: UnboundedSender<AppMessage>) -> color_eyre::Result<()> {
        match self.api.professionals(Some(&self.category)).await {
            Ok(professionals) => {
                let _ = self.tx.send(MarketMsg::ProfessionalsLoaded(professionals));
            }
            Err(e) => {
                error!("Error fetching professionals: {e:#}");
                let _ = self.tx.send(MarketMsg::ProfessionalsFailed);
            }
        }
        Ok(())
    }
}

/// Fetch the reviews for a professional.
pub struct FetchReviewsCmd {
    api: ApiClient,
    professional_id: i64,
    tx: UnboundedSender<MarketMsg>,
}

impl FetchReviewsCmd {
    pub const fn new(api: ApiClient, professional_id: i64, tx: UnboundedSender<MarketMsg>) -> Self {
        Self {
            api,
            professional_id,
            tx,
        }
    }
}

#[async_trait]
impl Command for FetchReviewsCmd {
    fn name(&self) -> String {
        format!("Fetching reviews for professional {}", self.professional_id)
    }

    async fn execute(self: Box<Self>, _app_tx: UnboundedSender<AppMessage>) -> color_eyre::Result<()> {
        match self.api.reviews(self.professional_id).await {
            Ok(reviews) => {
                let _ = self.tx.send(MarketMsg::ReviewsLoaded(reviews));
            }
            Err(e) => error!("Error fetching reviews: {e:#}"),
        }
        Ok(())
    }
}

//! Messages for the marketplace service.
//!
//! All internal communication for the marketplace flows through this single
//! message type, including lifecycle, user actions, and async results.

use crate::api::{Category, Professional, Review};

/// Messages for the marketplace service.
#[derive(Debug, Clone)]
pub enum MarketMsg {
    // === Lifecycle ===
    /// Fetch the initial home screen data
    Initialize,

    // === Navigation ===
    /// User picked a category; switch to the professionals listing
    SelectCategory(String),
    /// User picked a professional; switch to their profile
    SelectProfessional(Professional),
    /// Navigate back to the previous view
    NavigateBack,
    /// Reload data for the current view
    Reload,
    /// Copy the displayed professional's phone number
    CopyPhone,

    // === Async Results ===
    /// Category list loaded from the API
    CategoriesLoaded(Vec<Category>),
    /// Featured subset loaded (first two of the unfiltered list)
    FeaturedLoaded(Vec<Professional>),
    /// Category-filtered professional list loaded
    ProfessionalsLoaded(Vec<Professional>),
    /// The category-filtered fetch failed; resolve the loading state
    ProfessionalsFailed,
    /// Reviews loaded for the open profile
    ReviewsLoaded(Vec<Review>),
}

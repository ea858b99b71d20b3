//! REST client for the marketplace API.

mod client;
mod model;

pub use client::{ApiClient, FEATURED_COUNT, format_review_date};
pub use model::{AuthResponse, Category, Credentials, Professional, Registration, Review, User};

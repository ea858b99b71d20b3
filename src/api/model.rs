//! Payload types for the marketplace API.

use serde::{Deserialize, Serialize};

/// A service category (e.g., "electricista").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
}

/// A professional offering services in some category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: u32,
    pub distance: String,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub price: String,
    pub avatar: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

const fn default_available() -> bool {
    true
}

/// A client review for a professional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    #[serde(default)]
    pub professional_id: i64,
    pub client_name: String,
    pub client_avatar: String,
    pub rating: f64,
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The signed-in user. Held in memory only; lost on exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
}

/// Login form payload.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration form payload.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of a successful login/register response. The server also returns a
/// token; nothing is persisted, so it is not modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
}

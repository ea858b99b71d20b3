use color_eyre::Result;
use serde::Serialize;
use tracing::debug;

use crate::api::model::{AuthResponse, Category, Credentials, Professional, Registration, Review, User};

/// Number of professionals shown in the featured section of the home screen.
pub const FEATURED_COUNT: usize = 2;

/// Thin typed client for the marketplace REST API.
///
/// GET responses are decoded unconditionally; a non-2xx body that is not
/// valid JSON surfaces as a decoding error at the call site. Login and
/// register check the status first and report rejection as `None`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// `GET /categories`
    pub async fn categories(&self) -> Result<Vec<Category>> {
        let url = format!("{}/categories", self.base_url);
        let categories = self.http.get(&url).send().await?.json().await?;
        Ok(categories)
    }

    /// `GET /professionals[?category=ID]`
    pub async fn professionals(&self, category: Option<&str>) -> Result<Vec<Professional>> {
        let url = format!("{}/professionals", self.base_url);
        let mut request = self.http.get(&url);
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }
        let professionals = request.send().await?.json().await?;
        Ok(professionals)
    }

    /// The featured subset: the first [`FEATURED_COUNT`] entries of the
    /// unfiltered professional list.
    pub async fn featured_professionals(&self) -> Result<Vec<Professional>> {
        let mut professionals = self.professionals(None).await?;
        professionals.truncate(FEATURED_COUNT);
        Ok(professionals)
    }

    /// `GET /professionals/{id}/reviews`
    pub async fn reviews(&self, professional_id: i64) -> Result<Vec<Review>> {
        let url = format!("{}/professionals/{professional_id}/reviews", self.base_url);
        let reviews = self.http.get(&url).send().await?.json().await?;
        Ok(reviews)
    }

    /// `POST /login`. Returns `None` when the server rejects the credentials.
    pub async fn login(&self, credentials: &Credentials) -> Result<Option<User>> {
        self.authenticate("login", credentials).await
    }

    /// `POST /register`. Returns `None` when the server rejects the details.
    pub async fn register(&self, details: &Registration) -> Result<Option<User>> {
        self.authenticate("register", details).await
    }

    async fn authenticate<T: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Option<User>> {
        let url = format!("{}/{endpoint}", self.base_url);
        let response = self.http.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "{endpoint} rejected by server");
            return Ok(None);
        }

        let auth: AuthResponse = response.json().await?;
        Ok(Some(auth.user))
    }
}

/// Format an ISO-8601 timestamp from the API as a short date.
pub fn format_review_date(timestamp: &str) -> String {
    chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .map_or_else(|_| timestamp.to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn professional_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "category": "electricista",
            "rating": 4.8,
            "reviews_count": 127,
            "distance": "0.5 km",
            "available": true,
            "specialties": ["Instalaciones", "Reparaciones"],
            "price": "$5,000",
            "avatar": "JP",
            "phone": "+54 9 342 123-4567",
            "description": null,
            "location": "Santa Fe"
        })
    }

    #[tokio::test]
    async fn test_categories() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/categories");
            then.status(200).json_body(json!([
                {"id": "electricista", "name": "Electricista", "icon": "zap"},
                {"id": "plomero", "name": "Plomero", "icon": "droplets"}
            ]));
        });

        let api = ApiClient::new(server.url("/api"));
        let categories = api.categories().await.unwrap();

        mock.assert();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].id, "electricista");
        assert_eq!(categories[1].name, "Plomero");
    }

    #[tokio::test]
    async fn test_professionals_filtered_by_category() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/professionals")
                .query_param("category", "electricista");
            then.status(200)
                .json_body(json!([professional_json(1, "Juan Pérez")]));
        });

        let api = ApiClient::new(server.url("/api"));
        let professionals = api.professionals(Some("electricista")).await.unwrap();

        mock.assert();
        assert_eq!(professionals.len(), 1);
        assert_eq!(professionals[0].name, "Juan Pérez");
        assert_eq!(professionals[0].specialties.len(), 2);
    }

    #[tokio::test]
    async fn test_featured_truncates_to_first_two() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/professionals");
            then.status(200).json_body(json!([
                professional_json(1, "Juan Pérez"),
                professional_json(2, "María García"),
                professional_json(3, "Carlos López"),
            ]));
        });

        let api = ApiClient::new(server.url("/api"));
        let featured = api.featured_professionals().await.unwrap();

        assert_eq!(featured.len(), FEATURED_COUNT);
        assert_eq!(featured[0].id, 1);
        assert_eq!(featured[1].id, 2);
    }

    #[tokio::test]
    async fn test_reviews_path() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/professionals/7/reviews");
            then.status(200).json_body(json!([{
                "id": 1,
                "professional_id": 7,
                "client_name": "Ana",
                "client_avatar": "AN",
                "rating": 5,
                "comment": "Excelente trabajo",
                "created_at": "2024-06-01T12:30:00"
            }]));
        });

        let api = ApiClient::new(server.url("/api"));
        let reviews = api.reviews(7).await.unwrap();

        mock.assert();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].client_name, "Ana");
        assert!((reviews[0].rating - 5.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_login_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/login")
                .json_body(json!({"username": "maria", "password": "secret"}));
            then.status(200).json_body(json!({
                "token": "abc123",
                "user": {"username": "maria", "email": "maria@example.com"}
            }));
        });

        let api = ApiClient::new(server.url("/api"));
        let user = api
            .login(&Credentials {
                username: "maria".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        mock.assert();
        assert_eq!(
            user,
            Some(User {
                username: "maria".to_string(),
                email: "maria@example.com".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_login_rejected_yields_no_user() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/login");
            then.status(401).json_body(json!({"error": "Invalid credentials"}));
        });

        let api = ApiClient::new(server.url("/api"));
        let user = api
            .login(&Credentials {
                username: "maria".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user, None);
    }

    #[tokio::test]
    async fn test_register_created() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/register");
            then.status(201).json_body(json!({
                "token": "def456",
                "user": {"username": "nuevo", "email": "nuevo@example.com"}
            }));
        });

        let api = ApiClient::new(server.url("/api"));
        let user = api
            .register(&Registration {
                username: "nuevo".to_string(),
                email: "nuevo@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.unwrap().username, "nuevo");
    }

    #[test]
    fn test_format_review_date() {
        assert_eq!(format_review_date("2024-06-01T12:30:00"), "2024-06-01");
        assert_eq!(format_review_date("not-a-date"), "not-a-date");
    }
}

pub mod actions;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

pub use actions::*;
pub use keybindings::KeybindingsConfig;
pub use loader::{load, save_theme};
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

const API_URL_ENV: &str = "SERVITUI_API_URL";
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Resolve the API base URL. The environment beats the config file.
    pub fn resolve_base_url(&self) -> String {
        std::env::var(API_URL_ENV).unwrap_or_else(|_| self.base_url.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

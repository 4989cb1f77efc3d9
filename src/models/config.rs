//! Configuration model loaded from external sources.

use serde::Deserialize;

/// Deployment flavour; decides where sign-in links point to.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Backend database; without it the dashboard runs on demo data only.
    #[serde(default)]
    pub database_url: Option<String>,
    pub templates_dir: String,
    pub secret: String,
    /// Public origin of the production deployment, e.g. `https://desk.example.com`.
    pub public_url: String,
    #[serde(default)]
    pub environment: Environment,
}

impl ServerConfig {
    /// Origin that sign-in links redirect back to.
    pub fn redirect_origin(&self) -> String {
        match self.environment {
            Environment::Production => self.public_url.trim_end_matches('/').to_string(),
            Environment::Development => format!("http://{}:{}", self.address, self.port),
        }
    }

    pub fn has_backend(&self) -> bool {
        self.database_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

//! Chronicle Client
//!
//! Main client for the parser tooling API, combining authentication,
//! HTTP functionality and endpoint construction.

use super::auth::ChronicleCredentials;
use super::http::ChronicleHttpClient;
use crate::config::Config;
use crate::error::Result;
use reqwest::Method;
use serde_json::Value;
use url::Url;

pub const DEFAULT_URL: &str = "https://backstory.googleapis.com/v1";
pub const EUROPE_URL: &str = "https://europe-backstory.googleapis.com/v1";
pub const ASIA_URL: &str = "https://asia-southeast1-backstory.googleapis.com/v1";

/// Map a region setting to its API base URL.
///
/// Anything other than `EUROPE` or `ASIA`, including no value, selects the
/// default region.
pub fn resolve_base_url(region: Option<&str>) -> &'static str {
    match region {
        Some("EUROPE") => EUROPE_URL,
        Some("ASIA") => ASIA_URL,
        _ => DEFAULT_URL,
    }
}

/// Main Chronicle client
#[derive(Clone)]
pub struct ChronicleClient {
    pub credentials: ChronicleCredentials,
    pub http: ChronicleHttpClient,
    pub base_url: String,
}

impl ChronicleClient {
    /// Create a client from the current settings
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = ChronicleCredentials::from_config(config)?;
        let http = ChronicleHttpClient::new()?;

        Ok(Self {
            credentials,
            http,
            base_url: config.base_url(),
        })
    }

    /// Make an authenticated request against a full URL
    pub async fn request(&self, url: &str, method: Method, body: Option<String>) -> Result<Value> {
        let token = self.credentials.get_token().await?;
        self.http.request(url, method, &token, body).await
    }

    pub async fn get(&self, url: &str) -> Result<Value> {
        self.request(url, Method::GET, None).await
    }

    pub async fn post(&self, url: &str, body: Option<String>) -> Result<Value> {
        self.request(url, Method::POST, body).await
    }

    // =========================================================================
    // Parser API helpers
    // =========================================================================

    /// `/tools/cbnParsers`
    pub fn parsers_url(&self) -> String {
        format!("{}/tools/cbnParsers", self.base_url)
    }

    /// `/tools/cbnParsers/{id}`
    pub fn parser_url(&self, config_id: &str) -> String {
        format!("{}/{}", self.parsers_url(), config_id)
    }

    /// `/tools/cbnParsers/{id}:archive`
    pub fn archive_url(&self, config_id: &str) -> String {
        format!("{}:archive", self.parser_url(config_id))
    }

    /// `/tools/cbnParsers/:listCbnParserHistory?log_type={log_type}`
    pub fn history_url(&self, log_type: &str) -> Result<String> {
        let url = Url::parse_with_params(
            &format!("{}/:listCbnParserHistory", self.parsers_url()),
            &[("log_type", log_type)],
        )?;
        Ok(url.into())
    }

    /// `/tools:retrieveSampleLogs`
    pub fn sample_logs_url(&self) -> String {
        format!("{}/tools:retrieveSampleLogs", self.base_url)
    }

    /// `/tools:validateCbnParser`
    pub fn validate_url(&self) -> String {
        format!("{}/tools:validateCbnParser", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ChronicleClient {
        let config = Config {
            access_token: Some("token".into()),
            region: Some("EUROPE".into()),
            ..Default::default()
        };
        ChronicleClient::from_config(&config).unwrap()
    }

    #[test]
    fn test_resolve_base_url() {
        assert_eq!(resolve_base_url(None), DEFAULT_URL);
        assert_eq!(resolve_base_url(Some("EUROPE")), EUROPE_URL);
        assert_eq!(resolve_base_url(Some("ASIA")), ASIA_URL);
        assert_eq!(resolve_base_url(Some("europe")), DEFAULT_URL);
        assert_eq!(resolve_base_url(Some("")), DEFAULT_URL);
    }

    #[test]
    fn test_parser_urls() {
        let client = client();
        let id = "12345678-abcd-1234-abcd-1234567890ab";
        assert_eq!(
            client.parsers_url(),
            "https://europe-backstory.googleapis.com/v1/tools/cbnParsers"
        );
        assert_eq!(client.parser_url(id), format!("{}/{}", client.parsers_url(), id));
        assert!(client.archive_url(id).ends_with(&format!("/{}:archive", id)));
        assert!(client.sample_logs_url().ends_with("/v1/tools:retrieveSampleLogs"));
        assert!(client.validate_url().ends_with("/v1/tools:validateCbnParser"));
    }

    #[test]
    fn test_history_url_encodes_log_type() {
        let client = client();
        assert_eq!(
            client.history_url("WINDOWS_DNS").unwrap(),
            "https://europe-backstory.googleapis.com/v1/tools/cbnParsers/:listCbnParserHistory?log_type=WINDOWS_DNS"
        );
        assert!(client.history_url("A B&C").unwrap().ends_with("log_type=A+B%26C"));
    }
}

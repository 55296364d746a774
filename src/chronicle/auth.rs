//! Chronicle Authentication
//!
//! Exchanges a service account key file for short-lived access tokens
//! scoped to the Chronicle Backstory API.

use crate::config::Config;
use crate::error::{ParserError, Result};
use gcp_auth::{CustomServiceAccount, TokenProvider};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// OAuth scope required by every Chronicle parser endpoint
pub const CHRONICLE_SCOPES: &[&str] = &["https://www.googleapis.com/auth/chronicle-backstory"];

/// Token expiry buffer - refresh tokens this much before they actually expire
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Default token TTL if we can't determine expiry (conservative: 30 minutes)
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Clone)]
enum TokenSource {
    ServiceAccount(Arc<dyn TokenProvider>),
    Static(String),
}

/// Credentials holder with token caching
#[derive(Clone)]
pub struct ChronicleCredentials {
    source: TokenSource,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

impl ChronicleCredentials {
    /// Build credentials from the current settings.
    ///
    /// An explicit access token wins; otherwise the service account file is
    /// required and read every time this is called.
    pub fn from_config(config: &Config) -> Result<Self> {
        if let Some(token) = config.access_token.as_deref().filter(|t| !t.is_empty()) {
            return Ok(Self::from_token(token));
        }

        match config.service_account_file_path.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => Self::from_key_file(path),
            _ => Err(ParserError::ConfigurationMissing {
                setting: "Service Account File Path",
            }),
        }
    }

    /// Load a service account key file
    pub fn from_key_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading service account key from {:?}", path);
        let account = CustomServiceAccount::from_file(path).map_err(|e| {
            ParserError::Auth(format!("cannot load service account {:?}: {}", path, e))
        })?;

        Ok(Self {
            source: TokenSource::ServiceAccount(Arc::new(account)),
            token_cache: Arc::new(RwLock::new(None)),
        })
    }

    /// Use a pre-issued bearer token as-is
    pub fn from_token(token: &str) -> Self {
        Self {
            source: TokenSource::Static(token.to_string()),
            token_cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Get an access token for API calls
    pub async fn get_token(&self) -> Result<String> {
        let provider = match &self.source {
            TokenSource::Static(token) => return Ok(token.clone()),
            TokenSource::ServiceAccount(provider) => provider,
        };

        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached token expired, fetching new token");
            }
        }

        let token = provider
            .token(CHRONICLE_SCOPES)
            .await
            .map_err(|e| ParserError::Auth(format!("failed to get access token: {}", e)))?;

        let token_str = token.as_str().to_string();
        let expires_at = Instant::now() + DEFAULT_TOKEN_TTL - TOKEN_EXPIRY_BUFFER;

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: token_str.clone(),
                expires_at,
            });
        }

        tracing::debug!(
            "New token cached, expires in ~{} minutes",
            (DEFAULT_TOKEN_TTL - TOKEN_EXPIRY_BUFFER).as_secs() / 60
        );

        Ok(token_str)
    }
}

//! Olho Vivo session management.
//!
//! SPTrans authenticates a credential with `POST /Login/Autenticar?token=…`
//! and then tracks the session through cookies. A session is trusted for a
//! fixed validity window after the last successful authentication.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::client::SptransConfig;
use super::error::{ApiError, SptransError};

/// Authentication endpoint, relative to the API base URL.
pub const AUTH_PATH: &str = "/Login/Autenticar";

/// The upstream answers authentication with a bare JSON boolean. Only this
/// exact text counts as success; `TRUE`, `1` or a padded body do not.
const AUTH_SUCCESS_BODY: &str = "true";

#[derive(Debug, Default)]
struct SessionState {
    authenticated: bool,
    last_success_at: Option<Instant>,
}

impl SessionState {
    fn is_fresh(&self, now: Instant, validity_window: Duration) -> bool {
        match self.last_success_at {
            Some(at) if self.authenticated => now.saturating_duration_since(at) < validity_window,
            _ => false,
        }
    }
}

/// Owns the credential and the authenticated state of the shared transport.
///
/// All mutable state sits behind one `RwLock`. `authenticate` re-checks
/// freshness while holding the write lock, so callers racing on a stale
/// session trigger a single round trip and the rest observe its outcome.
#[derive(Debug)]
pub struct SessionManager {
    credential: String,
    http: reqwest::Client,
    auth_url: String,
    validity_window: Duration,
    state: RwLock<SessionState>,
}

impl SessionManager {
    /// Build the shared transport and an unauthenticated session.
    pub fn new(config: &SptransConfig) -> Result<Self, SptransError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            credential: config.credential.clone(),
            http,
            auth_url: format!("{}{}", config.base_url, AUTH_PATH),
            validity_window: config.validity_window,
            state: RwLock::new(SessionState::default()),
        })
    }

    /// Whether the last authentication succeeded and is still inside the
    /// validity window.
    pub async fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .await
            .is_fresh(Instant::now(), self.validity_window)
    }

    /// Authenticate against the upstream unless the session is still fresh.
    ///
    /// A non-success status is reported with that status. A success status
    /// whose body is anything but `true` is reported as 401 and clears the
    /// authenticated flag.
    pub async fn authenticate(&self) -> Result<(), SptransError> {
        let mut state = self.state.write().await;

        if state.is_fresh(Instant::now(), self.validity_window) {
            debug!("session still fresh, skipping authentication");
            return Ok(());
        }

        info!(
            url = %self.auth_url,
            token_len = self.credential.len(),
            "authenticating with SPTrans"
        );

        let response = self
            .http
            .post(&self.auth_url)
            .query(&[("token", self.credential.as_str())])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            warn!(status = status.as_u16(), "authentication request rejected");
            return Err(SptransError::Auth(
                ApiError::new(status.as_u16(), "Authentication failed")
                    .with_details(format!("HTTP {}", status.as_u16())),
            ));
        }

        let body = response.text().await?;

        if body != AUTH_SUCCESS_BODY {
            state.authenticated = false;
            warn!(body_len = body.len(), "credential refused by SPTrans");
            return Err(SptransError::Auth(ApiError::invalid_token()));
        }

        state.authenticated = true;
        state.last_success_at = Some(Instant::now());
        info!(
            valid_for_secs = self.validity_window.as_secs(),
            "authenticated with SPTrans"
        );

        Ok(())
    }

    /// Authenticate only if the session is not already fresh.
    pub async fn ensure_authenticated(&self) -> Result<(), SptransError> {
        if self.is_authenticated().await {
            return Ok(());
        }
        self.authenticate().await
    }

    /// The shared transport. Its cookie store carries the session set up by
    /// `authenticate`, so data requests must go through this client.
    pub fn transport(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn validity_window(&self) -> Duration {
        self.validity_window
    }
}

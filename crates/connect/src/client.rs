//! HTTP client for the Finfolio holdings backend.
//!
//! This module provides the one client every command goes through. All
//! session-gated requests share a single send path that attaches the
//! bearer credential and routes unauthorized responses through the
//! injected invalidation handler.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use finfolio_core::errors::{AuthError, FetchError, UploadError};
use finfolio_core::{EquityHolding, Error, FundHolding, HoldingType, Result};

use crate::holdings::HoldingsApiClient;
use crate::session::{SessionInvalidationHandler, SessionManager};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL for a locally running backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

// ─────────────────────────────────────────────────────────────────────────────
// API Response Types (internal, for parsing backend responses)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Structured error document the backend attaches to rejections.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    detail: Option<String>,
}

/// Pulls the human-readable message out of an error body, falling back
/// to the status line with a truncated body sample.
fn extract_detail(body: &str, status: StatusCode) -> String {
    if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(body) {
        if let Some(detail) = err.detail {
            return detail;
        }
    }
    if body.trim().is_empty() {
        return format!("HTTP {}", status);
    }
    format!(
        "HTTP {}: {}",
        status,
        body.chars().take(200).collect::<String>()
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// API Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the holdings backend.
///
/// This client provides methods for:
/// - Exchanging credentials for a bearer token (login, register)
/// - Fetching equity and mutual fund holdings
/// - Uploading holdings spreadsheets
///
/// The session manager and the invalidation handler are injected so the
/// same client wiring serves the CLI and the tests.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<SessionManager>,
    invalidation: Arc<dyn SessionInvalidationHandler>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not carry an HTTP scheme or
    /// the HTTP client cannot be initialized.
    pub fn new(
        base_url: &str,
        session: Arc<SessionManager>,
        invalidation: Arc<dyn SessionInvalidationHandler>,
    ) -> Result<Self> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "API base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            invalidation,
        })
    }

    /// Send a session-gated request: the bearer credential is attached
    /// and an unauthorized response invalidates the session, exactly
    /// once, before the response is handed back.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let response = self.session.attach(request).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.invalidation.on_unauthorized();
        }
        Ok(response)
    }

    /// Make a session-gated GET request and parse the response.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[HoldingsApi] GET {}", url);

        let response = self
            .send(self.client.get(&url))
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        self.parse_response(response).await
    }

    /// Parse an HTTP response, handling errors appropriately.
    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                detail: extract_detail(&body, status),
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            FetchError::Decode(format!(
                "{} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
            .into()
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth Endpoints
    // ─────────────────────────────────────────────────────────────────────────

    /// Exchange credentials for a bearer token and establish the session.
    ///
    /// Rejected credentials and transport problems collapse to
    /// `Ok(false)` after a warn log; `Err` is reserved for local
    /// failures such as the credential store write. A failed attempt
    /// never disturbs an existing session.
    pub async fn login(&self, email: &str, password: &str) -> Result<bool> {
        match self.request_token(email, password).await {
            Ok(token) => {
                self.session.establish(&token, email)?;
                info!("[HoldingsApi] Signed in as {}", email);
                Ok(true)
            }
            Err(e) => {
                warn!("[HoldingsApi] Login failed: {}", e);
                Ok(false)
            }
        }
    }

    /// Create a new account. Follows the login contract: `Ok(false)` on
    /// rejection, `Err` never.
    pub async fn register(&self, email: &str, password: &str) -> Result<bool> {
        match self.request_registration(email, password).await {
            Ok(()) => {
                info!("[HoldingsApi] Registered {}", email);
                Ok(true)
            }
            Err(e) => {
                warn!("[HoldingsApi] Registration failed: {}", e);
                Ok(false)
            }
        }
    }

    /// The token endpoint speaks form encoding with the email in the
    /// `username` field.
    async fn request_token(
        &self,
        email: &str,
        password: &str,
    ) -> std::result::Result<String, AuthError> {
        let url = format!("{}/api/auth/token", self.base_url);
        debug!("[HoldingsApi] POST {}", url);

        let form = [("username", email), ("password", password)];
        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthError::Rejected(extract_detail(&body, status)));
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Decode(e.to_string()))?;
        Ok(token.access_token)
    }

    async fn request_registration(
        &self,
        email: &str,
        password: &str,
    ) -> std::result::Result<(), AuthError> {
        let url = format!("{}/api/auth/register", self.base_url);
        debug!("[HoldingsApi] POST {}", url);

        let payload = serde_json::json!({ "email": email, "password": password });
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(AuthError::Rejected(extract_detail(&body, status)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HoldingsApiClient Trait Implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl HoldingsApiClient for ApiClient {
    /// Fetch all equity holdings for the signed-in user.
    async fn get_equity_holdings(&self) -> Result<Vec<EquityHolding>> {
        let holdings: Vec<EquityHolding> = self.get("/api/stock_holdings/").await?;
        info!("[HoldingsApi] Fetched {} equity holdings", holdings.len());
        Ok(holdings)
    }

    /// Fetch all mutual fund holdings for the signed-in user.
    async fn get_fund_holdings(&self) -> Result<Vec<FundHolding>> {
        let holdings: Vec<FundHolding> = self.get("/api/mutual_fund_holdings/").await?;
        info!("[HoldingsApi] Fetched {} fund holdings", holdings.len());
        Ok(holdings)
    }

    /// Upload a holdings spreadsheet for one asset class.
    async fn upload_holdings(
        &self,
        holding_type: HoldingType,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let path = match holding_type {
            HoldingType::Equity => "/api/stock_holdings/upload",
            HoldingType::Fund => "/api/mutual_fund_holdings/upload",
        };
        let url = format!("{}{}", self.base_url, path);
        debug!("[HoldingsApi] POST {} ({} bytes)", url, bytes.len());

        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .send(self.client.post(&url).multipart(form))
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!("[HoldingsApi] Uploaded {} for {:?} holdings", file_name, holding_type);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(UploadError::Rejected(extract_detail(&body, status)).into())
    }
}

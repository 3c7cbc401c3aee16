//! REST implementation of the identity provider boundary.
//!
//! Talks to the identity service's token endpoints for the password flows
//! and fans provider state changes out to subscribers. The interactive
//! federated flows (popup/redirect) need a browser surface and report
//! `Unsupported` from this frontend; the session gate's fallback logic is
//! independent of that and exercised through the trait.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use aria_core::auth::{
    AuthProvider, FederatedIntent, Identity, ProviderError, ProviderErrorCode,
};

const DEFAULT_IDENTITY_URL: &str = "https://identity.aria-assistant.dev";
const DEFAULT_IDENTITY_API_KEY: &str = "aria-public-web-client";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct CredentialRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: ProviderUser,
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    email: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Maps the identity service's wire codes to provider error categories.
fn map_error_code(message: &str) -> ProviderErrorCode {
    // The service may append detail after the code ("WEAK_PASSWORD : ...").
    let code = message.split_whitespace().next().unwrap_or(message);
    match code {
        "EMAIL_NOT_FOUND" => ProviderErrorCode::UserNotFound,
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => ProviderErrorCode::WrongPassword,
        "INVALID_EMAIL" => ProviderErrorCode::InvalidEmail,
        "EMAIL_EXISTS" => ProviderErrorCode::EmailInUse,
        "WEAK_PASSWORD" => ProviderErrorCode::WeakPassword,
        _ => ProviderErrorCode::Other,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// REST identity provider.
pub struct RestAuthProvider {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Mutex<Option<String>>,
    identity: Mutex<Option<Identity>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<Option<Identity>>>>,
}

impl RestAuthProvider {
    /// Creates a provider against the given identity service.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: Mutex::new(None),
            identity: Mutex::new(None),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Creates a provider against the default identity service.
    pub fn new_default() -> Self {
        Self::new(DEFAULT_IDENTITY_URL, DEFAULT_IDENTITY_API_KEY)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Publishes a state change to every live subscriber.
    fn notify(&self, identity: Option<Identity>) {
        lock(&self.subscribers).retain(|sender| sender.send(identity.clone()).is_ok());
    }

    async fn credential_request(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, ProviderError> {
        let response = self
            .client
            .post(self.url(path))
            .header("apikey", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&CredentialRequest { email, password })
            .send()
            .await
            .map_err(|err| {
                ProviderError::new(ProviderErrorCode::Network, err.to_string())
            })?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|parsed| parsed.error.message)
                .unwrap_or(body);
            return Err(ProviderError::new(map_error_code(&message), message));
        }

        let token: TokenResponse = response.json().await.map_err(|err| {
            ProviderError::new(ProviderErrorCode::Other, err.to_string())
        })?;

        let identity = Identity::new(token.user.email, "password");
        *lock(&self.access_token) = Some(token.access_token);
        *lock(&self.identity) = Some(identity.clone());
        self.notify(Some(identity.clone()));

        Ok(identity)
    }
}

#[async_trait]
impl AuthProvider for RestAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        self.credential_request("auth/v1/sign-in", email, password)
            .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        self.credential_request("auth/v1/sign-up", email, password)
            .await
    }

    async fn sign_in_with_popup(
        &self,
        _intent: FederatedIntent,
    ) -> Result<Identity, ProviderError> {
        Err(ProviderError::new(
            ProviderErrorCode::Unsupported,
            "interactive federated sign-in needs a browser surface",
        ))
    }

    async fn sign_in_with_redirect(
        &self,
        _intent: FederatedIntent,
    ) -> Result<(), ProviderError> {
        Err(ProviderError::new(
            ProviderErrorCode::Unsupported,
            "redirect federated sign-in needs a browser surface",
        ))
    }

    async fn redirect_result(&self) -> Result<Option<Identity>, ProviderError> {
        // No browser surface, so a redirect can never be pending here.
        Ok(None)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let token = lock(&self.access_token).take();

        // Local state is dropped and subscribers notified regardless of the
        // remote call: the client-side session is a projection, not a lease.
        *lock(&self.identity) = None;
        self.notify(None);

        if let Some(token) = token {
            self.client
                .post(self.url("auth/v1/sign-out"))
                .header("apikey", &self.api_key)
                .bearer_auth(token)
                .timeout(REQUEST_TIMEOUT)
                .send()
                .await
                .map_err(|err| {
                    ProviderError::new(ProviderErrorCode::Network, err.to_string())
                })?;
        }

        Ok(())
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<Option<Identity>> {
        let (sender, receiver) = mpsc::unbounded_channel();
        // Deliver the current state first, like browser SDK state callbacks.
        let _ = sender.send(lock(&self.identity).clone());
        lock(&self.subscribers).push(sender);
        receiver
    }
}

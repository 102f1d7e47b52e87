//! Shared HTTP adapter for the blablabil backend.
//!
//! Every resource group routes its calls through [`ApiClient`], which
//! owns the three cross-cutting policies:
//!
//! - attach `Authorization: Bearer <token>` when a token is stored
//! - on any 401, purge stored credentials and fire the registered
//!   unauthorized callback, exactly once per response
//! - map failure bodies to [`ApiError`], preferring the server's own
//!   `message` field

use std::sync::Arc;

use blablabil_core::{BlablabilError, CredentialStore};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Callback invoked after a 401 has been observed and the stored
/// credentials purged. Used to reset in-memory session state and steer
/// the UI to the login screen.
pub type UnauthorizedCallback = Arc<dyn Fn() + Send + Sync>;

/// HTTP client shared by all resource groups. Cheap to clone; clones
/// share the underlying connection pool and the unauthorized callback.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    on_unauthorized: Arc<RwLock<Option<UnauthorizedCallback>>>,
    cancel: Option<CancellationToken>,
}

impl ApiClient {
    /// Creates a client for the configured endpoint.
    pub fn new(
        config: &ApiConfig,
        store: Arc<dyn CredentialStore>,
    ) -> blablabil_core::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| BlablabilError::config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            on_unauthorized: Arc::new(RwLock::new(None)),
            cancel: None,
        })
    }

    /// Registers the callback fired after a 401 purge. Replaces any
    /// previously registered callback.
    pub async fn set_unauthorized_callback(&self, callback: UnauthorizedCallback) {
        *self.on_unauthorized.write().await = Some(callback);
    }

    /// Returns a clone whose requests abort with [`ApiError::Cancelled`]
    /// once `cancel` fires. Other clones are unaffected.
    pub fn scoped(&self, cancel: CancellationToken) -> Self {
        let mut client = self.clone();
        client.cancel = Some(cancel);
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Sends the request and decodes the success body as JSON.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Sends the request and discards the success body.
    pub(crate) async fn fire(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }

    async fn execute(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let request = match self.store.load_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|err| ApiError::Transport(err.to_string()))?;

            let status = response.status();
            if status == StatusCode::UNAUTHORIZED {
                self.handle_unauthorized().await;
                return Err(ApiError::Unauthorized);
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(status_error(status, &body));
            }

            response
                .text()
                .await
                .map_err(|err| ApiError::Transport(err.to_string()))
        };

        match &self.cancel {
            Some(cancel) => {
                if cancel.is_cancelled() {
                    return Err(ApiError::Cancelled);
                }
                tokio::select! {
                    _ = cancel.cancelled() => Err(ApiError::Cancelled),
                    result = exchange => result,
                }
            }
            None => exchange.await,
        }
    }

    async fn handle_unauthorized(&self) {
        tracing::warn!("[ApiClient] Received 401, clearing stored credentials");
        if let Err(err) = self.store.clear().await {
            tracing::error!("[ApiClient] Failed to clear credentials: {}", err);
        }

        let callback = self.on_unauthorized.read().await.clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

fn status_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|wrapper| wrapper.message);

    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_extracts_the_message_field() {
        let err = status_error(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Invalid phone number"}"#,
        );
        assert_eq!(err.server_message(), Some("Invalid phone number"));
        assert_eq!(err.status_code(), Some(400));
    }

    #[test]
    fn status_error_without_message_keeps_only_the_status() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err.server_message(), None);
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn status_error_ignores_bodies_of_the_wrong_shape() {
        let err = status_error(StatusCode::NOT_FOUND, r#"{"error":"missing"}"#);
        assert_eq!(err.server_message(), None);
    }
}

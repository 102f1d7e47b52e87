//! Authentication endpoints.

use blablabil_core::User;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Token and user pair returned by login and registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    phone: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct PhoneRequest<'a> {
    phone: &'a str,
}

#[derive(Serialize)]
struct PhoneCodeRequest<'a> {
    phone: &'a str,
    code: &'a str,
}

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Signs in with phone number and password.
    pub async fn login(&self, phone: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest { phone, password };
        self.client
            .fetch(self.client.request(Method::POST, "/auth/login").json(&body))
            .await
    }

    /// Creates a new account.
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.client
            .fetch(
                self.client
                    .request(Method::POST, "/auth/register")
                    .json(registration),
            )
            .await
    }

    /// Sends a verification code to the given phone number.
    pub async fn send_verification_code(&self, phone: &str) -> Result<(), ApiError> {
        let body = PhoneRequest { phone };
        self.client
            .fire(
                self.client
                    .request(Method::POST, "/auth/verify-phone")
                    .json(&body),
            )
            .await
    }

    /// Confirms a phone number with the code sent to it.
    pub async fn verify_phone(&self, phone: &str, code: &str) -> Result<(), ApiError> {
        let body = PhoneCodeRequest { phone, code };
        self.client
            .fire(
                self.client
                    .request(Method::POST, "/auth/verify-phone/confirm")
                    .json(&body),
            )
            .await
    }

    /// Requests a password reset for the account behind the phone number.
    pub async fn reset_password(&self, phone: &str) -> Result<(), ApiError> {
        let body = PhoneRequest { phone };
        self.client
            .fire(
                self.client
                    .request(Method::POST, "/auth/reset-password")
                    .json(&body),
            )
            .await
    }

    /// Exchanges the current token for a fresh one.
    pub async fn refresh(&self) -> Result<RefreshResponse, ApiError> {
        self.client
            .fetch(self.client.request(Method::POST, "/auth/refresh"))
            .await
    }

    /// Invalidates the current session on the server.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client
            .fire(self.client.request(Method::POST, "/auth/logout"))
            .await
    }
}

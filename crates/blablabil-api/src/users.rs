//! Profile and verification endpoints for the signed-in user.

use blablabil_core::{User, UserUpdate};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::ApiClient;

/// Verification badges shown on the profile page.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStatus {
    #[serde(default)]
    pub phone_verified: bool,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub license_verified: bool,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Deserialize)]
struct VerificationEnvelope {
    verification: VerificationStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfilePictureEnvelope {
    profile_picture: String,
}

#[derive(Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches the signed-in user's profile.
    pub async fn profile(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self
            .client
            .fetch(self.client.request(Method::GET, "/users/profile"))
            .await?;
        Ok(envelope.user)
    }

    /// Applies a partial profile update and returns the updated record.
    pub async fn update_profile(&self, update: &UserUpdate) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::PUT, "/users/profile")
                    .json(update),
            )
            .await?;
        Ok(envelope.user)
    }

    /// Uploads a new avatar and returns its URL.
    pub async fn upload_profile_picture(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let form = Form::new().part("profilePicture", file_part(file_name, bytes)?);
        let envelope: ProfilePictureEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::POST, "/users/profile/picture")
                    .multipart(form),
            )
            .await?;
        Ok(envelope.profile_picture)
    }

    /// Fetches the verification badges for the signed-in user.
    pub async fn verification_status(&self) -> Result<VerificationStatus, ApiError> {
        let envelope: VerificationEnvelope = self
            .client
            .fetch(self.client.request(Method::GET, "/users/verification"))
            .await?;
        Ok(envelope.verification)
    }

    /// Submits a driver's license image for verification.
    pub async fn upload_license(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), ApiError> {
        let form = Form::new().part("license", file_part(file_name, bytes)?);
        self.client
            .fire(
                self.client
                    .request(Method::POST, "/users/verify-license")
                    .multipart(form),
            )
            .await
    }
}

fn file_part(file_name: &str, bytes: Vec<u8>) -> Result<Part, ApiError> {
    let mime = mime_guess::from_path(file_name).first_or_octet_stream();
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime.as_ref())
        .map_err(|err| ApiError::Transport(format!("invalid mime type: {err}")))
}

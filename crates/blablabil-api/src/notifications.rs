//! Server-side notification inbox endpoints. Distinct from the local
//! toast queue in the application layer.

use reqwest::Method;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::ApiClient;

/// A notification delivered by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteNotification {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Deserialize)]
struct NotificationsEnvelope {
    #[serde(default)]
    notifications: Vec<RemoteNotification>,
}

#[derive(Clone)]
pub struct NotificationsApi {
    client: ApiClient,
}

impl NotificationsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Lists a user's notifications, newest first.
    pub async fn for_user(&self, user_id: &str) -> Result<Vec<RemoteNotification>, ApiError> {
        let envelope: NotificationsEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::GET, &format!("/notifications/{user_id}")),
            )
            .await?;
        Ok(envelope.notifications)
    }

    /// Marks one notification as read.
    pub async fn mark_read(&self, notification_id: &str) -> Result<(), ApiError> {
        self.client
            .fire(
                self.client
                    .request(Method::PUT, &format!("/notifications/{notification_id}/read")),
            )
            .await
    }

    /// Marks all of a user's notifications as read.
    pub async fn mark_all_read(&self, user_id: &str) -> Result<(), ApiError> {
        self.client
            .fire(
                self.client
                    .request(Method::PUT, &format!("/notifications/{user_id}/read-all")),
            )
            .await
    }
}

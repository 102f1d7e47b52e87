//! Composition root: wires storage, HTTP client, session service and
//! notification center into one [`AppHandle`].
//!
//! The shell (CLI today, a desktop frontend later) consumes only the
//! handle; nothing else constructs these pieces.

use std::sync::Arc;

use blablabil_api::admin::AdminApi;
use blablabil_api::auth::AuthApi;
use blablabil_api::bookings::BookingsApi;
use blablabil_api::notifications::NotificationsApi;
use blablabil_api::payments::PaymentsApi;
use blablabil_api::support::SupportApi;
use blablabil_api::trips::TripsApi;
use blablabil_api::users::UsersApi;
use blablabil_api::{ApiClient, ApiConfig};
use blablabil_core::error::{BlablabilError, Result};
use blablabil_core::session::CredentialStore;
use blablabil_infrastructure::FileCredentialStore;

use crate::notification_center::NotificationCenter;
use crate::session_service::SessionService;

/// Shown when a 401 forces the session out from under the user.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

/// Everything a shell needs to drive the app.
pub struct AppHandle {
    pub session: Arc<SessionService>,
    pub notifications: NotificationCenter,
    pub client: ApiClient,
    pub users: UsersApi,
    pub trips: TripsApi,
    pub bookings: BookingsApi,
    pub payments: PaymentsApi,
    pub support: SupportApi,
    pub admin: AdminApi,
    /// Remote notification inbox, distinct from the local toast center.
    pub inbox: NotificationsApi,
}

/// Builds the app against the on-disk config and credential files.
pub async fn bootstrap() -> Result<AppHandle> {
    let config = ApiConfig::load()?;
    let store = FileCredentialStore::new()
        .map_err(|err| BlablabilError::config(format!("cannot locate credential files: {err}")))?;
    bootstrap_with(config, Arc::new(store)).await
}

/// Builds the app with explicit config and store. Exposed so tests and
/// embedders can substitute their own storage.
pub async fn bootstrap_with(
    config: ApiConfig,
    store: Arc<dyn CredentialStore>,
) -> Result<AppHandle> {
    tracing::info!("[Bootstrap] Starting against {}", config.base_url);

    let client = ApiClient::new(&config, store.clone())?;

    let auth = AuthApi::new(client.clone());
    let session = Arc::new(SessionService::new(Arc::new(auth), store));
    let notifications = NotificationCenter::new();

    // The HTTP layer purges stored credentials on 401 before this fires;
    // the callback's job is the in-memory side.
    let expired_session = session.clone();
    let expired_notifications = notifications.clone();
    client
        .set_unauthorized_callback(Arc::new(move || {
            let session = expired_session.clone();
            let notifications = expired_notifications.clone();
            tokio::spawn(async move {
                session.force_sign_out().await;
                notifications.warning(SESSION_EXPIRED_MESSAGE).await;
            });
        }))
        .await;

    // Guards must never see the restore-pending state resolve late, so
    // the handle is only returned once restore has finished.
    session.restore().await;

    Ok(AppHandle {
        session,
        notifications,
        users: UsersApi::new(client.clone()),
        trips: TripsApi::new(client.clone()),
        bookings: BookingsApi::new(client.clone()),
        payments: PaymentsApi::new(client.clone()),
        support: SupportApi::new(client.clone()),
        admin: AdminApi::new(client.clone()),
        inbox: NotificationsApi::new(client.clone()),
        client,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blablabil_infrastructure::MemoryCredentialStore;

    fn offline_config() -> ApiConfig {
        // Port 1 refuses connections immediately; nothing here should
        // touch the network anyway.
        ApiConfig::with_base_url("http://127.0.0.1:1")
    }

    #[tokio::test]
    async fn bootstrap_with_empty_store_starts_signed_out() {
        let handle = bootstrap_with(offline_config(), Arc::new(MemoryCredentialStore::new()))
            .await
            .unwrap();

        let snapshot = handle.session.snapshot().await;
        assert!(!snapshot.loading);
        assert!(!snapshot.is_authenticated());
        assert!(handle.notifications.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn bootstrap_restores_a_stored_session() {
        let user_json = r#"{
            "id": "u-1",
            "firstName": "Kari",
            "lastName": "Nordmann",
            "email": "kari@blablabil.no",
            "phone": "+4740000000",
            "isAdmin": false
        }"#;
        let store = Arc::new(MemoryCredentialStore::with_credentials("tok-1", user_json));

        let handle = bootstrap_with(offline_config(), store).await.unwrap();

        let snapshot = handle.session.snapshot().await;
        assert!(snapshot.is_authenticated());
        assert_eq!(snapshot.user.unwrap().first_name, "Kari");
    }

    #[tokio::test]
    async fn bootstrap_discards_a_corrupt_stored_pair() {
        let store = Arc::new(MemoryCredentialStore::with_credentials("tok-1", "{broken"));

        let handle = bootstrap_with(offline_config(), store.clone()).await.unwrap();

        assert!(!handle.session.snapshot().await.is_authenticated());
        assert_eq!(store.load_token().await, None);
    }
}

//! Session service: the single owner of authentication state.
//!
//! Holds the in-memory session behind a lock, keeps it in sync with the
//! credential store, and exposes login, registration, logout and profile
//! merge operations. Consumers observe the session through snapshots;
//! nothing outside this service mutates it.

use std::sync::Arc;

use async_trait::async_trait;
use blablabil_api::ApiError;
use blablabil_api::auth::{AuthApi, AuthResponse, Registration};
use blablabil_core::{
    AuthOutcome, BlablabilError, CredentialStore, Result, SessionSnapshot, SessionState, User,
    UserUpdate,
};
use tokio::sync::{Mutex, RwLock};

/// Fallback message when a login fails without a server-supplied reason.
const LOGIN_FAILED: &str = "Login failed";
/// Fallback message when a registration fails without a server-supplied reason.
const REGISTRATION_FAILED: &str = "Registration failed";
/// Returned when a second login or registration is attempted while one
/// is still in flight.
const AUTH_IN_PROGRESS: &str = "Another sign-in attempt is already in progress";

/// Authentication calls the session service depends on. Implemented by
/// [`AuthApi`]; tests substitute a scripted gateway.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, phone: &str, password: &str) -> std::result::Result<AuthResponse, ApiError>;
    async fn register(
        &self,
        registration: &Registration,
    ) -> std::result::Result<AuthResponse, ApiError>;
    async fn logout(&self) -> std::result::Result<(), ApiError>;
}

#[async_trait]
impl AuthGateway for AuthApi {
    async fn login(&self, phone: &str, password: &str) -> std::result::Result<AuthResponse, ApiError> {
        AuthApi::login(self, phone, password).await
    }

    async fn register(
        &self,
        registration: &Registration,
    ) -> std::result::Result<AuthResponse, ApiError> {
        AuthApi::register(self, registration).await
    }

    async fn logout(&self) -> std::result::Result<(), ApiError> {
        AuthApi::logout(self).await
    }
}

pub struct SessionService {
    auth: Arc<dyn AuthGateway>,
    store: Arc<dyn CredentialStore>,
    state: Arc<RwLock<SessionState>>,
    /// Serializes login and registration. A second attempt while one is
    /// in flight is rejected without touching session state.
    auth_in_flight: Mutex<()>,
}

impl SessionService {
    pub fn new(auth: Arc<dyn AuthGateway>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            auth,
            store,
            state: Arc::new(RwLock::new(SessionState::initial())),
            auth_in_flight: Mutex::new(()),
        }
    }

    /// Restores a previously stored session from the credential store.
    ///
    /// Purely local: the token is not validated against the server, so
    /// startup stays fast and offline-safe. A stale token surfaces as a
    /// 401 on the first real request. A corrupt user record is discarded
    /// from the store; an incomplete pair is left in place and simply
    /// not restored. The session stays signed out in both cases.
    ///
    /// Always ends the loading phase, signed in or not.
    pub async fn restore(&self) {
        tracing::info!("[SessionService] Restoring stored session");

        let token = self.store.load_token().await;
        let user_json = self.store.load_user().await;

        let restored = match (token, user_json) {
            (Some(token), Some(user_json)) => match serde_json::from_str::<User>(&user_json) {
                Ok(user) => Some((token, user)),
                Err(err) => {
                    tracing::warn!(
                        "[SessionService] Stored user record is corrupt, discarding: {}",
                        err
                    );
                    self.discard_stored_credentials().await;
                    None
                }
            },
            (None, None) => None,
            _ => {
                tracing::warn!("[SessionService] Incomplete credential pair, staying signed out");
                None
            }
        };

        let mut state = self.state.write().await;
        if let Some((token, user)) = restored {
            tracing::info!("[SessionService] Restored session for {}", user.full_name());
            state.sign_in(token, user);
        } else {
            tracing::info!("[SessionService] No stored session");
        }
        state.loading = false;
    }

    /// Signs in with phone number and password.
    ///
    /// On success the token and user are persisted and installed in
    /// memory. On failure nobody ends up signed in, even if a restored
    /// session was still installed, and the failure message is recorded
    /// in the session's error field.
    pub async fn login(&self, phone: &str, password: &str) -> AuthOutcome {
        let Ok(_guard) = self.auth_in_flight.try_lock() else {
            return AuthOutcome::failure(AUTH_IN_PROGRESS);
        };

        self.begin_attempt().await;

        match self.auth.login(phone, password).await {
            Ok(response) => self.complete_sign_in(response).await,
            Err(err) => self.fail_attempt(err, LOGIN_FAILED).await,
        }
    }

    /// Creates an account and signs in with it.
    pub async fn register(&self, registration: &Registration) -> AuthOutcome {
        let Ok(_guard) = self.auth_in_flight.try_lock() else {
            return AuthOutcome::failure(AUTH_IN_PROGRESS);
        };

        self.begin_attempt().await;

        match self.auth.register(registration).await {
            Ok(response) => self.complete_sign_in(response).await,
            Err(err) => self.fail_attempt(err, REGISTRATION_FAILED).await,
        }
    }

    /// Signs out. The server is notified best-effort; local state and
    /// stored credentials are always cleared.
    pub async fn logout(&self) {
        if let Err(err) = self.auth.logout().await {
            tracing::warn!("[SessionService] Remote logout failed: {}", err);
        }

        self.discard_stored_credentials().await;

        let mut state = self.state.write().await;
        state.sign_out();
        tracing::info!("[SessionService] Signed out");
    }

    /// Merges a partial update into the signed-in user and re-persists
    /// the stored record. Fails fast when nobody is signed in.
    pub async fn update_user(&self, update: UserUpdate) -> Result<User> {
        let (updated, token) = {
            let mut state = self.state.write().await;
            let Some(user) = state.user.as_mut() else {
                return Err(BlablabilError::precondition(
                    "cannot update the user while signed out",
                ));
            };
            user.apply(update);
            (user.clone(), state.token.clone())
        };

        if let Some(token) = token {
            let user_json = serde_json::to_string(&updated)?;
            if let Err(err) = self.store.save(&token, &user_json).await {
                tracing::warn!("[SessionService] Failed to persist updated user: {}", err);
            }
        }

        Ok(updated)
    }

    /// Drops the in-memory session after the HTTP layer purged the
    /// stored credentials on a 401.
    pub async fn force_sign_out(&self) {
        tracing::warn!("[SessionService] Session invalidated, signing out");
        let mut state = self.state.write().await;
        state.sign_out();
        state.loading = false;
    }

    /// Clears the recorded authentication error.
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.snapshot()
    }

    async fn begin_attempt(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn complete_sign_in(&self, response: AuthResponse) -> AuthOutcome {
        match serde_json::to_string(&response.user) {
            Ok(user_json) => {
                if let Err(err) = self.store.save(&response.token, &user_json).await {
                    tracing::warn!("[SessionService] Failed to persist credentials: {}", err);
                }
            }
            Err(err) => {
                tracing::warn!("[SessionService] Failed to serialize user record: {}", err);
            }
        }

        let mut state = self.state.write().await;
        state.sign_in(response.token, response.user);
        state.loading = false;
        tracing::info!("[SessionService] Signed in");
        AuthOutcome::Success
    }

    async fn fail_attempt(&self, err: ApiError, fallback: &str) -> AuthOutcome {
        let message = err.human_message(fallback);
        tracing::warn!("[SessionService] Authentication failed: {}", message);

        let mut state = self.state.write().await;
        // A failed attempt leaves nobody signed in, even when a restored
        // session was still installed. Stored credentials stay untouched.
        state.sign_out();
        state.error = Some(message.clone());
        state.loading = false;
        AuthOutcome::Failure { message }
    }

    async fn discard_stored_credentials(&self) {
        if let Err(err) = self.store.clear().await {
            tracing::warn!("[SessionService] Failed to clear stored credentials: {}", err);
        }
    }
}

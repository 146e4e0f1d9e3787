// Auth controller - Owns the session and keeps the API client's header in step with it
use crate::application::errors::ClientError;
use crate::application::token_store::TokenStore;
use crate::domain::credential::{AuthState, Credential};
use crate::infrastructure::api_client::ApiClient;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

const LOGIN_PATH: &str = "/auth/login/";
const LOGOUT_PATH: &str = "/auth/logout/";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

pub struct AuthController {
    api: Arc<ApiClient>,
    store: Arc<dyn TokenStore>,
    state: watch::Sender<AuthState>,
}

impl AuthController {
    /// Restores any persisted session before returning, so nothing built on
    /// top of the controller can issue a request ahead of bootstrap.
    pub fn new(api: Arc<ApiClient>, store: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(AuthState::Anonymous);
        let controller = Self { api, store, state };
        controller.bootstrap();
        controller
    }

    /// Synchronously re-read the token store. No network.
    pub fn bootstrap(&self) -> AuthState {
        let next = match self.store.load() {
            Ok(Some(credential)) => {
                tracing::info!("Restored session for {}", credential.username);
                AuthState::Authenticated(credential)
            }
            Ok(None) => AuthState::Anonymous,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session storage: {}", e);
                AuthState::Anonymous
            }
        };
        self.transition(next.clone());
        next
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn username(&self) -> Option<String> {
        self.state.borrow().username().map(str::to_string)
    }

    /// Receives every auth transition, including the ones done by `logout`.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Credential, ClientError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClientError::validation("Username and password required."));
        }

        let credential: Credential = self
            .api
            .post_json_anonymous(LOGIN_PATH, &LoginRequest { username, password })
            .await
            .inspect_err(|e| tracing::info!("Login for {} rejected: {}", username, e))?;

        self.store.save(&credential)?;
        self.transition(AuthState::Authenticated(credential.clone()));

        tracing::info!("Logged in as {}", credential.username);
        Ok(credential)
    }

    /// Fail-open: the client side always ends up anonymous, whatever the
    /// server said about invalidating the token.
    pub async fn logout(&self) {
        if self.is_authenticated() {
            if let Err(e) = self.api.post(LOGOUT_PATH).await {
                tracing::warn!("Server-side logout failed, clearing local session anyway: {}", e);
            }
        }

        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear session storage: {}", e);
        }
        self.transition(AuthState::Anonymous);

        tracing::info!("Logged out");
    }

    // Header and state change under the same watch lock.
    fn transition(&self, next: AuthState) {
        self.state.send_modify(|state| {
            self.api.set_auth_header(next.token());
            *state = next;
        });
    }
}

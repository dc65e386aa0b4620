//! Session state for the current dashboard user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holds the signed-in user and the access/refresh token pair. The router's
//! guard chain reads a [`SessionSnapshot`] from here before every navigation,
//! and pages call the async actions on [`SessionStore`].
//!
//! ERROR HANDLING
//! ==============
//! Actions return `Result<(), ApiError>` and callers branch on that. The
//! `error` field mirrors the most recent failure's message for display only;
//! every action that can fail clears it when it starts.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use super::StoreCell;
use crate::net::api::{ApiError, DashboardApi};
use crate::net::types::{AuthResponse, LoginCredentials, User};
use crate::router::guards::SessionSnapshot;
use crate::util::token_storage::{REFRESH_TOKEN_KEY, TOKEN_KEY, TokenStorage};

/// Authentication state: user identity, tokens, and request status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl SessionState {
    /// Initial state for a page load: tokens from storage, user unknown
    /// until `fetch_current_user` resolves it.
    #[must_use]
    pub fn restore(storage: &dyn TokenStorage) -> Self {
        Self {
            token: non_empty(storage.get(TOKEN_KEY)),
            refresh_token: non_empty(storage.get(REFRESH_TOKEN_KEY)),
            ..Self::default()
        }
    }

    fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// True only when both a token and a user are held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.has_token() && self.user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot { authenticated: self.is_authenticated(), admin: self.is_admin() }
    }

    fn begin_request(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn clear_identity(&mut self) {
        self.user = None;
        self.token = None;
        self.refresh_token = None;
    }
}

/// Session actions bound to an API and persistent token storage.
pub struct SessionStore<C> {
    state: C,
    api: Arc<dyn DashboardApi>,
    storage: Arc<dyn TokenStorage>,
}

impl<C: Clone> Clone for SessionStore<C> {
    fn clone(&self) -> Self {
        Self { state: self.state.clone(), api: Arc::clone(&self.api), storage: Arc::clone(&self.storage) }
    }
}

impl<C: StoreCell<SessionState>> SessionStore<C> {
    pub fn new(state: C, api: Arc<dyn DashboardApi>, storage: Arc<dyn TokenStorage>) -> Self {
        Self { state, api, storage }
    }

    /// Backing cell, for views that subscribe to state changes.
    pub fn state(&self) -> &C {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with_state(SessionState::is_authenticated).unwrap_or(false)
    }

    pub fn is_admin(&self) -> bool {
        self.state.with_state(SessionState::is_admin).unwrap_or(false)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.with_state(SessionState::snapshot).unwrap_or_default()
    }

    /// Authenticate with username and password.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also left in `error`.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<(), ApiError> {
        log::debug!("session: login as {}", credentials.username);
        self.state.update_state(SessionState::begin_request);
        let result = self.api.login(credentials).await;
        self.finish_auth(result)
    }

    /// Authenticate with a Telegram magic link.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also left in `error`.
    pub async fn login_with_telegram(&self, magic_link: &str) -> Result<(), ApiError> {
        log::debug!("session: telegram login");
        self.state.update_state(SessionState::begin_request);
        let result = self.api.login_with_telegram(magic_link).await;
        self.finish_auth(result)
    }

    fn finish_auth(&self, result: Result<AuthResponse, ApiError>) -> Result<(), ApiError> {
        let outcome = match result {
            Ok(response) => {
                self.set_auth_data(response);
                Ok(())
            }
            Err(err) => {
                log::warn!("session: authentication failed: {err}");
                self.state.update_state(|s| s.error = Some(err.to_string()));
                Err(err)
            }
        };
        self.state.update_state(|s| s.loading = false);
        outcome
    }

    /// Exchange the held refresh token for a new token pair.
    ///
    /// Without a refresh token this logs out and succeeds without calling
    /// the API.
    ///
    /// # Errors
    ///
    /// Returns the API failure after logging out.
    pub async fn refresh_auth_token(&self) -> Result<(), ApiError> {
        let Some(refresh_token) = self.state.with_state(|s| non_empty(s.refresh_token.clone())).flatten() else {
            log::debug!("session: no refresh token held, logging out");
            self.logout();
            return Ok(());
        };

        match self.api.refresh_token(&refresh_token).await {
            Ok(response) => {
                self.set_auth_data(response);
                Ok(())
            }
            Err(err) => {
                log::warn!("session: token refresh failed: {err}");
                self.logout();
                Err(err)
            }
        }
    }

    /// Resolve the user owning the held token. No-op without a token.
    ///
    /// # Errors
    ///
    /// Returns the API failure; the session is logged out and the message is
    /// left in `error`.
    pub async fn fetch_current_user(&self) -> Result<(), ApiError> {
        let Some(token) = self.state.with_state(|s| non_empty(s.token.clone())).flatten() else {
            return Ok(());
        };

        self.state.update_state(SessionState::begin_request);
        let outcome = match self.api.current_user(&token).await {
            Ok(user) => {
                self.state.update_state(|s| s.user = Some(user));
                Ok(())
            }
            Err(err) => {
                log::warn!("session: fetching current user failed: {err}");
                self.state.update_state(|s| s.error = Some(err.to_string()));
                self.logout();
                Err(err)
            }
        };
        self.state.update_state(|s| s.loading = false);
        outcome
    }

    /// Store the user and both tokens, in memory and in persistent storage.
    pub fn set_auth_data(&self, response: AuthResponse) {
        let AuthResponse { user, token, refresh_token } = response;
        self.storage.set(TOKEN_KEY, &token);
        self.storage.set(REFRESH_TOKEN_KEY, &refresh_token);
        self.state.update_state(|s| {
            s.user = Some(user);
            s.token = Some(token);
            s.refresh_token = Some(refresh_token);
        });
    }

    /// Forget the user and both tokens, in memory and in persistent storage.
    pub fn logout(&self) {
        self.state.update_state(SessionState::clear_identity);
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
    }

    pub fn clear_error(&self) {
        self.state.update_state(|s| s.error = None);
    }
}

//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: it reads route params, kicks off
//! store actions on mount, and renders store state. Form and display rules
//! live in small pure helpers next to each page so they test without a
//! browser.

pub mod admin;
pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod notifications;
pub mod projects;
pub mod scripts;
pub mod telegram_auth;


use std::future::Future;

use crate::net::api::ApiError;

/// Run a store action in the browser. Server rendering never starts one.
pub(crate) fn spawn_action(action: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(action);
    #[cfg(not(feature = "hydrate"))]
    drop(action);
}

/// Parse a numeric route parameter.
pub(crate) fn parse_id(raw: Option<String>) -> Option<i64> {
    raw?.trim().parse().ok()
}

/// Log the outcome of a store action a page started. The store has already
/// mirrored any failure into its `error` field for display; this is the
/// page's end of the `Result`. Returns whether the action succeeded.
pub(crate) fn settle(action: &str, result: Result<(), ApiError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) if err.is_auth_failure() => {
            log::warn!("{action}: credentials rejected ({err})");
            false
        }
        Err(err) => {
            log::debug!("{action}: {err}");
            false
        }
    }
}

//! Navigation guards consulted before every route transition.
//!
//! DESIGN
//! ======
//! A guard is a pure function from a [`NavigationIntent`] to a
//! [`GuardDecision`]. Guards never touch the router or the stores; the
//! navigator runs them in order and acts on the first redirect.
//!
//! The login route is guest-only, but signed-in visitors to it are left to
//! [`redirect_after_login_guard`] so the preserved `redirect` target is
//! honoured instead of always landing on the dashboard.

#[cfg(test)]
#[path = "guards_test.rs"]
mod guards_test;

use super::routes::{
    LANDING_PATH, REDIRECT_QUERY_KEY, ResolvedRoute, RouteName, is_local_path, login_path_with_redirect, resolve,
};

/// The slice of session state guards are allowed to see.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub admin: bool,
}

/// One attempted navigation. Immutable for the whole guard run.
#[derive(Clone, Copy, Debug)]
pub struct NavigationIntent<'a> {
    pub to: &'a ResolvedRoute,
    pub from: Option<&'a ResolvedRoute>,
    pub session: SessionSnapshot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Abandon this navigation and start a new one at the given full path.
    Redirect(String),
}

pub type Guard = fn(&NavigationIntent<'_>) -> GuardDecision;

/// Guards in evaluation order.
pub const DEFAULT_GUARDS: [Guard; 2] = [auth_guard, redirect_after_login_guard];

/// Enforce the target's access flags against the session.
#[must_use]
pub fn auth_guard(intent: &NavigationIntent<'_>) -> GuardDecision {
    let meta = intent.to.meta;
    let session = intent.session;

    if meta.requires_auth && !session.authenticated {
        return GuardDecision::Redirect(login_path_with_redirect(&intent.to.full_path));
    }
    if meta.requires_admin && !session.admin {
        return GuardDecision::Redirect(LANDING_PATH.to_owned());
    }
    if meta.requires_guest && session.authenticated && intent.to.name != RouteName::Login {
        return GuardDecision::Redirect(LANDING_PATH.to_owned());
    }
    GuardDecision::Allow
}

/// Send a signed-in visitor of the login page to their preserved target.
#[must_use]
pub fn redirect_after_login_guard(intent: &NavigationIntent<'_>) -> GuardDecision {
    if intent.to.name != RouteName::Login || !intent.session.authenticated {
        return GuardDecision::Allow;
    }

    let target = intent
        .to
        .query_value(REDIRECT_QUERY_KEY)
        .filter(|path| is_local_path(path) && resolve(path).name != RouteName::Login)
        .unwrap_or(LANDING_PATH);
    GuardDecision::Redirect(target.to_owned())
}

/// First non-`Allow` decision of `guards`, or `Allow`.
#[must_use]
pub fn run_guards(guards: &[Guard], intent: &NavigationIntent<'_>) -> GuardDecision {
    guards
        .iter()
        .map(|guard| guard(intent))
        .find(|decision| *decision != GuardDecision::Allow)
        .unwrap_or(GuardDecision::Allow)
}

//! Client-side routing: route table, guards, and the navigator that ties
//! them to the session.
//!
//! SYSTEM CONTEXT
//! ==============
//! `app::RouteGuard` calls [`navigate`] whenever the location changes and
//! replaces the location when the outcome differs from what was requested.

pub mod guards;
pub mod routes;


use guards::{DEFAULT_GUARDS, Guard, GuardDecision, NavigationIntent, SessionSnapshot, run_guards};
use routes::{ResolvedRoute, resolve, static_redirect};

/// Redirect hops followed before a navigation is abandoned.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("navigation to {0} exceeded {MAX_REDIRECTS} redirects")]
    RedirectLoop(String),
}

/// Where a navigation ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub route: ResolvedRoute,
    /// Originally requested full path, when any redirect happened.
    pub redirected_from: Option<String>,
}

/// Resolve `full_path`, run [`DEFAULT_GUARDS`], and follow redirects until
/// a route is allowed.
///
/// # Errors
///
/// Returns [`NavigationError::RedirectLoop`] after [`MAX_REDIRECTS`] hops.
pub fn navigate(
    from: Option<&ResolvedRoute>,
    full_path: &str,
    session: SessionSnapshot,
) -> Result<Navigation, NavigationError> {
    navigate_with(&DEFAULT_GUARDS, from, full_path, session)
}

/// [`navigate`] over an explicit guard chain. Each redirect is a fresh pass
/// through every guard; up to [`MAX_REDIRECTS`] hops are followed.
///
/// # Errors
///
/// Returns [`NavigationError::RedirectLoop`] when the chain is still
/// redirecting after [`MAX_REDIRECTS`] hops.
pub fn navigate_with(
    guards: &[Guard],
    from: Option<&ResolvedRoute>,
    full_path: &str,
    session: SessionSnapshot,
) -> Result<Navigation, NavigationError> {
    let mut target = full_path.to_owned();
    let mut redirected_from: Option<String> = None;

    for _ in 0..=MAX_REDIRECTS {
        let path = target.split_once('?').map_or(target.as_str(), |(path, _)| path);
        if let Some(destination) = static_redirect(path) {
            redirected_from.get_or_insert_with(|| target.clone());
            target = destination.to_owned();
            continue;
        }

        let to = resolve(&target);
        let intent = NavigationIntent { to: &to, from, session };
        match run_guards(guards, &intent) {
            GuardDecision::Allow => return Ok(Navigation { route: to, redirected_from }),
            GuardDecision::Redirect(next) => {
                log::debug!("router: {} -> {next}", to.full_path);
                redirected_from.get_or_insert_with(|| target.clone());
                target = next;
            }
        }
    }

    log::warn!("router: giving up on {full_path} after {MAX_REDIRECTS} redirects");
    Err(NavigationError::RedirectLoop(full_path.to_owned()))
}

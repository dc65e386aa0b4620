use super::*;
use crate::router::routes::{ROUTES, parse_query};

const GUEST: SessionSnapshot = SessionSnapshot { authenticated: false, admin: false };
const MEMBER: SessionSnapshot = SessionSnapshot { authenticated: true, admin: false };
const ADMIN: SessionSnapshot = SessionSnapshot { authenticated: true, admin: true };

/// Concrete URL for a route pattern, filling every parameter.
fn sample_path(pattern: &str) -> String {
    pattern.replace(":token", "tok").replace(":id", "5").replace(":path*", "src/lib.rs").replace(":path_match*", "missing")
}

fn decide(guard: Guard, full_path: &str, session: SessionSnapshot) -> GuardDecision {
    let to = resolve(full_path);
    guard(&NavigationIntent { to: &to, from: None, session })
}

fn chain(full_path: &str, session: SessionSnapshot) -> GuardDecision {
    let to = resolve(full_path);
    run_guards(&DEFAULT_GUARDS, &NavigationIntent { to: &to, from: None, session })
}

// =============================================================
// auth_guard
// =============================================================

#[test]
fn every_auth_route_sends_guests_to_login_with_full_path() {
    for record in ROUTES.iter().filter(|r| r.meta.requires_auth) {
        let full_path = format!("{}?tab=files", sample_path(record.pattern));
        let GuardDecision::Redirect(target) = decide(auth_guard, &full_path, GUEST) else {
            panic!("{} should redirect", record.name);
        };
        let (path, query) = target.split_once('?').unwrap();
        assert_eq!(path, "/login");
        assert_eq!(parse_query(query).get(REDIRECT_QUERY_KEY), Some(&full_path), "{}", record.name);
    }
}

#[test]
fn every_admin_route_sends_members_to_landing_and_admits_admins() {
    for record in ROUTES.iter().filter(|r| r.meta.requires_admin) {
        let path = sample_path(record.pattern);
        assert_eq!(decide(auth_guard, &path, MEMBER), GuardDecision::Redirect(LANDING_PATH.to_owned()));
        assert_eq!(decide(auth_guard, &path, ADMIN), GuardDecision::Allow);
    }
}

#[test]
fn every_guest_route_sends_signed_in_users_to_landing() {
    for record in ROUTES.iter().filter(|r| r.meta.requires_guest) {
        let path = sample_path(record.pattern);
        assert_eq!(chain(&path, MEMBER), GuardDecision::Redirect(LANDING_PATH.to_owned()), "{}", record.name);
    }
}

#[test]
fn auth_routes_admit_signed_in_members() {
    for record in ROUTES.iter().filter(|r| r.meta.requires_auth && !r.meta.requires_admin) {
        assert_eq!(decide(auth_guard, &sample_path(record.pattern), MEMBER), GuardDecision::Allow);
    }
}

#[test]
fn guest_routes_admit_guests() {
    assert_eq!(decide(auth_guard, "/login", GUEST), GuardDecision::Allow);
    assert_eq!(decide(auth_guard, "/auth/telegram/tok", GUEST), GuardDecision::Allow);
}

#[test]
fn not_found_is_open_to_everyone() {
    for session in [GUEST, MEMBER, ADMIN] {
        assert_eq!(chain("/does/not/exist", session), GuardDecision::Allow);
    }
}

#[test]
fn auth_guard_leaves_signed_in_login_visits_to_redirect_guard() {
    assert_eq!(decide(auth_guard, "/login", MEMBER), GuardDecision::Allow);
}

// =============================================================
// redirect_after_login_guard
// =============================================================

#[test]
fn signed_in_login_visit_restores_redirect_query() {
    let decision = decide(redirect_after_login_guard, "/login?redirect=%2Fprojects%2F3", MEMBER);
    assert_eq!(decision, GuardDecision::Redirect("/projects/3".to_owned()));
}

#[test]
fn signed_in_login_visit_without_query_lands_on_dashboard() {
    assert_eq!(decide(redirect_after_login_guard, "/login", MEMBER), GuardDecision::Redirect(LANDING_PATH.to_owned()));
}

#[test]
fn empty_redirect_query_falls_back_to_landing() {
    assert_eq!(
        decide(redirect_after_login_guard, "/login?redirect=", MEMBER),
        GuardDecision::Redirect(LANDING_PATH.to_owned())
    );
}

#[test]
fn external_redirect_query_falls_back_to_landing() {
    assert_eq!(
        decide(redirect_after_login_guard, "/login?redirect=https%3A%2F%2Fevil.example", MEMBER),
        GuardDecision::Redirect(LANDING_PATH.to_owned())
    );
}

#[test]
fn redirect_back_to_login_falls_back_to_landing() {
    assert_eq!(
        decide(redirect_after_login_guard, "/login?redirect=%2Flogin", MEMBER),
        GuardDecision::Redirect(LANDING_PATH.to_owned())
    );
}

#[test]
fn guests_on_login_are_allowed() {
    assert_eq!(decide(redirect_after_login_guard, "/login?redirect=%2Fadmin", GUEST), GuardDecision::Allow);
}

#[test]
fn other_routes_pass_redirect_guard() {
    assert_eq!(decide(redirect_after_login_guard, "/projects?redirect=%2Fadmin", MEMBER), GuardDecision::Allow);
}

// =============================================================
// Chain
// =============================================================

#[test]
fn chain_restores_redirect_for_signed_in_login_visit() {
    assert_eq!(chain("/login?redirect=%2Fscripts", ADMIN), GuardDecision::Redirect("/scripts".to_owned()));
}

#[test]
fn chain_stops_at_first_redirect() {
    fn always_first(_: &NavigationIntent<'_>) -> GuardDecision {
        GuardDecision::Redirect("/first".to_owned())
    }
    fn always_second(_: &NavigationIntent<'_>) -> GuardDecision {
        GuardDecision::Redirect("/second".to_owned())
    }
    let guards: [Guard; 2] = [always_first, always_second];
    let to = resolve("/dashboard");
    let intent = NavigationIntent { to: &to, from: None, session: GUEST };
    assert_eq!(run_guards(&guards, &intent), GuardDecision::Redirect("/first".to_owned()));
}

#[test]
fn empty_chain_allows() {
    let to = resolve("/admin");
    let intent = NavigationIntent { to: &to, from: None, session: GUEST };
    assert_eq!(run_guards(&[], &intent), GuardDecision::Allow);
}

#[test]
fn guards_ignore_origin_route() {
    let from = resolve("/admin");
    let to = resolve("/projects");
    let with_origin = NavigationIntent { to: &to, from: Some(&from), session: GUEST };
    let without_origin = NavigationIntent { to: &to, from: None, session: GUEST };
    assert_eq!(run_guards(&DEFAULT_GUARDS, &with_origin), run_guards(&DEFAULT_GUARDS, &without_origin));
}

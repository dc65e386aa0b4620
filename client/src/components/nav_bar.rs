//! Top navigation bar with section links, breadcrumb and sign-out.
//!
//! SYSTEM CONTEXT
//! ==============
//! Link visibility follows the same session snapshot the guards use, so the
//! bar never offers a link the router would bounce.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::app::{Notifications, Session};
use crate::router::guards::SessionSnapshot;
use crate::router::routes::{RouteName, resolve};
use crate::state::auth::SessionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

const SECTIONS: [(RouteName, &str, &str); 5] = [
    (RouteName::Dashboard, "/dashboard", "Dashboard"),
    (RouteName::Projects, "/projects", "Projects"),
    (RouteName::Scripts, "/scripts", "Scripts"),
    (RouteName::Notifications, "/notifications", "Notifications"),
    (RouteName::Admin, "/admin", "Admin"),
];

/// Section links the session may open. Guests get none.
#[must_use]
pub fn nav_links(session: SessionSnapshot) -> Vec<NavLink> {
    if !session.authenticated {
        return Vec::new();
    }
    SECTIONS
        .iter()
        .filter(|(name, _, _)| !name.record().meta.requires_admin || session.admin)
        .map(|&(_, href, label)| NavLink { href, label })
        .collect()
}

/// Breadcrumb label for the route at `path`.
#[must_use]
pub fn breadcrumb(path: &str) -> Option<&'static str> {
    resolve(path).meta.breadcrumb
}

/// Unread badge text; hidden at zero and capped for display.
#[must_use]
pub fn unread_badge(count: usize) -> Option<String> {
    match count {
        0 => None,
        1..=99 => Some(count.to_string()),
        _ => Some("99+".to_owned()),
    }
}

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<Session>();
    let notifications = expect_context::<Notifications>();
    let location = use_location();

    let snapshot = {
        let session = session.clone();
        Signal::derive(move || session.state().with(SessionState::snapshot))
    };
    let username = {
        let session = session.clone();
        Signal::derive(move || session.state().with(|s| s.user.as_ref().map(|u| u.username.clone())))
    };
    let crumb = Signal::derive(move || breadcrumb(&location.pathname.get()));
    let badge = Signal::derive(move || notifications.state().with(|s| unread_badge(s.unread_count())));
    let logout = Callback::new(move |()| {
        log::info!("session: signing out");
        session.logout();
    });

    view! {
        <Show when=move || snapshot.get().authenticated>
            <nav class="nav-bar">
                <span class="nav-bar__brand">"LumaStack"</span>
                <ul class="nav-bar__links">
                    {move || {
                        nav_links(snapshot.get())
                            .into_iter()
                            .map(|link| {
                                let count = if link.href == "/notifications" { badge.get() } else { None };
                                view! {
                                    <li>
                                        <a href=link.href>{link.label}</a>
                                        {count.map(|c| view! { <span class="nav-bar__badge">{c}</span> })}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
                <span class="nav-bar__crumb">{move || crumb.get().unwrap_or_default()}</span>
                <span class="nav-bar__user">{move || username.get().unwrap_or_default()}</span>
                <button class="btn nav-bar__logout" on:click=move |_| logout.run(())>"Sign out"</button>
            </nav>
        </Show>
    }
}

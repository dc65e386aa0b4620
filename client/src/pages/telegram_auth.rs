//! Magic-link sign-in: `/auth/telegram/:token` exchanges the token for a
//! session, after which the route guard moves the visitor on.

#[cfg(test)]
#[path = "telegram_auth_test.rs"]
mod telegram_auth_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use super::{settle, spawn_action};
use crate::app::Session;

/// Usable magic-link token from the raw route parameter.
#[must_use]
pub fn magic_link_token(raw: Option<String>) -> Option<String> {
    raw.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())
}

#[component]
pub fn TelegramAuthPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let params = use_params_map();
    let attempted = RwSignal::new(None::<String>);

    let error = {
        let session = session.clone();
        Signal::derive(move || session.state().with(|s| s.error.clone()))
    };

    Effect::new(move || {
        let Some(token) = magic_link_token(params.read().get("token")) else {
            return;
        };
        if attempted.get_untracked().as_deref() == Some(token.as_str()) {
            return;
        }
        attempted.set(Some(token.clone()));
        let session = session.clone();
        spawn_action(async move {
            settle("login_with_telegram", session.login_with_telegram(&token).await);
        });
    });

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Telegram sign in"</h1>
                {move || match error.get() {
                    Some(message) => view! {
                        <p class="login-card__error">{message}</p>
                        <a href="/login">"Use username and password instead"</a>
                    }
                        .into_any(),
                    None => view! { <p class="login-card__subtitle">"Verifying your link..."</p> }.into_any(),
                }}
            </div>
        </div>
    }
}

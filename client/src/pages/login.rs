//! Username + password sign-in page.
//!
//! SYSTEM CONTEXT
//! ==============
//! A successful login only updates the session. The route guard notices the
//! signed-in visitor on `/login` and forwards them to the preserved
//! `redirect` target, so this page never navigates itself.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use super::spawn_action;
use crate::app::Session;
use crate::components::error_banner::ErrorBanner;
use crate::net::types::LoginCredentials;
use crate::schemas::ValidationErrors;
use crate::schemas::auth::{LoginInput, PASSWORD, USERNAME, validate_login};

/// Validate the raw form fields into credentials for the API.
///
/// # Errors
///
/// Returns the field-keyed messages to show under each input.
pub fn credentials_from_form(username: &str, password: &str) -> Result<LoginCredentials, ValidationErrors> {
    let input = LoginInput { username: username.to_owned(), password: password.to_owned() };
    validate_login(&input).map(|LoginInput { username, password }| LoginCredentials { username, password })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let field_errors = RwSignal::new(ValidationErrors::new());

    let busy = {
        let session = session.clone();
        Signal::derive(move || session.state().with(|s| s.loading))
    };
    let error = {
        let session = session.clone();
        Signal::derive(move || session.state().with(|s| s.error.clone()))
    };
    let dismiss = {
        let session = session.clone();
        Callback::new(move |()| session.clear_error())
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        match credentials_from_form(&username.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => {
                field_errors.set(ValidationErrors::new());
                let session = session.clone();
                spawn_action(async move {
                    if session.login(&credentials).await.is_ok() {
                        password.set(String::new());
                    }
                });
            }
            Err(errors) => field_errors.set(errors),
        }
    };

    let field_error = move |field: &'static str| move || field_errors.with(|e| e.first(field));

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"LumaStack"</h1>
                <p class="login-card__subtitle">"Sign in to the dashboard"</p>
                <ErrorBanner message=error on_dismiss=dismiss/>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <p class="login-form__error">{field_error(USERNAME)}</p>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <p class="login-form__error">{field_error(PASSWORD)}</p>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

//! Fallback page for paths outside the route table.

use leptos::prelude::*;

use crate::router::routes::LANDING_PATH;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"Page not found"</h1>
            <a href=LANDING_PATH>"Back to the dashboard"</a>
        </div>
    }
}

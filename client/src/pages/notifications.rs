//! Notification inbox: unread first, with read/delete actions.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use leptos::prelude::*;

use super::{settle, spawn_action};
use crate::app::Notifications;
use crate::components::error_banner::ErrorBanner;
use crate::net::types::{Notification, NotificationKind};

#[must_use]
pub fn kind_label(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Commit => "Commit",
        NotificationKind::Comment => "Comment",
        NotificationKind::Mention => "Mention",
        NotificationKind::ScriptExecution => "Script run",
    }
}

/// Link target for a notification, when it belongs to a project.
#[must_use]
pub fn notification_href(notification: &Notification) -> Option<String> {
    let project_id = notification.project_id?;
    Some(match notification.kind {
        NotificationKind::Commit => format!("/projects/{project_id}/commits"),
        _ => format!("/projects/{project_id}"),
    })
}

#[derive(Clone, Copy)]
enum Action {
    MarkRead(i64),
    MarkAllRead,
    Delete(i64),
}

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let notifications = expect_context::<Notifications>();

    {
        let notifications = notifications.clone();
        spawn_action(async move {
            settle("fetch_notifications", notifications.fetch_notifications().await);
        });
    }

    let error = {
        let notifications = notifications.clone();
        Signal::derive(move || notifications.state().with(|s| s.error.clone()))
    };
    let dismiss = {
        let notifications = notifications.clone();
        Callback::new(move |()| notifications.clear_error())
    };
    let unread = {
        let notifications = notifications.clone();
        Signal::derive(move || notifications.state().with(|s| s.unread_notifications().into_iter().cloned().collect::<Vec<_>>()))
    };
    let read = {
        let notifications = notifications.clone();
        Signal::derive(move || notifications.state().with(|s| s.read_notifications().into_iter().cloned().collect::<Vec<_>>()))
    };
    let act = Callback::new(move |action: Action| {
        let notifications = notifications.clone();
        spawn_action(async move {
            let result = match action {
                Action::MarkRead(id) => notifications.mark_as_read(id).await,
                Action::MarkAllRead => notifications.mark_all_as_read().await,
                Action::Delete(id) => notifications.delete_notification(id).await,
            };
            settle("notification action", result);
        });
    });

    let rows = move |items: Vec<Notification>| {
        items
            .into_iter()
            .map(|n| {
                let id = n.id;
                let is_read = n.is_read;
                let href = notification_href(&n);
                view! {
                    <li class=if is_read { "notification notification--read" } else { "notification" }>
                        <span class="notification__kind">{kind_label(n.kind)}</span>
                        <strong class="notification__title">
                            {match href {
                                Some(href) => view! { <a href=href>{n.title}</a> }.into_any(),
                                None => n.title.into_any(),
                            }}
                        </strong>
                        <p class="notification__message">{n.message}</p>
                        <span class="notification__time">{n.created_at}</span>
                        <Show when=move || !is_read>
                            <button class="btn" on:click=move |_| act.run(Action::MarkRead(id))>"Mark read"</button>
                        </Show>
                        <button class="btn btn--danger" on:click=move |_| act.run(Action::Delete(id))>"Delete"</button>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <div class="notifications-page">
            <header class="notifications-page__header">
                <h1>"Notifications"</h1>
                <button
                    class="btn"
                    disabled=move || unread.with(Vec::is_empty)
                    on:click=move |_| act.run(Action::MarkAllRead)
                >
                    "Mark all read"
                </button>
            </header>
            <ErrorBanner message=error on_dismiss=dismiss/>
            <h2>"Unread"</h2>
            <ul class="notification-list">{move || rows(unread.get())}</ul>
            <h2>"Earlier"</h2>
            <ul class="notification-list">{move || rows(read.get())}</ul>
        </div>
    }
}

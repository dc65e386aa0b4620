//! Notification inbox state.
//!
//! DESIGN
//! ======
//! Read/delete actions confirm with the API before touching the local list,
//! so a failed request never leaves the inbox showing a change the backend
//! did not make.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use std::sync::Arc;

use super::StoreCell;
use crate::net::api::{ApiError, DashboardApi};
use crate::net::types::{Notification, WsMessage, WsMessageKind};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationsState {
    /// Newest first.
    pub notifications: Vec<Notification>,
    pub loading: bool,
    pub error: Option<String>,
}

impl NotificationsState {
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    #[must_use]
    pub fn unread_notifications(&self) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| !n.is_read).collect()
    }

    #[must_use]
    pub fn read_notifications(&self) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| n.is_read).collect()
    }
}

pub struct NotificationsStore<C> {
    state: C,
    api: Arc<dyn DashboardApi>,
}

impl<C: Clone> Clone for NotificationsStore<C> {
    fn clone(&self) -> Self {
        Self { state: self.state.clone(), api: Arc::clone(&self.api) }
    }
}

impl<C: StoreCell<NotificationsState>> NotificationsStore<C> {
    pub fn new(state: C, api: Arc<dyn DashboardApi>) -> Self {
        Self { state, api }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    fn fail(&self, what: &str, err: ApiError) -> ApiError {
        log::warn!("notifications: {what} failed: {err}");
        self.state.update_state(|s| s.error = Some(err.to_string()));
        err
    }

    /// Load the inbox.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also left in `error`.
    pub async fn fetch_notifications(&self) -> Result<(), ApiError> {
        self.state.update_state(|s| {
            s.loading = true;
            s.error = None;
        });
        let outcome = match self.api.list_notifications().await {
            Ok(notifications) => {
                self.state.update_state(|s| s.notifications = notifications);
                Ok(())
            }
            Err(err) => Err(self.fail("fetch notifications", err)),
        };
        self.state.update_state(|s| s.loading = false);
        outcome
    }

    /// Mark one notification read, locally once the API confirms.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also left in `error`.
    pub async fn mark_as_read(&self, notification_id: i64) -> Result<(), ApiError> {
        self.api.mark_notification_read(notification_id).await.map_err(|err| self.fail("mark as read", err))?;
        self.state.update_state(|s| {
            if let Some(notification) = s.notifications.iter_mut().find(|n| n.id == notification_id) {
                notification.is_read = true;
            }
        });
        Ok(())
    }

    /// Mark the whole inbox read, locally once the API confirms.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also left in `error`.
    pub async fn mark_all_as_read(&self) -> Result<(), ApiError> {
        self.api.mark_all_notifications_read().await.map_err(|err| self.fail("mark all as read", err))?;
        self.state.update_state(|s| {
            for notification in &mut s.notifications {
                notification.is_read = true;
            }
        });
        Ok(())
    }

    /// Delete one notification, locally once the API confirms.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also left in `error`.
    pub async fn delete_notification(&self, notification_id: i64) -> Result<(), ApiError> {
        self.api.delete_notification(notification_id).await.map_err(|err| self.fail("delete", err))?;
        self.state.update_state(|s| s.notifications.retain(|n| n.id != notification_id));
        Ok(())
    }

    /// Prepend a notification that arrived out of band.
    pub fn add_notification(&self, notification: Notification) {
        self.state.update_state(|s| s.notifications.insert(0, notification));
    }

    /// Feed a realtime message; only `notification` messages are taken.
    /// Returns whether the message was added to the inbox.
    pub fn ingest(&self, message: &WsMessage) -> bool {
        if message.kind != WsMessageKind::Notification {
            return false;
        }
        match serde_json::from_value::<Notification>(message.data.clone()) {
            Ok(notification) => {
                self.add_notification(notification);
                true
            }
            Err(e) => {
                log::warn!("notifications: dropping malformed realtime payload: {e}");
                false
            }
        }
    }

    pub fn clear_error(&self) {
        self.state.update_state(|s| s.error = None);
    }
}

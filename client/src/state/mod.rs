//! Dashboard stores: session, projects, notifications, scripts.
//!
//! DESIGN
//! ======
//! Each store is a plain state struct plus an action object that owns the
//! API handle. The action object is generic over [`StoreCell`], so the app
//! keeps state in a Leptos `RwSignal` while tests use `Rc<RefCell<_>>`.
//! Stores are built once in `app::App` and handed out through context.

pub mod auth;
pub mod notifications;
pub mod projects;
pub mod scripts;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

/// Shared, mutable home of one store's state.
///
/// Both methods return `None` only when the backing cell is gone (a disposed
/// signal); callers treat that as "nothing to do".
pub trait StoreCell<T> {
    fn with_state<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R>;
    fn update_state<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
}

impl<T> StoreCell<T> for Rc<RefCell<T>> {
    fn with_state<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<T: Send + Sync + 'static> StoreCell<T> for RwSignal<T> {
    fn with_state<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.try_update(f)
    }
}

//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard chrome shared by every page while reading
//! stores from Leptos context providers.

pub mod error_banner;
pub mod nav_bar;

//! Networking modules for the dashboard API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the backend seam the stores call through, and `types`
//! defines the shared wire schema.

pub mod api;
pub mod types;

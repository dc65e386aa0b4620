//! # lumastack
//!
//! Axum host for the LumaStack dashboard: Leptos SSR for the client crate,
//! the `/api` and `/health` endpoints, and the `create-admin` bootstrap
//! command backed by the `users` table.

pub mod cli;
pub mod config;
pub mod db;
pub mod password;
pub mod routes;
pub mod state;

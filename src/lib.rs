// SPDX-License-Identifier: MIT

//! BikeGuard: personal-safety tracking API
//!
//! This crate provides the backend API for logging rides, reporting
//! maintenance issues, triggering SOS alerts and exporting ride summaries.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod notify;
pub mod routes;
pub mod time_utils;

use config::Config;
use db::Store;
use notify::Notifier;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub notifier: Notifier,
}

// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod issue;
pub mod ride;
pub mod sos;
pub mod stats;
pub mod user;

pub use issue::Issue;
pub use ride::Ride;
pub use sos::SosEvent;
pub use stats::DashboardStats;
pub use user::{ActiveRide, Contact, PublicUser, Role, User};

// SPDX-License-Identifier: MIT

//! JSON-document persistence.

pub mod store;

pub use store::{Document, Store};

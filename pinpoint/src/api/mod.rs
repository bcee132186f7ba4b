//! Public API module.
//!
//! This module contains the user-facing types of the `pinpoint` crate.

pub mod models;
pub mod session;

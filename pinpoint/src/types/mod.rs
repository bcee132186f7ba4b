//! Type definitions and constants.
//!
//! This module contains D-Bus constants, flag types and report layout values.

pub(crate) mod constants;
pub(crate) mod flags;

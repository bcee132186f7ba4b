//! Conversion helpers shared by the scan and location modules.

pub(crate) mod utils;

//! Core logic: authorization gate, platform backends and report rendering.

pub(crate) mod authorization;
pub(crate) mod location;
pub(crate) mod report;
pub(crate) mod scan;

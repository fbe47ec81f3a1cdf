//! CLI library components for the MTZ header viewer.

pub mod logging;
pub mod summary;

//! CLI library components for the SAF packager.

pub mod logging;
pub mod pipeline;

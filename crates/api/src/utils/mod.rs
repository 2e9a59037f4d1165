//! Binary-side helpers

pub mod command_helpers;
pub mod logging;

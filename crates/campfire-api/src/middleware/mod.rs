//! Cross-cutting HTTP layers.

pub mod cors;
pub mod logging;

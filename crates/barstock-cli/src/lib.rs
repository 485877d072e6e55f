//! Library half of the `barstock` command: logging setup and table rendering.

pub mod logging;
pub mod render;

//! CLI library components for feednav.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
pub mod steps;
pub mod summary;

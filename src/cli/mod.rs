//! Command-line interface module.

mod args;
pub mod check;
mod common;
pub mod render;

pub use args::{Cli, Commands, OutputFormat, RenderArgs};

//! CLI module graph.

pub mod command;
pub mod diagnostic;
pub mod food;
pub mod incidents;
pub mod orders;
pub mod output;
pub mod paths;
pub mod purchase;

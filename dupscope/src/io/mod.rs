//! File-backed collaborators and CLI I/O helpers.

pub mod config;
pub mod expr;
pub mod inventory;
pub mod report;
pub mod resources;
pub mod state;

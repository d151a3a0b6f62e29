//! Command implementations

pub mod filters;
pub mod list;
pub mod preview;
pub mod show;
pub mod theme;

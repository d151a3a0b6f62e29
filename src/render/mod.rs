//! Rendering of post lists and post detail pages

mod detail;
mod list;

pub use detail::{DetailRenderer, PostView};
pub use list::{ListRenderer, ListView, PostCard};

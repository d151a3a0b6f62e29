//! Show or toggle the stored theme

use anyhow::Result;

use crate::theme::Theme;
use crate::Blog;

pub fn run(blog: &Blog, toggle: bool) -> Result<()> {
    let mut manager = blog.theme_manager(Theme::detect_system());

    if toggle {
        manager.toggle()?;
    }

    let current = manager.current();
    println!("{} {}", current.icon(), current);
    Ok(())
}

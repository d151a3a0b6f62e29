//! Render a markdown file that is not listed in the index

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::render::DetailRenderer;
use crate::Blog;

pub fn run(blog: &Blog, path: &Path, html: bool) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let document = blog.repository().preview(&file, &raw, blog.config.today());
    tracing::debug!("Previewing {} as {}", path.display(), document.slug);

    let renderer = DetailRenderer::new(&blog.config);
    let view = renderer.render_detail(&document);
    if html {
        println!("{}", renderer.to_html(&view));
    } else {
        println!("{}", renderer.to_text(&view));
    }

    Ok(())
}

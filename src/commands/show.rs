//! Show a single post

use anyhow::Result;

use crate::Blog;

/// Resolve `slug` from the index and print the post
///
/// With `html`, failures print the error page instead of returning an error.
pub async fn run(blog: &Blog, slug: &str, html: bool) -> Result<()> {
    let renderer = crate::render::DetailRenderer::new(&blog.config);
    let mut app = blog.app();

    let loaded = app.load().await.map(|_| ());
    let result = match loaded {
        Ok(()) => app.open_post(slug).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(view) if html => println!("{}", renderer.to_html(&view)),
        Ok(view) => println!("{}", renderer.to_text(&view)),
        Err(e) if html => {
            tracing::error!("Failed to show {}: {}", slug, e);
            println!("{}", renderer.render_error(e.user_message(&blog.config.strings())));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

//! List posts, optionally filtered

use anyhow::Result;

use crate::Blog;

/// Active filters for `list`
#[derive(Debug, Default, Clone)]
pub struct ListOptions {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub query: Option<String>,
    /// Print the list markup instead of plain text
    pub html: bool,
}

/// Load the index, apply the filters and print the resulting list
///
/// With `html`, a failed load prints the error state instead of returning an error.
pub async fn run(blog: &Blog, options: &ListOptions) -> Result<()> {
    let renderer = crate::render::ListRenderer::new(&blog.config);
    let mut app = blog.app();

    if let Err(e) = app.load().await.map(|_| ()) {
        if !options.html {
            return Err(e.into());
        }
        tracing::error!("Failed to load the post list: {}", e);
        println!("{}", renderer.render_error(e.user_message(&blog.config.strings())));
        return Ok(());
    }

    if let Some(category) = &options.category {
        app.set_category(category);
    }
    if let Some(tag) = &options.tag {
        app.set_tag(tag);
    }
    if let Some(query) = &options.query {
        app.set_query(query);
    }

    let view = app.view();
    let output = if options.html {
        renderer.to_html(&view)
    } else {
        renderer.to_text(&view)
    };
    println!("{}", output);

    Ok(())
}

//! Print the category and tag options

use anyhow::Result;

use crate::search::FilterEngine;
use crate::Blog;

pub async fn run(blog: &Blog) -> Result<()> {
    let mut repository = blog.repository();
    let posts = repository.load_index().await?.to_vec();

    let mut engine = FilterEngine::new();
    engine.set_posts(posts);

    let strings = blog.config.strings();
    let categories = engine.categories();
    println!("Categories ({}):", categories.len());
    println!("  {}", strings.all);
    for category in categories {
        println!("  {}", category);
    }

    let tags = engine.tags();
    println!("Tags ({}):", tags.len());
    println!("  {}", strings.all);
    for tag in tags {
        println!("  {}", tag);
    }

    Ok(())
}

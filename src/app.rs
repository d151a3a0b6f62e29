//! List and detail pages wired together
//!
//! The repository feeds the filter engine; the list renderer listens to the
//! engine's results. Each collaborator is handed in explicitly.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::content::{PostRepository, Transport};
use crate::error::BlogError;
use crate::render::{DetailRenderer, ListRenderer, ListView, PostView};
use crate::search::FilterEngine;

/// The blog front page plus detail lookups
pub struct BlogApp<T> {
    repository: PostRepository<T>,
    engine: FilterEngine,
    details: DetailRenderer,
    view: Rc<RefCell<ListView>>,
}

impl<T: Transport> BlogApp<T> {
    /// Subscribe `list` to the engine's results and assemble the app
    pub fn new(
        repository: PostRepository<T>,
        mut engine: FilterEngine,
        list: ListRenderer,
        details: DetailRenderer,
    ) -> Self {
        let view = Rc::new(RefCell::new(list.render_list(&[])));

        let sink = Rc::clone(&view);
        engine.subscribe(move |results| {
            *sink.borrow_mut() = list.render_list(results.posts);
        });

        Self {
            repository,
            engine,
            details,
            view,
        }
    }

    /// Load the index and show every post
    pub async fn load(&mut self) -> Result<Ref<'_, ListView>, BlogError> {
        let posts = self.repository.load_index().await?.to_vec();
        self.engine.set_posts(posts);
        self.engine.apply();
        Ok(self.view())
    }

    pub fn set_category(&mut self, value: &str) -> Ref<'_, ListView> {
        self.engine.set_category(value);
        self.refresh()
    }

    pub fn set_tag(&mut self, value: &str) -> Ref<'_, ListView> {
        self.engine.set_tag(value);
        self.refresh()
    }

    pub fn set_query(&mut self, text: &str) -> Ref<'_, ListView> {
        self.engine.set_query(text);
        self.refresh()
    }

    /// Reset category, tag and search
    pub fn clear_all(&mut self) -> Ref<'_, ListView> {
        self.engine.clear_all();
        self.refresh()
    }

    /// The list as last rendered
    pub fn view(&self) -> Ref<'_, ListView> {
        self.view.borrow()
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    /// Resolve a post from the loaded index and render it
    pub async fn open_post(&self, slug: &str) -> Result<PostView, BlogError> {
        let document = self.repository.load_document(slug).await?;
        Ok(self.details.render_detail(&document))
    }

    fn refresh(&mut self) -> Ref<'_, ListView> {
        self.engine.apply();
        self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::MemoryTransport;

    const INDEX: &str = r#"[
        {"slug": "a", "title": "My Blog Post", "date": "2024-01-01", "file": "a.md",
         "category": "tech", "tags": ["js"]},
        {"slug": "b", "title": "CSS Grid", "date": "2024-01-02", "file": "b.md",
         "category": "tech", "tags": ["css"]},
        {"slug": "c", "title": "Holiday", "date": "2024-01-03", "file": "c.md",
         "category": "life", "tags": ["css"]}
    ]"#;

    fn app(transport: MemoryTransport) -> BlogApp<MemoryTransport> {
        let mut config = SiteConfig::default();
        config.highlight.enable = false;
        BlogApp::new(
            PostRepository::new(transport, &config),
            FilterEngine::new(),
            ListRenderer::new(&config),
            DetailRenderer::new(&config),
        )
    }

    fn slugs(view: &ListView) -> Vec<String> {
        view.cards().iter().map(|c| c.slug.clone()).collect()
    }

    #[tokio::test]
    async fn test_load_shows_all_posts() {
        let mut app = app(MemoryTransport::new().with("posts.json", INDEX));
        assert!(app.view().is_empty());

        let view = app.load().await.unwrap();
        assert_eq!(slugs(&view), ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_filters_and_search_combine() {
        let mut app = app(MemoryTransport::new().with("posts.json", INDEX));
        app.load().await.unwrap();

        assert_eq!(slugs(&app.set_category("tech")), ["a", "b"]);
        assert_eq!(slugs(&app.set_tag("css")), ["b"]);
        assert!(app.set_query("holiday").is_empty());
        assert_eq!(slugs(&app.clear_all()), ["a", "b", "c"]);
        assert_eq!(slugs(&app.set_query("BLOG")), ["a"]);
    }

    #[tokio::test]
    async fn test_open_post() {
        let transport = MemoryTransport::new()
            .with("posts.json", INDEX)
            .with("pages/b.md", "---\ntags: [css, grid]\n---\nLayouts\n");
        let mut app = app(transport);
        app.load().await.unwrap();

        let view = app.open_post("b").await.unwrap();
        assert_eq!(view.title, "CSS Grid");
        assert_eq!(view.tags, vec!["css", "grid"]);
        assert!(view.content.contains("<p>Layouts</p>"));
    }

    #[tokio::test]
    async fn test_failed_load_leaves_empty_state() {
        let mut app = app(MemoryTransport::new());
        assert!(matches!(app.load().await, Err(BlogError::IndexUnavailable(_))));
        assert!(app.view().is_empty());
    }
}

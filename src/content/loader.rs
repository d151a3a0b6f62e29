//! Post repository - loads the post index and individual documents

use chrono::NaiveDate;

use super::transport::Transport;
use super::{FrontMatter, MarkdownRenderer, PostDocument, PostSummary};
use crate::config::SiteConfig;
use crate::error::BlogError;

/// Loads the post index and assembles render-ready posts
pub struct PostRepository<T> {
    transport: T,
    renderer: MarkdownRenderer,
    config: SiteConfig,
    index: Vec<PostSummary>,
}

impl<T: Transport> PostRepository<T> {
    /// Create a repository fetching through `transport`
    pub fn new(transport: T, config: &SiteConfig) -> Self {
        Self::with_renderer(transport, config, MarkdownRenderer::from_config(config))
    }

    /// Create a repository with a preconfigured markdown renderer
    pub fn with_renderer(transport: T, config: &SiteConfig, renderer: MarkdownRenderer) -> Self {
        Self {
            transport,
            renderer,
            config: config.clone(),
            index: Vec::new(),
        }
    }

    /// Fetch the post index, keeping it for later document lookups.
    ///
    /// Posts keep their index order.
    pub async fn load_index(&mut self) -> Result<&[PostSummary], BlogError> {
        tracing::info!("Loading post index from {}", self.config.index_file);

        let raw = self.transport.fetch(&self.config.index_file).await.map_err(|e| {
            tracing::error!("Failed to fetch {}: {}", self.config.index_file, e);
            BlogError::from(e)
        })?;

        let posts: Vec<PostSummary> = serde_json::from_str(&raw).map_err(|e| {
            tracing::error!("Malformed post index {}: {}", self.config.index_file, e);
            BlogError::from(e)
        })?;

        tracing::info!("Loaded {} posts", posts.len());
        self.index = posts;
        Ok(&self.index)
    }

    /// The most recently loaded index; empty before the first load
    pub fn index(&self) -> &[PostSummary] {
        &self.index
    }

    /// Fetch and render the document of `slug` from the loaded index
    pub async fn load_document(&self, slug: &str) -> Result<PostDocument, BlogError> {
        let summary = self
            .index
            .iter()
            .find(|post| post.slug == slug)
            .ok_or_else(|| {
                tracing::warn!("No post with slug {:?} in the index", slug);
                BlogError::PostNotFound {
                    slug: slug.to_string(),
                }
            })?;
        tracing::debug!("Found index entry for {:?}: {:?}", slug, summary);

        let path = self.config.document_path(&summary.file);
        let raw = self.transport.fetch(&path).await.map_err(|source| {
            tracing::error!("Failed to fetch document {}: {}", path, source);
            BlogError::DocumentUnavailable {
                file: summary.file.clone(),
                source,
            }
        })?;
        tracing::debug!("Loaded document {}", path);

        Ok(self.build_document(summary, &raw))
    }

    /// Load the index, then the post; the detail page flow
    pub async fn open(&mut self, slug: &str) -> Result<PostDocument, BlogError> {
        self.load_index().await?;
        self.load_document(slug).await
    }

    /// Render a document that is not listed in the index
    pub fn preview(&self, file: &str, raw: &str, today: NaiveDate) -> PostDocument {
        let (front_matter, body) = FrontMatter::parse(raw);
        let content = self.renderer.render(body);
        PostDocument::standalone(file, front_matter, content, &self.config.strings(), today)
    }

    fn build_document(&self, summary: &PostSummary, raw: &str) -> PostDocument {
        let (front_matter, body) = FrontMatter::parse(raw);
        tracing::debug!("Parsed {} front-matter entries", front_matter.len());

        let content = self.renderer.render(body);
        tracing::debug!("Rendered {} to HTML", summary.file);

        PostDocument::assemble(summary, front_matter, content)
    }
}

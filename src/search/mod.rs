//! Filtering and free-text search over the loaded posts
//!
//! The visible set is always the posts matching the category, the tag and
//! the query at once, in index order. Listeners registered with
//! [`FilterEngine::subscribe`] receive every recomputed set.

use indexmap::IndexSet;

use crate::content::PostSummary;

/// Active filter components; `None` means unconstrained
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: Option<String>,
    pub tag: Option<String>,
    /// Query as the user typed it
    pub query: Option<String>,
}

impl FilterState {
    /// Whether `post` passes every active constraint
    pub fn matches(&self, post: &PostSummary) -> bool {
        if let Some(category) = &self.category {
            if &post.category != category {
                return false;
            }
        }

        if let Some(tag) = &self.tag {
            if !post.tags.iter().any(|t| t == tag) {
                return false;
            }
        }

        if let Some(query) = &self.query {
            let term = query.trim().to_lowercase();
            if !post.search_text().to_lowercase().contains(&term) {
                return false;
            }
        }

        true
    }

    pub fn is_unconstrained(&self) -> bool {
        self.category.is_none() && self.tag.is_none() && self.query.is_none()
    }
}

/// What listeners receive after each `apply`
#[derive(Debug, Clone, Copy)]
pub struct SearchResults<'a> {
    pub posts: &'a [PostSummary],
    /// The raw query text, empty when there is none
    pub query: &'a str,
}

type Listener = Box<dyn FnMut(&SearchResults<'_>)>;

/// Holds the full post set, the filter state and the visible set
#[derive(Default)]
pub struct FilterEngine {
    posts: Vec<PostSummary>,
    state: FilterState,
    visible: Vec<PostSummary>,
    listeners: Vec<Listener>,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working set; the active filters still apply to it
    pub fn set_posts(&mut self, posts: Vec<PostSummary>) {
        tracing::debug!("Filter engine received {} posts", posts.len());
        self.posts = posts;
        self.recompute();
    }

    /// Register a listener for recomputed results
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&SearchResults<'_>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Exact category match; empty means no constraint
    pub fn set_category(&mut self, value: &str) {
        self.state.category = non_empty(value);
    }

    /// Tag membership match; empty means no constraint
    pub fn set_tag(&mut self, value: &str) {
        self.state.tag = non_empty(value);
    }

    /// Case-insensitive text match; blank text means no constraint
    pub fn set_query(&mut self, text: &str) {
        self.state.query = if text.trim().is_empty() {
            None
        } else {
            Some(text.to_string())
        };
    }

    /// Drop every constraint
    pub fn clear_all(&mut self) {
        self.state = FilterState::default();
        tracing::debug!("All filters cleared");
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Recompute the visible set and notify listeners
    pub fn apply(&mut self) -> &[PostSummary] {
        self.recompute();

        tracing::info!(
            "Filters applied ({:?}): {} of {} posts",
            self.state,
            self.visible.len(),
            self.posts.len()
        );

        let results = SearchResults {
            posts: &self.visible,
            query: self.state.query.as_deref().unwrap_or_default(),
        };
        for listener in &mut self.listeners {
            listener(&results);
        }

        &self.visible
    }

    fn recompute(&mut self) {
        self.visible = self
            .posts
            .iter()
            .filter(|post| self.state.matches(post))
            .cloned()
            .collect();
    }

    /// The visible set as of the last `apply` (or `set_posts`)
    pub fn visible(&self) -> &[PostSummary] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Distinct non-empty categories, in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.posts.iter().map(|p| p.category.as_str()))
    }

    /// Distinct non-empty tags, in first-seen order
    pub fn tags(&self) -> Vec<&str> {
        distinct(
            self.posts
                .iter()
                .flat_map(|p| p.tags.iter().map(String::as_str)),
        )
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    values
        .filter(|value| !value.is_empty())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

//! Post list rendering

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::PostSummary;
use crate::helpers::{escape_html, escape_if, localized_date, post_href, tag_spans};
use crate::i18n::Strings;

/// Summary card for one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    pub slug: String,
    /// Navigation target of the card
    pub href: String,
    pub title: String,
    pub description: String,
    /// Localized publication date
    pub date: String,
    pub tags: Vec<String>,
}

/// The rendered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListView {
    /// Nothing matched the active filters
    NoResults { message: String },
    Cards { cards: Vec<PostCard> },
}

impl ListView {
    pub fn count(&self) -> usize {
        match self {
            ListView::NoResults { .. } => 0,
            ListView::Cards { cards } => cards.len(),
        }
    }

    pub fn cards(&self) -> &[PostCard] {
        match self {
            ListView::NoResults { .. } => &[],
            ListView::Cards { cards } => cards.as_slice(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListView::NoResults { .. })
    }
}

/// Turns filtered posts into summary cards
#[derive(Debug, Clone)]
pub struct ListRenderer {
    strings: Strings,
    language: String,
    post_page: String,
    escape: bool,
}

impl ListRenderer {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            strings: config.strings(),
            language: config.language.clone(),
            post_page: config.post_page.clone(),
            escape: config.escape_html,
        }
    }

    /// One card per post, or the explicit empty state
    pub fn render_list(&self, posts: &[PostSummary]) -> ListView {
        if posts.is_empty() {
            return ListView::NoResults {
                message: self.strings.no_results.to_string(),
            };
        }

        let cards = posts.iter().map(|post| self.card(post)).collect::<Vec<_>>();
        tracing::debug!("Rendered {} post cards", cards.len());
        ListView::Cards { cards }
    }

    fn card(&self, post: &PostSummary) -> PostCard {
        PostCard {
            slug: post.slug.clone(),
            href: post_href(&self.post_page, &post.slug),
            title: post.title.clone(),
            description: post.description.clone(),
            date: localized_date(&post.date, &self.language),
            tags: post.tags.clone(),
        }
    }

    /// Card grid markup with the visible count
    pub fn to_html(&self, view: &ListView) -> String {
        let count = format!(
            r#"<p class="posts-count">{} <span id="postsCount">{}</span></p>"#,
            self.strings.posts_count,
            view.count()
        );

        let body = match view {
            ListView::NoResults { message } => format!(
                r#"<div class="no-posts">{}</div>"#,
                escape_if(message, self.escape)
            ),
            ListView::Cards { cards } => format!(
                r#"<div class="posts-grid">{}</div>"#,
                cards.iter().map(|c| self.card_html(c)).collect::<String>()
            ),
        };

        format!("{}\n{}", count, body)
    }

    fn card_html(&self, card: &PostCard) -> String {
        format!(
            r#"
<a href="{href}" class="post-card">
  <h3 class="post-card-title">{title}</h3>
  <p class="post-card-description">{description}</p>
  <div class="post-card-meta">
    <span class="post-card-date">{date}</span>
    <div class="post-card-tags">{tags}</div>
  </div>
</a>"#,
            href = card.href,
            title = escape_if(&card.title, self.escape),
            description = escape_if(&card.description, self.escape),
            date = card.date,
            tags = tag_spans(&card.tags, self.escape),
        )
    }

    /// The grid content shown when the index could not be loaded
    pub fn render_error(&self, message: &str) -> String {
        format!(
            r#"<div class="error-message">
  <h2>{}</h2>
  <p>{}</p>
</div>"#,
            self.strings.error_heading,
            escape_html(message),
        )
    }

    /// Plain-text list for terminals
    pub fn to_text(&self, view: &ListView) -> String {
        match view {
            ListView::NoResults { message } => message.clone(),
            ListView::Cards { cards } => {
                let mut out = format!("{} ({}):\n", self.strings.posts_count, cards.len());
                for card in cards {
                    out.push_str(&format!("  {} - {} [{}]", card.date, card.title, card.slug));
                    if !card.tags.is_empty() {
                        out.push_str(&format!(" #{}", card.tags.join(" #")));
                    }
                    out.push('\n');
                    if !card.description.is_empty() {
                        out.push_str(&format!("      {}\n", card.description));
                    }
                }
                out
            }
        }
    }
}

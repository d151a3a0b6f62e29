//! Post detail page rendering

use serde::Serialize;

use crate::config::{CommentsConfig, SiteConfig};
use crate::content::PostDocument;
use crate::helpers::{escape_html, localized_date, tag_spans};
use crate::i18n::Strings;

/// Everything the detail page shows for one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub slug: String,
    pub title: String,
    /// Document title, `"{title} - {site title}"`
    pub page_title: String,
    /// Localized publication date
    pub date: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Pre-rendered body HTML
    pub content: String,
    /// Comment widget script tag, when comments are enabled
    pub comments: Option<String>,
}

/// Maps a post onto the fixed detail page template
#[derive(Debug, Clone)]
pub struct DetailRenderer {
    strings: Strings,
    language: String,
    site_title: String,
    escape: bool,
    comments: CommentsConfig,
}

impl DetailRenderer {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            strings: config.strings(),
            language: config.language.clone(),
            site_title: config.title.clone(),
            escape: config.escape_html,
            comments: config.comments.clone(),
        }
    }

    pub fn render_detail(&self, document: &PostDocument) -> PostView {
        let title = if document.title.is_empty() {
            self.strings.untitled.to_string()
        } else {
            document.title.clone()
        };
        let category = if document.category.is_empty() {
            self.strings.uncategorized.to_string()
        } else {
            document.category.clone()
        };

        PostView {
            slug: document.slug.clone(),
            page_title: format!("{} - {}", title, self.site_title),
            title,
            date: localized_date(&document.date, &self.language),
            category,
            tags: document.tags.clone(),
            content: document.content.clone(),
            comments: self
                .comments
                .enable
                .then(|| comment_script(&self.comments)),
        }
    }

    /// The page for a loaded post
    pub fn to_html(&self, view: &PostView) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="UTF-8">
  <title id="pageTitle">{page_title}</title>
</head>
<body>
  <article id="postContainer" class="post">
    <header class="post-header">
      <span id="postCategory" class="post-category">{category}</span>
      <h1 id="postTitle" class="post-title">{title}</h1>
      <time id="postDate" class="post-date">{date}</time>
      <div id="postTags" class="post-tags">{tags}</div>
    </header>
    <div id="postContent" class="post-content">
{content}
    </div>
  </article>
  <section id="commentsSection" class="comments">{comments}</section>
</body>
</html>
"#,
            lang = escape_html(&self.language),
            page_title = escape_html(&view.page_title),
            category = escape_html(&view.category),
            title = escape_html(&view.title),
            date = view.date,
            tags = tag_spans(&view.tags, self.escape),
            content = view.content,
            comments = view.comments.as_deref().unwrap_or_default(),
        )
    }

    /// The content area shown in place of a post that failed to load
    pub fn render_error(&self, message: &str) -> String {
        format!(
            r#"<div class="error-message">
  <h2>{heading}</h2>
  <p>{message}</p>
  <a href="/" class="back-to-list">{back}</a>
</div>"#,
            heading = self.strings.error_heading,
            message = escape_html(message),
            back = self.strings.back_to_list,
        )
    }

    /// Plain-text rendition for terminals
    pub fn to_text(&self, view: &PostView) -> String {
        let mut out = format!("{}\n{} | {}\n", view.title, view.date, view.category);
        if !view.tags.is_empty() {
            out.push_str(&format!("#{}\n", view.tags.join(" #")));
        }
        out.push('\n');
        out.push_str(&view.content);
        out
    }
}

/// Script tag that loads the comment widget
fn comment_script(config: &CommentsConfig) -> String {
    let attrs = [
        ("data-repo", config.repo.as_str()),
        ("data-repo-id", config.repo_id.as_str()),
        ("data-category", config.category.as_str()),
        ("data-category-id", config.category_id.as_str()),
        ("data-mapping", config.mapping.as_str()),
        ("data-strict", "0"),
        ("data-reactions-enabled", if config.reactions { "1" } else { "0" }),
        ("data-emit-metadata", "1"),
        ("data-input-position", config.input_position.as_str()),
        ("data-theme", config.theme.as_str()),
        ("data-lang", config.lang.as_str()),
        ("data-loading", "lazy"),
    ];

    let attrs: String = attrs
        .iter()
        .map(|(name, value)| format!(r#" {}="{}""#, name, escape_html(value)))
        .collect();

    format!(
        r#"<script src="{}"{} crossorigin="anonymous" async></script>"#,
        escape_html(&config.script),
        attrs
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;
    use chrono::NaiveDate;

    fn document() -> PostDocument {
        PostDocument {
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            description: String::new(),
            category: String::new(),
            tags: vec!["rust".to_string()],
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            file: "hello.md".to_string(),
            content: "<h1>Hi</h1>\n".to_string(),
            front_matter: FrontMatter::default(),
        }
    }

    #[test]
    fn test_render_detail() {
        let renderer = DetailRenderer::new(&SiteConfig::default());
        let view = renderer.render_detail(&document());
        assert_eq!(view.title, "Hello");
        assert_eq!(view.page_title, "Hello - Nova Estudio Creative Blog");
        assert_eq!(view.date, "2024년 1월 15일");
        assert_eq!(view.category, "기타");
        assert_eq!(view.comments, None);

        let html = renderer.to_html(&view);
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains(r#"<span class="post-tag">rust</span>"#));
        assert!(html.contains(r#"<title id="pageTitle">Hello - Nova Estudio Creative Blog</title>"#));
    }

    #[test]
    fn test_empty_title_uses_placeholder() {
        let mut doc = document();
        doc.title.clear();
        let view = DetailRenderer::new(&SiteConfig::default()).render_detail(&doc);
        assert_eq!(view.title, "제목 없음");
    }

    #[test]
    fn test_comment_widget() {
        let mut config = SiteConfig::default();
        config.comments.enable = true;
        config.comments.repo = "nova/blog".to_string();

        let renderer = DetailRenderer::new(&config);
        let view = renderer.render_detail(&document());
        let script = view.comments.clone().unwrap();
        assert!(script.starts_with(r#"<script src="https://giscus.app/client.js""#));
        assert!(script.contains(r#"data-repo="nova/blog""#));
        assert!(script.contains(r#"data-mapping="pathname""#));
        assert!(script.contains("async"));
        assert!(renderer.to_html(&view).contains(&script));
    }

    #[test]
    fn test_error_page() {
        let renderer = DetailRenderer::new(&SiteConfig::default());
        let html = renderer.render_error("게시글을 불러오는 중 오류가 발생했습니다.");
        assert!(html.contains("<h2>오류가 발생했습니다</h2>"));
        assert!(html.contains("back-to-list"));
    }

    #[test]
    fn test_text_output() {
        let config = SiteConfig {
            language: "en".to_string(),
            ..Default::default()
        };
        let renderer = DetailRenderer::new(&config);
        let text = renderer.to_text(&renderer.render_detail(&document()));
        assert!(text.starts_with("Hello\nJanuary 15, 2024 | Misc\n#rust\n"));
    }
}

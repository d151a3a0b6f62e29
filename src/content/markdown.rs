//! Markdown rendering with GFM extensions and syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::SiteConfig;
use crate::helpers::escape_html;

lazy_static! {
    /// Bare URL candidates in text; trailing punctuation is trimmed afterwards
    static ref BARE_URL: Regex = Regex::new(r"(?:https?://|www\.)[^\s<]*").unwrap();
}

/// Markdown renderer
///
/// Single newlines become `<br />`, GFM tables, strikethrough, task lists
/// and bare-URL autolinks are enabled. Output is not sanitized unless
/// `escape_html` is set, in which case raw HTML in the source is emitted
/// as text.
pub struct MarkdownRenderer {
    highlighter: Option<Highlighter>,
    escape_html: bool,
}

struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl MarkdownRenderer {
    /// Create a renderer without highlighting or escaping
    pub fn new() -> Self {
        Self {
            highlighter: None,
            escape_html: false,
        }
    }

    /// Create a renderer from site settings
    pub fn from_config(config: &SiteConfig) -> Self {
        let highlighter = if config.highlight.enable {
            Highlighter::load(&config.highlight.theme)
        } else {
            None
        };

        Self {
            highlighter,
            escape_html: config.escape_html,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        if markdown.is_empty() {
            return String::new();
        }

        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;
        // Inside a link or an image, where text is never autolinked
        let mut anchor_depth = 0usize;
        let mut pending_text = String::new();

        for event in parser {
            if let Some((lang, code)) = code_block.as_mut() {
                match event {
                    Event::Text(text) => code.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let html = self.render_code(code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(html)));
                        code_block = None;
                    }
                    _ => {}
                }
                continue;
            }

            if let Event::Text(text) = &event {
                pending_text.push_str(text);
                continue;
            }
            self.flush_text(&mut pending_text, anchor_depth > 0, &mut events);

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|l| l.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Start(Tag::Link { .. } | Tag::Image { .. }) => {
                    anchor_depth += 1;
                    events.push(event);
                }
                Event::End(TagEnd::Link | TagEnd::Image) => {
                    anchor_depth = anchor_depth.saturating_sub(1);
                    events.push(event);
                }
                Event::SoftBreak => events.push(Event::HardBreak),
                Event::Html(raw) | Event::InlineHtml(raw) if self.escape_html => {
                    events.push(Event::Text(raw));
                }
                _ => events.push(event),
            }
        }
        self.flush_text(&mut pending_text, anchor_depth > 0, &mut events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Emit buffered text, turning bare URLs into links outside of links and images
    fn flush_text(&self, pending: &mut String, in_anchor: bool, events: &mut Vec<Event<'_>>) {
        if pending.is_empty() {
            return;
        }
        let text = std::mem::take(pending);

        if in_anchor {
            events.push(Event::Text(CowStr::from(text)));
            return;
        }

        let mut last = 0;
        for m in BARE_URL.find_iter(&text) {
            let url = trim_autolink(m.as_str());
            if !has_host(url) {
                continue;
            }
            if m.start() > last {
                events.push(Event::Text(CowStr::from(text[last..m.start()].to_string())));
            }
            let href = if url.starts_with("www.") {
                format!("http://{}", url)
            } else {
                url.to_string()
            };
            events.push(Event::InlineHtml(CowStr::from(format!(
                r#"<a href="{}">{}</a>"#,
                escape_html(&href),
                escape_html(url)
            ))));
            last = m.start() + url.len();
        }
        if last < text.len() {
            events.push(Event::Text(CowStr::from(text[last..].to_string())));
        }
    }

    /// Render a fenced or indented code block
    fn render_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        if let Some(highlighter) = &self.highlighter {
            if let Some(html) = highlighter.highlight(code, lang) {
                return format!(r#"<figure class="highlight {}">{}</figure>"#, escape_html(lang), html);
            }
        }

        format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(code)
        )
    }
}

/// Drop trailing punctuation from an autolink candidate. A closing paren
/// stays while the URL has at least as many opening ones.
fn trim_autolink(mut url: &str) -> &str {
    while let Some(last) = url.chars().last() {
        let unbalanced_paren =
            last == ')' && url.matches(')').count() > url.matches('(').count();
        if unbalanced_paren || ".,:;\"'!?*_~]".contains(last) {
            url = &url[..url.len() - last.len_utf8()];
        } else {
            break;
        }
    }
    url
}

/// Whether anything is left after the scheme or `www.`
fn has_host(url: &str) -> bool {
    ["https://", "http://", "www."]
        .iter()
        .any(|prefix| url.len() > prefix.len() && url.starts_with(prefix))
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    fn load(theme_name: &str) -> Option<Self> {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!("Unknown highlight theme {:?}, highlighting disabled", theme_name);
                return None;
            }
        };

        Some(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    fn highlight(&self, code: &str, lang: &str) -> Option<String> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        match highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme) {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::debug!("Highlighting {} failed: {}", lang, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(MarkdownRenderer::new().render(""), "");
    }

    #[test]
    fn test_single_newline_is_line_break() {
        let html = MarkdownRenderer::new().render("first line\nsecond line");
        assert!(html.contains("first line<br />"));
        assert!(html.contains("second line"));
    }

    #[test]
    fn test_gfm_table() {
        let html = MarkdownRenderer::new().render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_bare_url_autolink() {
        let html = MarkdownRenderer::new().render("Visit https://example.com/path today.");
        assert!(html.contains(r#"<a href="https://example.com/path">https://example.com/path</a>"#));
        assert!(html.contains(" today."));

        let html = MarkdownRenderer::new().render("See www.example.org.");
        assert!(html.contains(r#"<a href="http://www.example.org">www.example.org</a>."#));
    }

    #[test]
    fn test_autolink_keeps_balanced_parens() {
        let html = MarkdownRenderer::new()
            .render("See https://en.wikipedia.org/wiki/Rust_(language) here");
        assert!(html.contains(
            r#"<a href="https://en.wikipedia.org/wiki/Rust_(language)">https://en.wikipedia.org/wiki/Rust_(language)</a> here"#
        ));

        let html = MarkdownRenderer::new().render("(docs at https://a.dev/guide).");
        assert!(html.contains(r#"<a href="https://a.dev/guide">https://a.dev/guide</a>)."#));
    }

    #[test]
    fn test_scheme_alone_is_not_linked() {
        let html = MarkdownRenderer::new().render("Type https:// then www. first");
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_image_alt_text_is_not_autolinked() {
        let html = MarkdownRenderer::new().render("![see https://example.com now](pic.png)");
        assert!(html.contains(r#"alt="see https://example.com now""#));
        assert!(!html.contains("&lt;a"));
    }

    #[test]
    fn test_explicit_links_are_not_relinked() {
        let html = MarkdownRenderer::new().render("[https://a.dev](https://a.dev)");
        assert_eq!(html.matches("<a ").count(), 1);
    }

    #[test]
    fn test_raw_html_passes_through_by_default() {
        let html = MarkdownRenderer::new().render("<div class=\"note\">hi</div>\n");
        assert!(html.contains("<div class=\"note\">"));
    }

    #[test]
    fn test_raw_html_escaped_when_enabled() {
        let mut config = SiteConfig {
            escape_html: true,
            ..Default::default()
        };
        config.highlight.enable = false;
        let html = MarkdownRenderer::from_config(&config).render("<script>alert(1)</script>\n");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_plain_code_block() {
        let html = MarkdownRenderer::new().render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<pre><code class="language-rust">fn main() {}"#));
    }

    #[test]
    fn test_highlighted_code_block() {
        let renderer = MarkdownRenderer::from_config(&SiteConfig::default());
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("highlight rust"));
        assert!(!html.contains("```"));
    }
}

//! Post models

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::frontmatter::{parse_date_string, FrontMatter};
use crate::i18n::Strings;

/// Accepts the date formats front-matter accepts, not only `YYYY-MM-DD`
fn flexible_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    parse_date_string(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {:?}", raw)))
}

/// Treats an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of the post index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Unique identifier used in detail links
    pub slug: String,

    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Single category, may be empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    #[serde(deserialize_with = "flexible_date")]
    pub date: NaiveDate,

    /// Markdown document, relative to the documents directory
    pub file: String,
}

impl PostSummary {
    /// Text searched by free-text queries
    pub fn search_text(&self) -> String {
        let mut parts = vec![
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ];
        parts.extend(self.tags.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// A post ready for its detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDocument {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub date: NaiveDate,
    pub file: String,

    /// Rendered HTML body
    pub content: String,

    /// Every front-matter entry, including keys the blog does not use
    pub front_matter: FrontMatter,
}

impl PostDocument {
    /// Merge a document's front-matter over its index entry; front-matter
    /// wins wherever it has a usable value
    pub fn assemble(summary: &PostSummary, front_matter: FrontMatter, content: String) -> Self {
        let title = front_matter
            .title()
            .map_or_else(|| summary.title.clone(), str::to_string);

        let description = front_matter
            .description()
            .map_or_else(|| summary.description.clone(), str::to_string);

        let category = front_matter
            .category()
            .map_or_else(|| summary.category.clone(), str::to_string);

        let tags = front_matter.tags().unwrap_or_else(|| summary.tags.clone());

        let date = front_matter.date().unwrap_or_else(|| {
            if front_matter.contains_key("date") {
                tracing::warn!("Unreadable date in {}, using the index date", summary.file);
            }
            summary.date
        });

        Self {
            slug: summary.slug.clone(),
            title,
            description,
            category,
            tags,
            date,
            file: summary.file.clone(),
            content,
            front_matter,
        }
    }

    /// Build a post from front-matter alone, for documents outside the index.
    ///
    /// Missing keys take their defaults: the localized placeholders for
    /// title and category, `today` for the date, nothing for tags and
    /// description.
    pub fn standalone(
        file: &str,
        front_matter: FrontMatter,
        content: String,
        strings: &Strings,
        today: NaiveDate,
    ) -> Self {
        let slug = std::path::Path::new(file)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file)
            .to_string();

        Self {
            slug,
            title: front_matter.title().unwrap_or(strings.untitled).to_string(),
            description: front_matter.description().unwrap_or_default().to_string(),
            category: front_matter
                .category()
                .unwrap_or(strings.uncategorized)
                .to_string(),
            tags: front_matter.tags().unwrap_or_default(),
            date: front_matter.date().unwrap_or(today),
            file: file.to_string(),
            content,
            front_matter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> PostSummary {
        PostSummary {
            slug: "hello".to_string(),
            title: "Index Title".to_string(),
            description: "From the index".to_string(),
            category: "tech".to_string(),
            tags: vec!["js".to_string()],
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            file: "hello.md".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()
    }

    #[test]
    fn test_deserialize_index_entry() {
        let json = r#"{"slug":"a","title":"A","date":"2024-01-15","file":"a.md"}"#;
        let post: PostSummary = serde_json::from_str(json).unwrap();
        assert_eq!(post.description, "");
        assert_eq!(post.category, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_deserialize_nulls_and_datetime() {
        let json = r#"{"slug":"a","title":"A","date":"2024-01-15 09:00:00","file":"a.md",
                       "description":null,"tags":null,"category":"life"}"#;
        let post: PostSummary = serde_json::from_str(json).unwrap();
        assert_eq!(post.category, "life");
        assert!(post.tags.is_empty());
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_deserialize_rejects_missing_required_fields() {
        let json = r#"{"slug":"a","title":"A","date":"2024-01-15"}"#;
        assert!(serde_json::from_str::<PostSummary>(json).is_err());

        let json = r#"{"slug":"a","title":"A","date":"soon","file":"a.md"}"#;
        assert!(serde_json::from_str::<PostSummary>(json).is_err());
    }

    #[test]
    fn test_search_text_joins_fields() {
        let mut post = summary();
        post.tags.push("css".to_string());
        assert_eq!(post.search_text(), "Index Title From the index tech js css");
    }

    #[test]
    fn test_front_matter_takes_precedence() {
        let (fm, _) = FrontMatter::parse(
            "---\ntitle: FM Title\ndate: 2023-03-01\ntags: [a, b]\ncategory: life\n---\n",
        );
        let doc = PostDocument::assemble(&summary(), fm, String::new());
        assert_eq!(doc.title, "FM Title");
        assert_eq!(doc.date, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
        assert_eq!(doc.tags, vec!["a", "b"]);
        assert_eq!(doc.category, "life");
        assert_eq!(doc.description, "From the index");
        assert_eq!(doc.slug, "hello");
    }

    #[test]
    fn test_index_fills_missing_front_matter() {
        let doc = PostDocument::assemble(&summary(), FrontMatter::default(), "<p>x</p>".to_string());
        assert_eq!(doc.title, "Index Title");
        assert_eq!(doc.date, summary().date);
        assert_eq!(doc.tags, vec!["js"]);
        assert_eq!(doc.content, "<p>x</p>");
    }

    #[test]
    fn test_unreadable_front_matter_date_uses_index() {
        let (fm, _) = FrontMatter::parse("---\ndate: someday\n---\n");
        let doc = PostDocument::assemble(&summary(), fm, String::new());
        assert_eq!(doc.date, summary().date);
    }

    #[test]
    fn test_standalone_defaults() {
        let doc = PostDocument::standalone(
            "drafts/new-post.md",
            FrontMatter::default(),
            String::new(),
            &Strings::default(),
            today(),
        );
        assert_eq!(doc.slug, "new-post");
        assert_eq!(doc.title, "제목 없음");
        assert_eq!(doc.category, "기타");
        assert_eq!(doc.description, "");
        assert!(doc.tags.is_empty());
        assert_eq!(doc.date, today());
    }

    #[test]
    fn test_standalone_uses_front_matter() {
        let (fm, _) = FrontMatter::parse("---\ntitle: Draft\ntags: rust\ndate: 2024-02-02\n---\n");
        let doc = PostDocument::standalone("d.md", fm, String::new(), &Strings::default(), today());
        assert_eq!(doc.title, "Draft");
        assert_eq!(doc.tags, vec!["rust"]);
        assert_eq!(doc.date, NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
    }
}

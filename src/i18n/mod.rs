//! Built-in UI strings
//!
//! The blog ships Korean and English strings. Unknown languages fall back
//! to English, except that region-qualified tags (`ko-KR`) resolve to their
//! base language first.

/// Localized text used by the parser defaults and the renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    /// Language these strings belong to
    pub language: &'static str,
    /// Title placeholder when neither the index nor front-matter has one
    pub untitled: &'static str,
    /// Category placeholder
    pub uncategorized: &'static str,
    /// Label for the "no constraint" filter option
    pub all: &'static str,
    /// The one message shown for any load failure
    pub load_failed: &'static str,
    /// Heading of the error page
    pub error_heading: &'static str,
    /// Link text back to the post list
    pub back_to_list: &'static str,
    /// Empty state shown when filters match nothing
    pub no_results: &'static str,
    /// Label in front of the visible post count
    pub posts_count: &'static str,
}

const KO: Strings = Strings {
    language: "ko",
    untitled: "제목 없음",
    uncategorized: "기타",
    all: "전체",
    load_failed: "게시글을 불러오는 중 오류가 발생했습니다.",
    error_heading: "오류가 발생했습니다",
    back_to_list: "← 목록으로 돌아가기",
    no_results: "게시글이 없습니다.",
    posts_count: "게시글",
};

const EN: Strings = Strings {
    language: "en",
    untitled: "Untitled",
    uncategorized: "Misc",
    all: "All",
    load_failed: "Something went wrong while loading posts.",
    error_heading: "An error occurred",
    back_to_list: "← Back to the list",
    no_results: "No posts found.",
    posts_count: "Posts",
};

impl Strings {
    /// Look up the strings for a language tag such as `ko`, `ko-KR` or `en_US`
    pub fn for_language(lang: &str) -> Self {
        let base = lang
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match base.as_str() {
            "ko" => KO,
            "en" => EN,
            _ => {
                tracing::debug!("No built-in strings for {:?}, using English", lang);
                EN
            }
        }
    }
}

impl Default for Strings {
    fn default() -> Self {
        KO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_tags_resolve_to_base_language() {
        assert_eq!(Strings::for_language("ko-KR").language, "ko");
        assert_eq!(Strings::for_language("en_US").language, "en");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert_eq!(Strings::for_language("fr"), EN);
        assert_eq!(Strings::for_language(""), EN);
    }

    #[test]
    fn test_default_is_korean() {
        let strings = Strings::default();
        assert_eq!(strings.untitled, "제목 없음");
        assert_eq!(strings.uncategorized, "기타");
    }
}

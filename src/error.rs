//! Error kinds surfaced by the post pipeline

use thiserror::Error;

use crate::content::transport::TransportError;
use crate::i18n::Strings;

/// Errors raised while loading the post index or a post document
#[derive(Debug, Error)]
pub enum BlogError {
    /// The index could not be fetched or was not a well-formed post list
    #[error("post index unavailable: {0}")]
    IndexUnavailable(String),

    /// The requested slug is not in the most recently loaded index
    #[error("post not found: {slug}")]
    PostNotFound { slug: String },

    /// The markdown document referenced by the index could not be fetched
    #[error("document {file} unavailable: {source}")]
    DocumentUnavailable {
        file: String,
        #[source]
        source: TransportError,
    },

    /// Not raised: the front-matter parser degrades to defaults
    #[error("malformed front-matter")]
    MalformedFrontMatter,
}

impl BlogError {
    /// The single message shown to readers, whatever the underlying kind
    pub fn user_message(&self, strings: &Strings) -> &'static str {
        strings.load_failed
    }
}

impl From<TransportError> for BlogError {
    fn from(err: TransportError) -> Self {
        BlogError::IndexUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for BlogError {
    fn from(err: serde_json::Error) -> Self {
        BlogError::IndexUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_maps_to_one_message() {
        let strings = Strings::for_language("en");
        let errors = [
            BlogError::IndexUnavailable("bad json".into()),
            BlogError::PostNotFound {
                slug: "missing".into(),
            },
            BlogError::DocumentUnavailable {
                file: "a.md".into(),
                source: TransportError::Status(404),
            },
        ];
        for err in &errors {
            assert_eq!(err.user_message(&strings), strings.load_failed);
        }
    }

    #[test]
    fn test_transport_error_becomes_index_unavailable() {
        let err: BlogError = TransportError::Status(500).into();
        assert!(matches!(err, BlogError::IndexUnavailable(_)));
        assert!(err.to_string().contains("500"));
    }
}

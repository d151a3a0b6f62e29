//! Content module - post index, documents and their processing

mod frontmatter;
pub mod loader;
mod markdown;
mod post;
pub mod transport;

pub use frontmatter::{parse_date_string, FrontMatter, Value as FrontMatterValue};
pub use loader::PostRepository;
pub use markdown::MarkdownRenderer;
pub use post::{PostDocument, PostSummary};
pub use transport::{DirTransport, MemoryTransport, Transport, TransportError};

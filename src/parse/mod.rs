pub mod document;
pub mod frontmatter;

pub use document::{parse, DataEntry, DocumentNode, Link, LinkKind, ParseError};

//! Document and canvas triplification.
//!
//! The [`DocumentTriplifier`](document::DocumentTriplifier) walks a parsed
//! document tree; the [`CanvasTriplifier`](canvas::CanvasTriplifier) walks a
//! canvas node/edge graph. Both produce a provisional [`Dataset`] whose
//! name-namespace placeholders are later rebound by
//! [`resolve_placeholders`](placeholders::resolve_placeholders).

pub mod canvas;
pub mod document;
pub mod placeholders;

use std::str::FromStr;

use crate::model::iri::IriMinter;
use crate::model::term::{Dataset, Term};
use crate::parse;
use crate::parse::document::ParseError;
use crate::resolve::links::LinkError;
use crate::resolve::mapper::Mapper;

pub use placeholders::{add_missing_labels, resolve_placeholders};

/// Default root namespace for minted terms.
pub const DEFAULT_BASE_NAMESPACE: &str = "http://vault.example";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// One configured partition trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionRule {
    /// Split when a child declares an explicit identifier/URI.
    Identifier,
    /// Split when a child carries any tag.
    Tag,
    /// Split when a child is a heading whose level is in this set.
    Headers(Vec<u8>),
}

impl FromStr for PartitionRule {
    type Err = String;

    /// Accepts `identifier`, `tag`, and `headers-h2-h3`-style header sets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identifier" => Ok(PartitionRule::Identifier),
            "tag" => Ok(PartitionRule::Tag),
            other => {
                let rest = other
                    .strip_prefix("headers-")
                    .ok_or_else(|| format!("unknown partition rule: {other}"))?;
                let mut levels = Vec::new();
                for part in rest.split('-') {
                    let level: u8 = part
                        .strip_prefix('h')
                        .and_then(|n| n.parse().ok())
                        .filter(|n| (1..=6).contains(n))
                        .ok_or_else(|| format!("bad header level in rule: {other}"))?;
                    levels.push(level);
                }
                Ok(PartitionRule::Headers(levels))
            }
        }
    }
}

/// Which term families the label-enrichment pass covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelTargets {
    pub documents: bool,
    pub sections: bool,
    pub properties: bool,
}

/// Options controlling triplification.
#[derive(Debug, Clone)]
pub struct TriplifyOptions {
    /// Root namespace for minted terms; required, checked before traversal.
    pub base_namespace: String,
    pub partition_by: Vec<PartitionRule>,
    pub include_labels_for: LabelTargets,
    /// Record resolved link selectors as separate triples.
    pub include_selectors: bool,
    /// Embed the raw source text as a literal on the document root.
    pub include_raw: bool,
    pub mappings: Mapper,
}

impl Default for TriplifyOptions {
    fn default() -> Self {
        Self {
            base_namespace: DEFAULT_BASE_NAMESPACE.to_string(),
            partition_by: Vec::new(),
            include_labels_for: LabelTargets::default(),
            include_selectors: false,
            include_raw: false,
            mappings: Mapper::Null,
        }
    }
}

impl TriplifyOptions {
    /// The minter for these options, or the configuration error raised when
    /// no base namespace was supplied.
    fn minter(&self) -> Result<IriMinter, TriplifyError> {
        if self.base_namespace.trim().is_empty() {
            return Err(TriplifyError::MissingBaseNamespace);
        }
        Ok(IriMinter::new(&self.base_namespace))
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors fatal to a single document or canvas conversion.
#[derive(Debug)]
pub enum TriplifyError {
    /// A link node with no raw value.
    MalformedLink(String),
    /// No base namespace supplied; raised before any traversal begins.
    MissingBaseNamespace,
    /// The document text failed to parse.
    Parse(ParseError),
    /// The canvas JSON failed to deserialize.
    Canvas(serde_json::Error),
    /// A canvas file node without a file path.
    MalformedCanvasNode(String),
    /// A canvas edge referencing a node id the canvas does not define.
    UnknownEdgeNode(String),
}

impl std::fmt::Display for TriplifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriplifyError::MalformedLink(doc) => {
                write!(f, "malformed link (no target value) in {doc}")
            }
            TriplifyError::MissingBaseNamespace => {
                write!(f, "no base namespace configured for term minting")
            }
            TriplifyError::Parse(e) => write!(f, "document parse error: {e}"),
            TriplifyError::Canvas(e) => write!(f, "canvas parse error: {e}"),
            TriplifyError::MalformedCanvasNode(id) => {
                write!(f, "canvas file node {id} has no file path")
            }
            TriplifyError::UnknownEdgeNode(id) => {
                write!(f, "canvas edge references unknown node {id}")
            }
        }
    }
}

impl std::error::Error for TriplifyError {}

impl From<ParseError> for TriplifyError {
    fn from(e: ParseError) -> Self {
        TriplifyError::Parse(e)
    }
}

impl From<serde_json::Error> for TriplifyError {
    fn from(e: serde_json::Error) -> Self {
        TriplifyError::Canvas(e)
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// The result of one document conversion: the document's own subject term
/// plus the graph it produced.
#[derive(Debug)]
pub struct DocumentGraph {
    pub term: Term,
    pub dataset: Dataset,
}

/// One-shot conversion of a single document's text into a term + graph.
pub fn triplify_document(
    path: &str,
    content: &str,
    options: &TriplifyOptions,
) -> Result<DocumentGraph, TriplifyError> {
    let iris = options.minter()?;
    let tree = parse::parse(content)?;
    let triplifier = document::DocumentTriplifier::new(path, &tree, content, options, iris);
    triplifier.run()
}

/// One-shot conversion of a canvas JSON structure into a graph.
pub fn triplify_canvas(
    path: &str,
    json: &str,
    options: &TriplifyOptions,
) -> Result<Dataset, TriplifyError> {
    let iris = options.minter()?;
    let parsed: canvas::Canvas = serde_json::from_str(json)?;
    let triplifier = canvas::CanvasTriplifier::new(path, &parsed, options, iris);
    triplifier.run()
}

impl TriplifyError {
    pub(crate) fn from_link(err: LinkError, doc_path: &str) -> Self {
        match err {
            LinkError::MissingValue => TriplifyError::MalformedLink(doc_path.to_string()),
        }
    }
}

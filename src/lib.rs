//! Triplify Markdown vaults and canvases into RDF graphs.
//!
//! A vault is a directory of interlinked notes. Each note (or canvas) is
//! parsed into a tree (or node/edge graph) and walked into a set of
//! subject–predicate–object triples: data rows and frontmatter become
//! property triples, tags and links become edges, and configurable
//! partition rules carve sections out under their own subject terms.
//! Cross-note wiki links mint provisional placeholder terms that a final
//! repair pass rebinds once the whole vault has been indexed.
//!
//! The high-level entry points are [`triplify_document`],
//! [`triplify_canvas`] and [`resolve_placeholders`]; the `vault2rdf`
//! binary wires them into a batch converter over a vault directory.

pub mod emitter;
pub mod model;
pub mod parse;
pub mod resolve;
pub mod triplify;
pub mod vault;

pub use model::{Dataset, IriMinter, Literal, LiteralKind, Term, Triple};
pub use triplify::{
    add_missing_labels, resolve_placeholders, triplify_canvas, triplify_document, DocumentGraph,
    LabelTargets, PartitionRule, TriplifyError, TriplifyOptions,
};
pub use vault::{build_index, IndexError, VaultIndex};

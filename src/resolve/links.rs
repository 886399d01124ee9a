//! Wiki-style and external link resolution.
//!
//! Resolution is pure string/tree work: it never touches the file system.
//! Bare and relative heads mint placeholder terms in the name namespace;
//! the vault-wide repair pass rebinds them later. `[[#selector]]` searches
//! the current document's own parse tree only.

use crate::model::iri::IriMinter;
use crate::model::term::Term;
use crate::parse::document::{DocumentNode, Link, LinkKind};
use crate::resolve::terms;

/// A resolved link plus its provenance.
#[derive(Debug, Clone)]
pub struct ResolvedLink {
    pub term: Term,
    /// The logical target path, when one is known at resolution time.
    pub path: Option<String>,
    pub selector: Option<String>,
    pub alias: Option<String>,
}

/// Errors raised while resolving a single link.
#[derive(Debug)]
pub enum LinkError {
    /// A link node with no raw value is malformed input.
    MissingValue,
}

impl std::fmt::Display for LinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkError::MissingValue => write!(f, "link has no target value"),
        }
    }
}

impl std::error::Error for LinkError {}

/// Resolve one link against the current document.
pub fn resolve_link(
    link: &Link,
    doc_path: &str,
    doc_tree: &DocumentNode,
    iris: &IriMinter,
) -> Result<ResolvedLink, LinkError> {
    let raw = link.value.trim();
    if raw.is_empty() {
        return Err(LinkError::MissingValue);
    }

    if link.kind == LinkKind::External {
        return Ok(ResolvedLink {
            term: Term::named(raw),
            path: None,
            selector: None,
            alias: link.alias.clone(),
        });
    }

    let (head, selector) = match raw.split_once('#') {
        Some((h, s)) => (h.trim(), Some(s.trim().to_string())),
        None => (raw, None),
    };

    if head.is_empty() {
        // [[#selector]]: a sub-part of the current document.
        let selector = selector.unwrap_or_default();
        let doc_iri = iris.note_iri(doc_path);
        let term = doc_tree
            .find_selector(&selector)
            .and_then(|node| partition_term(node, &doc_iri, iris))
            .unwrap_or_else(|| Term::Named(doc_iri));
        return Ok(ResolvedLink {
            term,
            path: Some(doc_path.to_string()),
            selector: Some(selector),
            alias: link.alias.clone(),
        });
    }

    let (target, path) = if head.starts_with('.') {
        let resolved = resolve_relative(head, doc_path);
        (resolved.clone(), Some(resolved))
    } else {
        (head.to_string(), None)
    };

    let mut iri = iris.name_iri(&target);
    if let Some(sel) = &selector {
        iri = iris.with_selector(&iri, sel);
    }

    Ok(ResolvedLink {
        term: Term::Named(iri),
        path,
        selector,
        alias: link.alias.clone(),
    })
}

/// The term a partitioned node resolves to: its declared URI, or a section
/// IRI minted from its label (or selector identifier) under the owning
/// document. Returns `None` when the node has nothing to name it by.
pub fn partition_term(node: &DocumentNode, owner_iri: &str, iris: &IriMinter) -> Option<Term> {
    if let Some(uri) = node.declared_uri() {
        let iri = terms::explicit_uri(uri).unwrap_or_else(|| uri.trim().to_string());
        return Some(Term::Named(iri));
    }
    let name = node.label.as_deref().or(node.declared_id())?;
    Some(Term::Named(iris.section_iri(owner_iri, name)))
}

/// Resolve a `./` / `../` head against the directory of the current document.
fn resolve_relative(head: &str, doc_path: &str) -> String {
    let mut segments: Vec<&str> = doc_path.split('/').collect();
    segments.pop(); // the document's own file name

    for segment in head.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

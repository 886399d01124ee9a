//! Canvas graph triplification.
//!
//! A canvas is a flat list of positioned nodes (file, group, text) plus
//! labeled edges. Groups contain whatever lies geometrically inside their
//! rectangle; everything not contained by a group hangs directly off the
//! canvas root.

use std::collections::HashMap;

use serde::Deserialize;

use crate::model::ontology::{standard, vault};
use crate::model::term::{BlankAllocator, Dataset, Literal, Term, Triple};
use crate::model::IriMinter;
use crate::resolve::terms;

use super::{TriplifyError, TriplifyOptions};

// ---------------------------------------------------------------------------
// Canvas model
// ---------------------------------------------------------------------------

/// Top-level canvas JSON structure.
#[derive(Debug, Deserialize)]
pub struct Canvas {
    #[serde(default)]
    pub nodes: Vec<CanvasNode>,
    #[serde(default)]
    pub edges: Vec<CanvasEdge>,
}

/// Node discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasNodeKind {
    File,
    Group,
    Text,
}

/// One canvas node. Geometry fields default to zero when absent.
#[derive(Debug, Deserialize)]
pub struct CanvasNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CanvasNodeKind,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl CanvasNode {
    /// True when `other`'s rectangle lies entirely within this node's
    /// rectangle; touching edges count as contained.
    pub fn contains(&self, other: &CanvasNode) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }
}

/// One canvas edge.
#[derive(Debug, Deserialize)]
pub struct CanvasEdge {
    #[serde(rename = "fromNode")]
    pub from_node: String,
    #[serde(rename = "toNode")]
    pub to_node: String,
    #[serde(default)]
    pub label: Option<String>,
}

// ---------------------------------------------------------------------------
// CanvasTriplifier
// ---------------------------------------------------------------------------

/// Walks a canvas node/edge graph and accumulates its graph.
pub struct CanvasTriplifier<'a> {
    canvas_path: &'a str,
    canvas: &'a Canvas,
    options: &'a TriplifyOptions,
    iris: IriMinter,
    dataset: Dataset,
    blanks: BlankAllocator,
}

impl<'a> CanvasTriplifier<'a> {
    pub fn new(
        canvas_path: &'a str,
        canvas: &'a Canvas,
        options: &'a TriplifyOptions,
        iris: IriMinter,
    ) -> Self {
        Self {
            canvas_path,
            canvas,
            options,
            iris,
            dataset: Dataset::new(),
            blanks: BlankAllocator::new(),
        }
    }

    pub fn run(mut self) -> Result<Dataset, TriplifyError> {
        let root = Term::Named(self.iris.note_iri(self.canvas_path));
        self.insert(
            root.clone(),
            Term::named(standard::RDF_TYPE),
            Term::named(vault::CANVAS),
        );

        let node_terms = self.mint_node_terms()?;
        self.emit_containment(&node_terms, &root);
        self.emit_edges(&node_terms)?;

        Ok(self.dataset)
    }

    // -----------------------------------------------------------------------
    // Node classification
    // -----------------------------------------------------------------------

    /// Mint one term per node id: file nodes resolve to the referenced
    /// file's path term, group labels go through the mapper (blank node
    /// fallback), text nodes are always fresh blanks.
    fn mint_node_terms(&mut self) -> Result<HashMap<&'a str, Term>, TriplifyError> {
        let canvas = self.canvas;
        let mut terms_by_id = HashMap::new();
        for node in &canvas.nodes {
            let term = match node.kind {
                CanvasNodeKind::File => {
                    let file = node.file.as_deref().ok_or_else(|| {
                        TriplifyError::MalformedCanvasNode(node.id.clone())
                    })?;
                    Term::Named(self.iris.note_iri(file))
                }
                CanvasNodeKind::Group => {
                    let mapped = node
                        .label
                        .as_deref()
                        .and_then(|label| self.options.mappings.resolve_value(label));
                    match mapped {
                        Some(term) => term,
                        None => {
                            let blank = self.blanks.fresh();
                            if let Some(label) = &node.label {
                                self.insert(
                                    blank.clone(),
                                    Term::named(standard::RDFS_LABEL),
                                    Term::Literal(Literal::string(label)),
                                );
                            }
                            blank
                        }
                    }
                }
                CanvasNodeKind::Text => {
                    let blank = self.blanks.fresh();
                    if let Some(text) = &node.text {
                        self.insert(
                            blank.clone(),
                            Term::named(standard::RDFS_LABEL),
                            Term::Literal(Literal::string(text)),
                        );
                    }
                    blank
                }
            };
            terms_by_id.insert(node.id.as_str(), term);
        }
        Ok(terms_by_id)
    }

    // -----------------------------------------------------------------------
    // Geometric containment
    // -----------------------------------------------------------------------

    /// Pairwise scan: every group contains every other node lying entirely
    /// within its bounds. Nodes contained by nothing attach to the canvas
    /// root, so every node is reachable from it.
    fn emit_containment(&mut self, terms_by_id: &HashMap<&'a str, Term>, root: &Term) {
        let canvas = self.canvas;
        let contains = Term::named(vault::CONTAINS);

        for group in &canvas.nodes {
            if group.kind != CanvasNodeKind::Group {
                continue;
            }
            for other in &canvas.nodes {
                if other.id == group.id || !group.contains(other) {
                    continue;
                }
                if let (Some(g), Some(o)) =
                    (terms_by_id.get(group.id.as_str()), terms_by_id.get(other.id.as_str()))
                {
                    self.insert(g.clone(), contains.clone(), o.clone());
                }
            }
        }

        for node in &canvas.nodes {
            if let Some(term) = terms_by_id.get(node.id.as_str()) {
                let contained = self
                    .dataset
                    .matching(None, Some(&contains), Some(term))
                    .next()
                    .is_some();
                if !contained {
                    self.insert(root.clone(), contains.clone(), term.clone());
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Edges
    // -----------------------------------------------------------------------

    fn emit_edges(&mut self, terms_by_id: &HashMap<&'a str, Term>) -> Result<(), TriplifyError> {
        let canvas = self.canvas;
        for edge in &canvas.edges {
            let from = terms_by_id
                .get(edge.from_node.as_str())
                .cloned()
                .ok_or_else(|| TriplifyError::UnknownEdgeNode(edge.from_node.clone()))?;
            let to = terms_by_id
                .get(edge.to_node.as_str())
                .cloned()
                .ok_or_else(|| TriplifyError::UnknownEdgeNode(edge.to_node.clone()))?;

            let predicate = match &edge.label {
                Some(label) => match self.options.mappings.resolve_value(label) {
                    Some(term) => term,
                    None => terms::predicate_term(label, &self.iris),
                },
                None => Term::named(vault::RELATED),
            };
            self.insert(from, predicate, to);
        }
        Ok(())
    }

    fn insert(&mut self, subject: Term, predicate: Term, object: Term) {
        self.dataset.insert(Triple::new(subject, predicate, object));
    }
}

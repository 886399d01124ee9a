//! Document tree triplification.
//!
//! The [`DocumentTriplifier`] recursively walks a parsed [`DocumentNode`]
//! tree, emitting triples for data rows, labeled fields, tags and links, and
//! deciding at each child whether to carve out a new partition subject.

use serde_yaml::Value;

use crate::model::ontology::{standard, vault};
use crate::model::term::{BlankAllocator, Dataset, Literal, Term, Triple};
use crate::model::IriMinter;
use crate::parse::document::{DataEntry, DocumentNode, ID_KEY, URI_KEY};
use crate::resolve::links::{partition_term, resolve_link};
use crate::resolve::terms;

use super::{DocumentGraph, PartitionRule, TriplifyError, TriplifyOptions};

/// Walks a document tree and accumulates its graph.
pub struct DocumentTriplifier<'a> {
    doc_path: &'a str,
    root: &'a DocumentNode,
    raw: &'a str,
    options: &'a TriplifyOptions,
    iris: IriMinter,
    dataset: Dataset,
    blanks: BlankAllocator,
    /// Raw link text -> resolved term, in walk order. Consulted before
    /// literal-encoding data objects: known links take priority.
    known_links: Vec<(String, Term)>,
    /// Fallback sequence for partitions with nothing to name them by.
    section_seq: u64,
}

impl<'a> DocumentTriplifier<'a> {
    pub fn new(
        doc_path: &'a str,
        root: &'a DocumentNode,
        raw: &'a str,
        options: &'a TriplifyOptions,
        iris: IriMinter,
    ) -> Self {
        Self {
            doc_path,
            root,
            raw,
            options,
            iris,
            dataset: Dataset::new(),
            blanks: BlankAllocator::new(),
            known_links: Vec::new(),
            section_seq: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Entry point
    // -----------------------------------------------------------------------

    /// Run the full walk, producing the document term and its graph.
    pub fn run(mut self) -> Result<DocumentGraph, TriplifyError> {
        let doc_term = self.document_term();

        self.insert(
            doc_term.clone(),
            Term::named(standard::RDF_TYPE),
            Term::named(vault::NOTE),
        );
        if self.options.include_raw {
            self.insert(
                doc_term.clone(),
                Term::named(vault::RAW),
                Term::Literal(Literal::string(self.raw)),
            );
        }

        let root = self.root;
        self.walk(root, &doc_term)?;

        Ok(DocumentGraph {
            term: doc_term,
            dataset: self.dataset,
        })
    }

    /// The document's own subject: its declared URI, or its path term.
    fn document_term(&self) -> Term {
        match self.root.declared_uri() {
            Some(uri) => {
                let iri = terms::explicit_uri(uri).unwrap_or_else(|| uri.trim().to_string());
                Term::Named(iri)
            }
            None => Term::Named(self.iris.note_iri(self.doc_path)),
        }
    }

    // -----------------------------------------------------------------------
    // Recursive walk
    // -----------------------------------------------------------------------

    fn walk(&mut self, node: &DocumentNode, subject: &Term) -> Result<(), TriplifyError> {
        // Links first: data rows consult the known-link table.
        for link in &node.links {
            self.apply_link(link, subject)?;
        }
        for entry in &node.data {
            self.apply_data(entry, subject);
        }
        for tag in &node.tags {
            self.insert(
                subject.clone(),
                Term::named(vault::TAG),
                Term::Literal(Literal::string(tag)),
            );
        }

        for child in node.children.iter() {
            if self.starts_partition(child) {
                let child_subject = self.partition_subject(child);
                self.insert(
                    subject.clone(),
                    Term::named(vault::CONTAINS),
                    child_subject.clone(),
                );
                self.insert(
                    child_subject.clone(),
                    Term::named(standard::RDF_TYPE),
                    Term::named(vault::SECTION),
                );
                self.walk(child, &child_subject)?;
            } else {
                self.walk(child, subject)?;
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Partitioning
    // -----------------------------------------------------------------------

    fn starts_partition(&self, node: &DocumentNode) -> bool {
        self.options.partition_by.iter().any(|rule| match rule {
            PartitionRule::Identifier => node.declared_uri().is_some(),
            PartitionRule::Tag => !node.tags.is_empty(),
            PartitionRule::Headers(levels) => {
                node.heading_level.is_some_and(|l| levels.contains(&l))
            }
        })
    }

    /// Mint the subject for a new partition: the child's declared URI, a
    /// section IRI from its label, or a sequence-named section as last resort.
    fn partition_subject(&mut self, node: &DocumentNode) -> Term {
        let doc_iri = self.iris.note_iri(self.doc_path);
        if let Some(term) = partition_term(node, &doc_iri, &self.iris) {
            return term;
        }
        let name = format!("section-{}", self.section_seq);
        self.section_seq += 1;
        Term::Named(self.iris.section_iri(&doc_iri, &name))
    }

    // -----------------------------------------------------------------------
    // Links
    // -----------------------------------------------------------------------

    fn apply_link(
        &mut self,
        link: &crate::parse::document::Link,
        subject: &Term,
    ) -> Result<(), TriplifyError> {
        let resolved = resolve_link(link, self.doc_path, self.root, &self.iris)
            .map_err(|e| TriplifyError::from_link(e, self.doc_path))?;

        self.known_links
            .push((link.value.clone(), resolved.term.clone()));

        // One related-triple per target: a target that already has any such
        // triple to it is not re-added.
        let related = Term::named(vault::RELATED);
        let already = self
            .dataset
            .matching(None, Some(&related), Some(&resolved.term))
            .next()
            .is_some();
        if !already {
            self.insert(subject.clone(), related, resolved.term.clone());
        }

        if let Some(alias) = &resolved.alias {
            self.insert(
                resolved.term.clone(),
                Term::named(standard::RDFS_LABEL),
                Term::Literal(Literal::string(alias)),
            );
        }
        if self.options.include_selectors {
            if let Some(selector) = &resolved.selector {
                self.insert(
                    resolved.term.clone(),
                    Term::named(vault::SELECTOR),
                    Term::Literal(Literal::string(selector)),
                );
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Data entries
    // -----------------------------------------------------------------------

    fn apply_data(&mut self, entry: &DataEntry, subject: &Term) {
        match entry {
            DataEntry::Row(parts) if parts.len() == 2 => {
                if is_reserved_key(&parts[0]) {
                    return;
                }
                let predicate = self.predicate_slot(&parts[0]);
                let object = self.object_slot(&parts[1]);
                self.insert(subject.clone(), predicate, object);
            }
            DataEntry::Row(parts) if parts.len() >= 3 => {
                let row_subject = self.subject_slot(&parts[0]);
                let predicate = self.predicate_slot(&parts[1]);
                let object = self.object_slot(&parts[2]);
                self.insert(row_subject, predicate, object);
            }
            DataEntry::Row(_) => {}
            DataEntry::Fields(mapping) => {
                let subject = subject.clone();
                for (key, value) in mapping {
                    let Some(key) = field_key(key) else { continue };
                    if is_reserved_key(&key) {
                        continue;
                    }
                    let predicate = self.predicate_slot(&key);
                    self.apply_field_value(&subject, &predicate, value);
                }
            }
        }
    }

    /// Emit triples for one labeled-field value. Nested mappings recurse
    /// into a fresh blank-node subject; scalar arrays emit one triple per
    /// element.
    fn apply_field_value(&mut self, subject: &Term, predicate: &Term, value: &Value) {
        match value {
            Value::Null => {}
            Value::Bool(b) => {
                self.insert(
                    subject.clone(),
                    predicate.clone(),
                    Term::Literal(Literal::boolean(*b)),
                );
            }
            Value::Number(n) => {
                let literal = match n.as_i64() {
                    Some(i) => Literal::integer(i),
                    None => Literal {
                        value: n.to_string(),
                        kind: crate::model::term::LiteralKind::Decimal,
                    },
                };
                self.insert(subject.clone(), predicate.clone(), Term::Literal(literal));
            }
            Value::String(s) => {
                let object = self.object_slot(s);
                self.insert(subject.clone(), predicate.clone(), object);
            }
            Value::Sequence(items) => {
                for item in items {
                    self.apply_field_value(subject, predicate, item);
                }
            }
            Value::Mapping(nested) => {
                let blank = self.blanks.fresh();
                self.insert(subject.clone(), predicate.clone(), blank.clone());
                for (key, value) in nested {
                    let Some(key) = field_key(key) else { continue };
                    let predicate = self.predicate_slot(&key);
                    self.apply_field_value(&blank, &predicate, value);
                }
            }
            Value::Tagged(tagged) => {
                self.apply_field_value(subject, predicate, &tagged.value);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Slot resolution
    // -----------------------------------------------------------------------

    fn predicate_slot(&self, raw: &str) -> Term {
        match self.options.mappings.resolve_value(raw) {
            Some(term) => term,
            None => terms::predicate_term(raw, &self.iris),
        }
    }

    fn subject_slot(&self, raw: &str) -> Term {
        if let Some(term) = self.options.mappings.resolve_value(raw) {
            return term;
        }
        if let Some(term) = self.known_link_term(raw) {
            return term;
        }
        terms::subject_term(raw, &self.iris)
    }

    fn object_slot(&self, raw: &str) -> Term {
        if let Some(term) = self.options.mappings.resolve_value(raw) {
            return term;
        }
        if let Some(term) = self.known_link_term(raw) {
            return term;
        }
        terms::object_term(raw)
    }

    /// A raw value that contains an already-known link's raw text resolves
    /// to that link's term instead of a literal.
    fn known_link_term(&self, raw: &str) -> Option<Term> {
        self.known_links
            .iter()
            .find(|(link_raw, _)| !link_raw.is_empty() && raw.contains(link_raw.as_str()))
            .map(|(_, term)| term.clone())
    }

    fn insert(&mut self, subject: Term, predicate: Term, object: Term) {
        self.dataset.insert(Triple::new(subject, predicate, object));
    }
}

fn is_reserved_key(key: &str) -> bool {
    key == URI_KEY || key == ID_KEY
}

/// Stringify a YAML mapping key; non-scalar keys are skipped.
fn field_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

//! Post-processing passes over a provisional graph.
//!
//! [`resolve_placeholders`] is the vault-wide repair barrier: it rebinds
//! name-namespace placeholder terms to path-derived note terms once the
//! vault index exists. Names the index does not know stay as they are --
//! a soft link is a permanent graph state, not an error.
//! [`add_missing_labels`] derives human-readable labels for terms that
//! lack one.

use std::collections::HashSet;

use crate::model::ontology::standard;
use crate::model::term::{Dataset, Literal, Term, Triple};
use crate::model::IriMinter;
use crate::vault::VaultIndex;

use super::{LabelTargets, TriplifyOptions};

/// Rewrite placeholder terms in place. Transactional per triple: the old
/// triple is deleted and the substituted one inserted, and only when at
/// least one position actually changed. Idempotent: path-derived terms are
/// not placeholder-namespaced and pass through untouched.
pub fn resolve_placeholders(dataset: &mut Dataset, index: &VaultIndex, iris: &IriMinter) {
    let triples: Vec<Triple> = dataset.iter().cloned().collect();

    for triple in triples {
        let subject = rebind(&triple.subject, index, iris);
        let predicate = rebind(&triple.predicate, index, iris);
        let object = rebind(&triple.object, index, iris);

        if subject.is_none() && predicate.is_none() && object.is_none() {
            continue;
        }

        let replacement = Triple::new(
            subject.unwrap_or_else(|| triple.subject.clone()),
            predicate.unwrap_or_else(|| triple.predicate.clone()),
            object.unwrap_or_else(|| triple.object.clone()),
        );
        dataset.remove(&triple);
        dataset.insert(replacement);
    }
}

/// The rebound term for a placeholder the index can resolve, else `None`.
fn rebind(term: &Term, index: &VaultIndex, iris: &IriMinter) -> Option<Term> {
    let iri = term.iri()?;
    if !iris.is_placeholder(iri) {
        return None;
    }
    let (name, suffix) = iris.placeholder_parts(iri)?;
    let path = index.resolve_name(&name)?;
    Some(Term::Named(format!("{}{}", iris.note_iri(path), suffix)))
}

// ---------------------------------------------------------------------------
// Label enrichment
// ---------------------------------------------------------------------------

/// Add an `rdfs:label` for every named term in the selected namespaces that
/// does not already have one. The label is the decoded final IRI segment
/// (note labels additionally drop a trailing `.md`).
pub fn add_missing_labels(dataset: &mut Dataset, options: &TriplifyOptions) {
    let targets = options.include_labels_for;
    if targets == LabelTargets::default() {
        return;
    }
    let iris = IriMinter::new(&options.base_namespace);
    let label_pred = Term::named(standard::RDFS_LABEL);

    let mut candidates: Vec<Term> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for triple in dataset.iter() {
        for term in [&triple.subject, &triple.predicate, &triple.object] {
            let Some(iri) = term.iri() else { continue };
            if seen.contains(iri) {
                continue;
            }
            if wants_label(iri, &iris, &targets) {
                candidates.push(term.clone());
            }
            seen.insert(iri);
        }
    }
    drop(seen);

    for term in candidates {
        let labeled = dataset
            .matching(Some(&term), Some(&label_pred), None)
            .next()
            .is_some();
        if labeled {
            continue;
        }
        let Some(iri) = term.iri() else { continue };
        let label = derive_label(iri, &iris);
        if label.is_empty() {
            continue;
        }
        dataset.insert(Triple::new(
            term.clone(),
            label_pred.clone(),
            Term::Literal(Literal::string(label)),
        ));
    }
}

fn wants_label(iri: &str, iris: &IriMinter, targets: &LabelTargets) -> bool {
    if iris.is_section(iri) {
        return targets.sections;
    }
    if iris.is_note(iri) || iris.is_placeholder(iri) {
        return targets.documents;
    }
    if iris.is_property(iri) {
        return targets.properties;
    }
    false
}

fn derive_label(iri: &str, iris: &IriMinter) -> String {
    let tail = IriMinter::decoded_tail(iri);
    if iris.is_note(iri) && !iris.is_section(iri) {
        tail.strip_suffix(".md").unwrap_or(&tail).to_string()
    } else {
        tail
    }
}

//! Integration tests for the document triplifier.

use vault2rdf::model::ontology::{standard, vault};
use vault2rdf::model::term::{Literal, LiteralKind, Term};
use vault2rdf::resolve::mapper::{Mapper, MappingTables};
use vault2rdf::{triplify_document, DocumentGraph, PartitionRule, TriplifyError, TriplifyOptions};

const BASE: &str = "http://vault.example";

fn convert(content: &str) -> DocumentGraph {
    triplify_document("Test.md", content, &TriplifyOptions::default()).unwrap()
}

fn convert_with(content: &str, options: &TriplifyOptions) -> DocumentGraph {
    triplify_document("Test.md", content, options).unwrap()
}

fn property(name: &str) -> Term {
    Term::named(format!("{BASE}/property/{name}"))
}

fn placeholder(name: &str) -> Term {
    Term::named(format!("{BASE}/name/{name}"))
}

// --- Basic shape ---

#[test]
fn document_root_is_typed_note() {
    let graph = convert("hello\n");
    assert_eq!(graph.term, Term::named(format!("{BASE}/note/Test.md")));
    assert!(graph
        .dataset
        .matching(
            Some(&graph.term),
            Some(&Term::named(standard::RDF_TYPE)),
            Some(&Term::named(vault::NOTE)),
        )
        .next()
        .is_some());
}

#[test]
fn website_row_yields_exactly_one_named_object() {
    let graph = convert("website :: <http://example.com>\n");
    let target = Term::named("http://example.com");
    let hits: Vec<_> = graph.dataset.matching(None, None, Some(&target)).collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].subject, graph.term);
    assert_eq!(hits[0].predicate, property("website"));
}

#[test]
fn data_row_objects_are_typed() {
    let graph = convert("year :: 2024\nheight :: 1.75\ndone :: true\nborn :: 1815-12-10\n");
    let cases = [
        ("year", "2024", LiteralKind::Integer),
        ("height", "1.75", LiteralKind::Decimal),
        ("done", "true", LiteralKind::Boolean),
        ("born", "1815-12-10", LiteralKind::Date),
    ];
    for (pred, value, kind) in cases {
        let object = Term::Literal(Literal {
            value: value.to_string(),
            kind,
        });
        assert!(
            graph
                .dataset
                .matching(None, Some(&property(pred)), Some(&object))
                .next()
                .is_some(),
            "missing ({pred}, {value:?}, {kind:?})"
        );
    }
}

#[test]
fn backtick_object_opts_out_of_typing() {
    let graph = convert("year :: `2024`\n");
    let object = Term::literal("2024");
    assert!(graph
        .dataset
        .matching(None, Some(&property("year")), Some(&object))
        .next()
        .is_some());
}

#[test]
fn three_part_row_uses_explicit_subject() {
    let graph = convert("Alice :: knows :: Bob\n");
    let alice_subj = placeholder("Alice");
    let knows_pred = property("knows");
    let hits: Vec<_> = graph
        .dataset
        .matching(Some(&alice_subj), Some(&knows_pred), None)
        .collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].object, Term::literal("Bob"));
}

#[test]
fn is_a_synonym_maps_to_rdf_type() {
    let graph = convert("is a :: Person\n");
    assert!(graph
        .dataset
        .matching(None, Some(&Term::named(standard::RDF_TYPE)), None)
        .any(|t| t.object == Term::literal("Person")));
}

// --- Tags ---

#[test]
fn tags_emit_literal_triples() {
    let graph = convert("a note about things #project #draft\n");
    let tag_pred = Term::named(vault::TAG);
    let tags: Vec<_> = graph
        .dataset
        .matching(Some(&graph.term), Some(&tag_pred), None)
        .map(|t| t.object.clone())
        .collect();
    assert!(tags.contains(&Term::literal("project")));
    assert!(tags.contains(&Term::literal("draft")));
}

// --- Links ---

#[test]
fn wiki_links_emit_related_triples() {
    let graph = convert("see [[Bob]]\n");
    assert!(graph
        .dataset
        .matching(
            Some(&graph.term),
            Some(&Term::named(vault::RELATED)),
            Some(&placeholder("Bob")),
        )
        .next()
        .is_some());
}

#[test]
fn repeated_link_targets_are_not_readded() {
    let graph = convert("see [[Bob]]\nagain [[Bob]]\n");
    let hits = graph
        .dataset
        .matching(None, Some(&Term::named(vault::RELATED)), Some(&placeholder("Bob")))
        .count();
    assert_eq!(hits, 1);
}

#[test]
fn link_alias_becomes_target_label() {
    let graph = convert("see [[Bob|my oldest friend]]\n");
    assert!(graph
        .dataset
        .matching(
            Some(&placeholder("Bob")),
            Some(&Term::named(standard::RDFS_LABEL)),
            Some(&Term::literal("my oldest friend")),
        )
        .next()
        .is_some());
}

#[test]
fn known_link_replaces_literal_object() {
    let graph = convert("friend :: [[Bob]]\n");
    assert!(graph
        .dataset
        .matching(None, Some(&property("friend")), Some(&placeholder("Bob")))
        .next()
        .is_some());
    // No literal-encoded leftover of the raw link text.
    assert!(!graph
        .dataset
        .iter()
        .any(|t| t.object == Term::literal("[[Bob]]")));
}

#[test]
fn selector_links_extend_the_placeholder() {
    let options = TriplifyOptions {
        include_selectors: true,
        ..TriplifyOptions::default()
    };
    let graph = convert_with("see [[Bob#early life]]\n", &options);
    let target = Term::named(format!("{BASE}/name/Bob#early%20life"));
    assert!(graph
        .dataset
        .matching(None, Some(&Term::named(vault::RELATED)), Some(&target))
        .next()
        .is_some());
    assert!(graph
        .dataset
        .matching(
            Some(&target),
            Some(&Term::named(vault::SELECTOR)),
            Some(&Term::literal("early life")),
        )
        .next()
        .is_some());
}

#[test]
fn empty_link_is_malformed_input() {
    let err = triplify_document("Test.md", "see [[]]\n", &TriplifyOptions::default());
    assert!(matches!(err, Err(TriplifyError::MalformedLink(_))));
}

// --- Frontmatter and labeled fields ---

#[test]
fn frontmatter_fields_emit_one_triple_per_key() {
    let graph = convert("---\nauthor: Ada\nyear: 1843\n---\nbody\n");
    assert!(graph
        .dataset
        .matching(Some(&graph.term), Some(&property("author")), Some(&Term::literal("Ada")))
        .next()
        .is_some());
    assert!(graph
        .dataset
        .matching(
            Some(&graph.term),
            Some(&property("year")),
            Some(&Term::Literal(Literal::integer(1843))),
        )
        .next()
        .is_some());
}

#[test]
fn scalar_arrays_emit_one_triple_per_element() {
    let graph = convert("---\naliases:\n  - Ada\n  - Countess\n---\n");
    let hits = graph
        .dataset
        .matching(Some(&graph.term), Some(&property("aliases")), None)
        .count();
    assert_eq!(hits, 2);
}

#[test]
fn nested_mappings_recurse_into_blank_nodes() {
    let graph = convert("---\nauthor:\n  name: Ada\n  age: 36\n---\n");
    let author_pred = property("author");
    let author_hits: Vec<_> = graph
        .dataset
        .matching(Some(&graph.term), Some(&author_pred), None)
        .collect();
    assert_eq!(author_hits.len(), 1);
    let blank = author_hits[0].object.clone();
    assert!(matches!(blank, Term::Blank(_)));
    assert!(graph
        .dataset
        .matching(Some(&blank), Some(&property("name")), Some(&Term::literal("Ada")))
        .next()
        .is_some());
    assert!(graph
        .dataset
        .matching(
            Some(&blank),
            Some(&property("age")),
            Some(&Term::Literal(Literal::integer(36))),
        )
        .next()
        .is_some());
}

// --- Partitioning ---

fn header_options() -> TriplifyOptions {
    TriplifyOptions {
        partition_by: vec!["headers-h2-h3".parse::<PartitionRule>().unwrap()],
        ..TriplifyOptions::default()
    }
}

#[test]
fn header_partition_moves_data_off_the_root() {
    let graph = convert_with("## Topic\nvariable :: value 1\n", &header_options());
    let section = Term::named(format!("{BASE}/note/Test.md/section/Topic"));

    assert!(graph
        .dataset
        .matching(Some(&graph.term), Some(&Term::named(vault::CONTAINS)), Some(&section))
        .next()
        .is_some());
    assert!(graph
        .dataset
        .matching(
            Some(&section),
            Some(&property("variable")),
            Some(&Term::literal("value 1")),
        )
        .next()
        .is_some());
    // Not attached to the document root.
    assert!(graph
        .dataset
        .matching(Some(&graph.term), Some(&property("variable")), None)
        .next()
        .is_none());
}

#[test]
fn unconfigured_header_levels_flatten() {
    let graph = convert_with("# Big\nvariable :: value 1\n", &header_options());
    // h1 is not in the configured set; content stays on the root subject.
    assert!(graph
        .dataset
        .matching(Some(&graph.term), Some(&property("variable")), None)
        .next()
        .is_some());
}

#[test]
fn every_partition_has_exactly_one_parent() {
    let content = "## One\na :: 1\n## Two\nb :: 2\n### Inner\nc :: 3\n";
    let graph = convert_with(content, &header_options());
    let contains = Term::named(vault::CONTAINS);
    let section_type = Term::named(vault::SECTION);

    let sections: Vec<_> = graph
        .dataset
        .matching(None, Some(&Term::named(standard::RDF_TYPE)), Some(&section_type))
        .map(|t| t.subject.clone())
        .collect();
    assert_eq!(sections.len(), 3);

    for section in sections {
        let parents = graph
            .dataset
            .matching(None, Some(&contains), Some(&section))
            .count();
        assert_eq!(parents, 1, "section {section:?} should have one parent");
    }
}

#[test]
fn nested_partition_is_contained_by_its_section() {
    let graph = convert_with("## Outer\n### Inner\n", &header_options());
    let outer = Term::named(format!("{BASE}/note/Test.md/section/Outer"));
    let inner = Term::named(format!("{BASE}/note/Test.md/section/Inner"));
    assert!(graph
        .dataset
        .matching(Some(&outer), Some(&Term::named(vault::CONTAINS)), Some(&inner))
        .next()
        .is_some());
}

#[test]
fn identifier_partition_uses_declared_uri() {
    let options = TriplifyOptions {
        partition_by: vec![PartitionRule::Identifier],
        ..TriplifyOptions::default()
    };
    let content = "- item\n  - uri :: <http://example.org/thing>\n";
    // The child list item declares a URI, so it becomes its own subject.
    let graph = convert_with(content, &options);
    let thing = Term::named("http://example.org/thing");
    assert!(graph
        .dataset
        .matching(None, Some(&Term::named(vault::CONTAINS)), Some(&thing))
        .next()
        .is_some());
}

#[test]
fn tag_partition_splits_tagged_children() {
    let options = TriplifyOptions {
        partition_by: vec![PartitionRule::Tag],
        ..TriplifyOptions::default()
    };
    let graph = convert_with("# Person\nBob #person\n", &options);
    // The h1 node carries the tag (scanned from its paragraph content), so
    // it partitions; the tag triple lands on the section subject.
    let tag_pred = Term::named(vault::TAG);
    let person_lit = Term::literal("person");
    let tagged: Vec<_> = graph
        .dataset
        .matching(None, Some(&tag_pred), Some(&person_lit))
        .collect();
    assert_eq!(tagged.len(), 1);
    assert_ne!(tagged[0].subject, graph.term);
}

// --- Options ---

#[test]
fn include_raw_embeds_source_text() {
    let options = TriplifyOptions {
        include_raw: true,
        ..TriplifyOptions::default()
    };
    let content = "a :: b\n";
    let graph = convert_with(content, &options);
    assert!(graph
        .dataset
        .matching(
            Some(&graph.term),
            Some(&Term::named(vault::RAW)),
            Some(&Term::literal(content)),
        )
        .next()
        .is_some());
}

#[test]
fn declared_uri_overrides_document_term() {
    let graph = convert("uri :: <http://example.org/me>\nname :: Ada\n");
    assert_eq!(graph.term, Term::named("http://example.org/me"));
    // The reserved key itself emits no data triple.
    assert!(graph
        .dataset
        .matching(None, Some(&property("uri")), None)
        .next()
        .is_none());
}

#[test]
fn missing_base_namespace_fails_before_traversal() {
    let options = TriplifyOptions {
        base_namespace: String::new(),
        ..TriplifyOptions::default()
    };
    let err = triplify_document("Test.md", "", &options);
    assert!(matches!(err, Err(TriplifyError::MissingBaseNamespace)));
}

#[test]
fn custom_mappings_short_circuit_resolution() {
    let mut tables = MappingTables::default();
    tables
        .namespaces
        .insert("foaf".to_string(), "http://xmlns.com/foaf/0.1/".to_string());
    tables
        .mappings
        .insert("knows".to_string(), "foaf:knows".to_string());
    let options = TriplifyOptions {
        mappings: Mapper::prefix(tables),
        ..TriplifyOptions::default()
    };

    let graph = convert_with("knows :: [[Bob]]\n", &options);
    assert!(graph
        .dataset
        .matching(
            None,
            Some(&Term::named("http://xmlns.com/foaf/0.1/knows")),
            Some(&placeholder("Bob")),
        )
        .next()
        .is_some());
}

//! RDF vocabulary constants for the vault ontology.
//!
//! - `vault:` prefix (http://vault.example/ontology/) -- vault graph terms
//! - plus the standard RDF/RDFS/XSD namespaces.
//!
//! These are process-wide read-only tables; nothing mutates them after
//! startup.

/// Standard RDF/RDFS/XSD namespace URIs
pub mod standard {
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}

/// Vault graph ontology (`vault:` prefix)
pub mod vault {
    pub const PREFIX: &str = "vault";
    pub const NS: &str = "http://vault.example/ontology/";

    // Classes
    pub const NOTE: &str = "http://vault.example/ontology/Note";
    pub const SECTION: &str = "http://vault.example/ontology/Section";
    pub const CANVAS: &str = "http://vault.example/ontology/Canvas";

    // Predicates
    pub const CONTAINS: &str = "http://vault.example/ontology/contains";
    pub const RELATED: &str = "http://vault.example/ontology/related";
    pub const TAG: &str = "http://vault.example/ontology/tag";
    pub const RAW: &str = "http://vault.example/ontology/raw";
    pub const SELECTOR: &str = "http://vault.example/ontology/selector";
}

/// Built-in predicate synonyms recognized before property minting.
///
/// `"is a"` is the spoken form of `rdf:type`; the bare `"a"` matches the
/// Turtle shorthand.
pub fn predicate_synonym(raw: &str) -> Option<&'static str> {
    match raw.trim().to_lowercase().as_str() {
        "is a" | "a" => Some(standard::RDF_TYPE),
        "label" => Some(standard::RDFS_LABEL),
        _ => None,
    }
}

/// Default prefix table: the namespaces every mapper starts from.
pub fn default_namespaces() -> Vec<(&'static str, &'static str)> {
    vec![
        ("rdf", standard::RDF),
        ("rdfs", standard::RDFS),
        ("xsd", standard::XSD),
        (vault::PREFIX, vault::NS),
    ]
}

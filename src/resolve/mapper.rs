//! Declarative subject/predicate/object mapping.
//!
//! A [`Mapper`] short-circuits default term resolution through two tables:
//! `namespaces` (prefix -> namespace IRI) and `mappings` (exact label ->
//! `prefix:local` or absolute IRI). Variants are selected by configuration,
//! never by injected functions, and are cheap to re-create per call.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::model::ontology;
use crate::model::term::Term;

/// The prefix and override tables a mapper resolves against.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingTables {
    #[serde(default)]
    pub namespaces: HashMap<String, String>,
    #[serde(default)]
    pub mappings: HashMap<String, String>,
}

impl MappingTables {
    /// Merge the built-in namespace set underneath the configured one.
    pub fn with_defaults(mut self) -> Self {
        for (prefix, ns) in ontology::default_namespaces() {
            self.namespaces
                .entry(prefix.to_string())
                .or_insert_with(|| ns.to_string());
        }
        self
    }
}

/// Resolved terms for up to three slots; `None` means the mapper declined.
#[derive(Debug, Clone, Default)]
pub struct MappedSlots {
    pub subject: Option<Term>,
    pub predicate: Option<Term>,
    pub object: Option<Term>,
}

/// Errors raised while loading a declarative mapping file.
#[derive(Debug)]
pub enum MapperError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for MapperError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapperError::Io(e) => write!(f, "IO error: {e}"),
            MapperError::Yaml(e) => write!(f, "mapping file parse error: {e}"),
            MapperError::Json(e) => write!(f, "mapping file parse error: {e}"),
        }
    }
}

impl std::error::Error for MapperError {}

impl From<std::io::Error> for MapperError {
    fn from(e: std::io::Error) -> Self {
        MapperError::Io(e)
    }
}

/// A configured mapping capability.
#[derive(Debug, Clone, Default)]
pub enum Mapper {
    /// Inline tables from configuration.
    Prefix(MappingTables),
    /// Tables loaded from a declarative mapping file.
    Declarative(MappingTables),
    /// Maps nothing; every slot falls through to default resolution.
    #[default]
    Null,
}

impl Mapper {
    /// Build the inline variant, merging the default namespaces.
    pub fn prefix(tables: MappingTables) -> Self {
        Mapper::Prefix(tables.with_defaults())
    }

    /// Load a YAML or JSON mapping file and merge the default namespaces.
    pub fn from_file(path: &Path) -> Result<Self, MapperError> {
        let content = std::fs::read_to_string(path)?;
        let tables: MappingTables = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content).map_err(MapperError::Json)?
        } else {
            serde_yaml::from_str(&content).map_err(MapperError::Yaml)?
        };
        Ok(Mapper::Declarative(tables.with_defaults()))
    }

    fn tables(&self) -> Option<&MappingTables> {
        match self {
            Mapper::Prefix(t) | Mapper::Declarative(t) => Some(t),
            Mapper::Null => None,
        }
    }

    /// Resolve up to three raw slot values at once.
    pub fn resolve(
        &self,
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
    ) -> MappedSlots {
        MappedSlots {
            subject: subject.and_then(|v| self.resolve_value(v)),
            predicate: predicate.and_then(|v| self.resolve_value(v)),
            object: object.and_then(|v| self.resolve_value(v)),
        }
    }

    /// Resolve one raw value: override table first, then plain prefix lookup.
    pub fn resolve_value(&self, raw: &str) -> Option<Term> {
        let tables = self.tables()?;
        let raw = raw.trim();

        if let Some(mapped) = tables.mappings.get(raw) {
            // An invalid prefix in the mapped value falls back to treating it
            // as an absolute identifier.
            let iri = expand_prefixed(tables, mapped).unwrap_or_else(|| mapped.clone());
            return Some(Term::Named(iri));
        }

        expand_prefixed(tables, raw).map(Term::Named)
    }
}

/// Expand `prefix:localName` against the namespace table.
fn expand_prefixed(tables: &MappingTables, value: &str) -> Option<String> {
    let (prefix, local) = value.split_once(':')?;
    if local.is_empty() || local.starts_with("//") {
        return None;
    }
    tables
        .namespaces
        .get(prefix)
        .map(|ns| format!("{ns}{local}"))
}

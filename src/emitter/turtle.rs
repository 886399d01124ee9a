use std::collections::HashMap;
use std::io::{self, Write};

use crate::model::term::{Dataset, LiteralKind, Term};

use super::{escape_literal, DatasetSerializer};

/// Turtle writer with prefix support.
pub struct TurtleWriter<W: Write> {
    writer: W,
    prefixes: HashMap<String, String>,
}

impl<W: Write> TurtleWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            prefixes: HashMap::new(),
        }
    }

    /// Register a namespace prefix for compaction.
    pub fn add_prefix(&mut self, prefix: &str, iri: &str) {
        self.prefixes.insert(prefix.to_string(), iri.to_string());
    }

    /// Write all registered prefixes ahead of the first triple.
    fn write_prefixes(&mut self) -> io::Result<()> {
        // Sort for deterministic output
        let mut prefixes: Vec<_> = self.prefixes.iter().collect();
        prefixes.sort_by_key(|(k, _)| (*k).clone());
        for (prefix, iri) in &prefixes {
            writeln!(self.writer, "@prefix {prefix}: <{iri}> .")?;
        }
        if !prefixes.is_empty() {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    /// Try to compact an IRI using registered prefixes.
    fn compact_iri(&self, iri: &str) -> String {
        // Find longest matching prefix
        let mut best: Option<(&str, &str)> = None;
        for (prefix, ns) in &self.prefixes {
            if iri.starts_with(ns.as_str())
                && best.is_none_or(|(_, prev_ns)| ns.len() > prev_ns.len())
            {
                best = Some((prefix.as_str(), ns.as_str()));
            }
        }
        if let Some((prefix, ns)) = best {
            let local = &iri[ns.len()..];
            // Only compact if local name is valid (alphanumeric + _)
            if !local.is_empty() && local.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return format!("{prefix}:{local}");
            }
        }
        format!("<{iri}>")
    }

    fn render(&self, term: &Term) -> String {
        match term {
            Term::Named(iri) => self.compact_iri(iri),
            Term::Blank(label) => format!("_:{label}"),
            Term::Literal(lit) => {
                let escaped = escape_literal(&lit.value);
                if lit.kind == LiteralKind::String {
                    format!("\"{escaped}\"")
                } else {
                    format!(
                        "\"{escaped}\"^^{}",
                        self.compact_iri(lit.kind.datatype())
                    )
                }
            }
        }
    }
}

impl<W: Write> DatasetSerializer for TurtleWriter<W> {
    fn serialize(&mut self, dataset: &Dataset) -> io::Result<u64> {
        self.write_prefixes()?;
        let mut count = 0;
        for triple in dataset.iter() {
            let s = self.render(&triple.subject);
            let p = self.render(&triple.predicate);
            let o = self.render(&triple.object);
            writeln!(self.writer, "{s} {p} {o} .")?;
            count += 1;
        }
        self.writer.flush()?;
        Ok(count)
    }
}

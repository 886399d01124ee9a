pub mod ntriples;
pub mod turtle;

use std::io;

use crate::model::term::Dataset;

/// Trait for serializing a finished dataset in different textual syntaxes.
pub trait DatasetSerializer {
    /// Write every triple of the dataset; returns the triple count.
    fn serialize(&mut self, dataset: &Dataset) -> io::Result<u64>;
}

/// Escape a string for an RDF literal (per RDF 1.1 N-Triples spec).
pub(crate) fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                // Control chars: \uXXXX
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out
}

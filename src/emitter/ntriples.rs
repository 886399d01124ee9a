use std::io::{self, Write};

use crate::model::term::{Dataset, LiteralKind, Term};

use super::{escape_literal, DatasetSerializer};

/// N-Triples writer. Streams triples as `<s> <p> <o> .` lines.
pub struct NTriplesWriter<W: Write> {
    writer: W,
}

impl<W: Write> NTriplesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(term: &Term) -> String {
        match term {
            Term::Named(iri) => format!("<{iri}>"),
            Term::Blank(label) => format!("_:{label}"),
            Term::Literal(lit) => {
                let escaped = escape_literal(&lit.value);
                // Plain strings serialize as simple literals.
                if lit.kind == LiteralKind::String {
                    format!("\"{escaped}\"")
                } else {
                    format!("\"{escaped}\"^^<{}>", lit.kind.datatype())
                }
            }
        }
    }
}

impl<W: Write> DatasetSerializer for NTriplesWriter<W> {
    fn serialize(&mut self, dataset: &Dataset) -> io::Result<u64> {
        let mut count = 0;
        for triple in dataset.iter() {
            writeln!(
                self.writer,
                "{} {} {} .",
                Self::render(&triple.subject),
                Self::render(&triple.predicate),
                Self::render(&triple.object)
            )?;
            count += 1;
        }
        self.writer.flush()?;
        Ok(count)
    }
}

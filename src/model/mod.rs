pub mod iri;
pub mod ontology;
pub mod term;

pub use iri::IriMinter;
pub use term::{BlankAllocator, Dataset, Literal, LiteralKind, Term, Triple};

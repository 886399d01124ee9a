//! Role-based resolution of raw strings into graph terms.
//!
//! Predicates mint into the property namespace (after the synonym table);
//! subjects and objects recognize explicit URI delimiters and otherwise run
//! the literal-typing chain. The chain is a strict priority order -- boolean
//! before numeric before date before string -- so `"2024"` is an integer,
//! never a date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::model::iri::IriMinter;
use crate::model::ontology;
use crate::model::term::{Literal, LiteralKind, Term};

/// URI schemes recognized without angle-bracket wrapping.
const SCHEMES: [&str; 6] = ["http://", "https://", "urn:", "file://", "ftp://", "mailto:"];

/// Resolve a raw string in predicate position.
pub fn predicate_term(raw: &str, iris: &IriMinter) -> Term {
    match ontology::predicate_synonym(raw) {
        Some(iri) => Term::named(iri),
        None => Term::named(iris.property_iri(raw)),
    }
}

/// Resolve a raw string in subject position. Plain names mint placeholders:
/// a literal can never occupy subject position.
pub fn subject_term(raw: &str, iris: &IriMinter) -> Term {
    match explicit_uri(raw) {
        Some(uri) => Term::named(uri),
        None => Term::named(iris.name_iri(raw.trim())),
    }
}

/// Resolve a raw string in object position.
pub fn object_term(raw: &str) -> Term {
    match explicit_uri(raw) {
        Some(uri) => Term::named(uri),
        None => Term::Literal(typed_literal(raw)),
    }
}

/// Recognize values already marked as URIs: angle-bracket wrapped, or
/// carrying a known scheme prefix.
pub fn explicit_uri(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if let Some(inner) = trimmed.strip_prefix('<').and_then(|r| r.strip_suffix('>')) {
        return Some(inner.to_string());
    }
    if SCHEMES.iter().any(|s| trimmed.starts_with(s)) {
        return Some(trimmed.to_string());
    }
    None
}

// ---------------------------------------------------------------------------
// Literal typing
// ---------------------------------------------------------------------------

/// Infer a typed literal from raw text.
///
/// Priority chain, never reordered: empty string, backtick opt-out, boolean,
/// numeric, date/date-time patterns, plain string.
pub fn typed_literal(raw: &str) -> Literal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Literal::string("");
    }

    // Backtick wrapping is the explicit opt-out from type inference.
    if trimmed.len() >= 2 && trimmed.starts_with('`') && trimmed.ends_with('`') {
        return Literal::string(&trimmed[1..trimmed.len() - 1]);
    }

    if trimmed == "true" || trimmed == "false" {
        return Literal {
            value: trimmed.to_string(),
            kind: LiteralKind::Boolean,
        };
    }

    if trimmed.parse::<i64>().is_ok() {
        return Literal {
            value: trimmed.to_string(),
            kind: LiteralKind::Integer,
        };
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        // Finite only: "inf" and "NaN" read as prose, not numbers.
        if f.is_finite() {
            return Literal {
                value: trimmed.to_string(),
                kind: LiteralKind::Decimal,
            };
        }
    }

    if let Some(literal) = date_literal(trimmed) {
        return literal;
    }

    Literal::string(trimmed)
}

/// The fixed set of recognized date/date-time patterns.
fn date_literal(trimmed: &str) -> Option<Literal> {
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(Literal {
            value: date.format("%Y-%m-%d").to_string(),
            kind: LiteralKind::Date,
        });
    }
    // Full ISO 8601 with offset or Z, optional fractional seconds.
    if DateTime::parse_from_rfc3339(trimmed).is_ok() {
        return Some(Literal {
            value: trimmed.to_string(),
            kind: LiteralKind::DateTime,
        });
    }
    // ISO 8601 without an offset.
    if NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").is_ok() {
        return Some(Literal {
            value: trimmed.to_string(),
            kind: LiteralKind::DateTime,
        });
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y/%m/%d") {
        return Some(Literal {
            value: date.format("%Y-%m-%d").to_string(),
            kind: LiteralKind::Date,
        });
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%m/%d/%Y") {
        return Some(Literal {
            value: date.format("%Y-%m-%d").to_string(),
            kind: LiteralKind::Date,
        });
    }
    None
}

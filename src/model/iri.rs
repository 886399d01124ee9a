//! IRI minting for vault entities in RDF graphs.
//!
//! Every identifier the triplifiers create goes through [`IriMinter`], so
//! the placeholder repair pass can recognize its own namespaces by prefix
//! alone. Note terms embed the vault-relative path; placeholder terms embed
//! a percent-encoded bare name pending vault-index validation.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters that need percent-encoding in IRI path segments.
/// We keep alphanumeric, -, _, ., ~ as unreserved per RFC 3987.
const IRI_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Generates consistent IRIs for vault entities.
#[derive(Debug, Clone)]
pub struct IriMinter {
    base_uri: String,
}

impl IriMinter {
    pub fn new(base_uri: &str) -> Self {
        Self {
            base_uri: base_uri.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Escape a string for use in an IRI path segment.
    pub fn escape(value: &str) -> String {
        utf8_percent_encode(value, IRI_ENCODE_SET).to_string()
    }

    /// Decode a percent-encoded IRI segment back to its raw text.
    pub fn unescape(value: &str) -> String {
        percent_decode_str(value).decode_utf8_lossy().into_owned()
    }

    /// IRI for a note or canvas, derived from its vault-relative path.
    /// Path separators survive; each segment is escaped individually.
    pub fn note_iri(&self, path: &str) -> String {
        let escaped: Vec<String> = path
            .trim_matches('/')
            .split('/')
            .map(Self::escape)
            .collect();
        format!("{}/note/{}", self.base_uri, escaped.join("/"))
    }

    /// Placeholder IRI for a bare note name, pending vault-index validation.
    pub fn name_iri(&self, name: &str) -> String {
        format!("{}/name/{}", self.base_uri, Self::escape(name))
    }

    /// IRI for a minted property predicate: lower-cased, spaces to hyphens.
    pub fn property_iri(&self, name: &str) -> String {
        let slug = name.trim().to_lowercase().replace(' ', "-");
        format!("{}/property/{}", self.base_uri, Self::escape(&slug))
    }

    /// IRI for a partition subject carved out of an owning document.
    pub fn section_iri(&self, owner_iri: &str, label: &str) -> String {
        format!("{}/section/{}", owner_iri, Self::escape(label))
    }

    /// Extend a term IRI with an escaped selector suffix.
    pub fn with_selector(&self, iri: &str, selector: &str) -> String {
        format!("{}#{}", iri, Self::escape(selector))
    }

    // -----------------------------------------------------------------------
    // Namespace membership
    // -----------------------------------------------------------------------

    fn name_ns(&self) -> String {
        format!("{}/name/", self.base_uri)
    }

    fn note_ns(&self) -> String {
        format!("{}/note/", self.base_uri)
    }

    fn property_ns(&self) -> String {
        format!("{}/property/", self.base_uri)
    }

    /// True if `iri` was minted by [`name_iri`](Self::name_iri).
    pub fn is_placeholder(&self, iri: &str) -> bool {
        iri.starts_with(&self.name_ns())
    }

    /// True if `iri` was minted by [`note_iri`](Self::note_iri), with or
    /// without a section or selector suffix.
    pub fn is_note(&self, iri: &str) -> bool {
        iri.starts_with(&self.note_ns())
    }

    /// True if `iri` is a partition subject under some note.
    pub fn is_section(&self, iri: &str) -> bool {
        self.is_note(iri) && iri[self.note_ns().len()..].contains("/section/")
    }

    /// True if `iri` was minted by [`property_iri`](Self::property_iri).
    pub fn is_property(&self, iri: &str) -> bool {
        iri.starts_with(&self.property_ns())
    }

    /// Split a placeholder IRI into its decoded name and the raw suffix
    /// (selector fragment, `#` included) that must survive resolution.
    pub fn placeholder_parts<'a>(&self, iri: &'a str) -> Option<(String, &'a str)> {
        let rest = iri.strip_prefix(&self.name_ns())?;
        let (name, suffix) = match rest.find('#') {
            Some(pos) => (&rest[..pos], &rest[pos..]),
            None => (rest, ""),
        };
        Some((Self::unescape(name), suffix))
    }

    /// The decoded final path segment of an IRI, fragment stripped.
    /// Used to derive human-readable labels.
    pub fn decoded_tail(iri: &str) -> String {
        let no_fragment = iri.split('#').next().unwrap_or(iri);
        let tail = no_fragment.rsplit('/').next().unwrap_or(no_fragment);
        Self::unescape(tail)
    }
}

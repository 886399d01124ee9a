use vault2rdf::model::iri::IriMinter;

const BASE: &str = "http://example.org/vault";

fn minter() -> IriMinter {
    IriMinter::new(BASE)
}

// --- Note IRI ---

#[test]
fn note_iri_basic() {
    let m = minter();
    assert_eq!(
        m.note_iri("Bob.md"),
        "http://example.org/vault/note/Bob.md"
    );
}

#[test]
fn note_iri_keeps_path_separators() {
    let m = minter();
    assert_eq!(
        m.note_iri("people/friends/Bob.md"),
        "http://example.org/vault/note/people/friends/Bob.md"
    );
}

#[test]
fn note_iri_escapes_within_segments() {
    let m = minter();
    let iri = m.note_iri("daily notes/2024 plan.md");
    assert_eq!(
        iri,
        "http://example.org/vault/note/daily%20notes/2024%20plan.md"
    );
}

// --- Placeholder IRI ---

#[test]
fn name_iri_escapes_spaces() {
    let m = minter();
    assert_eq!(
        m.name_iri("Ada Lovelace"),
        "http://example.org/vault/name/Ada%20Lovelace"
    );
}

#[test]
fn placeholder_detection() {
    let m = minter();
    assert!(m.is_placeholder(&m.name_iri("Bob")));
    assert!(!m.is_placeholder(&m.note_iri("Bob.md")));
    assert!(!m.is_placeholder("http://elsewhere.example/name/Bob"));
}

#[test]
fn placeholder_parts_decode_the_name() {
    let m = minter();
    let iri = m.name_iri("Ada Lovelace");
    let (name, suffix) = m.placeholder_parts(&iri).unwrap();
    assert_eq!(name, "Ada Lovelace");
    assert_eq!(suffix, "");
}

#[test]
fn placeholder_parts_keep_selector_suffix() {
    let m = minter();
    let iri = m.with_selector(&m.name_iri("Bob"), "early life");
    let (name, suffix) = m.placeholder_parts(&iri).unwrap();
    assert_eq!(name, "Bob");
    assert_eq!(suffix, "#early%20life");
}

// --- Property IRI ---

#[test]
fn property_iri_slugs_spaces_and_case() {
    let m = minter();
    assert_eq!(
        m.property_iri("First Contact"),
        "http://example.org/vault/property/first-contact"
    );
}

#[test]
fn property_iri_escapes_leftovers() {
    let m = minter();
    let iri = m.property_iri("has (rough) size");
    assert!(iri.contains("has-%28rough%29-size"));
}

// --- Section IRI ---

#[test]
fn section_iri_extends_owner() {
    let m = minter();
    let owner = m.note_iri("Me.md");
    assert_eq!(
        m.section_iri(&owner, "Early Life"),
        "http://example.org/vault/note/Me.md/section/Early%20Life"
    );
}

#[test]
fn section_detection() {
    let m = minter();
    let owner = m.note_iri("Me.md");
    let section = m.section_iri(&owner, "Intro");
    assert!(m.is_section(&section));
    assert!(!m.is_section(&owner));
    assert!(m.is_note(&section));
}

// --- Selector suffix ---

#[test]
fn selector_suffix_is_escaped() {
    let m = minter();
    let iri = m.with_selector(&m.note_iri("Me.md"), "part one");
    assert_eq!(
        iri,
        "http://example.org/vault/note/Me.md#part%20one"
    );
}

// --- Decoding ---

#[test]
fn decoded_tail_reverses_escaping() {
    assert_eq!(
        IriMinter::decoded_tail("http://example.org/vault/note/daily%20notes/plan.md"),
        "plan.md"
    );
    assert_eq!(
        IriMinter::decoded_tail("http://example.org/vault/name/Ada%20Lovelace#intro"),
        "Ada Lovelace"
    );
}

// --- Edge cases ---

#[test]
fn base_uri_trailing_slash_stripped() {
    let m = IriMinter::new("http://example.org/vault/");
    assert_eq!(m.base_uri(), "http://example.org/vault");
    assert_eq!(m.note_iri("Bob.md"), "http://example.org/vault/note/Bob.md");
}

#[test]
fn base_uri_multiple_trailing_slashes() {
    let m = IriMinter::new("http://example.org/vault///");
    assert_eq!(m.base_uri(), "http://example.org/vault");
}

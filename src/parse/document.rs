//! Document tree model and the Markdown outline parser.
//!
//! The parser is deterministic and does no I/O: headings and list items
//! become nested [`DocumentNode`]s, `key :: value` lines become inline data
//! rows, `#tags` and `[[wiki]]` / `[alias](url)` links attach to the node
//! whose line they appear on. Frontmatter becomes a labeled-field data entry
//! on the root.

use serde_yaml::Mapping;

use super::frontmatter;

/// Data key that declares a partition's explicit identity. Never emitted
/// as an ordinary data triple.
pub const URI_KEY: &str = "uri";

/// Data key that declares a node's selector identifier (`[[#id]]` target).
pub const ID_KEY: &str = "id";

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// How a link was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// `[[Name]]`, `[[Name#selector]]`, or a markdown link to a local path.
    Wiki,
    /// A markdown link whose target carries a URI scheme.
    External,
}

/// A link attached to a document node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub kind: LinkKind,
    pub value: String,
    pub alias: Option<String>,
}

/// One data entry on a node.
#[derive(Debug, Clone, PartialEq)]
pub enum DataEntry {
    /// An inline `a :: b` or `a :: b :: c` row, split on `::`.
    Row(Vec<String>),
    /// A labeled-field block (frontmatter or YAML-like), one field per key.
    Fields(Mapping),
}

/// A node in the parsed document tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentNode {
    /// Heading text or list-item text; `None` for the root and data rows.
    pub label: Option<String>,
    /// Set for heading nodes (1-6).
    pub heading_level: Option<u8>,
    pub data: Vec<DataEntry>,
    pub tags: Vec<String>,
    pub links: Vec<Link>,
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// The explicit URI this node declares via the reserved `uri` key.
    pub fn declared_uri(&self) -> Option<&str> {
        self.reserved_value(URI_KEY)
    }

    /// The selector identifier this node declares via the reserved `id` key.
    pub fn declared_id(&self) -> Option<&str> {
        self.reserved_value(ID_KEY)
    }

    fn reserved_value(&self, key: &str) -> Option<&str> {
        self.data.iter().find_map(|entry| match entry {
            DataEntry::Row(parts) if parts.len() == 2 && parts[0] == key => {
                Some(parts[1].as_str())
            }
            DataEntry::Fields(mapping) => mapping.get(key).and_then(|v| v.as_str()),
            _ => None,
        })
    }

    /// Depth-first search for the node addressed by `selector`: a node
    /// matches when its declared `id` or its label equals the selector.
    pub fn find_selector(&self, selector: &str) -> Option<&DocumentNode> {
        if self.declared_id() == Some(selector) || self.label.as_deref() == Some(selector) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_selector(selector))
    }
}

/// Errors raised while parsing a document.
#[derive(Debug)]
pub enum ParseError {
    Frontmatter(serde_yaml::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Frontmatter(e) => write!(f, "invalid frontmatter: {e}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<serde_yaml::Error> for ParseError {
    fn from(e: serde_yaml::Error) -> Self {
        ParseError::Frontmatter(e)
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse document text into a tree. Deterministic, no I/O.
pub fn parse(text: &str) -> Result<DocumentNode, ParseError> {
    let (fm, body) = frontmatter::split(text)?;

    let mut root = DocumentNode::default();
    if let Some(mapping) = fm {
        root.data.push(DataEntry::Fields(mapping));
    }

    let mut builder = TreeBuilder::new(root);
    let mut in_fence = false;

    for raw_line in body.lines() {
        let line = raw_line.trim_end();

        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some((level, text)) = heading_line(line) {
            builder.open_heading(level, text);
            continue;
        }

        if let Some((indent, text)) = list_item_line(line) {
            builder.open_list_item(indent, text);
            continue;
        }

        if !line.trim().is_empty() {
            // Paragraph content attaches to the enclosing heading scope.
            builder.close_lists();
            builder.attach_content(line.trim());
        }
    }

    Ok(builder.finish())
}

// ---------------------------------------------------------------------------
// Tree building
// ---------------------------------------------------------------------------

struct TreeBuilder {
    /// Heading scopes, outermost first; index 0 is the document root.
    headings: Vec<(u8, DocumentNode)>,
    /// Open list items inside the innermost heading scope.
    lists: Vec<(usize, DocumentNode)>,
}

impl TreeBuilder {
    fn new(root: DocumentNode) -> Self {
        Self {
            headings: vec![(0, root)],
            lists: Vec::new(),
        }
    }

    fn open_heading(&mut self, level: u8, text: &str) {
        self.close_lists();
        while self.headings.len() > 1 {
            let deepest = self.headings[self.headings.len() - 1].0;
            if deepest < level {
                break;
            }
            self.fold_heading();
        }
        let mut node = DocumentNode {
            heading_level: Some(level),
            ..DocumentNode::default()
        };
        scan_inline(text, &mut node);
        node.label = Some(strip_markup(text));
        self.headings.push((level, node));
    }

    fn open_list_item(&mut self, indent: usize, text: &str) {
        while let Some((top_indent, _)) = self.lists.last() {
            if *top_indent < indent {
                break;
            }
            self.fold_list_item();
        }
        let mut node = DocumentNode::default();
        scan_inline(text, &mut node);
        if node.data.is_empty() {
            node.label = Some(strip_markup(text));
        }
        self.lists.push((indent, node));
    }

    /// Attach paragraph content (data rows, tags, links) to the current scope.
    fn attach_content(&mut self, text: &str) {
        if let Some((_, node)) = self.headings.last_mut() {
            scan_inline(text, node);
        }
    }

    /// Pop one open list item and attach it to its parent.
    fn fold_list_item(&mut self) {
        if let Some((_, node)) = self.lists.pop() {
            match self.lists.last_mut() {
                Some((_, parent)) => parent.children.push(node),
                None => {
                    if let Some((_, scope)) = self.headings.last_mut() {
                        scope.children.push(node);
                    }
                }
            }
        }
    }

    fn close_lists(&mut self) {
        while !self.lists.is_empty() {
            self.fold_list_item();
        }
    }

    /// Pop one heading scope and attach it to its parent scope.
    fn fold_heading(&mut self) {
        if self.headings.len() < 2 {
            return;
        }
        if let Some((_, node)) = self.headings.pop() {
            if let Some((_, parent)) = self.headings.last_mut() {
                parent.children.push(node);
            }
        }
    }

    fn finish(mut self) -> DocumentNode {
        self.close_lists();
        while self.headings.len() > 1 {
            self.fold_heading();
        }
        match self.headings.pop() {
            Some((_, root)) => root,
            None => DocumentNode::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Line classification
// ---------------------------------------------------------------------------

/// `## Heading` lines: 1-6 hashes followed by a space.
fn heading_line(line: &str) -> Option<(u8, &str)> {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &trimmed[hashes..];
    rest.strip_prefix(' ')
        .map(|text| (hashes as u8, text.trim()))
}

/// `- item` / `* item` / `+ item` lines; returns (indent width, item text).
fn list_item_line(line: &str) -> Option<(usize, &str)> {
    let indent = line.len() - line.trim_start().len();
    let trimmed = line.trim_start();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some('-' | '*' | '+'), Some(' ')) => Some((indent, trimmed[2..].trim())),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Inline scanning
// ---------------------------------------------------------------------------

/// Scan one line of content into `node`: data rows, tags and links.
fn scan_inline(text: &str, node: &mut DocumentNode) {
    scan_links(text, node);
    scan_tags(text, node);

    if text.contains("::") {
        let parts: Vec<String> = text
            .split("::")
            .map(|p| p.trim().to_string())
            .collect();
        if parts.len() >= 2 && !parts[0].is_empty() {
            node.data.push(DataEntry::Row(parts));
        }
    }
}

/// Extract `[[wiki|alias]]` and `[alias](target)` links.
fn scan_links(text: &str, node: &mut DocumentNode) {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if text[i..].starts_with("[[") {
            if let Some(end) = text[i + 2..].find("]]") {
                let inner = &text[i + 2..i + 2 + end];
                let (value, alias) = match inner.split_once('|') {
                    Some((v, a)) => (v.trim(), Some(a.trim().to_string())),
                    None => (inner.trim(), None),
                };
                node.links.push(Link {
                    kind: LinkKind::Wiki,
                    value: value.to_string(),
                    alias,
                });
                i += 2 + end + 2;
                continue;
            }
        } else if bytes[i] == b'[' {
            // Markdown link: [alias](target)
            if let Some(close) = text[i + 1..].find(']') {
                let after = i + 1 + close + 1;
                if text[after..].starts_with('(') {
                    if let Some(paren) = text[after + 1..].find(')') {
                        let alias = text[i + 1..i + 1 + close].trim();
                        let target = text[after + 1..after + 1 + paren].trim();
                        let kind = if has_uri_scheme(target) {
                            LinkKind::External
                        } else {
                            LinkKind::Wiki
                        };
                        node.links.push(Link {
                            kind,
                            value: target.to_string(),
                            alias: (!alias.is_empty()).then(|| alias.to_string()),
                        });
                        i = after + 1 + paren + 1;
                        continue;
                    }
                }
            }
        }
        i += next_char_width(text, i);
    }
}

/// Extract `#tag` tokens: `#` at a word boundary followed by a tag character.
fn scan_tags(text: &str, node: &mut DocumentNode) {
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let boundary = matches!(prev, None | Some(' ' | '\t' | '('));
        if c == '#' && boundary {
            if let Some((_, next)) = chars.peek() {
                if next.is_alphanumeric() || *next == '_' {
                    let tag: String = text[i + 1..]
                        .chars()
                        .take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '/'))
                        .collect();
                    for _ in 0..tag.chars().count() {
                        chars.next();
                    }
                    if !node.tags.contains(&tag) {
                        node.tags.push(tag);
                    }
                    prev = Some('#');
                    continue;
                }
            }
        }
        prev = Some(c);
    }
}

/// Remove link markup from label text, keeping the human-readable parts.
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        match rest.find("[[") {
            Some(start) => match rest[start + 2..].find("]]") {
                Some(end) => {
                    out.push_str(&rest[..start]);
                    let inner = &rest[start + 2..start + 2 + end];
                    out.push_str(inner.split('|').next_back().unwrap_or(inner).trim());
                    rest = &rest[start + 2 + end + 2..];
                }
                None => break,
            },
            None => break,
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

fn has_uri_scheme(target: &str) -> bool {
    const SCHEMES: [&str; 6] = ["http:", "https:", "urn:", "file:", "ftp:", "mailto:"];
    SCHEMES.iter().any(|s| target.starts_with(s))
}

fn next_char_width(text: &str, i: usize) -> usize {
    text[i..].chars().next().map_or(1, |c| c.len_utf8())
}

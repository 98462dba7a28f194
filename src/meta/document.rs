//! FFMETADATA document assembly.

use crate::meta::escape::escape_value;

/// Leading token of every FFMETADATA document.
pub const HEADER: &str = ";FFMETADATA1";

/// An ordered set of metadata tags, rendered in insertion order.
///
/// The tag order is part of the output contract, so entries live in a
/// `Vec` rather than a map. Keys are not validated or deduplicated; the
/// caller owns key correctness.
#[derive(Clone, Debug, Default)]
pub struct MetadataDocument {
    entries: Vec<(String, String)>,
}

impl MetadataDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag. `value` is raw, unescaped text; escaping happens at
    /// render time.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Return `true` when the document has no tags.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tags in insertion order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Render the full document text.
    ///
    /// The header and every `KEY=escapedValue` line are each terminated by
    /// a single `\n`; nothing follows the final newline.
    pub fn render(&self) -> String {
        let mut out = String::from(HEADER);
        for (key, value) in &self.entries {
            out.push('\n');
            out.push_str(key);
            out.push('=');
            out.push_str(&escape_value(value));
        }
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_entry_renders_exact_bytes() {
        let mut doc = MetadataDocument::new();
        doc.push("TITLE", "Glyph");
        assert_eq!(doc.render(), ";FFMETADATA1\nTITLE=Glyph\n");
    }

    #[test]
    fn empty_document_is_header_only() {
        assert_eq!(MetadataDocument::new().render(), ";FFMETADATA1\n");
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut doc = MetadataDocument::new();
        doc.push("B", "2").push("A", "1").push("C", "3");
        assert_eq!(doc.render(), ";FFMETADATA1\nB=2\nA=1\nC=3\n");
    }

    #[test]
    fn duplicate_keys_are_kept() {
        let mut doc = MetadataDocument::new();
        doc.push("K", "first").push("K", "second");
        assert_eq!(doc.render(), ";FFMETADATA1\nK=first\nK=second\n");
    }

    #[test]
    fn values_are_escaped_at_render_time() {
        let mut doc = MetadataDocument::new();
        doc.push("TITLE", "a=b;c");
        assert_eq!(doc.render(), ";FFMETADATA1\nTITLE=a\\=b\\;c\n");
    }

    #[test]
    fn multiline_value_renders_as_continuation_lines() {
        let mut doc = MetadataDocument::new();
        doc.push("AUTHOR", "abc\ndef\n");
        assert_eq!(doc.render(), ";FFMETADATA1\nAUTHOR=abc\\\ndef\\\n\n");
    }
}

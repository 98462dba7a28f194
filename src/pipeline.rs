//! Glyph payload pipeline: raw script text in, finished FFMETADATA out.

use crate::error::GlyphtuneResult;
use crate::meta::chunk::encode_block;
use crate::meta::compress::deflate_best;
use crate::meta::document::MetadataDocument;
use crate::meta::normalize::normalize_script;

/// ALBUM tag stamped on every output file.
pub const ALBUM: &str = "Glyph Tools";
/// COMPOSER tag the companion firmware keys on.
pub const COMPOSER: &str = "v1-Pacman Glyph Composer";
/// CUSTOM2 tag: glyph column layout identifier.
pub const CUSTOM2: &str = "26cols";
/// TITLE used when the caller supplies none.
pub const DEFAULT_TITLE: &str = "Glyph";

/// Run one payload through deflate -> chunked base64.
pub fn encode_payload(raw: &[u8]) -> GlyphtuneResult<String> {
    Ok(encode_block(&deflate_best(raw)?))
}

/// Build the six-tag glyph metadata document for `script`.
///
/// AUTHOR carries the normalized, compressed, chunk-encoded script;
/// CUSTOM1 carries the encoding of the empty payload (reserved, unused by
/// current firmware); the remaining tags are plain display strings.
pub fn build_glyph_document(
    script: &str,
    title: Option<&str>,
) -> GlyphtuneResult<MetadataDocument> {
    let author = encode_payload(normalize_script(script).as_bytes())?;
    let custom1 = encode_payload(b"")?;

    let mut doc = MetadataDocument::new();
    doc.push("TITLE", title.unwrap_or(DEFAULT_TITLE))
        .push("ALBUM", ALBUM)
        .push("AUTHOR", author)
        .push("COMPOSER", COMPOSER)
        .push("CUSTOM1", custom1)
        .push("CUSTOM2", CUSTOM2);
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_has_six_tags_in_fixed_order() {
        let doc = build_glyph_document("1,2,3", None).unwrap();
        let keys: Vec<&str> = doc.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            ["TITLE", "ALBUM", "AUTHOR", "COMPOSER", "CUSTOM1", "CUSTOM2"]
        );
    }

    #[test]
    fn default_title_applies_when_absent() {
        let doc = build_glyph_document("1,", None).unwrap();
        assert_eq!(doc.entries()[0].1, DEFAULT_TITLE);

        let doc = build_glyph_document("1,", Some("My Ringtone")).unwrap();
        assert_eq!(doc.entries()[0].1, "My Ringtone");
    }

    #[test]
    fn author_block_is_nonempty_unpadded_base64() {
        let doc = build_glyph_document("15,0,4095,", None).unwrap();
        let author = &doc.entries()[2].1;
        assert!(author.ends_with('\n'));
        assert!(!author.contains('='));
        assert!(author.len() > 1);
    }

    #[test]
    fn rendered_document_starts_with_header_and_title() {
        let doc = build_glyph_document("1,", Some("T")).unwrap();
        let text = doc.render();
        assert!(text.starts_with(";FFMETADATA1\nTITLE=T\n"));
        // A multiline AUTHOR value renders as backslash continuations, so
        // the document still parses as one AUTHOR tag.
        assert!(text.contains("AUTHOR="));
        assert!(text.ends_with('\n'));
    }
}

//! Canonicalizes a glyph script into the fixed line form the companion
//! firmware expects: every line ends with exactly one comma and one CRLF.

/// Normalize a glyph script blob into trailing-comma, CRLF-terminated form.
///
/// Input may use LF, CRLF, or CR line endings (or none at all). Each line is
/// stripped of trailing commas, spaces, and tabs, then given exactly one
/// trailing comma. The output joins all lines with CRLF and always ends with
/// a final CRLF. Empty input is treated as a single empty line and yields
/// `",\r\n"`.
///
/// Trailing whitespace that preceded a comma is lost here on purpose; the
/// hardware-side parser depends on the stripped form.
pub fn normalize_script(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    for line in split_lines(input) {
        out.push_str(line.trim_end_matches([',', ' ', '\t']));
        out.push(',');
        out.push_str("\r\n");
    }
    out
}

/// Split on LF, CRLF, or CR, discarding terminators.
///
/// Unlike [`str::lines`], a lone CR counts as a terminator, and empty input
/// produces one empty line rather than none.
fn split_lines(input: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = input.as_bytes();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&input[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&input[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() || lines.is_empty() {
        lines.push(&input[start..]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_line_gains_comma_and_crlf() {
        assert_eq!(normalize_script("a,b,c"), "a,b,c,\r\n");
    }

    #[test]
    fn existing_trailing_comma_is_not_duplicated() {
        assert_eq!(normalize_script("x,\r\ny"), "x,\r\ny,\r\n");
    }

    #[test]
    fn mixed_line_endings_are_unified() {
        assert_eq!(normalize_script("a\nb\r\nc\rd"), "a,\r\nb,\r\nc,\r\nd,\r\n");
    }

    #[test]
    fn trailing_comma_space_tab_mix_is_stripped() {
        assert_eq!(normalize_script("a, \t,"), "a,\r\n");
        assert_eq!(normalize_script("a\t ,, \t"), "a,\r\n");
    }

    #[test]
    fn empty_input_yields_single_comma_line() {
        assert_eq!(normalize_script(""), ",\r\n");
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        assert_eq!(normalize_script("a\n"), "a,\r\n");
        assert_eq!(normalize_script("a\r\n"), "a,\r\n");
    }

    #[test]
    fn interior_empty_lines_survive() {
        assert_eq!(normalize_script("a\n\nb"), "a,\r\n,\r\nb,\r\n");
    }

    #[test]
    fn idempotent_on_normalized_text() {
        let once = normalize_script("1,2,3\n4,5,6");
        assert_eq!(normalize_script(&once), once);
    }

    #[test]
    fn every_output_line_ends_with_one_comma() {
        let out = normalize_script("a,,,\nb  \nc\t\t");
        for line in out.split("\r\n").filter(|l| !l.is_empty()) {
            assert!(line.ends_with(','));
            assert!(!line.ends_with(",,"));
        }
        assert!(out.ends_with("\r\n"));
    }
}

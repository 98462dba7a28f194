//! Escaping for FFMETADATA tag values.

/// Escape `value` for use as an FFMETADATA tag value.
///
/// Replacements run in a fixed order so that later insertions are not
/// re-mangled by the backslash rule:
///
/// 1. `\` becomes `\\`
/// 2. `=` becomes `\=`
/// 3. `;` becomes `\;`
/// 4. `#` becomes `\#`
/// 5. a newline becomes a backslash followed by a *real* newline, a line
///    continuation in the format, not a two-character escape sequence.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '=' => out.push_str("\\="),
            ';' => out.push_str("\\;"),
            '#' => out.push_str("\\#"),
            '\n' => out.push_str("\\\n"),
            _ => out.push(c),
        }
    }
    out
}

//! Unpadded base64 blocks wrapped to fixed-width lines.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD_NO_PAD;

/// Maximum characters per encoded line.
pub const LINE_WIDTH: usize = 76;

/// Encode `data` as an unpadded base64 block.
///
/// Standard alphabet, no `=` padding (the decoder restores padding from
/// length modulo 4), wrapped into lines of at most [`LINE_WIDTH`]
/// characters joined by `\n`, with exactly one trailing `\n`. Empty input
/// yields a block of zero data lines, i.e. `"\n"`.
pub fn encode_block(data: &[u8]) -> String {
    let encoded = STANDARD_NO_PAD.encode(data);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / LINE_WIDTH + 1);
    // base64 output is pure ASCII, so byte-width slicing never splits a char.
    let mut rest = encoded.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(LINE_WIDTH));
        out.push_str(line);
        out.push('\n');
        rest = tail;
    }
    if out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    /// Undo the block transform: strip newlines, restore padding, decode.
    fn decode_block(block: &str) -> Vec<u8> {
        let joined: String = block.chars().filter(|c| *c != '\n').collect();
        let padded = match joined.len() % 4 {
            0 => joined,
            2 => format!("{joined}=="),
            3 => format!("{joined}="),
            _ => panic!("invalid unpadded base64 length"),
        };
        STANDARD.decode(padded).unwrap()
    }

    #[test]
    fn roundtrip_short_and_long_inputs() {
        for len in [1usize, 2, 3, 56, 57, 58, 75, 76, 77, 200, 1024] {
            let data: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
            assert_eq!(decode_block(&encode_block(&data)), data, "len {len}");
        }
    }

    #[test]
    fn no_padding_characters_appear() {
        // 1 and 2 byte inputs force padding in plain base64.
        assert!(!encode_block(b"x").contains('='));
        assert!(!encode_block(b"xy").contains('='));
        assert!(!encode_block(&[0u8; 100]).contains('='));
    }

    #[test]
    fn lines_never_exceed_width() {
        let block = encode_block(&[7u8; 400]);
        for line in block.split('\n') {
            assert!(line.len() <= LINE_WIDTH);
        }
    }

    #[test]
    fn exactly_one_trailing_newline() {
        let block = encode_block(b"hello world");
        assert!(block.ends_with('\n'));
        assert!(!block.ends_with("\n\n"));
    }

    #[test]
    fn empty_input_yields_bare_newline() {
        assert_eq!(encode_block(b""), "\n");
    }

    #[test]
    fn short_input_is_single_line() {
        let block = encode_block(b"hello");
        assert_eq!(block.matches('\n').count(), 1);
        assert!(block.len() > 1);
    }
}

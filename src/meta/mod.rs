//! Byte-exact building blocks for the FFMETADATA payload.
//!
//! Every function in this module tree is a pure transformation with an exact
//! output contract; the orchestration layers above must never have to touch
//! up the bytes these produce.

/// Unpadded, line-wrapped base64 blocks.
pub mod chunk;
/// zlib deflate wrapper.
pub mod compress;
/// FFMETADATA document assembly.
pub mod document;
/// FFMETADATA value escaping.
pub mod escape;
/// Glyph script line normalization.
pub mod normalize;

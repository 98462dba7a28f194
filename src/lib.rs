//! Glyphtune embeds glyph animation scripts into an audio file's metadata
//! tags, producing an Ogg/Opus file that plays normally but carries a
//! payload the companion hardware can read back.
//!
//! The interesting part is the byte-exact metadata pipeline:
//!
//! - normalize the glyph script ([`meta::normalize`])
//! - deflate it ([`meta::compress`])
//! - chunk-encode it ([`meta::chunk`])
//! - escape and assemble the FFMETADATA document ([`meta::escape`],
//!   [`meta::document`])
//!
//! Around that core, [`tool`] shells out to the system `ffmpeg`/`ffprobe`
//! for probing, transcoding, and tag injection (stream copy, audio bytes
//! untouched), [`embed`] orchestrates one end-to-end run, and [`server`]
//! exposes the whole thing as a small upload-and-download web app.

#![forbid(unsafe_code)]

pub mod config;
pub mod embed;
pub mod error;
pub mod meta;
pub mod pipeline;
pub mod server;
pub mod tool;

pub use config::Config;
pub use embed::{EmbedOpts, embed_into_file, output_name};
pub use error::{GlyphtuneError, GlyphtuneResult};
pub use meta::document::MetadataDocument;
pub use pipeline::build_glyph_document;
pub use tool::{FfmpegTools, needs_transcode};

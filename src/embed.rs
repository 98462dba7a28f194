//! End-to-end embed orchestration: probe, transcode when needed, inject.

use std::path::Path;

use crate::error::GlyphtuneResult;
use crate::pipeline::build_glyph_document;
use crate::tool::{FfmpegTools, needs_transcode};

/// Options for one embed run.
#[derive(Clone, Debug, Default)]
pub struct EmbedOpts {
    /// TITLE tag; falls back to the pipeline default when `None`.
    pub title: Option<String>,
    /// Container extension of the source file ("ogg", "mp3", ...). When
    /// `None` it is taken from `input`'s path extension.
    pub source_extension: Option<String>,
}

/// Embed `script` into the audio file at `input`, writing the tagged
/// Ogg/Opus container to `out`.
///
/// The audio stream of an already-Opus-in-Ogg source is copied untouched;
/// anything else is first transcoded into a temporary Ogg/Opus file that is
/// removed on every exit path, success or failure.
#[tracing::instrument(skip(tools, script, opts))]
pub fn embed_into_file(
    tools: &FfmpegTools,
    input: &Path,
    script: &str,
    opts: &EmbedOpts,
    out: &Path,
) -> GlyphtuneResult<()> {
    let extension = opts
        .source_extension
        .clone()
        .or_else(|| {
            input
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
        })
        .unwrap_or_default();

    let codec = tools.probe_codec(input);
    tracing::debug!(codec = %codec, extension = %extension, "probed source stream");

    // Holds the transcoded intermediate alive until injection finishes.
    let mut transcoded: Option<tempfile::NamedTempFile> = None;
    let work_path: &Path = if needs_transcode(&codec, &extension) {
        let tmp = tempfile::Builder::new()
            .prefix("glyphtune-work-")
            .suffix(".ogg")
            .tempfile()
            .map_err(|e| anyhow::anyhow!("failed to create temp file: {e}"))?;
        tools.transcode_to_ogg_opus(input, tmp.path())?;
        transcoded.insert(tmp).path()
    } else {
        input
    };

    let document = build_glyph_document(script, opts.title.as_deref())?;
    tools.inject_metadata(work_path, &document.render(), out)?;

    tracing::info!(out = %out.display(), "embedded glyph metadata");
    Ok(())
}

/// Download/output file name for a given source stem.
pub fn output_name(source_stem: &str) -> String {
    format!("{source_stem}_glyphed.ogg")
}

//! HTTP surface: a small axum application around the embed pipeline.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::embed::{EmbedOpts, embed_into_file, output_name};
use crate::error::{GlyphtuneError, GlyphtuneResult};
use crate::tool::FfmpegTools;

/// Shared per-process state; everything in here is immutable per request.
#[derive(Clone)]
pub struct AppState {
    pub tools: FfmpegTools,
}

/// Build the application router.
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/embed", post(embed_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// API error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// API error: HTTP status plus a JSON message body.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<GlyphtuneError> for ApiError {
    fn from(err: GlyphtuneError) -> Self {
        match err {
            GlyphtuneError::InputMissing(msg) => ApiError::bad_request(msg),
            other => ApiError::internal_error(format!("embed failed: {other}")),
        }
    }
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /embed
///
/// Multipart form: `audio` (file, required), `csv` (glyph script text,
/// required), `title` (optional). Responds with the tagged Ogg/Opus file
/// as a download attachment.
async fn embed_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut audio: Option<(String, Vec<u8>)> = None;
    let mut script: Option<String> = None;
    let mut title: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart request: {e}")))?
    {
        // `bytes()`/`text()` consume the field, so detach the name first.
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("audio") => {
                let filename = field.file_name().unwrap_or("input.ogg").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;
                audio = Some((filename, bytes.to_vec()));
            }
            Some("csv") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read csv: {e}")))?;
                script = Some(text);
            }
            Some("title") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read title: {e}")))?;
                if !text.trim().is_empty() {
                    title = Some(text);
                }
            }
            _ => {}
        }
    }

    let (filename, audio_bytes) = audio.ok_or_else(|| {
        ApiError::from(GlyphtuneError::input_missing("audio file upload is required"))
    })?;
    let script = script.ok_or_else(|| {
        ApiError::from(GlyphtuneError::input_missing("csv glyph data is required"))
    })?;

    let (stem, extension) = split_upload_name(&filename);
    let download_name = output_name(&stem);
    let opts = EmbedOpts {
        title,
        source_extension: Some(extension),
    };

    let tools = state.tools.clone();
    let tagged = tokio::task::spawn_blocking(move || {
        embed_upload(&tools, &audio_bytes, &script, &opts)
    })
    .await
    .map_err(|e| ApiError::internal_error(format!("embed task failed: {e}")))??;

    let headers = [
        (header::CONTENT_TYPE, "audio/ogg".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{download_name}\""),
        ),
    ];
    Ok((headers, tagged).into_response())
}

/// Synchronous request body: temp files in, tagged bytes out. Temp files
/// are dropped (and unlinked) on every exit path.
fn embed_upload(
    tools: &FfmpegTools,
    audio_bytes: &[u8],
    script: &str,
    opts: &EmbedOpts,
) -> GlyphtuneResult<Vec<u8>> {
    let suffix = match opts.source_extension.as_deref() {
        Some(ext) if !ext.is_empty() => format!(".{ext}"),
        _ => ".bin".to_string(),
    };
    let input = tempfile::Builder::new()
        .prefix("glyphtune-in-")
        .suffix(&suffix)
        .tempfile()
        .map_err(|e| anyhow::anyhow!("failed to create temp file: {e}"))?;
    std::fs::write(input.path(), audio_bytes)
        .map_err(|e| anyhow::anyhow!("failed to store upload: {e}"))?;

    let out = tempfile::Builder::new()
        .prefix("glyphtune-out-")
        .suffix(".ogg")
        .tempfile()
        .map_err(|e| anyhow::anyhow!("failed to create temp file: {e}"))?;

    embed_into_file(tools, input.path(), script, opts, out.path())?;

    std::fs::read(out.path()).map_err(|e| anyhow::anyhow!("failed to read output: {e}").into())
}

/// Split an uploaded file name into a sanitized stem and its extension.
///
/// The stem keeps only alphanumerics, `.`, `-`, and `_` (other characters
/// become `_`), so it is safe to echo into a Content-Disposition header.
fn split_upload_name(filename: &str) -> (String, String) {
    // Drop any path components a hostile client sent along.
    let base = Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (stem, extension) = match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), ext.to_string()),
        _ => (base.clone(), String::new()),
    };

    let mut safe: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe.is_empty() {
        safe = "input".to_string();
    }
    (safe, extension)
}

const INDEX_HTML: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>glyphtune</title></head>
<body>
<h1>glyphtune</h1>
<p>Embed a glyph animation script into an audio file's metadata.</p>
<form action="/embed" method="post" enctype="multipart/form-data">
  <p><label>Audio file: <input type="file" name="audio" required></label></p>
  <p><label>Title: <input type="text" name="title" placeholder="Glyph"></label></p>
  <p><label>Glyph script:<br><textarea name="csv" rows="12" cols="60" required></textarea></label></p>
  <p><button type="submit">Embed</button></p>
</form>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_name_splits_stem_and_extension() {
        assert_eq!(
            split_upload_name("ringtone.ogg"),
            ("ringtone".to_string(), "ogg".to_string())
        );
        assert_eq!(
            split_upload_name("track.final.mp3"),
            ("track.final".to_string(), "mp3".to_string())
        );
    }

    #[test]
    fn upload_name_is_sanitized() {
        assert_eq!(
            split_upload_name("../../etc/passwd"),
            ("passwd".to_string(), String::new())
        );
        let (stem, ext) = split_upload_name("my song?.ogg");
        assert_eq!(stem, "my_song_");
        assert_eq!(ext, "ogg");
    }

    #[test]
    fn empty_name_falls_back() {
        let (stem, ext) = split_upload_name("");
        assert_eq!(stem, "input");
        assert_eq!(ext, "");
    }

    #[test]
    fn input_missing_maps_to_bad_request() {
        let err = ApiError::from(GlyphtuneError::input_missing("x"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = ApiError::from(GlyphtuneError::tool_failure("x"));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}

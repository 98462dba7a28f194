//! Service configuration, resolved once at startup.

use std::path::PathBuf;

/// Runtime configuration for the server binary.
///
/// Tool paths resolved here are handed to [`crate::tool::FfmpegTools`] at
/// construction; nothing re-reads the environment after startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    /// Upper bound on an uploaded request body, in bytes.
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("GLYPHTUNE_LISTEN")
                .unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            ffmpeg_path: std::env::var("GLYPHTUNE_FFMPEG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("ffmpeg")),
            ffprobe_path: std::env::var("GLYPHTUNE_FFPROBE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("ffprobe")),
            max_upload_bytes: std::env::var("GLYPHTUNE_MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(64 * 1024 * 1024),
        }
    }
}

//! System `ffmpeg`/`ffprobe` invocation.
//!
//! We intentionally shell out to the system binaries rather than linking
//! FFmpeg to avoid native dev header/lib requirements. All invocations are
//! synchronous; callers that live in async contexts run them on a blocking
//! thread.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{GlyphtuneError, GlyphtuneResult};

/// Codec id that needs no transcoding when already in an Ogg container.
pub const OPUS_CODEC: &str = "opus";
/// Container extension that pairs with [`OPUS_CODEC`].
pub const OGG_EXTENSION: &str = "ogg";

/// Resolved external tool context.
///
/// Program paths are injected once at construction and shared immutably
/// across requests; there is no process-wide lookup state.
#[derive(Clone, Debug)]
pub struct FfmpegTools {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl FfmpegTools {
    /// Build a tool context from explicit program paths, verifying that
    /// `ffmpeg` can actually be invoked.
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> GlyphtuneResult<Self> {
        let tools = Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        };
        if !tools.ffmpeg_responds() {
            return Err(GlyphtuneError::tool_unavailable(format!(
                "ffmpeg ('{}') is required but could not be invoked; please install ffmpeg",
                tools.ffmpeg.display()
            )));
        }
        Ok(tools)
    }

    /// Program path used for `ffmpeg` invocations.
    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg
    }

    fn ffmpeg_responds(&self) -> bool {
        Command::new(&self.ffmpeg)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Probe the codec of the first audio stream in `path`.
    ///
    /// Returns the lowercase codec identifier, or an empty string when
    /// probing is unavailable or fails; callers treat that as "unknown,
    /// transcode to be safe".
    pub fn probe_codec(&self, path: &Path) -> String {
        let output = Command::new(&self.ffprobe)
            .args([
                "-v",
                "error",
                "-select_streams",
                "a:0",
                "-show_entries",
                "stream=codec_name",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout)
                .trim()
                .to_ascii_lowercase(),
            _ => String::new(),
        }
    }

    /// Re-encode `src` into an Ogg/Opus file at `dst`: 2 channels, 48 kHz,
    /// libopus at 128 kbit/s.
    pub fn transcode_to_ogg_opus(&self, src: &Path, dst: &Path) -> GlyphtuneResult<()> {
        tracing::debug!(src = %src.display(), dst = %dst.display(), "transcoding to ogg/opus");

        let output = Command::new(&self.ffmpeg)
            .args(["-y", "-loglevel", "error", "-i"])
            .arg(src)
            .args(["-ac", "2", "-ar", "48000", "-c:a", "libopus", "-b:a", "128k"])
            .arg(dst)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| self.spawn_error("ffmpeg", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GlyphtuneError::tool_failure(format!(
                "ffmpeg transcode exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }

    /// Write `document` into the container at `src`, producing `dst`.
    ///
    /// The audio stream is copied bit-for-bit (`-c:a copy`); the document
    /// is fed to ffmpeg as a second stdin input and mapped over the output
    /// file's tags. stderr is drained on a separate thread so a chatty
    /// ffmpeg cannot deadlock against the stdin write.
    pub fn inject_metadata(&self, src: &Path, document: &str, dst: &Path) -> GlyphtuneResult<()> {
        tracing::debug!(src = %src.display(), dst = %dst.display(), "injecting metadata tags");

        let mut child = Command::new(&self.ffmpeg)
            .args(["-y", "-loglevel", "error", "-i"])
            .arg(src)
            .args(["-i", "-", "-map_metadata", "1", "-c:a", "copy"])
            .arg(dst)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error("ffmpeg", e))?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            GlyphtuneError::tool_failure("failed to open ffmpeg stdin (unexpected)")
        })?;
        let mut stderr = child.stderr.take().ok_or_else(|| {
            GlyphtuneError::tool_failure("failed to open ffmpeg stderr (unexpected)")
        })?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok::<_, std::io::Error>(stderr_bytes)
        });

        use std::io::Write as _;
        let write_result = stdin.write_all(document.as_bytes());
        drop(stdin);

        let status = child.wait().map_err(|e| {
            GlyphtuneError::tool_failure(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = stderr_drain
            .join()
            .map_err(|_| GlyphtuneError::tool_failure("ffmpeg stderr drain thread panicked"))?
            .map_err(|e| GlyphtuneError::tool_failure(format!("ffmpeg stderr read failed: {e}")))?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(GlyphtuneError::tool_failure(format!(
                "ffmpeg metadata write exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        // Checked after the exit status so a non-zero exit wins the report.
        write_result.map_err(|e| {
            GlyphtuneError::tool_failure(format!("failed to write metadata to ffmpeg stdin: {e}"))
        })?;

        Ok(())
    }

    fn spawn_error(&self, tool: &str, err: std::io::Error) -> GlyphtuneError {
        if err.kind() == std::io::ErrorKind::NotFound {
            GlyphtuneError::tool_unavailable(format!(
                "{tool} not found; please install ffmpeg"
            ))
        } else {
            GlyphtuneError::tool_failure(format!("failed to start {tool}: {err}"))
        }
    }
}

/// Transcode policy: skip only when the stream is already Opus inside an
/// Ogg container.
pub fn needs_transcode(codec: &str, extension: &str) -> bool {
    codec != OPUS_CODEC || !extension.eq_ignore_ascii_case(OGG_EXTENSION)
}

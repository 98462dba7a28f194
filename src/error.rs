pub type GlyphtuneResult<T> = Result<T, GlyphtuneError>;

#[derive(thiserror::Error, Debug)]
pub enum GlyphtuneError {
    /// A required request input (upload, glyph script) was absent.
    #[error("missing input: {0}")]
    InputMissing(String),

    /// A required external binary could not be found or started.
    #[error("external tool unavailable: {0}")]
    ToolUnavailable(String),

    /// An external process exited non-zero; carries its captured stderr.
    #[error("external tool failed: {0}")]
    ToolFailure(String),

    /// Compression or text-encoding failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphtuneError {
    pub fn input_missing(msg: impl Into<String>) -> Self {
        Self::InputMissing(msg.into())
    }

    pub fn tool_unavailable(msg: impl Into<String>) -> Self {
        Self::ToolUnavailable(msg.into())
    }

    pub fn tool_failure(msg: impl Into<String>) -> Self {
        Self::ToolFailure(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

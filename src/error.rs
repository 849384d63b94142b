use thiserror::Error;

pub type ForgeResult<T> = Result<T, ForgeError>;

/// How many characters of a raw model response are kept for diagnostics.
const PREVIEW_LIMIT: usize = 300;

#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("API key is not configured. Set `ai.api_key` in the config file or export the provider's environment variable.")]
    MissingCredential,

    #[error("provider request failed: {0}")]
    Provider(String),

    #[error("schema normalization failed: {0}")]
    NormalizationFailed(String),

    #[error("could not recover a file list from the model response. Preview: {preview}")]
    ParseFailed { preview: String },

    #[error("model returned an incomplete file list: {0}")]
    InvalidBatch(String),
}

impl ForgeError {
    /// Build a `ParseFailed` carrying a bounded preview of the raw response.
    pub fn parse_failed(raw: &str) -> Self {
        ForgeError::ParseFailed {
            preview: preview_of(raw),
        }
    }

    /// Only normalization failures are recoverable; the pipeline degrades to
    /// raw-SQL generation instead of surfacing them.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ForgeError::NormalizationFailed(_))
    }
}

fn preview_of(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.char_indices().nth(PREVIEW_LIMIT) {
        Some((byte_index, _)) => format!("{}...", &trimmed[..byte_index]),
        None => trimmed.to_string(),
    }
}

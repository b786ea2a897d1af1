//! Error type shared by every fallible operation in the crate.

/// Failures surfaced by the state model, controllers and browser adapters.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required field was missing or malformed; State was not touched.
    #[error("{0}")]
    Validation(String),
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("could not read uploaded file: {0}")]
    FileRead(String),
    #[error("could not copy link: {0}")]
    Clipboard(String),
    /// A browser API call failed.
    #[error("browser error: {0}")]
    Dom(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("application has not been started")]
    NotStarted,
}

impl AppError {
    /// Short machine-readable code, mirrored into status fragments.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::UnknownTheme(_) => "E_THEME",
            Self::Storage(_) => "E_STORAGE",
            Self::Snapshot(_) => "E_SNAPSHOT",
            Self::FileRead(_) => "E_FILE_READ",
            Self::Clipboard(_) => "E_CLIPBOARD",
            Self::Dom(_) => "E_DOM",
            Self::Config(_) => "E_CONFIG",
            Self::NotStarted => "E_NOT_STARTED",
        }
    }
}

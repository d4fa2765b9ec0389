use thiserror::Error;

/// Failures of a single launcher action. None of them are fatal: the action
/// is dropped and the message is shown as a notice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LaunchError {
    #[error("\"{name}\" has an invalid URL format and did not register.")]
    InvalidTemplate { name: String },

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Failed to open URL {url}: {reason}")]
    OpenFailed { url: String, reason: String },

    #[error("Prompt is already closed")]
    PromptClosed,

    #[error("No template at position {0}")]
    NoSuchTemplate(usize),

    #[error("Unknown preset \"{0}\" (available: {1})")]
    UnknownPreset(String, String),

    #[error("Unknown command \"{0}\"")]
    UnknownCommand(String),
}

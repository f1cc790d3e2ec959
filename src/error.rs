use thiserror::Error;

/// Faults the engine surfaces to callers.
///
/// Thin data, malformed attempts and unknown levels are resolved with
/// defaults inside the engine and never show up here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedInput(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

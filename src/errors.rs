use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur in Pixel Pal
///
/// The mood engine itself never fails; these cover the runtime around it.
#[derive(Error, Debug, Clone)]
pub enum PalError {
    /// IO error
    #[error("IO error: {0}")]
    Io(Arc<std::io::Error>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(Arc<String>),

    /// The session actor has stopped and can no longer take gestures
    #[error("Session is closed")]
    SessionClosed,

    /// Terminal setup or drawing failed
    #[error("Terminal error: {0}")]
    Terminal(Arc<String>),
}

impl PalError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(Arc::new(message.into()))
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal(Arc::new(message.into()))
    }
}

impl From<std::io::Error> for PalError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(Arc::new(error))
    }
}

/// Type alias for Result with PalError
pub type Result<T> = std::result::Result<T, PalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion() {
        let err: PalError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, PalError::Io(_)));
        assert_eq!(err.to_string(), "IO error: gone");
    }

    #[test]
    fn test_configuration_message() {
        let err = PalError::configuration("sample_interval_ms must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: sample_interval_ms must be positive"
        );
    }
}

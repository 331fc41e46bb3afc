// Note generation backends

pub mod ollama;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Tone;

pub use ollama::OllamaGenerator;

pub const MOCK_NOTES: &str = "
• Operating System manages computer hardware and software.
• It handles process, memory, and file management.
• Examples include Windows, Linux, and macOS.
";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Backend(String),
    #[error("generation failed")]
    Unspecified,
}

impl GenerationError {
    /// The human-readable message, if the failure carries a non-empty one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::InvalidInput(msg) | Self::Backend(msg) if !msg.trim().is_empty() => Some(msg.as_str()),
            _ => None,
        }
    }
}

/// Produces study notes for a topic in a given tone.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteGenerator: Send + Sync {
    async fn generate(&self, topic: &str, tone: Tone) -> Result<String, GenerationError>;
}

/// Returns the same canned notes for every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockGenerator;

#[async_trait]
impl NoteGenerator for MockGenerator {
    async fn generate(&self, _topic: &str, _tone: Tone) -> Result<String, GenerationError> {
        Ok(MOCK_NOTES.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_generator_ignores_input() {
        let generator = MockGenerator;
        let a = tokio_test::block_on(generator.generate("Operating System", Tone::Simple));
        let b = tokio_test::block_on(generator.generate("Photosynthesis", Tone::Analogy));
        assert_eq!(a.unwrap(), MOCK_NOTES);
        assert_eq!(b.unwrap(), MOCK_NOTES);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            GenerationError::Backend("quota exceeded".to_string()).message(),
            Some("quota exceeded")
        );
        assert_eq!(
            GenerationError::InvalidInput("bad topic".to_string()).message(),
            Some("bad topic")
        );
        assert_eq!(GenerationError::Backend(String::new()).message(), None);
        assert_eq!(GenerationError::Backend("  ".to_string()).message(), None);
        assert_eq!(GenerationError::Unspecified.message(), None);
    }

    #[test]
    fn test_error_display() {
        let err = GenerationError::Backend("service unavailable".to_string());
        assert_eq!(err.to_string(), "service unavailable");
    }
}

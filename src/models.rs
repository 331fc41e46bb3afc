use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PRESET_TOPIC: &str = "Operating System";

/// Teaching style the notes are written in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Simple,
    Detailed,
    Analogy,
}

impl Tone {
    pub const ALL: [Self; 3] = [Self::Simple, Self::Detailed, Self::Analogy];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Simple => "Simple & Easy",
            Self::Detailed => "Detailed & Technical",
            Self::Analogy => "Analogy Based",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Simple => Self::Detailed,
            Self::Detailed => Self::Analogy,
            Self::Analogy => Self::Simple,
        }
    }

    pub const fn previous(self) -> Self {
        match self {
            Self::Simple => Self::Analogy,
            Self::Detailed => Self::Simple,
            Self::Analogy => Self::Detailed,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A topic/tone pair formed at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub tone: Tone,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, tone: Tone) -> Self {
        Self {
            topic: topic.into(),
            tone,
        }
    }
}

/// The notes currently on display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyNote {
    pub topic: String,
    pub tone: Tone,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl StudyNote {
    pub fn new(request: GenerationRequest, content: String) -> Self {
        Self {
            topic: request.topic,
            tone: request.tone,
            content,
            created_at: Utc::now(),
        }
    }
}

/// What to do when the user submits a blank topic.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlankTopicPolicy {
    /// Leave the state untouched.
    #[default]
    Ignore,
    /// Show a validation message in the error view.
    Reject,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorBackend {
    #[default]
    Mock,
    Ollama,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub backend: GeneratorBackend,
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout")]
    pub request_timeout: u64,
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "qwen3:4b".to_string()
}

const fn default_timeout() -> u64 {
    600
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backend: GeneratorBackend::default(),
            ollama_url: default_ollama_url(),
            model: default_model(),
            request_timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default = "default_topic")]
    pub default_topic: String,
    #[serde(default)]
    pub default_tone: Tone,
    #[serde(default)]
    pub blank_topic: BlankTopicPolicy,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

fn default_topic() -> String {
    PRESET_TOPIC.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_topic: default_topic(),
            default_tone: Tone::default(),
            blank_topic: BlankTopicPolicy::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

// Generation state controller

use crate::generator::{GenerationError, NoteGenerator};
use crate::models::{BlankTopicPolicy, GenerationRequest, StudyNote, Tone};

pub const FALLBACK_ERROR: &str = "An unexpected error occurred.";
pub const BLANK_TOPIC_ERROR: &str = "Please enter a topic to generate notes.";

/// What the notes pane should show, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Loading,
    Error(&'a str),
    Notes(&'a StudyNote),
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationState {
    pub is_loading: bool,
    pub error: Option<String>,
    pub notes: Option<StudyNote>,
}

impl GenerationState {
    pub fn view(&self) -> View<'_> {
        if self.is_loading {
            View::Loading
        } else if let Some(error) = &self.error {
            View::Error(error)
        } else if let Some(notes) = &self.notes {
            View::Notes(notes)
        } else {
            View::Empty
        }
    }
}

/// A submitted request that still has to be run against a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGeneration {
    pub seq: u64,
    pub request: GenerationRequest,
}

impl PendingGeneration {
    pub async fn run(self, generator: &dyn NoteGenerator) -> GenerationOutcome {
        let result = generator
            .generate(&self.request.topic, self.request.tone)
            .await;
        GenerationOutcome {
            seq: self.seq,
            request: self.request,
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub seq: u64,
    pub request: GenerationRequest,
    pub result: Result<String, GenerationError>,
}

/// Owns the topic/tone form and the generation state.
///
/// Every state change goes through [`Controller::submit`] and
/// [`Controller::complete`]. Each submission gets a sequence number and only
/// the outcome of the latest one is applied, so a slow earlier request can
/// never overwrite the result of a newer one.
#[derive(Debug)]
pub struct Controller {
    topic: String,
    tone: Tone,
    default_request: GenerationRequest,
    blank_policy: BlankTopicPolicy,
    state: GenerationState,
    seq: u64,
    activated: bool,
}

impl Controller {
    pub fn new(
        default_topic: impl Into<String>,
        default_tone: Tone,
        blank_policy: BlankTopicPolicy,
    ) -> Self {
        let default_request = GenerationRequest::new(default_topic, default_tone);
        Self {
            topic: default_request.topic.clone(),
            tone: default_tone,
            default_request,
            blank_policy,
            state: GenerationState::default(),
            seq: 0,
            activated: false,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub const fn tone(&self) -> Tone {
        self.tone
    }

    pub const fn state(&self) -> &GenerationState {
        &self.state
    }

    pub const fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// The submit control is disabled while loading or with an empty field.
    pub fn can_submit(&self) -> bool {
        !self.state.is_loading && !self.topic.is_empty()
    }

    #[allow(dead_code)]
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn push_topic_char(&mut self, c: char) {
        self.topic.push(c);
    }

    pub fn pop_topic_char(&mut self) {
        self.topic.pop();
    }

    pub fn clear_topic(&mut self) {
        self.topic.clear();
    }

    pub const fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
    }

    pub const fn next_tone(&mut self) {
        self.tone = self.tone.next();
    }

    pub const fn previous_tone(&mut self) {
        self.tone = self.tone.previous();
    }

    /// Submit the defaults once, the first time the view comes up.
    pub fn activate(&mut self) -> Option<PendingGeneration> {
        if self.activated {
            return None;
        }
        self.activated = true;
        let GenerationRequest { topic, tone } = self.default_request.clone();
        self.submit(topic, tone)
    }

    /// Submit whatever is currently in the form.
    pub fn submit_current(&mut self) -> Option<PendingGeneration> {
        self.submit(self.topic.clone(), self.tone)
    }

    /// Start a generation for `topic` in `tone`.
    ///
    /// Returns `None` when the trimmed topic is blank. Depending on the
    /// blank-topic policy the state is then either left untouched or shows a
    /// validation message.
    pub fn submit(&mut self, topic: impl Into<String>, tone: Tone) -> Option<PendingGeneration> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            match self.blank_policy {
                BlankTopicPolicy::Ignore => {
                    tracing::debug!("ignoring submit with blank topic");
                }
                BlankTopicPolicy::Reject => {
                    tracing::debug!("rejecting submit with blank topic");
                    // Anything still in flight must not replace the message
                    self.seq += 1;
                    self.state = GenerationState {
                        is_loading: false,
                        error: Some(BLANK_TOPIC_ERROR.to_string()),
                        notes: None,
                    };
                }
            }
            return None;
        }

        self.seq += 1;
        let request = GenerationRequest::new(topic, tone);
        self.state = GenerationState {
            is_loading: true,
            error: None,
            notes: None,
        };

        tracing::info!(seq = self.seq, topic = %request.topic, %tone, "submitting notes request");

        Some(PendingGeneration {
            seq: self.seq,
            request,
        })
    }

    /// Try again with whatever the form holds now. A cleared field makes
    /// this a no-op, same as a normal submit.
    pub fn retry(&mut self) -> Option<PendingGeneration> {
        tracing::info!(topic = %self.topic, tone = %self.tone, "retrying notes request");
        self.submit_current()
    }

    /// Apply a finished generation. Returns `false` if it was superseded.
    pub fn complete(&mut self, outcome: GenerationOutcome) -> bool {
        if outcome.seq != self.seq {
            tracing::info!(
                seq = outcome.seq,
                latest = self.seq,
                "discarding superseded generation"
            );
            return false;
        }

        match outcome.result {
            Ok(content) => {
                tracing::info!(seq = outcome.seq, chars = content.len(), "notes generated");
                self.state.error = None;
                self.state.notes = Some(StudyNote::new(outcome.request, content));
            }
            Err(err) => {
                tracing::warn!(seq = outcome.seq, error = %err, "notes generation failed");
                self.state.notes = None;
                self.state.error = Some(err.message().unwrap_or(FALLBACK_ERROR).to_string());
            }
        }
        self.state.is_loading = false;
        true
    }
}

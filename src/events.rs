// Event types for async communication

use crate::controller::GenerationOutcome;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A generation task finished, successfully or not
    GenerationFinished(GenerationOutcome),
}

use serde::{Deserialize, Serialize};

use crate::models::candidate::CandidateDraft;

/// Named conversation states. The screening flow is strictly linear; a state
/// only repeats when the candidate's input is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Stage {
    /// No input consumed yet — the next turn emits the greeting.
    Greeting,
    AwaitingFullName,
    AwaitingEmail,
    AwaitingPhone,
    AwaitingExperience,
    AwaitingPosition,
    AwaitingLocation,
    AwaitingTechStack,
    /// Collecting the answer to generated question `index` (0-based).
    AwaitingAnswer { index: usize },
    /// Everything collected; waiting for the finalize keyword.
    AwaitingFinalize,
    /// Terminal. The record is persisted; only termination keywords do anything.
    Saved,
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Greeting
    }
}

/// The full per-conversation state, passed in and out of the turn handler as
/// a value. The transport layer owns storage between turns; nothing in here
/// is shared across sessions.
///
/// Invariants upheld by the turn handler:
/// - `draft` fields are written in stage order, each at most once in normal flow.
/// - `questions` is populated once, at the tech-stack stage, with 0..=3 entries.
/// - `answers.len()` never exceeds `questions.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSession {
    pub stage: Stage,
    pub draft: CandidateDraft,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_pre_greeting() {
        let session = ScreeningSession::default();
        assert_eq!(session.stage, Stage::Greeting);
        assert_eq!(session.draft, CandidateDraft::default());
        assert!(session.questions.is_empty());
        assert!(session.answers.is_empty());
    }

    #[test]
    fn test_session_round_trips_through_json() {
        // The session is stored in redis as JSON between turns.
        let session = ScreeningSession {
            stage: Stage::AwaitingAnswer { index: 1 },
            draft: CandidateDraft {
                full_name: Some("Grace Hopper".to_string()),
                ..CandidateDraft::default()
            },
            questions: vec!["What is ownership?".to_string(), "What is a trait?".to_string()],
            answers: vec!["Memory discipline".to_string()],
        };

        let json = serde_json::to_string(&session).unwrap();
        let recovered: ScreeningSession = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, session);
    }

    #[test]
    fn test_stage_serde_distinguishes_answer_indices() {
        let a = serde_json::to_string(&Stage::AwaitingAnswer { index: 0 }).unwrap();
        let b = serde_json::to_string(&Stage::AwaitingAnswer { index: 2 }).unwrap();
        assert_ne!(a, b);
    }
}

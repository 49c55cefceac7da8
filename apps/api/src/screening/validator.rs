//! Field Validator — turns a free-text answer into an accept/reject decision
//! via a single oracle call.
//!
//! Fail-closed: a transport error, an empty response, or anything other than
//! the exact `VALID` token all count as rejection. The conversation never
//! aborts on a validator failure; the caller's reprompt gives the candidate
//! another turn.

use std::sync::Arc;

use tracing::warn;

use crate::llm_client::prompts::SINGLE_TOKEN_INSTRUCTION;
use crate::llm_client::Oracle;
use crate::screening::prompts::{VALIDATION_PROMPT_TEMPLATE, VALIDATION_SYSTEM};

/// The screening fields that go through classifier validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    FullName,
    Email,
    Phone,
    YearsExperience,
    DesiredPosition,
    CurrentLocation,
    TechStack,
}

impl FieldKind {
    /// The label embedded in the validation prompt. Must match the wording of
    /// the rules list in `VALIDATION_PROMPT_TEMPLATE`.
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::FullName => "full name",
            FieldKind::Email => "email address",
            FieldKind::Phone => "phone number",
            FieldKind::YearsExperience => "years of experience",
            FieldKind::DesiredPosition => "desired position",
            FieldKind::CurrentLocation => "current location",
            FieldKind::TechStack => "tech stack",
        }
    }
}

/// Classifier-backed validator for screening answers.
#[derive(Clone)]
pub struct FieldValidator {
    oracle: Arc<dyn Oracle>,
}

impl FieldValidator {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Returns `true` only when the oracle answers with the exact `VALID`
    /// token (trimmed, case-normalized). Everything else — including a failed
    /// call — is a rejection.
    pub async fn validate(&self, answer: &str, kind: FieldKind) -> bool {
        let prompt = build_validation_prompt(answer, kind);
        let system = format!("{VALIDATION_SYSTEM}{SINGLE_TOKEN_INSTRUCTION}");

        match self.oracle.complete(&prompt, &system).await {
            Ok(text) => text.trim().to_uppercase() == "VALID",
            Err(e) => {
                warn!("Validation call for {} failed: {e}", kind.label());
                false
            }
        }
    }
}

fn build_validation_prompt(answer: &str, kind: FieldKind) -> String {
    VALIDATION_PROMPT_TEMPLATE
        .replace("{field_type}", kind.label())
        .replace("{answer}", answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::MockOracle;

    fn validator(oracle: Arc<MockOracle>) -> FieldValidator {
        FieldValidator::new(oracle)
    }

    #[tokio::test]
    async fn test_exact_valid_token_accepts() {
        let oracle = Arc::new(MockOracle::answering("VALID"));
        assert!(validator(oracle).validate("Ada Lovelace", FieldKind::FullName).await);
    }

    #[tokio::test]
    async fn test_invalid_token_rejects() {
        let oracle = Arc::new(MockOracle::answering("INVALID"));
        assert!(!validator(oracle).validate("x", FieldKind::FullName).await);
    }

    #[tokio::test]
    async fn test_valid_is_case_and_whitespace_normalized() {
        let oracle = Arc::new(MockOracle::answering("  valid\n"));
        assert!(validator(oracle).validate("Ada Lovelace", FieldKind::FullName).await);
    }

    #[tokio::test]
    async fn test_chatty_response_rejects() {
        // "VALID." is not the exact token.
        let oracle = Arc::new(MockOracle::answering("VALID."));
        assert!(!validator(oracle).validate("Ada Lovelace", FieldKind::FullName).await);
    }

    #[tokio::test]
    async fn test_empty_response_rejects() {
        let oracle = Arc::new(MockOracle::answering(""));
        assert!(!validator(oracle).validate("Ada Lovelace", FieldKind::FullName).await);
    }

    #[tokio::test]
    async fn test_oracle_failure_fails_closed() {
        let oracle = Arc::new(MockOracle::new());
        oracle.enqueue_failure("connection reset");
        assert!(!validator(oracle).validate("Ada Lovelace", FieldKind::FullName).await);
    }

    #[tokio::test]
    async fn test_prompt_carries_field_label_and_answer() {
        let oracle = Arc::new(MockOracle::answering("VALID"));
        validator(oracle.clone())
            .validate("+1 555 0100", FieldKind::Phone)
            .await;

        let calls = oracle.recorded_calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains("phone number"));
        assert!(calls[0].prompt.contains("+1 555 0100"));
        assert!(calls[0].system.contains("VALID"));
    }
}

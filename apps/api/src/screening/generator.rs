//! Question Generator — asks the oracle for three short interview questions
//! tailored to the candidate's declared tech stack, then normalizes the raw
//! text into a clean ordered list.
//!
//! Oracle output is inherently unreliable, so normalization is kept as an
//! isolated, unit-tested step: line splitting, preamble dropping, list-prefix
//! stripping. Transport failures propagate as `Err` — the state machine keeps
//! the candidate at the tech-stack stage for a retry instead of silently
//! proceeding with zero questions.

use std::sync::Arc;

use crate::llm_client::prompts::PLAIN_LINES_INSTRUCTION;
use crate::llm_client::{LlmError, Oracle};
use crate::screening::prompts::{QUESTION_PROMPT_TEMPLATE, QUESTION_SYSTEM};

/// Upper bound on questions asked per screening, whatever the oracle returns.
pub const MAX_QUESTIONS: usize = 3;

#[derive(Clone)]
pub struct QuestionGenerator {
    oracle: Arc<dyn Oracle>,
}

impl QuestionGenerator {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Generates 0..=3 interview questions for the given tech stack.
    pub async fn generate(&self, tech_stack: &str) -> Result<Vec<String>, LlmError> {
        let prompt = QUESTION_PROMPT_TEMPLATE.replace("{tech_stack}", tech_stack);
        let system = format!("{QUESTION_SYSTEM}{PLAIN_LINES_INSTRUCTION}");

        let raw = self.oracle.complete(&prompt, &system).await?;
        Ok(parse_questions(&raw))
    }
}

/// Normalizes raw oracle output into an ordered question list.
///
/// Steps: split into trimmed non-empty lines; drop a leading conversational
/// preamble ("here are ..."); strip list prefixes like `1.`, `2)`, `Q3:`,
/// `-`, `*`; cap at `MAX_QUESTIONS`.
pub fn parse_questions(raw: &str) -> Vec<String> {
    let mut lines: Vec<&str> = raw.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    if let Some(first) = lines.first() {
        if first.to_lowercase().contains("here are") {
            lines.remove(0);
        }
    }

    lines
        .into_iter()
        .map(strip_list_prefix)
        .filter(|l| !l.is_empty())
        .take(MAX_QUESTIONS)
        .map(str::to_string)
        .collect()
}

/// Strips a leading list marker: `-`/`*` bullets, or an optional `Q`/`q`
/// followed by digits and one of `.`, `)`, `:`.
fn strip_list_prefix(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return rest.trim_start();
    }

    let unprefixed = line.strip_prefix('Q').or_else(|| line.strip_prefix('q')).unwrap_or(line);
    let digits = unprefixed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return line;
    }
    let after_digits = &unprefixed[digits..];
    match after_digits.chars().next() {
        Some('.') | Some(')') | Some(':') => after_digits[1..].trim_start(),
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::MockOracle;

    #[test]
    fn test_parse_plain_lines() {
        let raw = "What is ownership in Rust?\nWhat does Cargo do?\nWhat is a trait?";
        assert_eq!(
            parse_questions(raw),
            vec![
                "What is ownership in Rust?",
                "What does Cargo do?",
                "What is a trait?"
            ]
        );
    }

    #[test]
    fn test_parse_drops_here_are_preamble() {
        let raw = "Here are 3 questions for you:\nWhat is a struct?\nWhat is a Vec?";
        assert_eq!(parse_questions(raw), vec!["What is a struct?", "What is a Vec?"]);
    }

    #[test]
    fn test_parse_strips_numbered_prefixes() {
        let raw = "1. What is a struct?\n2) What is a Vec?\nQ3: What is a trait?";
        assert_eq!(
            parse_questions(raw),
            vec!["What is a struct?", "What is a Vec?", "What is a trait?"]
        );
    }

    #[test]
    fn test_parse_strips_bullets() {
        let raw = "- What is a struct?\n* What is a Vec?";
        assert_eq!(parse_questions(raw), vec!["What is a struct?", "What is a Vec?"]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let raw = "What is a struct?\n\n\nWhat is a Vec?\n";
        assert_eq!(parse_questions(raw), vec!["What is a struct?", "What is a Vec?"]);
    }

    #[test]
    fn test_parse_caps_at_three() {
        let raw = "Q1\nQ2\nQ3\nQ4\nQ5";
        assert_eq!(parse_questions(raw).len(), MAX_QUESTIONS);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_questions("").is_empty());
        assert!(parse_questions("   \n  \n").is_empty());
    }

    #[test]
    fn test_parse_preamble_only_yields_nothing() {
        assert!(parse_questions("Here are your questions:").is_empty());
    }

    #[test]
    fn test_prefix_stripping_leaves_plain_questions_alone() {
        assert_eq!(strip_list_prefix("What is 2 + 2?"), "What is 2 + 2?");
        assert_eq!(strip_list_prefix("42 is the answer?"), "42 is the answer?");
    }

    #[tokio::test]
    async fn test_generate_uses_tech_stack_in_prompt() {
        let oracle = std::sync::Arc::new(MockOracle::answering(
            "What is ownership?\nWhat is borrowing?\nWhat is a lifetime?",
        ));
        let generator = QuestionGenerator::new(oracle.clone());

        let questions = generator.generate("Rust, Tokio").await.unwrap();
        assert_eq!(questions.len(), 3);

        let calls = oracle.recorded_calls();
        assert!(calls[0].prompt.contains("Rust, Tokio"));
    }

    #[tokio::test]
    async fn test_generate_propagates_oracle_failure() {
        let oracle = std::sync::Arc::new(MockOracle::new());
        oracle.enqueue_failure("timeout");
        let generator = QuestionGenerator::new(oracle);

        assert!(generator.generate("Rust").await.is_err());
    }
}

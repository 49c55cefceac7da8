// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment for calls that must answer with a single decision
/// token. Appended verbatim to classifier system prompts.
pub const SINGLE_TOKEN_INSTRUCTION: &str = "\
    You MUST respond with exactly one word. \
    Do NOT include punctuation, explanations, or apologies. \
    Do NOT use markdown.";

/// System prompt fragment for calls whose output is consumed line-by-line.
pub const PLAIN_LINES_INSTRUCTION: &str = "\
    Respond with plain text only, one item per line. \
    Do NOT include a preamble or closing remarks. \
    Do NOT use markdown code fences.";

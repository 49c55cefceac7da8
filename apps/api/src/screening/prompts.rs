// All LLM prompt constants for the screening module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for field validation — the oracle may answer only with the
/// VALID/INVALID decision token.
pub const VALIDATION_SYSTEM: &str = "You are a strict validator for user input fields. \
    Respond ONLY with \"VALID\" or \"INVALID\" (uppercase, no extra words). ";

/// Validation prompt template. Replace `{field_type}` and `{answer}` before sending.
///
/// The acceptance rules are enumerated for every field kind so the oracle
/// applies the same bar regardless of which field is being checked.
pub const VALIDATION_PROMPT_TEMPLATE: &str = r#"Decide whether the user input below is acceptable for the given field type.

### Field Type:
{field_type}

### User Input:
{answer}

### Rules:
- Respond ONLY with "VALID" or "INVALID" (uppercase, no extra words).
- Full Name: At least two words, primarily alphabetic.
- Email Address: Must have '@' and a domain extension like .com, etc.
- Phone Number: Mostly digits (+, -, spaces), at least 7 digits.
- Years of Experience: Integer 0-60.
- Desired Position: At least 2 letters.
- Current Location: At least 2 letters.
- Tech Stack: Non-empty, at least 2 letters."#;

/// System prompt for interview question generation.
pub const QUESTION_SYSTEM: &str = "You are an interviewer preparing a short initial \
    screening for a job candidate. ";

/// Question generation prompt template. Replace `{tech_stack}` before sending.
pub const QUESTION_PROMPT_TEMPLATE: &str = "You are an interviewer creating beginner-level \
    questions for the tech stack: {tech_stack}. \
    Generate exactly 3 short questions, each limited to 2 lines. \
    Avoid advanced or lengthy explanations - keep them simple and concise.";

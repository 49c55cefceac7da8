//! Conversation State Machine — owns the stage progression and produces the
//! next bot message for every inbound candidate message.
//!
//! `handle_turn` is a pure transition over the session value object: session
//! and message in, updated session and reply out. It never returns an error —
//! validator failures degrade to rejections, generator failures to a
//! transient-error reply, sink failures to a fatal-to-the-turn reply. The
//! transport layer owns session identity and storage between turns.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{error, warn};

use crate::models::candidate::CandidateDraft;
use crate::screening::generator::{QuestionGenerator, MAX_QUESTIONS};
use crate::screening::session::{ScreeningSession, Stage};
use crate::screening::sink::RecordSink;
use crate::screening::validator::{FieldKind, FieldValidator};

/// Keywords that end the conversation from any state, checked before stage
/// dispatch. Matched trimmed and case-insensitively.
const EXIT_KEYWORDS: &[&str] = &["exit", "quit", "bye"];

/// The finalize keyword, matched trimmed and case-insensitively.
const FINALIZE_KEYWORD: &str = "done";

pub const GREETING: &str = "Hello! Welcome to TalentScout's Hiring Assistant chatbot. \
    I'm here to help with the initial screening process. Let's begin.\n\n\
    What is your full name?";
pub const GOODBYE: &str = "Thank you for using TalentScout Hiring Assistant. Goodbye!";

pub const ASK_EMAIL: &str = "Great! What's your email address?";
pub const ASK_PHONE: &str = "Thanks! What's your phone number?";
pub const ASK_EXPERIENCE: &str = "Got it. How many years of experience do you have?";
pub const ASK_POSITION: &str = "Understood. What is your desired position(s)?";
pub const ASK_LOCATION: &str = "Thank you. What's your current location?";
pub const ASK_TECH_STACK: &str = "Great! Please list your tech stack (e.g., Python, Django, SQL).";

pub const INVALID_NAME: &str = "That doesn't look like a valid full name. Please try again.";
pub const INVALID_EMAIL: &str = "That doesn't look like a valid email address. Please try again.";
pub const INVALID_PHONE: &str = "That doesn't look like a valid phone number. Please try again.";
pub const INVALID_INTEGER: &str = "That doesn't look like a valid integer. Please try again.";
pub const EXPERIENCE_OUT_OF_RANGE: &str =
    "Years of experience must be between 0 and 50. Please try again.";
pub const INVALID_EXPERIENCE: &str =
    "That doesn't look like a valid response for years of experience. Please try again.";
pub const INVALID_POSITION: &str =
    "That doesn't look like a valid desired position. Please try again.";
pub const INVALID_LOCATION: &str = "That doesn't look like a valid location. Please try again.";
pub const INVALID_TECH_STACK: &str = "That doesn't look like a valid tech stack. Please try again.";

pub const GENERATOR_ERROR: &str =
    "Oops, there was an error generating questions. Please try again or type 'exit' to end.";
pub const NO_QUESTIONS: &str = "No questions generated. Type 'exit' to end.";
pub const NO_MORE_QUESTIONS: &str = "No more questions. Type 'exit' to end.";
pub const FINALIZE_PROMPT: &str =
    "Thanks for your answers! Type 'done' to finalize or 'exit' to quit.";
pub const FINALIZE_REPROMPT: &str = "Type 'done' to finalize or 'exit' to quit.";
pub const SAVED: &str = "All data saved! Thank you. Type 'exit' to leave or continue chatting.";
pub const ALREADY_SAVED: &str = "We've already saved your data. Type 'exit' to end.";
pub const SAVE_FAILED: &str =
    "We couldn't save your data just now. Type 'done' to try again or 'exit' to quit.";
pub const SESSION_CORRUPT: &str =
    "Something went wrong with your session. Type 'exit' to start over.";

/// Accepted years-of-experience range.
const EXPERIENCE_RANGE: std::ops::RangeInclusive<i64> = 0..=50;

/// Structural email gate, checked before the classifier is invoked.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("email pattern compiles"));

/// The result of one conversation turn.
#[derive(Debug)]
pub struct Turn {
    pub session: ScreeningSession,
    pub reply: String,
}

fn turn(session: ScreeningSession, reply: impl Into<String>) -> Turn {
    Turn {
        session,
        reply: reply.into(),
    }
}

fn is_termination(message: &str) -> bool {
    EXIT_KEYWORDS.iter().any(|k| message.eq_ignore_ascii_case(k))
}

/// Transition spec for the four screening fields that share the same shape:
/// classifier-validate, store as provided, advance, ask the next field.
struct FieldSpec {
    kind: FieldKind,
    next: Stage,
    ask_next: &'static str,
    reprompt: &'static str,
}

async fn advance_simple_field(
    session: &mut ScreeningSession,
    message: &str,
    validator: &FieldValidator,
    spec: FieldSpec,
    slot: fn(&mut CandidateDraft) -> &mut Option<String>,
) -> &'static str {
    if validator.validate(message, spec.kind).await {
        *slot(&mut session.draft) = Some(message.to_string());
        session.stage = spec.next;
        spec.ask_next
    } else {
        spec.reprompt
    }
}

/// Runs one turn of the screening conversation.
pub async fn handle_turn(
    mut session: ScreeningSession,
    message: &str,
    validator: &FieldValidator,
    generator: &QuestionGenerator,
    sink: &dyn RecordSink,
) -> Turn {
    let message = message.trim();

    // Termination preempts all stage logic, including the terminal states.
    if is_termination(message) {
        return turn(ScreeningSession::default(), GOODBYE);
    }

    match session.stage {
        Stage::Greeting => {
            session.stage = Stage::AwaitingFullName;
            turn(session, GREETING)
        }

        Stage::AwaitingFullName => {
            let reply = advance_simple_field(
                &mut session,
                message,
                validator,
                FieldSpec {
                    kind: FieldKind::FullName,
                    next: Stage::AwaitingEmail,
                    ask_next: ASK_EMAIL,
                    reprompt: INVALID_NAME,
                },
                |draft| &mut draft.full_name,
            )
            .await;
            turn(session, reply)
        }

        Stage::AwaitingEmail => handle_email(session, message, validator).await,

        Stage::AwaitingPhone => {
            let reply = advance_simple_field(
                &mut session,
                message,
                validator,
                FieldSpec {
                    kind: FieldKind::Phone,
                    next: Stage::AwaitingExperience,
                    ask_next: ASK_EXPERIENCE,
                    reprompt: INVALID_PHONE,
                },
                |draft| &mut draft.phone,
            )
            .await;
            turn(session, reply)
        }

        Stage::AwaitingExperience => handle_experience(session, message, validator).await,

        Stage::AwaitingPosition => {
            let reply = advance_simple_field(
                &mut session,
                message,
                validator,
                FieldSpec {
                    kind: FieldKind::DesiredPosition,
                    next: Stage::AwaitingLocation,
                    ask_next: ASK_LOCATION,
                    reprompt: INVALID_POSITION,
                },
                |draft| &mut draft.desired_positions,
            )
            .await;
            turn(session, reply)
        }

        Stage::AwaitingLocation => {
            let reply = advance_simple_field(
                &mut session,
                message,
                validator,
                FieldSpec {
                    kind: FieldKind::CurrentLocation,
                    next: Stage::AwaitingTechStack,
                    ask_next: ASK_TECH_STACK,
                    reprompt: INVALID_LOCATION,
                },
                |draft| &mut draft.current_location,
            )
            .await;
            turn(session, reply)
        }

        Stage::AwaitingTechStack => handle_tech_stack(session, message, validator, generator).await,

        Stage::AwaitingAnswer { index } => handle_answer(session, message, index),

        Stage::AwaitingFinalize => handle_finalize(session, message, sink).await,

        Stage::Saved => turn(session, ALREADY_SAVED),
    }
}

/// Email is the one field with a structural gate: the classifier is not
/// invoked unless the sanitized input already looks like `local@domain.tld`.
/// Structural and classifier failures produce the same reprompt.
async fn handle_email(
    mut session: ScreeningSession,
    message: &str,
    validator: &FieldValidator,
) -> Turn {
    let sanitized: String = message.chars().filter(|c| !matches!(c, '<' | '>')).collect();

    if !EMAIL_SHAPE.is_match(&sanitized) {
        return turn(session, INVALID_EMAIL);
    }

    if validator.validate(&sanitized, FieldKind::Email).await {
        session.draft.email = Some(sanitized);
        session.stage = Stage::AwaitingPhone;
        turn(session, ASK_PHONE)
    } else {
        turn(session, INVALID_EMAIL)
    }
}

/// Years of experience has three independently worded rejections: not an
/// integer, out of range, and classifier-rejected.
async fn handle_experience(
    mut session: ScreeningSession,
    message: &str,
    validator: &FieldValidator,
) -> Turn {
    let years: i64 = match message.parse() {
        Ok(n) => n,
        Err(_) => return turn(session, INVALID_INTEGER),
    };

    if !EXPERIENCE_RANGE.contains(&years) {
        return turn(session, EXPERIENCE_OUT_OF_RANGE);
    }

    if validator.validate(message, FieldKind::YearsExperience).await {
        // Stored as submitted text, not the parsed number.
        session.draft.years_experience = Some(message.to_string());
        session.stage = Stage::AwaitingPosition;
        turn(session, ASK_POSITION)
    } else {
        turn(session, INVALID_EXPERIENCE)
    }
}

async fn handle_tech_stack(
    mut session: ScreeningSession,
    message: &str,
    validator: &FieldValidator,
    generator: &QuestionGenerator,
) -> Turn {
    if !validator.validate(message, FieldKind::TechStack).await {
        return turn(session, INVALID_TECH_STACK);
    }

    session.draft.tech_stack = Some(message.to_string());

    let questions = match generator.generate(message).await {
        Ok(questions) => questions,
        Err(e) => {
            // Transient: keep the candidate here so the next message retries.
            warn!("Question generation failed: {e}");
            return turn(session, GENERATOR_ERROR);
        }
    };

    session.questions = questions;
    session.answers.clear();

    if session.questions.is_empty() {
        session.stage = Stage::AwaitingFinalize;
        turn(session, NO_QUESTIONS)
    } else {
        session.stage = Stage::AwaitingAnswer { index: 0 };
        let reply = format!(
            "Thanks! Let's go through your tech questions.\n\nQuestion 1: {}",
            session.questions[0]
        );
        turn(session, reply)
    }
}

/// Free-text technical answers are accepted without validation.
fn handle_answer(mut session: ScreeningSession, message: &str, index: usize) -> Turn {
    session.answers.push(message.to_string());

    let next = index + 1;
    if next < session.questions.len() {
        session.stage = Stage::AwaitingAnswer { index: next };
        let reply = format!("Question {}: {}", next + 1, session.questions[next]);
        turn(session, reply)
    } else {
        session.stage = Stage::AwaitingFinalize;
        if session.questions.len() == MAX_QUESTIONS {
            turn(session, FINALIZE_PROMPT)
        } else {
            turn(session, NO_MORE_QUESTIONS)
        }
    }
}

async fn handle_finalize(
    mut session: ScreeningSession,
    message: &str,
    sink: &dyn RecordSink,
) -> Turn {
    if !message.eq_ignore_ascii_case(FINALIZE_KEYWORD) {
        return turn(session, FINALIZE_REPROMPT);
    }

    let record = match session
        .draft
        .finalize(session.questions.clone(), session.answers.clone())
    {
        Some(record) => record,
        None => {
            error!("Screening session reached finalize with an incomplete draft");
            return turn(session, SESSION_CORRUPT);
        }
    };

    match sink.persist(&record).await {
        Ok(()) => {
            session.stage = Stage::Saved;
            turn(session, SAVED)
        }
        Err(e) => {
            // Fatal to the turn: never confirm a save that did not happen.
            error!("Failed to persist candidate record: {e}");
            turn(session, SAVE_FAILED)
        }
    }
}

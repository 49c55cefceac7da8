use std::sync::Arc;

use crate::screening::generator::QuestionGenerator;
use crate::screening::sink::RecordSink;
use crate::screening::store::SessionStore;
use crate::screening::validator::FieldValidator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Redis-backed session persistence plus per-session turn locks.
    pub sessions: SessionStore,
    /// Classifier-backed answer validator. Holds the oracle behind a trait so
    /// tests inject fakes.
    pub validator: FieldValidator,
    /// Interview question generator over the same oracle.
    pub generator: QuestionGenerator,
    /// Append-only candidate persistence. Swappable for tests.
    pub sink: Arc<dyn RecordSink>,
}

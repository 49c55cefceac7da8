use serde::{Deserialize, Serialize};

/// Screening fields accumulated turn by turn. Every field starts empty and is
/// written exactly once as the conversation advances through its stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateDraft {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Stored as submitted text, not as a parsed number.
    pub years_experience: Option<String>,
    pub desired_positions: Option<String>,
    pub current_location: Option<String>,
    pub tech_stack: Option<String>,
}

impl CandidateDraft {
    /// Produces the final persisted snapshot. Returns `None` if any screening
    /// field was never captured — the machine only finalizes after all seven
    /// stages completed, so `None` indicates a corrupted session.
    pub fn finalize(
        &self,
        questions: Vec<String>,
        answers: Vec<String>,
    ) -> Option<CandidateRecord> {
        Some(CandidateRecord {
            full_name: self.full_name.clone()?,
            email: self.email.clone()?,
            phone: self.phone.clone()?,
            years_experience: self.years_experience.clone()?,
            desired_positions: self.desired_positions.clone()?,
            current_location: self.current_location.clone()?,
            tech_stack: self.tech_stack.clone()?,
            questions,
            answers,
        })
    }
}

/// Final candidate snapshot written to the record sink. One row per completed
/// conversation; never updated, never deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub years_experience: String,
    pub desired_positions: String,
    pub current_location: String,
    pub tech_stack: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> CandidateDraft {
        CandidateDraft {
            full_name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: Some("+44 20 7946 0958".to_string()),
            years_experience: Some("5".to_string()),
            desired_positions: Some("Backend Engineer".to_string()),
            current_location: Some("London".to_string()),
            tech_stack: Some("Rust, Postgres".to_string()),
        }
    }

    #[test]
    fn test_finalize_with_all_fields() {
        let record = complete_draft()
            .finalize(vec!["Q1".to_string()], vec!["A1".to_string()])
            .expect("complete draft must finalize");
        assert_eq!(record.full_name, "Ada Lovelace");
        assert_eq!(record.questions, vec!["Q1"]);
        assert_eq!(record.answers, vec!["A1"]);
    }

    #[test]
    fn test_finalize_missing_field_returns_none() {
        let mut draft = complete_draft();
        draft.phone = None;
        assert!(draft.finalize(vec![], vec![]).is_none());
    }
}

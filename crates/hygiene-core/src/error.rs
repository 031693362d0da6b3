//! Audit error types.
//!
//! The scoring functions never fail; these errors come from turning
//! user-supplied text (audit files, CLI arguments) into the data model.

use thiserror::Error;

/// Errors raised while building audit data from external input.
#[derive(Debug, Error, PartialEq)]
pub enum AuditError {
    /// The answer label is not one of the four categories.
    #[error("unknown answer: {0}")]
    UnknownAnswer(String),

    /// An item gave both `answer` and `answer_id` and they name different categories.
    #[error("item {item_id}: answer '{label}' does not match answer_id {answer_id}")]
    ConflictingAnswer {
        item_id: String,
        label: String,
        answer_id: u32,
    },

    /// A date field was not in `YYYY-MM-DD` form.
    #[error("invalid {field} date '{value}', expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            AuditError::UnknownAnswer("Maybe".into()).to_string(),
            "unknown answer: Maybe"
        );
        let err = AuditError::ConflictingAnswer {
            item_id: "i1".into(),
            label: "NC".into(),
            answer_id: 1,
        };
        assert!(err.to_string().contains("answer_id 1"));
        assert_eq!(
            AuditError::InvalidDate {
                field: "issue",
                value: "tomorrow".into()
            }
            .to_string(),
            "invalid issue date 'tomorrow', expected YYYY-MM-DD"
        );
    }
}

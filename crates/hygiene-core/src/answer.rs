//! Answer categories and the points-for-answer rule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AuditError;

/// One of the four fixed compliance categories an item can be answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    #[serde(rename = "Complying")]
    Complying,
    #[serde(rename = "Need Improvement")]
    NeedImprovement,
    #[serde(rename = "NC")]
    Nc,
    #[serde(rename = "NA")]
    Na,
}

/// Canonical answer table, keyed by the numeric id stored on items.
pub const ANSWERS: [(u32, Answer); 4] = [
    (1, Answer::Complying),
    (2, Answer::NeedImprovement),
    (3, Answer::Nc),
    (4, Answer::Na),
];

/// Id of [`Answer::Na`], the fallback for anything unrecognised.
pub const NA_ANSWER_ID: u32 = 4;

impl Answer {
    /// Display label, as stored and keyed on by downstream consumers.
    pub fn label(self) -> &'static str {
        match self {
            Answer::Complying => "Complying",
            Answer::NeedImprovement => "Need Improvement",
            Answer::Nc => "NC",
            Answer::Na => "NA",
        }
    }

    /// Deduction units used by the markdown correction.
    ///
    /// NA items carry no deduction; they are removed from the denominator instead.
    pub fn deduction_units(self) -> f64 {
        match self {
            Answer::Complying => 0.0,
            Answer::NeedImprovement => 0.5,
            Answer::Nc => 1.0,
            Answer::Na => 0.0,
        }
    }

    pub fn is_na(self) -> bool {
        self == Answer::Na
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Answer {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "complying" => Ok(Answer::Complying),
            "need improvement" | "need_improvement" | "needs improvement" => {
                Ok(Answer::NeedImprovement)
            }
            "nc" | "non-compliant" => Ok(Answer::Nc),
            "na" | "n/a" => Ok(Answer::Na),
            _ => Err(AuditError::UnknownAnswer(s.to_string())),
        }
    }
}

/// Map a stored answer id to its category. Unknown ids are treated as NA.
pub fn answer_from_id(id: u32) -> Answer {
    ANSWERS
        .iter()
        .find(|(answer_id, _)| *answer_id == id)
        .map(|(_, answer)| *answer)
        .unwrap_or(Answer::Na)
}

/// Inverse of [`answer_from_id`].
pub fn answer_to_id(answer: Answer) -> u32 {
    ANSWERS
        .iter()
        .find(|(_, a)| *a == answer)
        .map(|(id, _)| *id)
        .unwrap_or(NA_ANSWER_ID)
}

/// Id for a free-text answer label, falling back to the NA id.
pub fn answer_id_for_label(label: &str) -> u32 {
    label
        .parse::<Answer>()
        .map(answer_to_id)
        .unwrap_or(NA_ANSWER_ID)
}

/// Points awarded for `answer` on an item worth `tpp`.
///
/// Need Improvement earns half the TPP rounded down, so `tpp = 5` gives 2.
pub fn points_for_answer(answer: Answer, tpp: f64) -> f64 {
    match answer {
        Answer::Complying => tpp,
        Answer::NeedImprovement => (tpp / 2.0).floor(),
        Answer::Nc => 0.0,
        Answer::Na => 0.0,
    }
}

//! Checklist model, compliance scoring, and audit reports.
//!
//! This crate defines the audit data model, the section and overall scoring
//! engine, and the report types that the rest of hygiene-audit builds on.

pub mod answer;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;

pub use answer::{answer_from_id, answer_to_id, points_for_answer, Answer};
pub use error::AuditError;
pub use metrics::{compute_overall_score, compute_section_metrics, SectionMetrics};

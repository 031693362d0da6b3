//! Core data model types for hygiene-audit.
//!
//! Checklist items grouped into weighted sections, the audit that owns them,
//! and the resolved shapes the scoring engine consumes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::answer::{answer_from_id, answer_to_id, points_for_answer, Answer};

/// A single checklist question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier for this item.
    pub id: String,
    /// Identifier of the owning section.
    pub section_id: String,
    /// The question asked of the inspector.
    pub question: String,
    /// Free-text inspector comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Total possible points for this item.
    pub tpp: f64,
    /// Recorded answer, as an id into [`crate::answer::ANSWERS`].
    #[serde(default)]
    pub answer_id: Option<u32>,
    /// Points actually awarded.
    #[serde(default)]
    pub points: Option<f64>,
}

impl Item {
    pub fn new(id: impl Into<String>, section_id: impl Into<String>, tpp: f64) -> Self {
        Self {
            id: id.into(),
            section_id: section_id.into(),
            question: String::new(),
            comment: None,
            tpp,
            answer_id: None,
            points: None,
        }
    }

    /// The recorded answer. An unanswered item counts as NA.
    pub fn answer(&self) -> Answer {
        self.answer_id.map(answer_from_id).unwrap_or(Answer::Na)
    }

    /// Record a response, awarding points by the points-for-answer rule.
    pub fn record_answer(&mut self, answer: Answer) {
        self.answer_id = Some(answer_to_id(answer));
        self.points = Some(points_for_answer(answer, self.tpp));
    }
}

/// An item paired with its resolved answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemWithAnswer {
    #[serde(flatten)]
    pub item: Item,
    pub answer: Answer,
}

impl ItemWithAnswer {
    pub fn new(item: Item, answer: Answer) -> Self {
        Self { item, answer }
    }

    /// Awarded points, with absent points counted as zero.
    pub fn points(&self) -> f64 {
        self.item.points.unwrap_or(0.0)
    }
}

/// A named group of items contributing `weightage` percent of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(alias = "item")]
    pub name: String,
    /// Share of the overall score, in percent (0-100).
    pub weightage: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, name: impl Into<String>, weightage: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weightage,
        }
    }
}

/// A section with its stored items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionWithItems {
    #[serde(flatten)]
    pub section: Section,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl SectionWithItems {
    /// Resolve every item's stored answer id into an [`Answer`].
    pub fn resolve_answers(&self) -> SectionWithAnswers {
        SectionWithAnswers {
            section: self.section.clone(),
            items: self
                .items
                .iter()
                .map(|item| ItemWithAnswer::new(item.clone(), item.answer()))
                .collect(),
        }
    }
}

/// A section whose items carry resolved answers; the scoring engine's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionWithAnswers {
    #[serde(flatten)]
    pub section: Section,
    #[serde(default)]
    pub items: Vec<ItemWithAnswer>,
}

impl SectionWithAnswers {
    pub fn new(section: Section, items: Vec<ItemWithAnswer>) -> Self {
        Self { section, items }
    }
}

/// Report-level summary metadata kept alongside an audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub id: String,
    #[serde(default)]
    pub company_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub percentage_per_section: f64,
    #[serde(default, rename = "minorNC")]
    pub minor_nc: u32,
    #[serde(default, rename = "majorNC")]
    pub major_nc: u32,
}

/// Who was audited, by whom, and when.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditHeader {
    /// Unique identifier for this audit.
    pub id: String,
    /// Human-readable audit title.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub hotel_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub inspector: String,
    #[serde(default)]
    pub inspection_body: String,
    #[serde(default)]
    pub reviewed_by: String,
    #[serde(default)]
    pub date_of_audit: Option<NaiveDate>,
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    /// Recorded floor-audit average, carried through unchanged.
    #[serde(default)]
    pub average_floor_audit: Option<f64>,
    #[serde(default)]
    pub total_mark_floor_audit: Option<f64>,
    #[serde(default)]
    pub total_mark_for_sampling: Option<f64>,
    /// Recorded overall quality mark, carried through unchanged.
    #[serde(default)]
    pub overall_quality: Option<f64>,
}

/// A complete inspection: header, optional summary, and weighted sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub header: AuditHeader,
    #[serde(default)]
    pub score_summary: Option<ScoreSummary>,
    #[serde(default)]
    pub sections: Vec<SectionWithItems>,
}

impl Audit {
    /// Resolve all sections for scoring.
    pub fn resolved_sections(&self) -> Vec<SectionWithAnswers> {
        self.sections
            .iter()
            .map(SectionWithItems::resolve_answers)
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Sum of section weightages; expected to be 100.
    pub fn total_weightage(&self) -> f64 {
        self.sections.iter().map(|s| s.section.weightage).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanswered_item_resolves_to_na() {
        let item = Item::new("i1", "s1", 10.0);
        assert_eq!(item.answer(), Answer::Na);
    }

    #[test]
    fn unknown_answer_id_resolves_to_na() {
        let mut item = Item::new("i1", "s1", 10.0);
        item.answer_id = Some(9);
        assert_eq!(item.answer(), Answer::Na);
    }

    #[test]
    fn record_answer_sets_id_and_points() {
        let mut item = Item::new("i1", "s1", 5.0);
        item.record_answer(Answer::NeedImprovement);
        assert_eq!(item.answer_id, Some(2));
        assert_eq!(item.points, Some(2.0));

        item.record_answer(Answer::Complying);
        assert_eq!(item.answer(), Answer::Complying);
        assert_eq!(item.points, Some(5.0));
    }

    #[test]
    fn missing_points_count_as_zero() {
        let entry = ItemWithAnswer::new(Item::new("i1", "s1", 10.0), Answer::Complying);
        assert_eq!(entry.points(), 0.0);
    }

    #[test]
    fn resolve_answers_keeps_item_order() {
        let mut a = Item::new("a", "s1", 10.0);
        a.record_answer(Answer::Nc);
        let b = Item::new("b", "s1", 10.0);
        let section = SectionWithItems {
            section: Section::new("s1", "Storage", 40.0),
            items: vec![a, b],
        };

        let resolved = section.resolve_answers();
        assert_eq!(resolved.section.weightage, 40.0);
        assert_eq!(resolved.items[0].item.id, "a");
        assert_eq!(resolved.items[0].answer, Answer::Nc);
        assert_eq!(resolved.items[1].answer, Answer::Na);
    }

    #[test]
    fn item_serializes_with_camel_case_keys() {
        let mut item = Item::new("i1", "s1", 4.0);
        item.record_answer(Answer::Complying);
        let json = serde_json::to_value(ItemWithAnswer::new(item, Answer::Complying)).unwrap();
        assert_eq!(json["sectionId"], "s1");
        assert_eq!(json["answerId"], 1);
        assert_eq!(json["answer"], "Complying");
    }

    #[test]
    fn score_summary_keeps_nc_field_names() {
        let summary = ScoreSummary {
            id: "ss1".into(),
            company_id: "c1".into(),
            user_id: "u1".into(),
            item: "Kitchen".into(),
            percentage_per_section: 80.0,
            minor_nc: 2,
            major_nc: 1,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["minorNC"], 2);
        assert_eq!(json["majorNC"], 1);
        assert_eq!(json["percentagePerSection"], 80.0);
    }

    #[test]
    fn section_accepts_item_alias_for_name() {
        let section: Section =
            serde_json::from_str(r#"{"id":"s1","item":"Pest Control","weightage":10}"#).unwrap();
        assert_eq!(section.name, "Pest Control");
    }
}

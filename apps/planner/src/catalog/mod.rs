//! Catalog Provider — produces the candidate course offerings for a student query.
//!
//! The planner core makes no assumption about where offerings come from. The
//! production backend asks the LLM; a static backend serves a fixed list.
//! Records are normalized here, but slot tokens are passed through untouched:
//! the timetable core handles malformed tokens itself.

pub mod prompts;
pub mod provider;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::catalog::prompts::CATALOG_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::timetable::summary::{
    Preferences, DEFAULT_TARGET_CREDITS, MAX_TARGET_CREDITS, MIN_TARGET_CREDITS,
};
use crate::timetable::{CourseOffering, Weekday};

pub use provider::{CatalogProvider, LlmCatalogProvider, StaticCatalogProvider};

fn default_target_credits() -> u32 {
    DEFAULT_TARGET_CREDITS
}

/// What the student asked the catalog for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub major: String,
    /// Admission year, e.g. "2024".
    #[serde(default)]
    pub cohort: String,
    /// 1..=4
    pub year_level: u8,
    /// 1 or 2
    pub term: u8,
    #[serde(default = "default_target_credits")]
    pub target_credits: u32,
    #[serde(default)]
    pub free_days: Vec<Weekday>,
    #[serde(default)]
    pub requirements: Option<String>,
}

impl CatalogQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.major.trim().is_empty() {
            return Err(AppError::Validation("major cannot be empty".to_string()));
        }
        if !(1..=4).contains(&self.year_level) {
            return Err(AppError::Validation(format!(
                "year_level must be 1-4, got {}",
                self.year_level
            )));
        }
        if !(1..=2).contains(&self.term) {
            return Err(AppError::Validation(format!(
                "term must be 1 or 2, got {}",
                self.term
            )));
        }
        if !(MIN_TARGET_CREDITS..=MAX_TARGET_CREDITS).contains(&self.target_credits) {
            return Err(AppError::Validation(format!(
                "target_credits must be {MIN_TARGET_CREDITS}-{MAX_TARGET_CREDITS}, got {}",
                self.target_credits
            )));
        }
        Ok(())
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            target_credits: self.target_credits,
            free_days: self.free_days.clone(),
        }
    }

    /// Fills the catalog prompt. `review_data` is the rendered review listing.
    pub fn to_prompt(&self, review_data: &str) -> String {
        let free_days = if self.free_days.is_empty() {
            "none".to_string()
        } else {
            self.free_days
                .iter()
                .map(|d| d.short_name())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let requirements = self
            .requirements
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or("none");
        let cohort = match self.cohort.trim() {
            "" => "unknown",
            c => c,
        };

        CATALOG_PROMPT_TEMPLATE
            .replace("{major}", self.major.trim())
            .replace("{cohort}", cohort)
            .replace("{year_level}", &self.year_level.to_string())
            .replace("{term}", &self.term.to_string())
            .replace("{target_credits}", &self.target_credits.to_string())
            .replace("{free_days}", &free_days)
            .replace("{requirements}", requirements)
            .replace("{review_data}", review_data)
    }
}

/// Raw catalog answer. Each record is kept as JSON so one bad record does not
/// sink the whole list.
#[derive(Debug, Deserialize)]
pub struct CatalogEnvelope {
    #[serde(default)]
    pub courses: Vec<Value>,
}

/// Turns raw catalog records into offerings.
///
/// - records that do not deserialize are dropped
/// - a missing or blank id is replaced with a generated one
/// - later records repeating an id are dropped
/// - zero-credit records are dropped
pub fn normalize_catalog(records: Vec<Value>) -> Vec<CourseOffering> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(records.len());

    for (i, mut record) in records.into_iter().enumerate() {
        if let Some(obj) = record.as_object_mut() {
            let blank = obj
                .get("id")
                .map(|v| match v {
                    Value::String(s) => s.trim().is_empty(),
                    Value::Number(_) => false,
                    _ => true,
                })
                .unwrap_or(true);
            if blank {
                obj.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
            } else if let Some(Value::Number(n)) = obj.get("id") {
                let id = n.to_string();
                obj.insert("id".to_string(), Value::String(id));
            }
        }

        let offering: CourseOffering = match serde_json::from_value(record) {
            Ok(o) => o,
            Err(e) => {
                warn!(index = i, "Dropping malformed catalog record: {e}");
                continue;
            }
        };

        if offering.credits == 0 {
            warn!(id = %offering.id, "Dropping zero-credit catalog record");
            continue;
        }
        if !seen.insert(offering.id.clone()) {
            warn!(id = %offering.id, "Dropping catalog record with duplicate id");
            continue;
        }
        out.push(offering);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query() -> CatalogQuery {
        CatalogQuery {
            major: "전자융합공학과".to_string(),
            cohort: "2024".to_string(),
            year_level: 1,
            term: 1,
            target_credits: 19,
            free_days: vec![Weekday::Fri],
            requirements: None,
        }
    }

    #[test]
    fn test_validate_accepts_typical_query() {
        assert!(query().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let mut q = query();
        q.year_level = 5;
        assert!(matches!(q.validate(), Err(AppError::Validation(_))));

        let mut q = query();
        q.term = 3;
        assert!(q.validate().is_err());

        let mut q = query();
        q.target_credits = 30;
        assert!(q.validate().is_err());

        let mut q = query();
        q.major = "  ".to_string();
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_query_defaults_from_json() {
        let q: CatalogQuery =
            serde_json::from_str(r#"{"major":"CS","year_level":2,"term":1}"#).unwrap();
        assert_eq!(q.target_credits, 19);
        assert!(q.free_days.is_empty());
    }

    #[test]
    fn test_prompt_substitutes_every_placeholder() {
        let prompt = query().to_prompt("- 대학영어 / Brown: 꿀강임.");
        assert!(prompt.contains("전자융합공학과"));
        assert!(prompt.contains("one line per review):\n- 대학영어 / Brown: 꿀강임."));
        assert!(!prompt.contains("{review_data}"));
        assert!(prompt.contains("Days the student wants free: Fri"));
        assert!(prompt.contains("Other requirements: none"));
        assert!(!prompt.contains("{major}"));
        assert!(!prompt.contains("{requirements}"));
    }

    #[test]
    fn test_normalize_fills_ids_and_drops_bad_records() {
        let records = vec![
            json!({"id": "EE101-01", "name": "회로이론", "credits": 3, "time_slots": ["Mon3"]}),
            json!({"name": "대학영어", "credits": 2, "time_slots": []}),
            json!({"id": 42, "name": "C프로그래밍", "credits": 3}),
            json!({"id": "EE101-01", "name": "dup", "credits": 3}),
            json!({"id": "X", "name": "Seminar", "credits": 0}),
            json!({"id": "Y", "credits": 3}),
            json!("not an object"),
        ];
        let out = normalize_catalog(records);
        let names: Vec<_> = out.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["회로이론", "대학영어", "C프로그래밍"]);
        assert!(!out[1].id.is_empty());
        assert_eq!(out[2].id, "42");
    }

    #[test]
    fn test_normalize_keeps_malformed_slot_tokens() {
        let out = normalize_catalog(vec![
            json!({"id": "A", "name": "A", "credits": 3, "time_slots": ["Mon3", "Sat9", "?"]}),
        ]);
        assert_eq!(out[0].time_slots.len(), 3);
        assert_eq!(out[0].slots().len(), 1);
    }
}

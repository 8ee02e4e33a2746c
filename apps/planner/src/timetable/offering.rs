use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::timetable::slot::{is_unscheduled_sentinel, Slot};

/// UI grouping tag. Plays no part in scheduling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    High,
    Medium,
    #[default]
    Normal,
}

impl Priority {
    /// Lenient reader for catalog data: any case, plus the Korean labels.
    pub fn from_label(label: &str) -> Option<Priority> {
        match label.trim().to_lowercase().as_str() {
            "high" | "높음" | "상" => Some(Priority::High),
            "medium" | "중간" | "중" => Some(Priority::Medium),
            "normal" | "low" | "보통" | "하" => Some(Priority::Normal),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Priority::from_label(&label).unwrap_or_default())
    }
}

/// A single schedulable course offering, as produced by a catalog provider.
///
/// Immutable once produced. `time_slots` keeps the raw tokens; use
/// [`CourseOffering::slots`] for the parsed, valid cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseOffering {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub instructor: String,
    pub credits: u32,
    #[serde(default)]
    pub time_slots: Vec<String>,
    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub priority: Priority,
}

impl CourseOffering {
    pub fn new(id: impl Into<String>, name: impl Into<String>, credits: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            instructor: String::new(),
            credits,
            time_slots: Vec::new(),
            classification: String::new(),
            priority: Priority::Normal,
        }
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    pub fn with_slots<I, S>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_slots = slots.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = classification.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Valid grid cells of this offering. Malformed and sentinel tokens are dropped.
    pub fn slots(&self) -> BTreeSet<Slot> {
        self.time_slots
            .iter()
            .filter_map(|t| Slot::parse(t))
            .collect()
    }

    /// No tokens at all, or only sentinel tokens such as `online`.
    pub fn is_unscheduled(&self) -> bool {
        self.time_slots.iter().all(|t| is_unscheduled_sentinel(t))
    }
}

//! Schedule diagnostics — credit load and free-day check against the student's
//! stated preferences.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::timetable::offering::CourseOffering;
use crate::timetable::slot::Weekday;

pub const DEFAULT_TARGET_CREDITS: u32 = 19;
pub const MIN_TARGET_CREDITS: u32 = 9;
pub const MAX_TARGET_CREDITS: u32 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub target_credits: u32,
    /// Days the student would like to keep free of classes.
    pub free_days: Vec<Weekday>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            target_credits: DEFAULT_TARGET_CREDITS,
            free_days: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub total_credits: u32,
    pub target_credits: u32,
    /// `target - total`; negative when the schedule is over target.
    pub credit_gap: i64,
    pub busy_days: Vec<Weekday>,
    pub free_days: Vec<Weekday>,
    pub violated_free_days: Vec<Weekday>,
    pub credits_by_classification: BTreeMap<String, u32>,
    pub unscheduled_count: usize,
}

pub fn summarize(schedule: &[CourseOffering], prefs: &Preferences) -> ScheduleSummary {
    let total_credits: u32 = schedule.iter().map(|o| o.credits).sum();

    let mut busy: BTreeSet<Weekday> = BTreeSet::new();
    let mut by_class: BTreeMap<String, u32> = BTreeMap::new();
    let mut unscheduled_count = 0;

    for offering in schedule {
        if offering.is_unscheduled() {
            unscheduled_count += 1;
        }
        busy.extend(offering.slots().iter().map(|s| s.day()));

        let key = if offering.classification.trim().is_empty() {
            "unclassified".to_string()
        } else {
            offering.classification.trim().to_string()
        };
        *by_class.entry(key).or_insert(0) += offering.credits;
    }

    let free_days = Weekday::ALL
        .iter()
        .copied()
        .filter(|d| !busy.contains(d))
        .collect();

    let requested: BTreeSet<Weekday> = prefs.free_days.iter().copied().collect();
    let violated_free_days = requested.intersection(&busy).copied().collect();

    ScheduleSummary {
        total_credits,
        target_credits: prefs.target_credits,
        credit_gap: i64::from(prefs.target_credits) - i64::from(total_credits),
        busy_days: busy.into_iter().collect(),
        free_days,
        violated_free_days,
        credits_by_classification: by_class,
        unscheduled_count,
    }
}

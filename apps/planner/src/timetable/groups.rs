use serde::Serialize;

use crate::timetable::offering::{CourseOffering, Priority};

/// Candidate offerings bucketed the way the course picker lists them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriorityGroups {
    pub high: Vec<CourseOffering>,
    pub medium: Vec<CourseOffering>,
    pub normal: Vec<CourseOffering>,
}

/// Buckets by priority, keeping input order inside each bucket.
pub fn group_by_priority(offerings: &[CourseOffering]) -> PriorityGroups {
    let mut groups = PriorityGroups::default();
    for o in offerings {
        let bucket = match o.priority {
            Priority::High => &mut groups.high,
            Priority::Medium => &mut groups.medium,
            Priority::Normal => &mut groups.normal,
        };
        bucket.push(o.clone());
    }
    groups
}

/// Offerings whose classification matches `tag`, ignoring case and padding.
pub fn filter_by_classification<'a>(
    offerings: &'a [CourseOffering],
    tag: &str,
) -> Vec<&'a CourseOffering> {
    let tag = tag.trim();
    offerings
        .iter()
        .filter(|o| o.classification.trim().eq_ignore_ascii_case(tag))
        .collect()
}

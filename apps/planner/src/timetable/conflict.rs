//! Conflict detection between a candidate offering and a confirmed schedule.
//!
//! Two offerings conflict iff their sets of *valid* slots intersect. Unscheduled
//! offerings and malformed tokens never take part in a conflict.

use std::collections::BTreeSet;

use crate::timetable::offering::CourseOffering;
use crate::timetable::slot::Slot;

/// Returns the first entry of `confirmed` (in list order) that collides with
/// `candidate`, or `None` if adding `candidate` is legal.
pub fn has_conflict<'a>(
    candidate: &CourseOffering,
    confirmed: &'a [CourseOffering],
) -> Option<&'a CourseOffering> {
    if candidate.is_unscheduled() {
        return None;
    }
    let wanted = candidate.slots();
    if wanted.is_empty() {
        return None;
    }

    confirmed
        .iter()
        .find(|entry| !entry.is_unscheduled() && !entry.slots().is_disjoint(&wanted))
}

/// Cells occupied by both offerings.
pub fn overlapping_slots(a: &CourseOffering, b: &CourseOffering) -> BTreeSet<Slot> {
    a.slots().intersection(&b.slots()).copied().collect()
}

/// Every `(i, j)` with `i < j` whose entries share a cell.
///
/// Empty for any list reachable through `SelectionSet`; used to vet data that
/// arrives from outside, such as a stored snapshot.
pub fn find_violations(list: &[CourseOffering]) -> Vec<(usize, usize)> {
    let slots: Vec<BTreeSet<Slot>> = list.iter().map(CourseOffering::slots).collect();
    let mut pairs = Vec::new();
    for i in 0..slots.len() {
        for j in (i + 1)..slots.len() {
            if !slots[i].is_disjoint(&slots[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

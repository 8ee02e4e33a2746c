//! Selection set — the cart and the confirmed schedule of one planning session.
//!
//! Every confirmation passes through the cart. The confirmed schedule is kept
//! pairwise conflict-free: every mutation below either applies fully or leaves
//! both collections untouched.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::timetable::conflict::{find_violations, has_conflict, overlapping_slots};
use crate::timetable::offering::CourseOffering;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("schedule conflict with '{name}'")]
    ScheduleConflict { name: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionSet {
    cart: Vec<CourseOffering>,
    schedule: Vec<CourseOffering>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> &[CourseOffering] {
        &self.cart
    }

    pub fn schedule(&self) -> &[CourseOffering] {
        &self.schedule
    }

    fn contains_id(&self, id: &str) -> bool {
        self.cart
            .iter()
            .chain(self.schedule.iter())
            .any(|o| o.id == id)
    }

    /// Appends `offering` to the cart unless its id is already in the cart or
    /// the schedule. Returns `true` if it was appended.
    pub fn add_to_cart(&mut self, offering: CourseOffering) -> bool {
        if self.contains_id(&offering.id) {
            return false;
        }
        self.cart.push(offering);
        true
    }

    pub fn remove_from_cart(&mut self, index: usize) -> Result<CourseOffering, SelectionError> {
        check_index(index, self.cart.len())?;
        Ok(self.cart.remove(index))
    }

    /// Moves the cart entry at `index` to the end of the schedule.
    ///
    /// Fails with `ScheduleConflict` naming the first confirmed entry that
    /// shares a cell with it; nothing moves in that case.
    pub fn confirm(&mut self, index: usize) -> Result<&CourseOffering, SelectionError> {
        check_index(index, self.cart.len())?;

        let candidate = &self.cart[index];
        if let Some(existing) = has_conflict(candidate, &self.schedule) {
            debug!(
                candidate = %candidate.id,
                existing = %existing.id,
                cells = ?overlapping_slots(candidate, existing),
                "Confirm rejected"
            );
            return Err(SelectionError::ScheduleConflict {
                name: existing.name.clone(),
            });
        }

        let offering = self.cart.remove(index);
        self.schedule.push(offering);
        Ok(&self.schedule[self.schedule.len() - 1])
    }

    pub fn remove_from_schedule(
        &mut self,
        index: usize,
    ) -> Result<CourseOffering, SelectionError> {
        check_index(index, self.schedule.len())?;
        Ok(self.schedule.remove(index))
    }

    /// Empties the schedule. The cart is left alone.
    pub fn reset_schedule(&mut self) {
        self.schedule.clear();
    }

    pub fn total_credits(&self) -> u32 {
        self.schedule.iter().map(|o| o.credits).sum()
    }

    /// Replaces the schedule wholesale with a previously stored one.
    ///
    /// A list that is not itself conflict-free is rejected. Cart entries whose
    /// id now lives in the schedule are dropped from the cart.
    pub fn replace_schedule(
        &mut self,
        offerings: Vec<CourseOffering>,
    ) -> Result<(), SelectionError> {
        if let Some(&(_, later)) = find_violations(&offerings).first() {
            return Err(SelectionError::ScheduleConflict {
                name: offerings[later].name.clone(),
            });
        }

        self.cart
            .retain(|c| !offerings.iter().any(|o| o.id == c.id));
        self.schedule = offerings;
        Ok(())
    }
}

fn check_index(index: usize, len: usize) -> Result<(), SelectionError> {
    if index < len {
        Ok(())
    } else {
        Err(SelectionError::IndexOutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offering(id: &str, name: &str, credits: u32, slots: &[&str]) -> CourseOffering {
        CourseOffering::new(id, name, credits).with_slots(slots.iter().copied())
    }

    fn course_a() -> CourseOffering {
        offering("1", "A", 3, &["Mon3", "Wed4"])
    }

    fn course_b() -> CourseOffering {
        offering("2", "B", 2, &["Mon3"])
    }

    #[test]
    fn test_conflicting_confirm_is_rejected() {
        let mut set = SelectionSet::new();
        set.add_to_cart(course_a());
        set.add_to_cart(course_b());

        assert_eq!(set.confirm(0).unwrap().name, "A");
        assert_eq!(set.schedule(), &[course_a()]);

        let err = set.confirm(0).unwrap_err();
        assert_eq!(
            err,
            SelectionError::ScheduleConflict {
                name: "A".to_string()
            }
        );
        assert_eq!(set.schedule(), &[course_a()]);
        assert_eq!(set.cart(), &[course_b()]);
    }

    #[test]
    fn test_failed_confirm_leaves_state_unchanged() {
        let mut set = SelectionSet::new();
        set.add_to_cart(course_a());
        set.add_to_cart(offering("9", "Other", 1, &["Fri1"]));
        set.add_to_cart(course_b());
        set.confirm(0).unwrap();

        let before = set.clone();
        assert!(set.confirm(1).is_err());
        assert_eq!(set, before);
    }

    #[test]
    fn test_online_course_always_confirms() {
        let mut set = SelectionSet::new();
        set.add_to_cart(course_a());
        set.add_to_cart(offering("3", "C", 3, &[]));
        set.add_to_cart(offering("4", "D", 1, &["online"]));
        set.confirm(0).unwrap();
        set.confirm(0).unwrap();
        set.confirm(0).unwrap();
        assert_eq!(set.schedule().len(), 3);
        assert!(set.cart().is_empty());
    }

    #[test]
    fn test_confirm_order_and_total_credits() {
        let mut set = SelectionSet::new();
        let a = course_a();
        let e = offering("5", "E", 2, &["Tue1", "Thu1"]);
        set.add_to_cart(a.clone());
        set.add_to_cart(e.clone());
        set.confirm(0).unwrap();
        set.confirm(0).unwrap();
        assert_eq!(set.schedule(), &[a, e]);
        assert_eq!(set.total_credits(), 5);
    }

    #[test]
    fn test_remove_from_cart_out_of_range() {
        let mut set = SelectionSet::new();
        set.add_to_cart(course_a());
        set.add_to_cart(offering("5", "E", 2, &["Tue1"]));
        assert_eq!(
            set.remove_from_cart(5),
            Err(SelectionError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(set.cart().len(), 2);
    }

    #[test]
    fn test_confirm_and_remove_out_of_range() {
        let mut set = SelectionSet::new();
        assert!(matches!(
            set.confirm(0),
            Err(SelectionError::IndexOutOfRange { index: 0, len: 0 })
        ));
        assert!(matches!(
            set.remove_from_schedule(0),
            Err(SelectionError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_add_to_cart_is_idempotent_by_id() {
        let mut set = SelectionSet::new();
        assert!(set.add_to_cart(course_a()));
        assert!(!set.add_to_cart(course_a()));
        assert_eq!(set.cart().len(), 1);

        // Same id as something already confirmed is also ignored.
        set.confirm(0).unwrap();
        assert!(!set.add_to_cart(course_a()));
        assert!(set.cart().is_empty());
    }

    #[test]
    fn test_same_name_different_id_is_allowed() {
        let mut set = SelectionSet::new();
        set.add_to_cart(offering("1", "Calculus", 3, &["Mon1"]));
        set.add_to_cart(offering("2", "Calculus", 3, &["Tue1"]));
        assert_eq!(set.cart().len(), 2);
    }

    #[test]
    fn test_remove_from_schedule_and_reset() {
        let mut set = SelectionSet::new();
        set.add_to_cart(course_a());
        set.add_to_cart(offering("5", "E", 2, &["Tue1"]));
        set.add_to_cart(offering("6", "F", 1, &["Fri2"]));
        set.confirm(0).unwrap();
        set.confirm(0).unwrap();

        let removed = set.remove_from_schedule(0).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(set.total_credits(), 2);

        set.reset_schedule();
        assert!(set.schedule().is_empty());
        assert_eq!(set.total_credits(), 0);
        assert_eq!(set.cart().len(), 1);
    }

    #[test]
    fn test_removed_offering_can_be_re_added() {
        let mut set = SelectionSet::new();
        set.add_to_cart(course_a());
        set.confirm(0).unwrap();
        set.remove_from_schedule(0).unwrap();
        assert!(set.add_to_cart(course_a()));
    }

    #[test]
    fn test_replace_schedule_rejects_inconsistent_snapshot() {
        let mut set = SelectionSet::new();
        set.add_to_cart(offering("7", "G", 1, &["Fri1"]));
        set.confirm(0).unwrap();
        let before = set.clone();

        let err = set
            .replace_schedule(vec![course_a(), course_b()])
            .unwrap_err();
        assert_eq!(
            err,
            SelectionError::ScheduleConflict {
                name: "B".to_string()
            }
        );
        assert_eq!(set, before);
    }

    #[test]
    fn test_replace_schedule_drops_cart_duplicates() {
        let mut set = SelectionSet::new();
        set.add_to_cart(course_a());
        set.add_to_cart(offering("5", "E", 2, &["Tue1"]));

        set.replace_schedule(vec![course_a()]).unwrap();
        assert_eq!(set.schedule(), &[course_a()]);
        assert_eq!(set.cart().len(), 1);
        assert_eq!(set.cart()[0].id, "5");
    }

    /// Walks a fixed, mixed sequence of operations and checks the
    /// pairwise-disjoint property after each one.
    #[test]
    fn test_schedule_stays_conflict_free_under_mixed_operations() {
        let pool = vec![
            course_a(),
            course_b(),
            offering("3", "C", 3, &["Wed4", "Fri5"]),
            offering("4", "D", 3, &[]),
            offering("5", "E", 2, &["Mon3", "Tue2"]),
            offering("6", "F", 1, &["bad", "Tue2"]),
            offering("7", "G", 3, &["Thu9"]),
        ];

        let mut set = SelectionSet::new();
        for step in 0..60usize {
            let pick = pool[step % pool.len()].clone();
            match step % 5 {
                0 | 1 => {
                    set.add_to_cart(pick);
                }
                2 => {
                    let _ = set.confirm(step % (set.cart().len() + 1));
                }
                3 => {
                    if step % 3 == 0 {
                        let _ = set.remove_from_schedule(step % (set.schedule().len() + 1));
                    } else {
                        let _ = set.remove_from_cart(step % (set.cart().len() + 1));
                    }
                }
                _ => {
                    let _ = set.confirm(0);
                }
            }
            assert!(
                find_violations(set.schedule()).is_empty(),
                "invariant broken at step {step}"
            );
        }
    }
}

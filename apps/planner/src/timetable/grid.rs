//! Projection of a confirmed schedule onto the weekly grid.
//!
//! The output is plain data: a 9 × 5 matrix (period × weekday) plus an
//! overflow list for offerings with no fixed weekly time. Turning it into HTML
//! or text is left to `crate::render`.

use serde::{Deserialize, Serialize};

use crate::timetable::offering::CourseOffering;
use crate::timetable::slot::{Slot, Weekday, DAYS, PERIODS};

/// Compact description of an offering as shown in one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub offering_id: String,
    pub name: String,
    pub instructor: String,
    pub classification: String,
}

impl From<&CourseOffering> for GridCell {
    fn from(o: &CourseOffering) -> Self {
        Self {
            offering_id: o.id.clone(),
            name: o.name.clone(),
            instructor: o.instructor.clone(),
            classification: o.classification.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridView {
    /// `cells[period - 1][weekday]`.
    pub cells: [[Option<GridCell>; DAYS]; PERIODS],
    /// Online / unscheduled offerings, in schedule order.
    pub overflow: Vec<GridCell>,
}

impl GridView {
    pub fn cell(&self, slot: Slot) -> Option<&GridCell> {
        let (row, col) = slot.grid_position();
        self.cells[row][col].as_ref()
    }

    /// All filled cells, row-major (period 1 Mon, period 1 Tue, ...).
    pub fn occupied_cells(&self) -> Vec<(Slot, &GridCell)> {
        let mut out = Vec::new();
        for (row, periods) in self.cells.iter().enumerate() {
            for (col, cell) in periods.iter().enumerate() {
                let slot = Slot::new(Weekday::ALL[col], (row + 1) as u8);
                if let (Some(slot), Some(cell)) = (slot, cell) {
                    out.push((slot, cell));
                }
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.overflow.is_empty() && self.cells.iter().flatten().all(Option::is_none)
    }
}

/// Places every valid slot of every offering on the grid.
///
/// If two offerings claim the same cell the later one in `confirmed` wins.
/// Offerings without a single valid slot go to the overflow row.
pub fn render(confirmed: &[CourseOffering]) -> GridView {
    let mut view = GridView::default();
    for offering in confirmed {
        let slots = offering.slots();
        if slots.is_empty() {
            view.overflow.push(GridCell::from(offering));
            continue;
        }
        for slot in slots {
            let (row, col) = slot.grid_position();
            view.cells[row][col] = Some(GridCell::from(offering));
        }
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offering(id: &str, name: &str, slots: &[&str]) -> CourseOffering {
        CourseOffering::new(id, name, 3)
            .with_instructor(format!("Prof. {name}"))
            .with_slots(slots.iter().copied())
    }

    fn slot(day: Weekday, period: u8) -> Slot {
        Slot::new(day, period).unwrap()
    }

    #[test]
    fn test_render_places_each_slot() {
        let view = render(&[offering("1", "A", &["Mon3", "Wed4"])]);
        assert_eq!(view.cell(slot(Weekday::Mon, 3)).unwrap().name, "A");
        assert_eq!(view.cell(slot(Weekday::Wed, 4)).unwrap().instructor, "Prof. A");
        assert_eq!(view.occupied_cells().len(), 2);
        assert!(view.overflow.is_empty());
    }

    #[test]
    fn test_online_offering_goes_to_overflow() {
        let view = render(&[
            offering("1", "A", &["Mon3"]),
            offering("3", "C", &[]),
            offering("4", "D", &["online"]),
        ]);
        let names: Vec<_> = view.overflow.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["C", "D"]);
        assert_eq!(view.occupied_cells().len(), 1);
    }

    #[test]
    fn test_malformed_only_offering_goes_to_overflow() {
        let view = render(&[offering("5", "E", &["Sat3", "??"])]);
        assert_eq!(view.overflow.len(), 1);
        assert!(view.occupied_cells().is_empty());
    }

    #[test]
    fn test_overlapping_input_is_last_write_wins() {
        let view = render(&[
            offering("1", "A", &["Mon3", "Wed4"]),
            offering("4", "D", &["Mon3"]),
        ]);
        assert_eq!(view.cell(slot(Weekday::Mon, 3)).unwrap().name, "D");
        assert_eq!(view.cell(slot(Weekday::Wed, 4)).unwrap().name, "A");
    }

    #[test]
    fn test_empty_schedule_renders_empty_grid() {
        let view = render(&[]);
        assert!(view.is_empty());
        assert_eq!(view.cells.len(), PERIODS);
        assert_eq!(view.cells[0].len(), DAYS);
    }

    #[test]
    fn test_occupied_cells_order() {
        let view = render(&[offering("1", "A", &["Tue2", "Mon2", "Fri1"])]);
        let slots: Vec<_> = view.occupied_cells().into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            slots,
            vec![
                slot(Weekday::Fri, 1),
                slot(Weekday::Mon, 2),
                slot(Weekday::Tue, 2)
            ]
        );
    }

    #[test]
    fn test_grid_view_serializes_as_matrix() {
        let view = render(&[offering("1", "A", &["Mon1"])]);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["cells"].as_array().unwrap().len(), 9);
        assert_eq!(json["cells"][0].as_array().unwrap().len(), 5);
        assert_eq!(json["cells"][0][0]["name"], "A");
        assert!(json["cells"][0][1].is_null());
    }
}

// Timetable core: slot tokens, course offerings, conflict detection, the
// cart → schedule selection set and the weekly grid projection.
// Synchronous and I/O-free; the service layer owns catalogs, sessions and storage.

pub mod conflict;
pub mod grid;
pub mod groups;
pub mod offering;
pub mod selection;
pub mod slot;
pub mod summary;

pub use grid::{GridCell, GridView};
pub use offering::{CourseOffering, Priority};
pub use selection::{SelectionError, SelectionSet};
pub use slot::{Slot, Weekday};

//! Agenda projections.
//!
//! Read-only views over appointment, task and patient collections already held
//! in memory: calendar-day filtering, the Monday–Friday work week, the monthly
//! grid, patient/task grouping and segmentation counts.

mod calendar;
mod filters;
mod grouping;
mod summary;

pub use calendar::*;
pub use filters::*;
pub use grouping::*;
pub use summary::*;

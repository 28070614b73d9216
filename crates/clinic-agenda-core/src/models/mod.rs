//! Domain models for the clinic agenda.

mod appointment;
mod capacity;
mod patient;
mod task;

pub use appointment::*;
pub use capacity::*;
pub use patient::*;
pub use task::*;

//! egui rendering of the dashboard state.

pub mod charts;
pub mod overview;
pub mod panels;

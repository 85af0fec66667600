//! egui rendering: control panels and plots. All state lives in [`crate::state`].

pub mod panels;
pub mod plot;

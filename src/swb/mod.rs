//! Soil water balance engine.
//!
//! A day-stepping state machine tracking root-zone moisture against field
//! capacity, wilting point, and the management-allowed-depletion trigger.
pub mod constants;
pub mod params;
pub mod processes;
pub mod run;
pub mod state;
pub mod trace;

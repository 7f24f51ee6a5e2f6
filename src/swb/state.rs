//! Rolling simulation state.
//!
//! Created at the start date, mutated once per simulated day, discarded
//! once the terminal date is reached; never persisted by the core.

use chrono::NaiveDate;

use super::processes;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub date: NaiveDate,
    /// Stored water in the root zone [mm].
    pub moisture: f64,
    /// Storage capacity at field capacity for the current root depth [mm].
    pub capacity: f64,
}

impl State {
    /// Initial state: the profile holds `initial_fraction` of saturation
    /// relative to field capacity (by convention 1.0 — a full profile).
    pub fn initialize(
        start_date: NaiveDate,
        field_capacity: f64,
        root_depth_m: f64,
        initial_fraction: f64,
    ) -> Self {
        let capacity = processes::capacity_mm(field_capacity, root_depth_m);
        Self {
            date: start_date,
            moisture: initial_fraction * capacity,
            capacity,
        }
    }

    /// Current saturation relative to field-capacity storage.
    pub fn fraction(&self) -> f64 {
        self.moisture / self.capacity
    }

    /// Net deficit below field-capacity storage [mm].
    pub fn deficit(&self) -> f64 {
        self.capacity - self.moisture
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 3, 16).unwrap()
    }

    #[test]
    fn full_profile_initialization() {
        let s = State::initialize(start(), 0.40, 0.95, 1.0);
        assert_relative_eq!(s.capacity, 380.0);
        assert_relative_eq!(s.moisture, 380.0);
        assert_relative_eq!(s.fraction(), 1.0);
        assert_relative_eq!(s.deficit(), 0.0);
    }

    #[test]
    fn partial_initial_fraction() {
        let s = State::initialize(start(), 0.40, 0.95, 0.5);
        assert_relative_eq!(s.moisture, 190.0);
        assert_relative_eq!(s.deficit(), 190.0);
    }
}

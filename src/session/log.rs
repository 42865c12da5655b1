// ABOUTME: Session log lines — the human-readable messages kept alongside the history.
// ABOUTME: Newest line first, capped at LOG_CAPACITY entries with the oldest evicted.

use super::state::CalculationRecord;

/// Maximum number of log lines kept in the session record.
pub const LOG_CAPACITY: usize = 100;

pub const CLEARED_MESSAGE: &str = "All data cleared";
pub const INVALID_NUMBER_MESSAGE: &str = "Error: invalid side values";
pub const INVALID_TRIANGLE_MESSAGE: &str = "Error: the values do not form a valid triangle";
pub const AREA_OUT_OF_RANGE_MESSAGE: &str = "Error: the area is too large to calculate";

/// Prepend `line` and drop whatever falls past the capacity.
pub fn push_capped(logs: &mut Vec<String>, line: String) {
    logs.insert(0, line);
    logs.truncate(LOG_CAPACITY);
}

/// Log line recording a new calculation.
pub fn calculation_line(record: &CalculationRecord) -> String {
    format!(
        "New calculation: sides ({}, {}, {}) - area: {:.4} m² = {:.6} labnah",
        record.side1, record.side2, record.hypotenuse, record.area_m2, record.area_labnah
    )
}

/// Log line recording an update of the running total.
pub fn totals_line(total_m2: f64) -> String {
    format!("Added to total - current total: {:.4} m²", total_m2)
}

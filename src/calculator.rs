// ABOUTME: Calculator — parses side inputs, evaluates the triangle, and records results.
// ABOUTME: Tracks the current result for add-to-total and mirrors the stored view after each action.

use chrono::NaiveDate;

use crate::error::{CalcError, StoreError};
use crate::geometry::{self, Triangle};
use crate::session::log::{
    AREA_OUT_OF_RANGE_MESSAGE, INVALID_NUMBER_MESSAGE, INVALID_TRIANGLE_MESSAGE,
};
use crate::session::{
    CalculationRecord, KeyValueStore, NewCalculation, SessionState, SessionStore, Statistics,
    Totals, statistics_for,
};

/// The outcome of a successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub triangle: Triangle,
    pub area_m2: f64,
    pub area_labnah: f64,
    /// The stored record, or `None` if persisting it failed.
    pub record: Option<CalculationRecord>,
}

impl Calculation {
    pub fn persisted(&self) -> bool {
        self.record.is_some()
    }
}

/// Drives the evaluator and the session store for one session.
pub struct Calculator<K: KeyValueStore> {
    store: SessionStore<K>,
    current: Option<Calculation>,
    view: SessionState,
    statistics: Statistics,
}

impl<K: KeyValueStore> Calculator<K> {
    pub fn new(store: SessionStore<K>) -> Self {
        let mut calculator = Self {
            store,
            current: None,
            view: SessionState::default(),
            statistics: Statistics::default(),
        };
        calculator.refresh();
        calculator
    }

    /// Re-read history, totals, log, and statistics from the store.
    pub fn refresh(&mut self) {
        self.view = self.store.load();
        self.statistics = statistics_for(&self.view);
    }

    /// Parse and evaluate three raw side inputs, recording a valid result.
    ///
    /// Declined inputs are written to the session log and returned as errors;
    /// nothing is added to the history for them.
    pub fn calculate(
        &mut self,
        side1: &str,
        side2: &str,
        hypotenuse: &str,
    ) -> Result<Calculation, CalcError> {
        let mut sides = [0.0; 3];
        for (slot, raw) in sides.iter_mut().zip([side1, side2, hypotenuse]) {
            match parse_side(raw) {
                Ok(value) => *slot = value,
                Err(e) => {
                    self.decline(INVALID_NUMBER_MESSAGE);
                    return Err(e);
                }
            }
        }
        let [a, b, c] = sides;

        let Some(triangle) = Triangle::new(a, b, c) else {
            self.decline(INVALID_TRIANGLE_MESSAGE);
            if a <= 0.0 || b <= 0.0 || c <= 0.0 {
                return Err(CalcError::NonPositive);
            }
            return Err(CalcError::NotATriangle);
        };

        let area_m2 = triangle.area_m2();
        let area_labnah = geometry::convert_to_secondary_unit(area_m2);
        if !area_m2.is_finite() || !area_labnah.is_finite() {
            self.decline(AREA_OUT_OF_RANGE_MESSAGE);
            return Err(CalcError::AreaOutOfRange);
        }
        let record = self
            .store
            .append_calculation(NewCalculation {
                side1: a,
                side2: b,
                hypotenuse: c,
                area_m2,
                area_labnah,
            })
            .ok();

        let calculation = Calculation {
            triangle,
            area_m2,
            area_labnah,
            record,
        };
        tracing::debug!(
            area_m2,
            area_labnah,
            persisted = calculation.persisted(),
            "calculated triangle area"
        );
        self.current = Some(calculation.clone());
        self.refresh();
        Ok(calculation)
    }

    /// Add the current result to the running totals and return the new totals.
    pub fn add_to_total(&mut self) -> Result<Totals, CalcError> {
        let current = match &self.current {
            Some(c) if c.area_m2 > 0.0 => c,
            _ => return Err(CalcError::NoCurrentResult),
        };

        let previous = self.view.totals();
        let totals = Totals {
            area_m2: previous.area_m2 + current.area_m2,
            area_labnah: previous.area_labnah + current.area_labnah,
        };
        if !totals.area_m2.is_finite() || !totals.area_labnah.is_finite() {
            self.decline(AREA_OUT_OF_RANGE_MESSAGE);
            return Err(CalcError::AreaOutOfRange);
        }
        // A failed write is already logged by the store; the caller still gets the sum.
        let _ = self.store.set_totals(totals.area_m2, totals.area_labnah);
        self.refresh();
        Ok(totals)
    }

    /// Wipe the stored session and forget the current result.
    ///
    /// The current result is dropped even if the stored record could not be replaced.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        let result = self.store.clear();
        self.current = None;
        self.refresh();
        result
    }

    pub fn current(&self) -> Option<&Calculation> {
        self.current.as_ref()
    }

    /// Stored calculations, newest first.
    pub fn history(&self) -> &[CalculationRecord] {
        &self.view.calculations
    }

    pub fn totals(&self) -> Totals {
        self.view.totals()
    }

    pub fn logs(&self) -> &[String] {
        &self.view.logs
    }

    /// The log as one newline-joined block, newest line first.
    pub fn log_text(&self) -> String {
        self.view.logs.join("\n")
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Snapshot of the stored session as pretty JSON.
    pub fn export(&self) -> anyhow::Result<String> {
        Ok(self.store.export_snapshot()?)
    }

    pub fn store(&self) -> &SessionStore<K> {
        &self.store
    }

    fn decline(&mut self, message: &str) {
        let _ = self.store.append_log(message);
        self.refresh();
    }
}

/// File name offered for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("triangle-calculator-data-{}.json", date.format("%Y-%m-%d"))
}

/// Parse one side length, rejecting anything that is not a finite number.
pub fn parse_side(raw: &str) -> Result<f64, CalcError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidNumber(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;

    fn calculator() -> Calculator<MemoryStore> {
        Calculator::new(SessionStore::new(MemoryStore::new()))
    }

    #[test]
    fn parse_side_accepts_numbers_with_whitespace() {
        assert_eq!(parse_side(" 3.5 "), Ok(3.5));
        assert_eq!(parse_side("-2"), Ok(-2.0));
    }

    #[test]
    fn parse_side_rejects_garbage_and_non_finite() {
        assert!(matches!(parse_side("abc"), Err(CalcError::InvalidNumber(_))));
        assert!(matches!(parse_side(""), Err(CalcError::InvalidNumber(_))));
        assert!(matches!(parse_side("NaN"), Err(CalcError::InvalidNumber(_))));
        assert!(matches!(parse_side("inf"), Err(CalcError::InvalidNumber(_))));
    }

    #[test]
    fn export_file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "triangle-calculator-data-2024-03-07.json");
    }

    #[test]
    fn invalid_number_is_logged_not_recorded() {
        let mut calc = calculator();
        let err = calc.calculate("3", "four", "5").unwrap_err();
        assert_eq!(err, CalcError::InvalidNumber("four".to_string()));
        assert!(calc.history().is_empty());
        assert_eq!(calc.logs(), [INVALID_NUMBER_MESSAGE.to_string()]);
        assert!(calc.current().is_none());
    }

    #[test]
    fn add_to_total_without_result_is_declined() {
        let mut calc = calculator();
        assert_eq!(calc.add_to_total(), Err(CalcError::NoCurrentResult));
        assert!(calc.logs().is_empty());
    }

    #[test]
    fn declined_calculation_keeps_previous_current_result() {
        let mut calc = calculator();
        calc.calculate("3", "4", "5").unwrap();
        calc.calculate("1", "1", "3").unwrap_err();
        assert_eq!(calc.current().map(|c| c.area_m2), Some(6.0));
    }

    #[test]
    fn unpersisted_result_is_still_returned() {
        let mut calc = Calculator::new(SessionStore::new(MemoryStore::with_quota(10)));
        let result = calc.calculate("3", "4", "5").unwrap();
        assert!(!result.persisted());
        assert!((result.area_m2 - 6.0).abs() < 1e-9);
        assert!(calc.history().is_empty());

        let totals = calc.add_to_total().unwrap();
        assert!((totals.area_m2 - 6.0).abs() < 1e-9);
        assert_eq!(calc.totals(), Totals::default());
    }

    #[test]
    fn overflowing_area_is_declined_and_history_kept() {
        let mut calc = calculator();
        calc.calculate("3", "4", "5").unwrap();
        calc.calculate("3", "4", "5").unwrap();

        let err = calc.calculate("1e200", "1e200", "1e200").unwrap_err();
        assert_eq!(err, CalcError::AreaOutOfRange);
        assert_eq!(calc.logs()[0], AREA_OUT_OF_RANGE_MESSAGE);

        calc.refresh();
        assert_eq!(calc.history().len(), 2);
        assert_eq!(calc.current().map(|c| c.area_m2), Some(6.0));
    }

    #[test]
    fn clear_reports_storage_failure() {
        let mut calc = Calculator::new(SessionStore::new(MemoryStore::with_quota(10)));
        calc.calculate("3", "4", "5").unwrap();
        assert!(matches!(calc.clear(), Err(StoreError::QuotaExceeded { .. })));
        assert!(calc.current().is_none());
    }

    #[test]
    fn clear_forgets_current_result() {
        let mut calc = calculator();
        calc.calculate("3", "4", "5").unwrap();
        calc.clear().unwrap();
        assert!(calc.current().is_none());
        assert_eq!(calc.add_to_total(), Err(CalcError::NoCurrentResult));
    }
}

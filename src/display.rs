// ABOUTME: Text rendering of results, totals, history, and statistics for the terminal.
// ABOUTME: Rounding happens only here; stored values keep full precision.

use std::fmt::Write;

use chrono::Local;

use crate::config::DisplayConfig;
use crate::session::{CalculationRecord, Statistics, Totals};

/// Formats areas with the configured number of decimals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    config: DisplayConfig,
}

impl Formatter {
    pub fn new(config: DisplayConfig) -> Self {
        Self { config }
    }

    pub fn format_m2(&self, value: f64) -> String {
        format!("{:.*}", self.config.area_decimals, value)
    }

    pub fn format_labnah(&self, value: f64) -> String {
        format!("{:.*}", self.config.labnah_decimals, value)
    }

    /// Two-line summary of an area in both units.
    pub fn render_area(&self, label: &str, area_m2: f64, area_labnah: f64) -> String {
        format!(
            "{label} (m²):     {}\n{label} (labnah): {}",
            self.format_m2(area_m2),
            self.format_labnah(area_labnah)
        )
    }

    pub fn render_totals(&self, totals: &Totals) -> String {
        self.render_area("Total", totals.area_m2, totals.area_labnah)
    }

    /// One block per record, newest first, at most `limit` records.
    pub fn render_history(&self, history: &[CalculationRecord], limit: Option<usize>) -> String {
        if history.is_empty() {
            return "No saved calculations".to_string();
        }

        let mut out = String::new();
        let shown = limit.unwrap_or(history.len()).min(history.len());
        for record in &history[..shown] {
            let when = record.timestamp.with_timezone(&Local);
            let _ = writeln!(out, "{}  ID: {}", when.format("%Y-%m-%d %H:%M:%S"), record.id);
            let _ = writeln!(
                out,
                "  sides: {}, {}, {}",
                record.side1, record.side2, record.hypotenuse
            );
            let _ = writeln!(
                out,
                "  area:  {} m² = {} labnah",
                self.format_m2(record.area_m2),
                self.format_labnah(record.area_labnah)
            );
        }
        if shown < history.len() {
            let _ = writeln!(out, "... {} more", history.len() - shown);
        }
        out.trim_end().to_string()
    }

    pub fn render_statistics(&self, stats: &Statistics) -> String {
        let last = stats
            .last_timestamp
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "Calculations:        {}\nSessions:            {}\nAverage area (m²):   {:.2}\nAverage area (labnah): {:.4}\nLast calculation:    {}",
            stats.count, stats.session_count, stats.average_m2, stats.average_labnah, last
        )
    }
}

// ABOUTME: Session record types — calculation history, running totals, and the capped log.
// ABOUTME: Field names match the stored JSON blob so older exports load unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One successful calculation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub side1: f64,
    pub side2: f64,
    pub hypotenuse: f64,
    pub area_m2: f64,
    pub area_labnah: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// A calculation to be recorded; the store assigns id, timestamp, and session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewCalculation {
    pub side1: f64,
    pub side2: f64,
    pub hypotenuse: f64,
    pub area_m2: f64,
    pub area_labnah: f64,
}

/// The whole persisted record. Histories and logs are newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub calculations: Vec<CalculationRecord>,
    #[serde(default)]
    pub total_area_m2: f64,
    #[serde(default)]
    pub total_area_labnah: f64,
    #[serde(default)]
    pub logs: Vec<String>,
}

impl SessionState {
    pub fn totals(&self) -> Totals {
        Totals {
            area_m2: self.total_area_m2,
            area_labnah: self.total_area_labnah,
        }
    }

    /// Name of the first number that is NaN or infinite, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        if !self.total_area_m2.is_finite() {
            return Some("totalAreaM2");
        }
        if !self.total_area_labnah.is_finite() {
            return Some("totalAreaLabnah");
        }
        self.calculations.iter().find_map(|r| {
            [
                ("side1", r.side1),
                ("side2", r.side2),
                ("hypotenuse", r.hypotenuse),
                ("area_m2", r.area_m2),
                ("area_labnah", r.area_labnah),
            ]
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(field, _)| field)
        })
    }
}

/// Running total area in both units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub area_m2: f64,
    pub area_labnah: f64,
}

/// Aggregates over the stored history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub count: usize,
    /// Distinct sessions that contributed records.
    pub session_count: usize,
    pub average_m2: f64,
    pub average_labnah: f64,
    pub last_timestamp: Option<DateTime<Utc>>,
}

/// Older blobs stored ids as numeric strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

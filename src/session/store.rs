// ABOUTME: Session store — whole-record read-modify-write over a host key-value slot.
// ABOUTME: Corrupt or missing data loads as an empty session; write failures are logged and returned.

use chrono::Utc;
use uuid::Uuid;

use super::kv::KeyValueStore;
use super::log::{self, CLEARED_MESSAGE};
use super::state::{CalculationRecord, NewCalculation, SessionState, Statistics};
use crate::error::StoreError;

/// Default name of the slot holding the session record.
pub const DEFAULT_STORAGE_KEY: &str = "triangle_calculator_data";

/// Owns the session record stored under a single key.
///
/// Every operation loads the full record, modifies it, and writes it back.
/// There is no in-memory cache: the key-value slot is the only state.
pub struct SessionStore<K: KeyValueStore> {
    kv: K,
    key: String,
    session_id: String,
}

impl<K: KeyValueStore> SessionStore<K> {
    /// Create a store using the default storage key.
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(kv: K, key: &str) -> Self {
        Self {
            kv,
            key: key.to_string(),
            session_id: new_session_id(),
        }
    }

    /// Identifier stamped on records created through this store.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying key-value store.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Read the session record. Never fails: absent, unreadable, or corrupt
    /// data all yield an empty session.
    pub fn load(&self) -> SessionState {
        let raw = match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SessionState::default(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read session data");
                return SessionState::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "session data is corrupt, starting fresh");
                SessionState::default()
            }
        }
    }

    /// Record a calculation at the front of the history and log it.
    ///
    /// The created record is returned on success. On a storage failure the
    /// stored record is left as it was.
    pub fn append_calculation(
        &mut self,
        calculation: NewCalculation,
    ) -> Result<CalculationRecord, StoreError> {
        let mut state = self.load();
        let now = Utc::now();
        let newest_id = state.calculations.first().map(|r| r.id).unwrap_or(0);
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let Some(next_id) = newest_id.checked_add(1) else {
            tracing::warn!(key = %self.key, newest_id, "calculation ids exhausted");
            return Err(StoreError::IdsExhausted { newest: newest_id });
        };

        let record = CalculationRecord {
            id: millis.max(next_id),
            timestamp: now,
            side1: calculation.side1,
            side2: calculation.side2,
            hypotenuse: calculation.hypotenuse,
            area_m2: calculation.area_m2,
            area_labnah: calculation.area_labnah,
            session_id: Some(self.session_id.clone()),
        };

        log::push_capped(&mut state.logs, log::calculation_line(&record));
        state.calculations.insert(0, record.clone());
        self.save(&state)?;
        Ok(record)
    }

    /// Overwrite the running totals and log the new total.
    pub fn set_totals(&mut self, total_m2: f64, total_labnah: f64) -> Result<(), StoreError> {
        let mut state = self.load();
        state.total_area_m2 = total_m2;
        state.total_area_labnah = total_labnah;
        log::push_capped(&mut state.logs, log::totals_line(total_m2));
        self.save(&state)
    }

    /// Prepend a free-form line to the log.
    pub fn append_log(&mut self, message: &str) -> Result<(), StoreError> {
        let mut state = self.load();
        log::push_capped(&mut state.logs, message.to_string());
        self.save(&state)
    }

    /// Discard everything and start a fresh record holding only the reset notice.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        let mut state = SessionState::default();
        state.logs.push(CLEARED_MESSAGE.to_string());
        tracing::info!(key = %self.key, "clearing session data");
        self.save(&state)
    }

    /// The current record as pretty-printed JSON, for download or archival.
    pub fn export_snapshot(&self) -> Result<String, StoreError> {
        let state = self.load();
        Ok(serde_json::to_string_pretty(&state)?)
    }

    pub fn compute_statistics(&self) -> Statistics {
        statistics_for(&self.load())
    }

    fn save(&mut self, state: &SessionState) -> Result<(), StoreError> {
        // JSON writes NaN and infinity as null, which would make the blob unreadable.
        let result = match state.first_non_finite() {
            Some(field) => Err(StoreError::NonFinite { field }),
            None => serde_json::to_string(state).map_err(StoreError::from),
        }
        .and_then(|content| self.kv.set(&self.key, &content));
        match &result {
            Ok(()) => tracing::debug!(
                key = %self.key,
                calculations = state.calculations.len(),
                logs = state.logs.len(),
                "saved session data"
            ),
            Err(e) => tracing::warn!(key = %self.key, error = %e, "failed to save session data"),
        }
        result
    }
}

/// Aggregate statistics over a session record's history.
pub fn statistics_for(state: &SessionState) -> Statistics {
    let history = &state.calculations;
    if history.is_empty() {
        return Statistics::default();
    }

    let count = history.len();
    let sum_m2: f64 = history.iter().map(|r| r.area_m2).sum();
    let sum_labnah: f64 = history.iter().map(|r| r.area_labnah).sum();

    let mut sessions: Vec<Option<&str>> = history.iter().map(|r| r.session_id.as_deref()).collect();
    sessions.sort_unstable();
    sessions.dedup();

    Statistics {
        count,
        session_count: sessions.len(),
        average_m2: sum_m2 / count as f64,
        average_labnah: sum_labnah / count as f64,
        last_timestamp: history.first().map(|r| r.timestamp),
    }
}

fn new_session_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("session-{}-{}", Utc::now().timestamp_millis(), &suffix[..9])
}

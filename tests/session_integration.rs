// ABOUTME: Integration tests for the session store on the file backend.
// ABOUTME: Covers self-healing loads, the log cap, and write failures that must not corrupt data.

use triarea::error::StoreError;
use triarea::session::log::LOG_CAPACITY;
use triarea::session::{
    DEFAULT_STORAGE_KEY, FileStore, KeyValueStore, NewCalculation, SessionState, SessionStore,
};

fn right_triangle() -> NewCalculation {
    NewCalculation {
        side1: 3.0,
        side2: 4.0,
        hypotenuse: 5.0,
        area_m2: 6.0,
        area_labnah: 6.0 / 44.4444,
    }
}

/// A corrupt file loads as an empty session and is replaced by the next write.
#[test]
fn corrupt_file_self_heals() {
    let tmp = tempfile::tempdir().unwrap();
    let kv = FileStore::new(tmp.path());
    std::fs::write(kv.path_for(DEFAULT_STORAGE_KEY), "{\"calculations\": [oops").unwrap();

    let mut store = SessionStore::new(kv);
    assert_eq!(store.load(), SessionState::default());

    store.append_calculation(right_triangle()).unwrap();
    let state = store.load();
    assert_eq!(state.calculations.len(), 1);

    let raw = std::fs::read_to_string(store.kv().path_for(DEFAULT_STORAGE_KEY)).unwrap();
    assert!(serde_json::from_str::<SessionState>(&raw).is_ok());
}

#[test]
fn custom_key_uses_its_own_file() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = SessionStore::with_key(FileStore::new(tmp.path()), "plots");
    store.append_log("hello").unwrap();

    assert!(tmp.path().join("plots.json").exists());
    assert!(!tmp.path().join("triangle_calculator_data.json").exists());
    assert_eq!(store.key(), "plots");
}

#[test]
fn append_keeps_newest_first() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = SessionStore::new(FileStore::new(tmp.path()));
    for _ in 0..5 {
        let before = store.load().calculations.len();
        let record = store.append_calculation(right_triangle()).unwrap();
        let state = store.load();
        assert_eq!(state.calculations.len(), before + 1);
        assert_eq!(state.calculations[0], record);
    }

    let ids: Vec<u64> = store.load().calculations.iter().map(|r| r.id).collect();
    for pair in ids.windows(2) {
        assert!(pair[0] > pair[1], "history should be newest first: {:?}", ids);
    }
}

/// Every calculation has exactly one matching log line while under the cap.
#[test]
fn each_record_has_one_log_line() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = SessionStore::new(FileStore::new(tmp.path()));
    for _ in 0..3 {
        store.append_calculation(right_triangle()).unwrap();
    }
    let state = store.load();
    let calc_lines = state
        .logs
        .iter()
        .filter(|l| l.starts_with("New calculation"))
        .count();
    assert_eq!(calc_lines, state.calculations.len());
}

#[test]
fn log_cap_holds_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = SessionStore::new(FileStore::new(tmp.path()));
    for i in 0..(LOG_CAPACITY + 5) {
        store.append_log(&format!("line {}", i)).unwrap();
    }

    let state = store.load();
    assert_eq!(state.logs.len(), LOG_CAPACITY);
    assert_eq!(state.logs[0], format!("line {}", LOG_CAPACITY + 4));
    assert_eq!(state.logs[LOG_CAPACITY - 1], "line 5");
}

/// A directory standing where the data file should be makes every write fail.
#[test]
fn unwritable_store_reports_errors_without_panicking() {
    let tmp = tempfile::tempdir().unwrap();
    let kv = FileStore::new(tmp.path());
    std::fs::create_dir_all(kv.path_for(DEFAULT_STORAGE_KEY)).unwrap();

    let mut store = SessionStore::new(kv);
    assert_eq!(store.load(), SessionState::default());
    assert!(matches!(
        store.append_calculation(right_triangle()),
        Err(StoreError::Io(_))
    ));
    assert!(store.set_totals(6.0, 0.135).is_err());
    assert!(store.append_log("x").is_err());
    assert!(store.clear().is_err());
    assert_eq!(store.compute_statistics().count, 0);
}

#[test]
fn file_store_is_a_key_value_store() {
    let tmp = tempfile::tempdir().unwrap();
    let mut kv = FileStore::new(tmp.path().join("kv"));
    assert!(kv.get("a").unwrap().is_none());
    kv.set("a", "1").unwrap();
    assert_eq!(kv.get("a").unwrap().as_deref(), Some("1"));
    assert_eq!(kv.dir(), tmp.path().join("kv"));
}

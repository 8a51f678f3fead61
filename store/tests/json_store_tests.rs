use std::fs;

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use market::{MarketRow, MarketSnapshot, analyze};
use store::sheets::{ANALYSIS, LIVE_DATA};
use store::{JsonSnapshotStore, SnapshotStore, StoreError};

fn row(name: &str, symbol: &str, price: f64, cap: f64, volume: f64, change: f64) -> MarketRow {
    MarketRow {
        name: name.into(),
        symbol: symbol.into(),
        price_usd: price,
        market_cap_usd: cap,
        volume_24h_usd: volume,
        change_24h_pct: change,
    }
}

fn sample_snapshot() -> MarketSnapshot {
    MarketSnapshot::new(
        vec![
            row("Bitcoin", "BTC", 65_432.1, 1.29e12, 3.1e10, 1.234_567),
            row("Ethereum", "ETH", 3_101.37, 3.72e11, 1.5e10, -2.5),
            row("Tether", "USDT", 0.999_8, 1.1e11, 5.0e10, 0.0),
            row("BNB", "BNB", 580.12, 8.5e10, 1.2e9, 3.3),
            row("Solana", "SOL", 148.9, 6.9e10, 2.2e9, 6.75),
            row("USDC", "USDC", 1.0, 3.4e10, 6.0e9, -0.01),
        ],
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 5).unwrap(),
    )
    .unwrap()
}

fn read_json(store: &JsonSnapshotStore) -> Value {
    serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap()
}

#[test]
fn save_then_load_returns_equal_snapshot_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path().join("crypto_live_data.json"));

    let snapshot = sample_snapshot();
    let summary = analyze(&snapshot);

    store.save(&snapshot, &summary).unwrap();
    let (loaded_snapshot, loaded_summary) = store.load().unwrap();

    assert_eq!(loaded_snapshot, snapshot);
    assert_eq!(loaded_summary, summary);
}

#[test]
fn file_has_two_named_sections_with_expected_columns() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path().join("data.json"));
    let snapshot = sample_snapshot();

    store.save(&snapshot, &analyze(&snapshot)).unwrap();
    let doc = read_json(&store);

    let live = doc[LIVE_DATA].as_array().unwrap();
    assert_eq!(live.len(), 6);
    let first = live[0].as_object().unwrap();
    for column in [
        "Name",
        "Symbol",
        "Price (USD)",
        "Market Cap (USD)",
        "24h Volume (USD)",
        "24h Change (%)",
    ] {
        assert!(first.contains_key(column), "missing column {column}");
    }

    let analysis = doc[ANALYSIS].as_array().unwrap();
    assert_eq!(analysis.len(), 5);
    assert_eq!(analysis[0], json!({"Metric": "Last Updated", "Value": "2026-10-16 12:00:05"}));
    assert_eq!(
        analysis[1]["Value"],
        "Bitcoin, Ethereum, Tether, BNB, Solana"
    );
    assert_eq!(analysis[3]["Value"], "Solana (6.75%)");
    assert_eq!(analysis[4]["Value"], "Ethereum (-2.50%)");
}

#[test]
fn save_fully_replaces_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path().join("data.json"));

    let first = sample_snapshot();
    store.save(&first, &analyze(&first)).unwrap();

    let second = MarketSnapshot::new(
        vec![row("Bitcoin", "BTC", 70_000.0, 1.4e12, 2.0e10, 4.0)],
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 5, 5).unwrap(),
    )
    .unwrap();
    store.save(&second, &analyze(&second)).unwrap();

    let (loaded, summary) = store.load().unwrap();
    assert_eq!(loaded, second);
    assert_eq!(summary.top5, ["Bitcoin"]);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn load_without_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path().join("absent.json"));

    assert!(matches!(store.load(), Err(StoreError::NotFound(_))));
}

#[test]
fn load_with_missing_section_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path().join("data.json"));
    let snapshot = sample_snapshot();
    store.save(&snapshot, &analyze(&snapshot)).unwrap();

    let mut doc = read_json(&store);
    doc.as_object_mut().unwrap().remove(ANALYSIS);
    fs::write(store.path(), serde_json::to_vec(&doc).unwrap()).unwrap();

    assert!(matches!(
        store.load(),
        Err(StoreError::MissingSection(ANALYSIS))
    ));
}

#[test]
fn load_with_malformed_rows_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path().join("data.json"));
    fs::write(
        store.path(),
        serde_json::to_vec(&json!({
            "Live Data": [{"Name": "Bitcoin", "Symbol": "BTC"}],
            "Analysis": []
        }))
        .unwrap(),
    )
    .unwrap();

    assert!(matches!(
        store.load(),
        Err(StoreError::MalformedSection { section: LIVE_DATA, .. })
    ));
}

#[test]
fn load_with_empty_live_data_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path().join("data.json"));
    fs::write(
        store.path(),
        serde_json::to_vec(&json!({
            "Live Data": [],
            "Analysis": [{"Metric": "Last Updated", "Value": "2026-10-16 12:00:05"}]
        }))
        .unwrap(),
    )
    .unwrap();

    assert!(matches!(
        store.load(),
        Err(StoreError::MalformedSection { section: LIVE_DATA, .. })
    ));
}

#[test]
fn load_rejects_analysis_that_disagrees_with_rows() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path().join("data.json"));
    let snapshot = sample_snapshot();
    store.save(&snapshot, &analyze(&snapshot)).unwrap();

    let mut doc = read_json(&store);
    doc[ANALYSIS][1]["Value"] = json!("Dogecoin");
    fs::write(store.path(), serde_json::to_vec(&doc).unwrap()).unwrap();

    assert!(matches!(
        store.load(),
        Err(StoreError::MalformedSection { section: ANALYSIS, .. })
    ));
}

#[test]
fn load_rejects_rows_the_pipeline_cannot_produce() {
    let edits = [
        ("Symbol", json!("btc")),
        ("Market Cap (USD)", json!(-1.0)),
        ("24h Volume (USD)", json!(-5.0)),
    ];

    for (column, value) in edits {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("data.json"));
        let snapshot = sample_snapshot();
        store.save(&snapshot, &analyze(&snapshot)).unwrap();

        let mut doc = read_json(&store);
        doc[LIVE_DATA][0][column] = value;
        fs::write(store.path(), serde_json::to_vec(&doc).unwrap()).unwrap();

        let err = store.load().unwrap_err();
        assert!(
            matches!(err, StoreError::MalformedSection { section, .. } if section == LIVE_DATA),
            "{column}: {err:?}"
        );
    }
}

#[test]
fn garbage_file_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path().join("data.json"));
    fs::write(store.path(), b"PK\x03\x04 not json").unwrap();

    assert!(matches!(store.load(), Err(StoreError::Json(_))));
}

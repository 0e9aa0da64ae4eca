/// End-to-end tests for the full pipeline: export on disk → ingestion →
/// month index → view resolution.
mod common;

use std::collections::HashMap;

use chrono::NaiveDate;
use common::{ArchiveDirBuilder, TootJsonBuilder, march_april_archive};
use masto_archive_viewer::ingest::{RefreshPolicy, load_or_refresh};
use masto_archive_viewer::month_index::MonthIndex;
use masto_archive_viewer::view::{self, ViewState};

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn month(year: i32, m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, m, 1).unwrap()
}

#[test]
fn test_e2e_month_buckets_and_date_view() {
    let archive = march_april_archive().build();
    let report = load_or_refresh(
        &archive.path().join("outbox.json"),
        &archive.path().join(".snapshot-cache"),
        &RefreshPolicy::default(),
    )
    .unwrap();

    let index = MonthIndex::build(report.snapshot.records.values()).unwrap();
    assert_eq!(index.bucket(month(2021, 3)).unwrap().len(), 2);
    assert_eq!(index.bucket(month(2021, 4)).unwrap().len(), 1);

    let view = view::resolve(&params(&[("date", "2021-03-01")]), &report.snapshot, &index);
    assert_eq!(view.state, ViewState::DateView(month(2021, 3)));

    // The two March records, most recent first
    assert_eq!(view.records.len(), 2);
    assert!(view.records[0].content.contains("mid-march"));
    assert!(view.records[1].content.contains("early cat"));
}

#[test]
fn test_e2e_search_view_over_ingested_archive() {
    let archive = march_april_archive().build();
    let report = load_or_refresh(
        &archive.path().join("outbox.json"),
        &archive.path().join(".snapshot-cache"),
        &RefreshPolicy::default(),
    )
    .unwrap();
    let index = MonthIndex::build(report.snapshot.records.values()).unwrap();

    let view = view::resolve(
        &params(&[("search", "cat"), ("date", "2021-03-01")]),
        &report.snapshot,
        &index,
    );

    // Search takes precedence over the date parameter
    assert_eq!(view.state, ViewState::SearchView("cat".to_string()));
    assert_eq!(view.records.len(), 2);

    // The secondary histogram is derived from the result subset only
    let months = view.months.expect("histogram for matching search");
    assert_eq!(months.record_count(), 2);
    assert_eq!(months.bucket(month(2021, 3)).unwrap().len(), 1);
}

#[test]
fn test_e2e_search_reaches_cw_poll_and_alt_text() {
    let archive = ArchiveDirBuilder::new()
        .with_toots([
            TootJsonBuilder::new("1")
                .published("2021-01-01T00:00:00Z")
                .content("<p>no keyword here</p>")
                .sensitive("dinosaur facts"),
            TootJsonBuilder::new("2")
                .published("2021-02-01T00:00:00Z")
                .content("<p>vote now</p>")
                .single_choice_poll(&[("triceratops", 3), ("stegosaurus", 4)]),
            TootJsonBuilder::new("3")
                .published("2021-03-01T00:00:00Z")
                .content("<p>look</p>")
                .attachment("/media/1.png", "image/png", Some("a tiny dinosaur model")),
        ])
        .build();

    let report = load_or_refresh(
        &archive.path().join("outbox.json"),
        &archive.path().join(".snapshot-cache"),
        &RefreshPolicy::default(),
    )
    .unwrap();
    let index = MonthIndex::build(report.snapshot.records.values()).unwrap();

    let view = view::resolve(&params(&[("search", "dinosaur")]), &report.snapshot, &index);
    assert_eq!(view.records.len(), 2, "summary and alt text both match");

    let view = view::resolve(&params(&[("search", "stegosaurus")]), &report.snapshot, &index);
    assert_eq!(view.records.len(), 1, "poll option label matches");
}

#[test]
fn test_e2e_default_view_is_latest_month() {
    let archive = march_april_archive().build();
    let report = load_or_refresh(
        &archive.path().join("outbox.json"),
        &archive.path().join(".snapshot-cache"),
        &RefreshPolicy::default(),
    )
    .unwrap();
    let index = MonthIndex::build(report.snapshot.records.values()).unwrap();

    let view = view::resolve(&params(&[]), &report.snapshot, &index);
    assert_eq!(view.state, ViewState::DefaultView(month(2021, 4)));
    assert_eq!(view.records.len(), 1);
}

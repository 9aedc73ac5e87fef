use indexmap::IndexSet;
use linkdash_rs::core::{DataStore, IngestOptions, Metric, RawRow, build_series_index};
use linkdash_rs::error::DashError;

fn row(state: &str, date: &str, starting: &str) -> RawRow {
    RawRow::from_pairs([
        ("State", state),
        ("Date", date),
        ("Starting Colonies", starting),
    ])
}

fn sample_store() -> DataStore {
    DataStore::load(
        vec![
            row("United States", "2020-01-01", "100"),
            row("United States", "2020-02-01", "110"),
            row("California", "2020-02-01", "7"),
            row("California", "2020-01-01", "5"),
            row("Texas", "2020-01-15", "3"),
            RawRow::from_pairs([("State", "Nevada"), ("Date", "2020-01-01"), ("Diseases", "2")]),
        ],
        &IngestOptions::default(),
    )
    .expect("load")
}

fn selection(entities: &[&str]) -> IndexSet<String> {
    entities.iter().map(|entity| (*entity).to_owned()).collect()
}

#[test]
fn non_empty_selection_yields_one_series_per_entity_in_selection_order() {
    let store = sample_store();
    let index = build_series_index(
        &store,
        &selection(&["Texas", "California"]),
        Metric::StartingColonies,
        "United States",
    )
    .expect("index");

    assert_eq!(index.len(), 2);
    let order: Vec<&String> = index.keys().collect();
    assert_eq!(order, ["Texas", "California"]);
}

#[test]
fn series_points_are_sorted_strictly_ascending_by_date() {
    let store = sample_store();
    let index = build_series_index(
        &store,
        &selection(&["California"]),
        Metric::StartingColonies,
        "United States",
    )
    .expect("index");

    let series = &index["California"];
    for pair in series.points.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
    assert_eq!(series.points[0].value, 5.0);
    assert_eq!(series.points[1].value, 7.0);
}

#[test]
fn empty_selection_yields_exactly_the_population_series() {
    let store = sample_store();
    let index = build_series_index(
        &store,
        &IndexSet::new(),
        Metric::StartingColonies,
        "United States",
    )
    .expect("index");

    assert_eq!(index.len(), 1);
    assert_eq!(index.keys().next().map(String::as_str), Some("United States"));
    assert_eq!(index["United States"].points.len(), 2);
}

#[test]
fn entity_without_metric_data_is_an_error_not_an_omission() {
    let store = sample_store();
    // Nevada only has Diseases data, so StartingColonies yields no points.
    let err = build_series_index(
        &store,
        &selection(&["California", "Nevada"]),
        Metric::StartingColonies,
        "United States",
    )
    .unwrap_err();

    assert!(matches!(err, DashError::EmptySeries { entity } if entity == "Nevada"));
}

#[test]
fn absent_metric_cells_become_gaps_not_zeros() {
    let store = DataStore::load(
        vec![
            row("California", "2020-01-01", "5"),
            RawRow::from_pairs([("State", "California"), ("Date", "2020-02-01"), ("Diseases", "1")]),
            row("California", "2020-03-01", "9"),
        ],
        &IngestOptions::default(),
    )
    .expect("load");

    let index = build_series_index(
        &store,
        &selection(&["California"]),
        Metric::StartingColonies,
        "United States",
    )
    .expect("index");

    let dates: Vec<String> = index["California"]
        .points
        .iter()
        .map(|point| point.date.to_string())
        .collect();
    assert_eq!(dates, vec!["2020-01-01", "2020-03-01"]);
}

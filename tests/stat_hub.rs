use std::fs;
use std::path::PathBuf;

use draft_hub::dataset::{Dataset, StatCategory};
use draft_hub::stat_hub::{
    RadarComparison, StatHub, comparison_candidates, radar_comparison, sort_by_category,
    stat_hub_rows,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_dataset() -> Dataset {
    Dataset::from_json(&read_fixture("small_board.json")).expect("fixture should parse")
}

#[test]
fn rows_skip_players_without_bio_or_logs() {
    let dataset = fixture_dataset();
    let rows = stat_hub_rows(&dataset);
    let ids: Vec<u32> = rows.iter().map(|r| r.player_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 5]);
    assert_eq!(dataset.orphan_ids(), vec![99]);
}

#[test]
fn percentiles_exclude_orphans_and_absent_values() {
    let dataset = fixture_dataset();
    let rows = stat_hub_rows(&dataset);
    let by_id = |id: u32| rows.iter().find(|r| r.player_id == id).unwrap();

    // Points cohort is [30, 30, 20, 10]; the orphan's 50 is not in it.
    assert_eq!(by_id(1).percentile(StatCategory::Points), Some(50));
    assert_eq!(by_id(2).percentile(StatCategory::Points), Some(50));
    assert_eq!(by_id(3).percentile(StatCategory::Points), Some(25));
    assert_eq!(by_id(5).percentile(StatCategory::Points), Some(0));

    // FG% cohort is [45, 50, 60]; player 5 has no FG% at all.
    assert_eq!(by_id(1).percentile(StatCategory::FieldGoalPct), Some(0));
    assert_eq!(by_id(2).percentile(StatCategory::FieldGoalPct), Some(33));
    assert_eq!(by_id(3).percentile(StatCategory::FieldGoalPct), Some(67));
    assert_eq!(by_id(5).percentile(StatCategory::FieldGoalPct), None);
}

#[test]
fn category_sort_is_descending_with_absent_last() {
    let dataset = fixture_dataset();
    let rows = stat_hub_rows(&dataset);

    let by_points: Vec<u32> = sort_by_category(&rows, StatCategory::Points)
        .iter()
        .map(|r| r.player_id)
        .collect();
    assert_eq!(by_points, vec![1, 2, 3, 5]);

    let by_ft: Vec<u32> = sort_by_category(&rows, StatCategory::FreeThrowPct)
        .iter()
        .map(|r| r.player_id)
        .collect();
    assert_eq!(by_ft, vec![1, 2, 3, 5]);

    let by_assists: Vec<u32> = sort_by_category(&rows, StatCategory::Assists)
        .iter()
        .map(|r| r.player_id)
        .collect();
    assert_eq!(by_assists, vec![5, 1, 2, 3]);
}

#[test]
fn radar_holds_one_or_two_series() {
    let dataset = fixture_dataset();
    let hub = StatHub::build(&dataset);

    let solo = radar_comparison(&hub.rows, 1, None).unwrap();
    assert_eq!(solo.labels, ["PPG", "RPG", "APG", "FG%", "3P%", "FT%"]);
    assert_eq!(solo.series.len(), 1);
    assert_eq!(solo.series[0].name, "John Smith");

    let pair = radar_comparison(&hub.rows, 1, Some(3)).unwrap();
    assert_eq!(pair.series.len(), 2);
    assert_eq!(pair.series[1].player_id, 3);
    assert!(
        pair.series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .all(|v| *v <= RadarComparison::MAX)
    );
}

#[test]
fn radar_ignores_self_or_unknown_comparison() {
    let dataset = fixture_dataset();
    let hub = StatHub::build(&dataset);
    assert_eq!(radar_comparison(&hub.rows, 1, Some(1)).unwrap().series.len(), 1);
    assert_eq!(radar_comparison(&hub.rows, 1, Some(77)).unwrap().series.len(), 1);
    // No logs, so nothing to plot.
    assert!(radar_comparison(&hub.rows, 4, None).is_none());
}

#[test]
fn comparison_candidates_exclude_selected() {
    let dataset = fixture_dataset();
    let hub = StatHub::build(&dataset);
    let ids: Vec<u32> = comparison_candidates(&hub.rows, 2)
        .iter()
        .map(|r| r.player_id)
        .collect();
    assert_eq!(ids, vec![1, 3, 5]);
}

#[test]
fn bundled_dataset_builds_a_hub() {
    let dataset = Dataset::bundled().expect("bundled dataset should parse");
    assert!(!dataset.bio.is_empty());
    let hub = StatHub::build(dataset);
    assert!(!hub.rows.is_empty());
    for row in &hub.rows {
        assert!(dataset.player(row.player_id).is_some());
    }
}

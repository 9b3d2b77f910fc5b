use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregatedStat, aggregate_game_logs};
use crate::board::cmp_rank_absent_last;
use crate::dataset::{Dataset, StatCategory};
use crate::percentile::{SortedCohort, eligible_values};
use crate::rankings::MedalTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatHubRow {
    pub player_id: u32,
    pub name: String,
    pub photo_url: Option<String>,
    pub stats: AggregatedStat,
    pub percentiles: [Option<u8>; 6],
}

impl StatHubRow {
    pub fn value(&self, cat: StatCategory) -> Option<f64> {
        self.stats.get(cat)
    }

    pub fn percentile(&self, cat: StatCategory) -> Option<u8> {
        self.percentiles[cat.index()]
    }
}

/// Aggregated rows for every player with both a bio and game logs.
///
/// Logs whose player has no bio are left out before percentiles are computed,
/// so they never enter a cohort.
pub fn stat_hub_rows(dataset: &Dataset) -> Vec<StatHubRow> {
    let stats: Vec<AggregatedStat> = aggregate_game_logs(&dataset.game_logs)
        .into_iter()
        .filter(|s| dataset.player(s.player_id).is_some())
        .collect();

    let cohorts: Vec<SortedCohort> = StatCategory::ALL
        .iter()
        .map(|cat| SortedCohort::new(eligible_values(stats.iter().map(|s| s.get(*cat)))))
        .collect();

    stats
        .into_iter()
        .filter_map(|stat| {
            let bio = dataset.player(stat.player_id)?;
            let mut percentiles = [None; 6];
            for cat in StatCategory::ALL {
                percentiles[cat.index()] = stat
                    .get(cat)
                    .and_then(|v| cohorts[cat.index()].percentile(v));
            }
            Some(StatHubRow {
                player_id: stat.player_id,
                name: bio.name.clone(),
                photo_url: bio.photo_url.clone(),
                stats: stat,
                percentiles,
            })
        })
        .collect()
}

/// Derived tables shared by the board and the stat hub.
#[derive(Debug, Clone, Default)]
pub struct StatHub {
    pub rows: Vec<StatHubRow>,
    pub medals: MedalTable,
}

impl StatHub {
    pub fn build(dataset: &Dataset) -> Self {
        let rows = stat_hub_rows(dataset);
        let stats: Vec<AggregatedStat> = rows.iter().map(|r| r.stats.clone()).collect();
        let medals = MedalTable::build(&stats);
        Self { rows, medals }
    }

    pub fn row(&self, player_id: u32) -> Option<&StatHubRow> {
        self.rows.iter().find(|r| r.player_id == player_id)
    }
}

/// Descending by category; rows without the category go last in their original order.
pub fn sort_by_category(rows: &[StatHubRow], cat: StatCategory) -> Vec<&StatHubRow> {
    let mut out: Vec<&StatHubRow> = rows.iter().collect();
    out.sort_by(|a, b| match (a.value(cat), b.value(cat)) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (x, y) => cmp_rank_absent_last(x, y),
    });
    out
}

pub fn comparison_candidates(rows: &[StatHubRow], selected: u32) -> Vec<&StatHubRow> {
    rows.iter().filter(|r| r.player_id != selected).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSeries {
    pub player_id: u32,
    pub name: String,
    pub values: [Option<u8>; 6],
}

/// Percentile series for radar plotting on a fixed 0..=100 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarComparison {
    pub labels: [&'static str; 6],
    pub series: Vec<RadarSeries>,
}

impl RadarComparison {
    pub const MAX: u8 = 100;
}

fn radar_series(row: &StatHubRow) -> RadarSeries {
    RadarSeries {
        player_id: row.player_id,
        name: row.name.clone(),
        values: row.percentiles,
    }
}

pub fn radar_comparison(
    rows: &[StatHubRow],
    selected: u32,
    compare: Option<u32>,
) -> Option<RadarComparison> {
    let primary = rows.iter().find(|r| r.player_id == selected)?;
    let mut series = vec![radar_series(primary)];
    if let Some(other) = compare
        .filter(|id| *id != selected)
        .and_then(|id| rows.iter().find(|r| r.player_id == id))
    {
        series.push(radar_series(other));
    }
    Some(RadarComparison {
        labels: StatCategory::ALL.map(StatCategory::label),
        series,
    })
}

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, PlayerBio, ScoutService};
use crate::rankings::{MedalAward, MedalTable, ScoutChip, average_rank, scout_chips};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Scout(ScoutService),
    AverageRank,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Scout(ScoutService::Espn)
    }
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Scout(ScoutService::Espn),
        SortKey::Scout(ScoutService::Vecenie),
        SortKey::Scout(ScoutService::OConnor),
        SortKey::Scout(ScoutService::Boone),
        SortKey::Scout(ScoutService::Parrish),
        SortKey::AverageRank,
    ];

    pub fn next(self) -> Self {
        let idx = SortKey::ALL.iter().position(|k| *k == self).unwrap_or(0);
        SortKey::ALL[(idx + 1) % SortKey::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Scout(service) => service.label(),
            SortKey::AverageRank => "Average Rank",
        }
    }

    /// The rank a player sorts by; `None` sorts after every ranked player.
    pub fn value_for(self, dataset: &Dataset, player_id: u32) -> Option<f64> {
        let ranking = dataset.ranking(player_id);
        match self {
            SortKey::Scout(service) => ranking.and_then(|r| r.rank(service)),
            SortKey::AverageRank => average_rank(ranking),
        }
    }
}

/// Caller-owned big-board inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardQuery {
    pub search: String,
    pub sort: SortKey,
}

#[derive(Debug, Clone)]
pub struct BoardRow<'a> {
    pub player: &'a PlayerBio,
    pub chips: Vec<ScoutChip>,
    pub average_rank: Option<f64>,
    pub medals: Vec<MedalAward>,
}

/// Compare two optional ranks ascending with absent values last.
pub fn cmp_rank_absent_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable ascending sort by `key`; unranked players keep their relative order at the end.
pub fn sort_players<'a>(
    dataset: &Dataset,
    players: impl IntoIterator<Item = &'a PlayerBio>,
    key: SortKey,
) -> Vec<&'a PlayerBio> {
    let mut keyed: Vec<(Option<f64>, &PlayerBio)> = players
        .into_iter()
        .map(|p| (key.value_for(dataset, p.player_id), p))
        .collect();
    keyed.sort_by(|a, b| cmp_rank_absent_last(a.0, b.0));
    keyed.into_iter().map(|(_, p)| p).collect()
}

pub fn name_matches(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

pub fn filter_by_name<'a>(players: Vec<&'a PlayerBio>, query: &str) -> Vec<&'a PlayerBio> {
    players
        .into_iter()
        .filter(|p| name_matches(&p.name, query))
        .collect()
}

pub fn big_board<'a>(
    dataset: &'a Dataset,
    medals: &MedalTable,
    query: &BoardQuery,
) -> Vec<BoardRow<'a>> {
    let sorted = sort_players(dataset, &dataset.bio, query.sort);
    filter_by_name(sorted, &query.search)
        .into_iter()
        .map(|player| {
            let ranking = dataset.ranking(player.player_id);
            BoardRow {
                player,
                chips: scout_chips(ranking),
                average_rank: average_rank(ranking),
                medals: medals.medals_for(player.player_id).to_vec(),
            }
        })
        .collect()
}

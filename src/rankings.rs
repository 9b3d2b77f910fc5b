use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregatedStat, round1};
use crate::dataset::{ScoutRanking, ScoutService, StatCategory};

/// A scout more than this many spots off the consensus is flagged.
pub const DEVIATION_THRESHOLD: f64 = 5.0;

const MEDAL_SLOTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDeviation {
    Favorable,
    Unfavorable,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoutChip {
    pub service: ScoutService,
    pub rank: Option<f64>,
    pub deviation: RankDeviation,
}

impl ScoutChip {
    pub fn label(&self) -> String {
        match self.rank {
            Some(rank) => format!("{} Rank: {}", self.service.label(), rank),
            None => format!("{}: NO RANK", self.service.label()),
        }
    }
}

/// Mean of the ranks actually given, to one decimal. `None` when nobody ranked the player.
pub fn average_rank(ranking: Option<&ScoutRanking>) -> Option<f64> {
    let ranks = ranking.map(ScoutRanking::present_ranks).unwrap_or_default();
    if ranks.is_empty() {
        return None;
    }
    let sum: f64 = ranks.iter().sum();
    Some(round1(sum / ranks.len() as f64))
}

pub fn classify_deviation(rank: f64, average: f64) -> RankDeviation {
    let diff = rank - average;
    if diff <= -DEVIATION_THRESHOLD {
        RankDeviation::Favorable
    } else if diff >= DEVIATION_THRESHOLD {
        RankDeviation::Unfavorable
    } else {
        RankDeviation::Neutral
    }
}

pub fn scout_chips(ranking: Option<&ScoutRanking>) -> Vec<ScoutChip> {
    let average = average_rank(ranking);
    ScoutService::ALL
        .iter()
        .map(|service| {
            let rank = ranking.and_then(|r| r.rank(*service));
            let deviation = match (rank, average) {
                (Some(rank), Some(avg)) => classify_deviation(rank, avg),
                _ => RankDeviation::Neutral,
            };
            ScoutChip {
                service: *service,
                rank,
                deviation,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    fn from_tier(tier: usize) -> Option<Self> {
        match tier {
            0 => Some(Medal::Gold),
            1 => Some(Medal::Silver),
            2 => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Medal::Gold => "🥇",
            Medal::Silver => "🥈",
            Medal::Bronze => "🥉",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalAward {
    pub category: StatCategory,
    pub medal: Medal,
}

/// Top-three placements per category.
///
/// Players carrying a value for the category are sorted descending with a
/// stable sort, so ties keep cohort order. The first three positions are the
/// medal slots. Each slot's tier is the dense rank of its value: tied values
/// share a tier and the next distinct value takes the next one. With values
/// `[30, 30, 20, 10]` the first two take gold, the third silver, the fourth
/// nothing.
#[derive(Debug, Clone, Default)]
pub struct MedalTable {
    by_player: HashMap<u32, Vec<MedalAward>>,
}

impl MedalTable {
    pub fn build(stats: &[AggregatedStat]) -> Self {
        let mut by_player: HashMap<u32, Vec<MedalAward>> = HashMap::new();
        for category in StatCategory::ALL {
            for (player_id, medal) in medal_slots(stats, category) {
                by_player
                    .entry(player_id)
                    .or_default()
                    .push(MedalAward { category, medal });
            }
        }
        Self { by_player }
    }

    pub fn medals_for(&self, player_id: u32) -> &[MedalAward] {
        self.by_player
            .get(&player_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn medal_in(&self, player_id: u32, category: StatCategory) -> Option<Medal> {
        self.medals_for(player_id)
            .iter()
            .find(|award| award.category == category)
            .map(|award| award.medal)
    }
}

pub fn medal_slots(stats: &[AggregatedStat], category: StatCategory) -> Vec<(u32, Medal)> {
    let mut ranked: Vec<(u32, f64)> = stats
        .iter()
        .filter_map(|s| s.get(category).map(|v| (s.player_id, v)))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut out = Vec::with_capacity(MEDAL_SLOTS);
    let mut tier = 0usize;
    let mut prev: Option<f64> = None;
    for (player_id, value) in ranked.into_iter().take(MEDAL_SLOTS) {
        if let Some(p) = prev
            && value < p
        {
            tier += 1;
        }
        prev = Some(value);
        if let Some(medal) = Medal::from_tier(tier) {
            out.push((player_id, medal));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deviation_thresholds_are_inclusive() {
        assert_eq!(classify_deviation(5.0, 10.0), RankDeviation::Favorable);
        assert_eq!(classify_deviation(15.0, 10.0), RankDeviation::Unfavorable);
        assert_eq!(classify_deviation(14.9, 10.0), RankDeviation::Neutral);
    }

    #[test]
    fn chip_labels() {
        let chip = ScoutChip {
            service: ScoutService::Espn,
            rank: Some(4.0),
            deviation: RankDeviation::Neutral,
        };
        assert_eq!(chip.label(), "ESPN Rank: 4");
        let missing = ScoutChip {
            service: ScoutService::OConnor,
            rank: None,
            deviation: RankDeviation::Neutral,
        };
        assert_eq!(missing.label(), "O'Connor: NO RANK");
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dataset::{GameLog, StatCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedStat {
    pub player_id: u32,
    pub games: usize,
    means: [Option<f64>; 6],
}

impl AggregatedStat {
    pub fn new(player_id: u32, games: usize, means: [Option<f64>; 6]) -> Self {
        Self {
            player_id,
            games,
            means,
        }
    }

    pub fn get(&self, cat: StatCategory) -> Option<f64> {
        self.means[cat.index()]
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct CategorySum {
    sum: f64,
    count: usize,
}

#[derive(Debug, Clone)]
struct PlayerAccumulator {
    player_id: u32,
    games: usize,
    sums: [CategorySum; 6],
}

impl PlayerAccumulator {
    fn new(player_id: u32) -> Self {
        Self {
            player_id,
            games: 0,
            sums: [CategorySum::default(); 6],
        }
    }

    fn add(&mut self, log: &GameLog) {
        self.games += 1;
        for cat in StatCategory::ALL {
            // Absent values count toward neither the sum nor the divisor.
            if let Some(v) = log.value(cat) {
                let slot = &mut self.sums[cat.index()];
                slot.sum += v;
                slot.count += 1;
            }
        }
    }

    fn finish(&self) -> AggregatedStat {
        let mut means = [None; 6];
        for cat in StatCategory::ALL {
            let slot = self.sums[cat.index()];
            if slot.count > 0 {
                means[cat.index()] = Some(round1(slot.sum / slot.count as f64));
            }
        }
        AggregatedStat::new(self.player_id, self.games, means)
    }
}

/// Fold game logs into one averaged record per player that has logs.
///
/// Output order follows each player's first log row. A category missing from
/// some rows is averaged over the rows that do carry it, so categories for one
/// player can have different sample sizes; a category missing from every row
/// stays absent rather than becoming zero.
pub fn aggregate_game_logs<'a>(logs: impl IntoIterator<Item = &'a GameLog>) -> Vec<AggregatedStat> {
    let mut order: Vec<PlayerAccumulator> = Vec::new();
    let mut slots: HashMap<u32, usize> = HashMap::new();

    for log in logs {
        let idx = *slots.entry(log.player_id).or_insert_with(|| {
            order.push(PlayerAccumulator::new(log.player_id));
            order.len() - 1
        });
        order[idx].add(log);
    }

    order.iter().map(PlayerAccumulator::finish).collect()
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_matches_one_decimal_display() {
        assert_eq!(round1(12.345), 12.3);
        assert_eq!(round1(2.25), 2.3);
        assert_eq!(round1(10.0 / 3.0), 3.3);
        assert_eq!(round1(7.0), 7.0);
    }
}

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, MeasureKind, PlayerBio};
use crate::percentile::{Rgb, SortedCohort, eligible_values, percentile_gradient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalMode {
    #[default]
    Max,
    NoStep,
}

impl VerticalMode {
    pub fn toggle(self) -> Self {
        match self {
            VerticalMode::Max => VerticalMode::NoStep,
            VerticalMode::NoStep => VerticalMode::Max,
        }
    }

    pub fn kind(self) -> MeasureKind {
        match self {
            VerticalMode::Max => MeasureKind::MaxVertical,
            VerticalMode::NoStep => MeasureKind::NoStepVertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementReading {
    pub value: Option<f64>,
    pub percentile: Option<u8>,
    pub gradient: Option<Rgb>,
}

#[derive(Debug, Clone)]
pub struct PlayerProfile<'a> {
    pub bio: &'a PlayerBio,
    pub vertical_mode: VerticalMode,
    pub games_played: usize,
    pub readings: Vec<(MeasureKind, MeasurementReading)>,
}

impl PlayerProfile<'_> {
    pub fn reading(&self, kind: MeasureKind) -> Option<&MeasurementReading> {
        self.readings
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, reading)| reading)
    }
}

/// Every measurement row carrying `kind`, bio or not. Unlike the stat hub
/// cohorts, rows without a bio are kept.
pub fn measurement_cohort(dataset: &Dataset, kind: MeasureKind) -> SortedCohort {
    SortedCohort::new(eligible_values(
        dataset.measurements.iter().map(|m| m.value(kind)),
    ))
}

pub fn measurement_reading(dataset: &Dataset, player_id: u32, kind: MeasureKind) -> MeasurementReading {
    let value = dataset.measurement(player_id).and_then(|m| m.value(kind));
    let percentile = value.and_then(|v| measurement_cohort(dataset, kind).percentile(v));
    MeasurementReading {
        value,
        percentile,
        gradient: percentile.map(percentile_gradient),
    }
}

/// `None` when the id has no bio row.
pub fn player_profile(
    dataset: &Dataset,
    player_id: u32,
    vertical_mode: VerticalMode,
) -> Option<PlayerProfile<'_>> {
    let bio = dataset.player(player_id)?;
    let readings = [vertical_mode.kind(), MeasureKind::Wingspan, MeasureKind::Sprint]
        .into_iter()
        .map(|kind| (kind, measurement_reading(dataset, player_id, kind)))
        .collect();
    Some(PlayerProfile {
        bio,
        vertical_mode,
        games_played: dataset.game_logs_for(player_id).len(),
        readings,
    })
}

pub fn text_or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

pub fn number_or_na(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const BUNDLED_DATA: &str = include_str!("../assets/draft_data.json");

static BUNDLED: OnceCell<Dataset> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatCategory {
    Points,
    Rebounds,
    Assists,
    FieldGoalPct,
    ThreePointPct,
    FreeThrowPct,
}

impl StatCategory {
    pub const ALL: [StatCategory; 6] = [
        StatCategory::Points,
        StatCategory::Rebounds,
        StatCategory::Assists,
        StatCategory::FieldGoalPct,
        StatCategory::ThreePointPct,
        StatCategory::FreeThrowPct,
    ];

    pub fn index(self) -> usize {
        match self {
            StatCategory::Points => 0,
            StatCategory::Rebounds => 1,
            StatCategory::Assists => 2,
            StatCategory::FieldGoalPct => 3,
            StatCategory::ThreePointPct => 4,
            StatCategory::FreeThrowPct => 5,
        }
    }

    /// Column name in the game-log rows.
    pub fn key(self) -> &'static str {
        match self {
            StatCategory::Points => "pts",
            StatCategory::Rebounds => "reb",
            StatCategory::Assists => "ast",
            StatCategory::FieldGoalPct => "fg%",
            StatCategory::ThreePointPct => "tp%",
            StatCategory::FreeThrowPct => "ft%",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatCategory::Points => "PPG",
            StatCategory::Rebounds => "RPG",
            StatCategory::Assists => "APG",
            StatCategory::FieldGoalPct => "FG%",
            StatCategory::ThreePointPct => "3P%",
            StatCategory::FreeThrowPct => "FT%",
        }
    }

    pub fn next(self) -> Self {
        StatCategory::ALL[(self.index() + 1) % StatCategory::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoutService {
    Espn,
    Vecenie,
    OConnor,
    Boone,
    Parrish,
}

impl ScoutService {
    pub const ALL: [ScoutService; 5] = [
        ScoutService::Espn,
        ScoutService::Vecenie,
        ScoutService::OConnor,
        ScoutService::Boone,
        ScoutService::Parrish,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ScoutService::Espn => "ESPN Rank",
            ScoutService::Vecenie => "Sam Vecenie Rank",
            ScoutService::OConnor => "Kevin O'Connor Rank",
            ScoutService::Boone => "Kyle Boone Rank",
            ScoutService::Parrish => "Gary Parrish Rank",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoutService::Espn => "ESPN",
            ScoutService::Vecenie => "Vecenie",
            ScoutService::OConnor => "O'Connor",
            ScoutService::Boone => "Boone",
            ScoutService::Parrish => "Parrish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasureKind {
    Wingspan,
    MaxVertical,
    NoStepVertical,
    Sprint,
}

impl MeasureKind {
    pub fn label(self) -> &'static str {
        match self {
            MeasureKind::Wingspan => "Wingspan",
            MeasureKind::MaxVertical => "Max Vertical",
            MeasureKind::NoStepVertical => "No-Step Vertical",
            MeasureKind::Sprint => "Sprint Speed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBio {
    pub player_id: u32,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub current_team: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub league: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoutRanking {
    #[serde(rename = "playerId")]
    pub player_id: u32,
    #[serde(rename = "ESPN Rank", default, deserialize_with = "lenient_number")]
    pub espn: Option<f64>,
    #[serde(rename = "Sam Vecenie Rank", default, deserialize_with = "lenient_number")]
    pub vecenie: Option<f64>,
    #[serde(rename = "Kevin O'Connor Rank", default, deserialize_with = "lenient_number")]
    pub oconnor: Option<f64>,
    #[serde(rename = "Kyle Boone Rank", default, deserialize_with = "lenient_number")]
    pub boone: Option<f64>,
    #[serde(rename = "Gary Parrish Rank", default, deserialize_with = "lenient_number")]
    pub parrish: Option<f64>,
}

impl ScoutRanking {
    pub fn rank(&self, service: ScoutService) -> Option<f64> {
        match service {
            ScoutService::Espn => self.espn,
            ScoutService::Vecenie => self.vecenie,
            ScoutService::OConnor => self.oconnor,
            ScoutService::Boone => self.boone,
            ScoutService::Parrish => self.parrish,
        }
    }

    /// Ranks from the services that actually ranked the player.
    pub fn present_ranks(&self) -> Vec<f64> {
        ScoutService::ALL
            .iter()
            .filter_map(|s| self.rank(*s))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub player_id: u32,
    #[serde(default, deserialize_with = "lenient_number")]
    pub wingspan: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub max_vertical: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub no_step_vertical: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sprint: Option<f64>,
}

impl Measurement {
    pub fn value(&self, kind: MeasureKind) -> Option<f64> {
        match kind {
            MeasureKind::Wingspan => self.wingspan,
            MeasureKind::MaxVertical => self.max_vertical,
            MeasureKind::NoStepVertical => self.no_step_vertical,
            MeasureKind::Sprint => self.sprint,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameLog {
    #[serde(rename = "playerId")]
    pub player_id: u32,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pts: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub reb: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub ast: Option<f64>,
    #[serde(rename = "fg%", default, deserialize_with = "lenient_number")]
    pub fg_pct: Option<f64>,
    #[serde(rename = "tp%", default, deserialize_with = "lenient_number")]
    pub tp_pct: Option<f64>,
    #[serde(rename = "ft%", default, deserialize_with = "lenient_number")]
    pub ft_pct: Option<f64>,
}

impl GameLog {
    pub fn value(&self, cat: StatCategory) -> Option<f64> {
        match cat {
            StatCategory::Points => self.pts,
            StatCategory::Rebounds => self.reb,
            StatCategory::Assists => self.ast,
            StatCategory::FieldGoalPct => self.fg_pct,
            StatCategory::ThreePointPct => self.tp_pct,
            StatCategory::FreeThrowPct => self.ft_pct,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawDataset {
    #[serde(default)]
    bio: Vec<PlayerBio>,
    #[serde(default, rename = "scoutRankings")]
    scout_rankings: Vec<ScoutRanking>,
    #[serde(default)]
    measurements: Vec<Measurement>,
    #[serde(default)]
    game_logs: Vec<GameLog>,
}

/// Read-only snapshot of the four source collections, indexed by player id.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub bio: Vec<PlayerBio>,
    pub scout_rankings: Vec<ScoutRanking>,
    pub measurements: Vec<Measurement>,
    pub game_logs: Vec<GameLog>,
    bio_by_id: HashMap<u32, usize>,
    ranking_by_id: HashMap<u32, usize>,
    measurement_by_id: HashMap<u32, usize>,
    logs_by_id: HashMap<u32, Vec<usize>>,
}

impl Dataset {
    pub fn new(
        bio: Vec<PlayerBio>,
        scout_rankings: Vec<ScoutRanking>,
        measurements: Vec<Measurement>,
        game_logs: Vec<GameLog>,
    ) -> Self {
        let mut bio_by_id = HashMap::with_capacity(bio.len());
        for (idx, row) in bio.iter().enumerate() {
            bio_by_id.entry(row.player_id).or_insert(idx);
        }
        let mut ranking_by_id = HashMap::with_capacity(scout_rankings.len());
        for (idx, row) in scout_rankings.iter().enumerate() {
            ranking_by_id.entry(row.player_id).or_insert(idx);
        }
        let mut measurement_by_id = HashMap::with_capacity(measurements.len());
        for (idx, row) in measurements.iter().enumerate() {
            measurement_by_id.entry(row.player_id).or_insert(idx);
        }
        let mut logs_by_id: HashMap<u32, Vec<usize>> = HashMap::new();
        for (idx, row) in game_logs.iter().enumerate() {
            logs_by_id.entry(row.player_id).or_default().push(idx);
        }
        Self {
            bio,
            scout_rankings,
            measurements,
            game_logs,
            bio_by_id,
            ranking_by_id,
            measurement_by_id,
            logs_by_id,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: RawDataset = serde_json::from_str(raw).context("parse draft dataset json")?;
        Ok(Self::new(
            parsed.bio,
            parsed.scout_rankings,
            parsed.measurements,
            parsed.game_logs,
        ))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read draft dataset {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("load draft dataset {}", path.display()))
    }

    /// The dataset compiled into the binary, parsed on first use.
    pub fn bundled() -> Result<&'static Dataset> {
        BUNDLED.get_or_try_init(|| Self::from_json(BUNDLED_DATA).context("bundled draft dataset"))
    }

    pub fn player(&self, player_id: u32) -> Option<&PlayerBio> {
        self.bio_by_id.get(&player_id).map(|idx| &self.bio[*idx])
    }

    pub fn ranking(&self, player_id: u32) -> Option<&ScoutRanking> {
        self.ranking_by_id
            .get(&player_id)
            .map(|idx| &self.scout_rankings[*idx])
    }

    pub fn measurement(&self, player_id: u32) -> Option<&Measurement> {
        self.measurement_by_id
            .get(&player_id)
            .map(|idx| &self.measurements[*idx])
    }

    pub fn game_logs_for(&self, player_id: u32) -> Vec<&GameLog> {
        self.logs_by_id
            .get(&player_id)
            .map(|rows| rows.iter().map(|idx| &self.game_logs[*idx]).collect())
            .unwrap_or_default()
    }

    /// Ids referenced by rankings, measurements or logs with no bio row.
    pub fn orphan_ids(&self) -> Vec<u32> {
        let referenced = self
            .scout_rankings
            .iter()
            .map(|r| r.player_id)
            .chain(self.measurements.iter().map(|m| m.player_id))
            .chain(self.game_logs.iter().map(|g| g.player_id));
        referenced
            .filter(|id| !self.bio_by_id.contains_key(id))
            .collect::<BTreeSet<u32>>()
            .into_iter()
            .collect()
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let text = match value {
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    };
    Ok(text.filter(|s| !s.is_empty()))
}

//! Normalized player stats record.

use crate::error::{Result, StatlineError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Numeric fields in comparison order. Identity fields are excluded.
pub const NUMERIC_FIELDS: [&str; 14] = [
    "games_played",
    "goals",
    "assists",
    "points",
    "shots",
    "shooting_pct",
    "power_play_goals",
    "power_play_points",
    "shorthanded_goals",
    "shorthanded_points",
    "game_winning_goals",
    "ot_goals",
    "plus_minus",
    "penalty_minutes",
];

/// Current regular-season stats for one player.
///
/// Every field has a zero or empty default, so a record built from a sparse
/// upstream document is still complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    // Player info
    pub player_name: String,
    pub team: String,
    pub position: String,
    pub games_played: i64,

    // Scoring
    pub goals: i64,
    pub assists: i64,
    pub points: i64,
    pub shots: i64,
    /// Shooting percentage, one decimal (e.g. 15.3).
    pub shooting_pct: f64,

    // Special teams
    pub power_play_goals: i64,
    pub power_play_points: i64,
    pub shorthanded_goals: i64,
    pub shorthanded_points: i64,

    // Impact
    pub game_winning_goals: i64,
    pub ot_goals: i64,
    pub plus_minus: i64,

    // Discipline
    pub penalty_minutes: i64,
}

static NULL: Value = Value::Null;

/// A single numeric stat value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(i64),
    Percent(f64),
}

impl StatValue {
    /// `self - other`, keeping integer counts integral.
    pub fn minus(self, other: StatValue) -> StatValue {
        match (self, other) {
            (StatValue::Count(a), StatValue::Count(b)) => StatValue::Count(a - b),
            (a, b) => StatValue::Percent(round1(a.as_f64() - b.as_f64())),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            StatValue::Count(v) => v as f64,
            StatValue::Percent(v) => v,
        }
    }
}

impl std::fmt::Display for StatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatValue::Count(v) => write!(f, "{}", v),
            StatValue::Percent(v) => write!(f, "{:.1}", v),
        }
    }
}

impl PlayerRecord {
    /// Build a record from the stats service landing document.
    ///
    /// Only a document that is not a JSON object is rejected; a missing
    /// `featuredStats.regularSeason.subSeason` yields zeroed stats.
    pub fn from_landing(data: &Value) -> Result<Self> {
        if !data.is_object() {
            return Err(StatlineError::Schema(
                "landing document is not a JSON object".to_string(),
            ));
        }

        let season = data
            .pointer("/featuredStats/regularSeason/subSeason")
            .unwrap_or(&NULL);

        let first = str_at(data, "/firstName/default");
        let last = str_at(data, "/lastName/default");
        let player_name = format!("{} {}", first, last).trim().to_string();

        let team = data
            .get("currentTeamAbbrev")
            .and_then(Value::as_str)
            .or_else(|| season.get("teamAbbrev").and_then(Value::as_str))
            .unwrap_or_default()
            .to_string();

        let shooting = season
            .get("shootingPctg")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        Ok(Self {
            player_name,
            team,
            position: str_at(data, "/position").to_string(),
            games_played: int(season, "gamesPlayed"),
            goals: int(season, "goals"),
            assists: int(season, "assists"),
            points: int(season, "points"),
            shots: int(season, "shots"),
            shooting_pct: round1(shooting * 100.0),
            power_play_goals: int(season, "powerPlayGoals"),
            power_play_points: int(season, "powerPlayPoints"),
            shorthanded_goals: int(season, "shorthandedGoals"),
            shorthanded_points: int(season, "shorthandedPoints"),
            game_winning_goals: int(season, "gameWinningGoals"),
            ot_goals: int(season, "otGoals"),
            plus_minus: int(season, "plusMinus"),
            penalty_minutes: int(season, "pim"),
        })
    }

    /// Look up a numeric field by its snake_case name.
    pub fn stat(&self, field: &str) -> Option<StatValue> {
        let value = match field {
            "games_played" => self.games_played,
            "goals" => self.goals,
            "assists" => self.assists,
            "points" => self.points,
            "shots" => self.shots,
            "shooting_pct" => return Some(StatValue::Percent(self.shooting_pct)),
            "power_play_goals" => self.power_play_goals,
            "power_play_points" => self.power_play_points,
            "shorthanded_goals" => self.shorthanded_goals,
            "shorthanded_points" => self.shorthanded_points,
            "game_winning_goals" => self.game_winning_goals,
            "ot_goals" => self.ot_goals,
            "plus_minus" => self.plus_minus,
            "penalty_minutes" => self.penalty_minutes,
            _ => return None,
        };
        Some(StatValue::Count(value))
    }
}

fn str_at<'a>(data: &'a Value, pointer: &str) -> &'a str {
    data.pointer(pointer).and_then(Value::as_str).unwrap_or_default()
}

// Upstream occasionally sends counts as floats.
fn int(season: &Value, key: &str) -> i64 {
    match season.get(key) {
        Some(v) => v
            .as_i64()
            .or_else(|| v.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        None => 0,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

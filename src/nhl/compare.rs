//! Side-by-side comparison of two player records.

use super::{PlayerRecord, StatValue, NUMERIC_FIELDS};
use serde::{Deserialize, Serialize};

/// Leader tag used when both players have the same value.
pub const TIED: &str = "tied";

/// Comparison of one numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldComparison {
    pub field: String,
    pub value_a: StatValue,
    pub value_b: StatValue,
    /// `value_a - value_b`.
    pub difference: StatValue,
    /// Name of the player strictly ahead, or [`TIED`].
    pub leader: String,
}

/// Per-field differential between two players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub player_a: String,
    pub player_b: String,
    pub fields: Vec<FieldComparison>,
}

impl ComparisonReport {
    /// Comparison for a single field, if present.
    pub fn field(&self, name: &str) -> Option<&FieldComparison> {
        self.fields.iter().find(|f| f.field == name)
    }
}

/// Compare every numeric field of `a` against `b`.
pub fn compare(a: &PlayerRecord, b: &PlayerRecord) -> ComparisonReport {
    let fields = NUMERIC_FIELDS
        .iter()
        .filter_map(|&field| {
            let value_a = a.stat(field)?;
            let value_b = b.stat(field)?;
            let difference = value_a.minus(value_b);

            let leader = if difference.as_f64() > 0.0 {
                a.player_name.clone()
            } else if difference.as_f64() < 0.0 {
                b.player_name.clone()
            } else {
                TIED.to_string()
            };

            Some(FieldComparison {
                field: field.to_string(),
                value_a,
                value_b,
                difference,
                leader,
            })
        })
        .collect();

    ComparisonReport {
        player_a: a.player_name.clone(),
        player_b: b.player_name.clone(),
        fields,
    }
}

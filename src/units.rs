//! Weight units. Weights are always stored in grams; pounds only exist at
//! presentation time.

use serde::Serialize;
use std::fmt;

pub const GRAMS_PER_POUND: f64 = 453.592;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Grams,
    Pounds,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Grams => f.write_str("g"),
            WeightUnit::Pounds => f.write_str("lbs"),
        }
    }
}

pub fn to_pounds(grams: f64) -> f64 {
    grams / GRAMS_PER_POUND
}

pub fn convert_weight(grams: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Grams => grams,
        WeightUnit::Pounds => to_pounds(grams),
    }
}

/// Formats a gram weight for display.
///
/// | Unit   | Example     |
/// |--------|-------------|
/// | Grams  | `12,346g`   |
/// | Pounds | `27.22 lbs` |
pub fn format_weight(grams: f64, unit: WeightUnit) -> String {
    match unit {
        WeightUnit::Grams => format!("{}g", group_thousands(grams.round() as i64)),
        WeightUnit::Pounds => format!("{:.2} lbs", to_pounds(grams)),
    }
}

/// Renders an integer with `,` thousands separators.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

//! Dynamically typed attribute values and numeric token helpers.

use std::fmt;

use crate::foundation::error::{FlameError, FlameResult};

/// An attribute value whose type is inferred from its text.
///
/// Inference order is fixed: a single float, then a whitespace separated list of floats,
/// then plain text.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AttrValue {
    /// A single number.
    Float(f64),
    /// Two or more numbers.
    Floats(Vec<f64>),
    /// Anything that is not numeric.
    Text(String),
}

impl AttrValue {
    /// Infer the value type of `raw`.
    pub fn parse(raw: &str) -> Self {
        if let Ok(v) = raw.trim().parse::<f64>() {
            return Self::Float(v);
        }
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if !tokens.is_empty() {
            let parsed: Result<Vec<f64>, _> = tokens.iter().map(|t| t.parse::<f64>()).collect();
            if let Ok(vals) = parsed {
                return Self::Floats(vals);
            }
        }
        Self::Text(raw.to_owned())
    }

    /// The value as a scalar, if it is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as a list of numbers (a scalar is a one-element list).
    pub fn to_floats(&self) -> Option<Vec<f64>> {
        match self {
            Self::Float(v) => Some(vec![*v]),
            Self::Floats(v) => Some(v.clone()),
            Self::Text(_) => None,
        }
    }

    /// Render back to attribute text.
    pub fn render(&self) -> String {
        match self {
            Self::Float(v) => format_number(*v),
            Self::Floats(v) => format_numbers(v),
            Self::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Format a number, dropping the decimal point for integral values.
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Space-join a list of numbers with [`format_number`].
pub fn format_numbers(vals: &[f64]) -> String {
    vals.iter()
        .map(|v| format_number(*v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a mandatory numeric attribute.
pub(crate) fn parse_f64(attr: &str, raw: &str) -> FlameResult<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        FlameError::format(format!("attribute '{attr}' expects a number, got '{raw}'"))
    })
}

/// Parse a mandatory whitespace separated list of numbers.
pub(crate) fn parse_f64s(attr: &str, raw: &str) -> FlameResult<Vec<f64>> {
    raw.split_whitespace()
        .map(|t| {
            t.parse::<f64>().map_err(|_| {
                FlameError::format(format!(
                    "attribute '{attr}' expects numbers, got token '{t}'"
                ))
            })
        })
        .collect()
}

/// Parse exactly `N` numbers.
pub(crate) fn parse_f64_array<const N: usize>(attr: &str, raw: &str) -> FlameResult<[f64; N]> {
    let vals = parse_f64s(attr, raw)?;
    <[f64; N]>::try_from(vals.as_slice()).map_err(|_| {
        FlameError::format(format!(
            "attribute '{attr}' expects {N} numbers, got {}",
            vals.len()
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value.rs"]
mod tests;

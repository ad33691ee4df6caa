use std::f64::consts::TAU;
use std::fmt;

use crate::foundation::{
    coords::{frac, normalize},
    error::{FlameError, FlameResult},
};

/// Periodic waveform used by oscillator bindings.
///
/// Every shape has period 1 in its input and, for `amp >= 0`, stays within `[0, amp]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Waveform {
    /// Raised sine starting at its minimum.
    #[default]
    #[serde(rename = "sin")]
    Sine,
    /// Rising sawtooth.
    #[serde(rename = "saw_up")]
    SawUp,
    /// Falling sawtooth.
    #[serde(rename = "saw_down")]
    SawDown,
    /// Square wave, low for the first half period.
    #[serde(rename = "square")]
    Square,
    /// Symmetric triangle.
    #[serde(rename = "triangle")]
    Triangle,
}

impl Waveform {
    /// All shapes in document order.
    pub const ALL: [Self; 5] = [
        Self::Sine,
        Self::SawUp,
        Self::SawDown,
        Self::Square,
        Self::Triangle,
    ];

    /// Document token for this shape.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sine => "sin",
            Self::SawUp => "saw_up",
            Self::SawDown => "saw_down",
            Self::Square => "square",
            Self::Triangle => "triangle",
        }
    }

    /// Parse a document token.
    pub fn parse(s: &str) -> FlameResult<Self> {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| FlameError::validation(format!("unknown waveform shape '{s}'")))
    }

    /// Sample the waveform at `i` with amplitude `amp` and a phase offset in degrees.
    pub fn sample(self, i: f64, amp: f64, phase_deg: f64) -> f64 {
        let phase = normalize(phase_deg, 360.0);
        match self {
            Self::Sine => {
                0.5 * amp * (TAU * frac(i) + (phase - 90.0).to_radians()).sin() + 0.5 * amp
            }
            Self::SawUp => amp * frac(i + phase / 360.0),
            Self::SawDown => amp * (1.0 - frac(i + phase / 360.0)),
            Self::Square => {
                if frac(i + phase / 360.0) < 0.5 {
                    0.0
                } else {
                    amp
                }
            }
            Self::Triangle => {
                let x = frac(i + phase / 360.0);
                if x < 0.5 {
                    amp * 2.0 * x
                } else {
                    amp * 2.0 * (1.0 - x)
                }
            }
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/oscillator.rs"]
mod tests;

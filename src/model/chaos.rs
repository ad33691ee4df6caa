use crate::foundation::{
    error::FlameResult,
    value::{format_numbers, parse_f64s},
};

/// Per-transform weights over the sibling transforms that may follow it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChaosMatrix {
    weights: Vec<f64>,
}

impl ChaosMatrix {
    /// All-ones (inactive) matrix for `siblings` transforms.
    pub fn new(siblings: usize) -> Self {
        Self {
            weights: vec![1.0; siblings],
        }
    }

    pub fn from_weights(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    /// Parse the `chaos` attribute, padding with 1 up to the sibling count.
    pub fn parse(raw: &str, siblings: usize) -> FlameResult<Self> {
        let mut chaos = Self::from_weights(parse_f64s("chaos", raw)?);
        chaos.grow_to(siblings);
        Ok(chaos)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Mutable weight for sibling `index`.
    pub fn weight_mut(&mut self, index: usize) -> Option<&mut f64> {
        self.weights.get_mut(index)
    }

    /// Pad with 1 up to `siblings` entries.
    pub fn grow_to(&mut self, siblings: usize) {
        if self.weights.len() < siblings {
            self.weights.resize(siblings, 1.0);
        }
    }

    /// Drop the weight of a removed sibling; later entries shift down.
    pub fn remove_sibling(&mut self, index: usize) {
        if index < self.weights.len() {
            self.weights.remove(index);
        }
    }

    /// Active iff any weight differs from 1.
    pub fn is_active(&self) -> bool {
        self.weights.iter().any(|w| *w != 1.0)
    }

    /// Space-joined weights, or an empty string when inactive.
    pub fn render(&self) -> String {
        if self.is_active() {
            format_numbers(&self.weights)
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/chaos.rs"]
mod tests;

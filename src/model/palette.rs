use crate::{
    document::element::Element,
    foundation::error::{FlameError, FlameResult},
    model::color::Color,
};

/// Number of palette slots.
pub const PALETTE_SIZE: usize = 256;

/// Fixed 256-entry color table; unspecified slots are black.
///
/// Serializes as a plain list and only deserializes from exactly [`PALETTE_SIZE`] colors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![Color::BLACK; PALETTE_SIZE],
        }
    }
}

impl Palette {
    /// All-black palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Color at `index`, if it is below [`PALETTE_SIZE`].
    pub fn get(&self, index: usize) -> Option<&Color> {
        self.colors.get(index)
    }

    /// Mutable color at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Color> {
        self.colors.get_mut(index)
    }

    /// Overwrite slot `index`.
    pub fn set(&mut self, index: usize, color: Color) -> FlameResult<()> {
        let slot = self.colors.get_mut(index).ok_or_else(|| {
            FlameError::validation(format!("palette index {index} is outside 0..=255"))
        })?;
        *slot = color;
        Ok(())
    }

    /// Always [`PALETTE_SIZE`].
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colors in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }

    /// Build from `color` elements; later entries for the same index win.
    pub fn from_elements<'a>(elements: impl IntoIterator<Item = &'a Element>) -> FlameResult<Self> {
        let mut palette = Self::default();
        for el in elements {
            let (index, color) = Color::from_element(el)?;
            palette.colors[index] = color;
        }
        Ok(palette)
    }

    /// One `color` element per slot, in index order.
    pub fn to_elements(&self) -> Vec<Element> {
        self.colors
            .iter()
            .enumerate()
            .map(|(index, c)| c.to_element(index))
            .collect()
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = FlameError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        if colors.len() != PALETTE_SIZE {
            return Err(FlameError::validation(format!(
                "palette needs {PALETTE_SIZE} colors, got {}",
                colors.len()
            )));
        }
        Ok(Self { colors })
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/palette.rs"]
mod tests;

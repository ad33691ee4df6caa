use crate::{
    foundation::error::FlameResult,
    model::coefs::{AffineMap, Coefs},
};

/// Secondary affine map applied after a transform's primary map.
///
/// Carries coefficients only: no variations and no nested post.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PostTransform {
    coefs: Coefs,
}

impl PostTransform {
    pub fn new(coefs: Coefs) -> Self {
        Self { coefs }
    }

    /// The identity post-transform, which is inactive.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Active iff the coefficients differ from identity.
    pub fn is_active(&self) -> bool {
        !self.coefs.is_identity()
    }

    /// Parse the `post` attribute.
    pub fn parse(raw: &str) -> FlameResult<Self> {
        Ok(Self::new(Coefs::parse("post", raw)?))
    }

    /// Document form of the `post` attribute.
    pub fn render(&self) -> String {
        self.coefs.render()
    }
}

impl AffineMap for PostTransform {
    fn coefs(&self) -> &Coefs {
        &self.coefs
    }

    fn coefs_mut(&mut self) -> &mut Coefs {
        &mut self.coefs
    }

    fn is_post(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/post.rs"]
mod tests;

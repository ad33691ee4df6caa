//! Looping frame sequences built from oscillator snapshots.

use crate::{
    document::element::Element,
    foundation::error::{FlameError, FlameResult},
    model::{coefs::AffineMap, collection::FLAMES_TAG, flame::Flame},
};

pub const DEFAULT_LOOP_FRAMES: u32 = 30;

/// Options for [`Flame::animation_loop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoopOptions {
    /// Snapshots per full turn.
    pub frames: u32,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            frames: DEFAULT_LOOP_FRAMES,
        }
    }
}

impl Flame {
    /// A `flames` element holding one snapshot per frame of a seamless loop.
    ///
    /// Every animated transform turns a full 360 degrees over the loop while the
    /// oscillators run one period. `self` is not modified.
    #[tracing::instrument(skip(self, opts), fields(name = %self.name, frames = opts.frames))]
    pub fn animation_loop(&self, opts: &LoopOptions) -> FlameResult<Element> {
        if opts.frames == 0 {
            return Err(FlameError::validation("an animation loop needs at least one frame"));
        }
        let frames = f64::from(opts.frames);
        let step = 360.0 / frames;

        let mut work = self.clone();
        let mut root = Element::new(FLAMES_TAG);
        for k in 0..opts.frames {
            for xf in work.iter_xforms_mut().filter(|xf| xf.animate) {
                xf.rotate(step);
            }
            root.push(work.get_at(f64::from(k) / frames));
        }
        tracing::debug!(snapshots = root.children.len(), "built animation loop");
        Ok(root)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequence.rs"]
mod tests;

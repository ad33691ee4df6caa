//! flamekit reads, edits, animates and writes flame fractal parameter documents.
//!
//! The entry points are:
//!
//! - [`FlameCollection`] to load or save a document of one or more flames
//! - [`Flame`] and [`Transform`] to edit parameters through typed fields
//! - [`OscillatorBinding`] to drive transform parameters over normalized time, sampled
//!   with [`Flame::get_at`] or expanded into a loop with [`Flame::animation_loop`]
#![forbid(unsafe_code)]

pub mod animation;
pub mod catalog;
pub mod document;
pub mod foundation;
pub mod model;

pub use crate::animation::binding::{BindingTarget, OscillatorBinding, TargetAttr};
pub use crate::animation::oscillator::Waveform;
pub use crate::animation::sequence::LoopOptions;
pub use crate::catalog::variations::{VariableId, VariationId};
pub use crate::document::element::Element;
pub use crate::foundation::coords::Polar;
pub use crate::foundation::error::{FlameError, FlameResult};
pub use crate::foundation::value::AttrValue;
pub use crate::model::chaos::ChaosMatrix;
pub use crate::model::coefs::{AffineMap, Coefs, Polars};
pub use crate::model::collection::{CollectionBuilder, FlameCollection};
pub use crate::model::color::{Color, Hsv};
pub use crate::model::flame::{Flame, FlameAttr, InterpolationMode, InterpolationType, PaletteMode};
pub use crate::model::palette::Palette;
pub use crate::model::post::PostTransform;
pub use crate::model::transform::{Transform, XformSlot};

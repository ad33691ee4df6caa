use std::collections::BTreeMap;

use kurbo::Point;

use crate::{
    document::element::Element,
    foundation::{
        error::{FlameError, FlameResult},
        value::{AttrValue, format_number, format_numbers, parse_f64, parse_f64_array},
    },
    model::{
        color::COLOR_TAG,
        palette::Palette,
        transform::{FINAL_XFORM_TAG, Transform, XFORM_TAG, XformSlot},
    },
};

/// Document tag of a flame.
pub const FLAME_TAG: &str = "flame";

const DEFAULT_NAME: &str = "none";

/// Attributes written by [`Flame::to_element`] outside [`FlameAttr`].
const BESPOKE_ATTRS: [&str; 4] = ["name", "size", "center", "scale"];

/// How the renderer interpolates between keyframed flames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMode {
    #[default]
    Linear,
    Smooth,
}

/// How transform coefficients are interpolated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationType {
    Linear,
    #[default]
    Log,
    Old,
    Older,
}

/// How palette lookups blend neighbouring entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteMode {
    Step,
    #[default]
    Linear,
}

impl InterpolationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Smooth => "smooth",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "linear" => Some(Self::Linear),
            "smooth" => Some(Self::Smooth),
            _ => None,
        }
    }
}

impl InterpolationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
            Self::Old => "old",
            Self::Older => "older",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "linear" => Some(Self::Linear),
            "log" => Some(Self::Log),
            "old" => Some(Self::Old),
            "older" => Some(Self::Older),
            _ => None,
        }
    }
}

impl PaletteMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Linear => "linear",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "step" => Some(Self::Step),
            "linear" => Some(Self::Linear),
            _ => None,
        }
    }
}

/// Flame attributes written generically after the bespoke `name`/`size`/`center`/`scale`.
///
/// Adding a typed flame field means adding a variant here; emission and parsing both
/// walk this list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlameAttr {
    Time,
    Rotate,
    Brightness,
    Gamma,
    GammaThreshold,
    Vibrancy,
    HighlightPower,
    Background,
    Interpolation,
    InterpolationType,
    PaletteMode,
    Oversample,
    Filter,
    Quality,
}

impl FlameAttr {
    /// Every generic attribute, in emission order.
    pub const ALL: [Self; 14] = [
        Self::Time,
        Self::Rotate,
        Self::Brightness,
        Self::Gamma,
        Self::GammaThreshold,
        Self::Vibrancy,
        Self::HighlightPower,
        Self::Background,
        Self::Interpolation,
        Self::InterpolationType,
        Self::PaletteMode,
        Self::Oversample,
        Self::Filter,
        Self::Quality,
    ];

    /// Attribute name in the document.
    pub fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Rotate => "rotate",
            Self::Brightness => "brightness",
            Self::Gamma => "gamma",
            Self::GammaThreshold => "gamma_threshold",
            Self::Vibrancy => "vibrancy",
            Self::HighlightPower => "highlight_power",
            Self::Background => "background",
            Self::Interpolation => "interpolation",
            Self::InterpolationType => "interpolation_type",
            Self::PaletteMode => "palette_mode",
            Self::Oversample => "oversample",
            Self::Filter => "filter",
            Self::Quality => "quality",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Current value on `flame`.
    pub fn value(self, flame: &Flame) -> AttrValue {
        match self {
            Self::Time => AttrValue::Float(flame.time),
            Self::Rotate => AttrValue::Float(flame.rotate),
            Self::Brightness => AttrValue::Float(flame.brightness),
            Self::Gamma => AttrValue::Float(flame.gamma),
            Self::GammaThreshold => AttrValue::Float(flame.gamma_threshold),
            Self::Vibrancy => AttrValue::Float(flame.vibrancy),
            Self::HighlightPower => AttrValue::Float(flame.highlight_power),
            Self::Background => AttrValue::Floats(flame.background.to_vec()),
            Self::Interpolation => AttrValue::Text(flame.interpolation.as_str().to_owned()),
            Self::InterpolationType => {
                AttrValue::Text(flame.interpolation_type.as_str().to_owned())
            }
            Self::PaletteMode => AttrValue::Text(flame.palette_mode.as_str().to_owned()),
            Self::Oversample => AttrValue::Float(f64::from(flame.oversample)),
            Self::Filter => AttrValue::Float(flame.filter),
            Self::Quality => AttrValue::Float(f64::from(flame.quality)),
        }
    }

    /// Store the document text `raw` into the matching field of `flame`.
    pub fn apply(self, flame: &mut Flame, raw: &str) -> FlameResult<()> {
        let name = self.name();
        match self {
            Self::Time => flame.time = parse_f64(name, raw)?,
            Self::Rotate => flame.rotate = parse_f64(name, raw)?,
            Self::Brightness => flame.brightness = parse_f64(name, raw)?,
            Self::Gamma => flame.gamma = parse_f64(name, raw)?,
            Self::GammaThreshold => flame.gamma_threshold = parse_f64(name, raw)?,
            Self::Vibrancy => flame.vibrancy = parse_f64(name, raw)?,
            Self::HighlightPower => flame.highlight_power = parse_f64(name, raw)?,
            Self::Background => flame.background = parse_f64_array::<3>(name, raw)?,
            Self::Interpolation => {
                flame.interpolation = self.token(raw, InterpolationMode::parse(raw))?
            }
            Self::InterpolationType => {
                flame.interpolation_type = self.token(raw, InterpolationType::parse(raw))?
            }
            Self::PaletteMode => flame.palette_mode = self.token(raw, PaletteMode::parse(raw))?,
            Self::Oversample => flame.oversample = positive_int(name, parse_f64(name, raw)?)?,
            Self::Filter => flame.filter = parse_f64(name, raw)?,
            Self::Quality => flame.quality = positive_int(name, parse_f64(name, raw)?)?,
        }
        Ok(())
    }

    fn token<T>(self, raw: &str, parsed: Option<T>) -> FlameResult<T> {
        parsed.ok_or_else(|| {
            FlameError::format(format!(
                "attribute '{}' has unknown value '{raw}'",
                self.name()
            ))
        })
    }
}

fn positive_int(attr: &str, v: f64) -> FlameResult<u32> {
    if v.fract() != 0.0 || v < 1.0 || v > f64::from(u32::MAX) {
        return Err(FlameError::format(format!(
            "attribute '{attr}' expects a positive integer, got {v}"
        )));
    }
    Ok(v as u32)
}

/// A complete flame: global parameters, ordered transforms, optional final transform
/// and a 256-entry palette.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Flame {
    /// Display name; never empty.
    pub name: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Camera center.
    pub center: Point,
    /// Zoom as written in the document; see [`Flame::scale`] for the corrected view.
    doc_scale: f64,
    pub time: f64,
    /// Camera rotation in degrees.
    pub rotate: f64,
    pub brightness: f64,
    pub gamma: f64,
    pub gamma_threshold: f64,
    pub vibrancy: f64,
    pub highlight_power: f64,
    pub background: [f64; 3],
    pub interpolation: InterpolationMode,
    pub interpolation_type: InterpolationType,
    pub palette_mode: PaletteMode,
    pub oversample: u32,
    pub filter: f64,
    pub quality: u32,
    /// Color table.
    pub palette: Palette,
    xforms: Vec<Transform>,
    final_xform: Option<Transform>,
    extras: BTreeMap<String, AttrValue>,
}

impl Default for Flame {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            width: 720,
            height: 360,
            center: Point::ORIGIN,
            doc_scale: 144.0,
            time: 0.0,
            rotate: 0.0,
            brightness: 4.0,
            gamma: 4.0,
            gamma_threshold: 0.04,
            vibrancy: 1.0,
            highlight_power: -1.0,
            background: [0.0; 3],
            interpolation: InterpolationMode::Linear,
            interpolation_type: InterpolationType::Log,
            palette_mode: PaletteMode::Linear,
            oversample: 1,
            filter: 0.2,
            quality: 100,
            palette: Palette::new(),
            xforms: Vec::new(),
            final_xform: None,
            extras: BTreeMap::new(),
        }
    }
}

impl Flame {
    /// Flame with default parameters, no transforms and a black palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zoom corrected for output width (`document scale * 100 / width`).
    pub fn scale(&self) -> f64 {
        self.doc_scale * 100.0 / f64::from(self.width)
    }

    /// Set the width-corrected zoom for the current width.
    pub fn set_scale(&mut self, scale: f64) {
        self.doc_scale = scale / 100.0 * f64::from(self.width);
    }

    /// Ordinary transforms in order.
    pub fn xforms(&self) -> &[Transform] {
        &self.xforms
    }

    pub fn xform_mut(&mut self, index: usize) -> Option<&mut Transform> {
        self.xforms.get_mut(index)
    }

    pub fn iter_xforms_mut(&mut self) -> std::slice::IterMut<'_, Transform> {
        self.xforms.iter_mut()
    }

    /// Append a transform and return its index.
    ///
    /// Every chaos matrix grows to cover the new sibling with weight 1.
    pub fn push_xform(&mut self, mut xform: Transform) -> usize {
        let index = self.xforms.len();
        xform.set_slot(XformSlot::Indexed(index));
        self.xforms.push(xform);
        let siblings = self.xforms.len();
        for xf in &mut self.xforms {
            if let Some(chaos) = xf.chaos_mut() {
                chaos.grow_to(siblings);
            }
        }
        index
    }

    /// Remove the transform at `index`; later transforms shift down.
    pub fn remove_xform(&mut self, index: usize) -> Option<Transform> {
        if index >= self.xforms.len() {
            return None;
        }
        let removed = self.xforms.remove(index);
        self.restamp();
        for xf in &mut self.xforms {
            let Some(chaos) = xf.chaos_mut() else {
                continue;
            };
            chaos.remove_sibling(index);
            if !chaos.is_active() {
                xf.set_chaos(None);
            }
        }
        Some(removed)
    }

    fn restamp(&mut self) {
        for (i, xf) in self.xforms.iter_mut().enumerate() {
            xf.set_slot(XformSlot::Indexed(i));
        }
    }

    pub fn final_xform(&self) -> Option<&Transform> {
        self.final_xform.as_ref()
    }

    pub fn final_xform_mut(&mut self) -> Option<&mut Transform> {
        self.final_xform.as_mut()
    }

    /// Install (or replace) the final transform, returning the previous one.
    pub fn set_final(&mut self, mut xform: Transform) -> Option<Transform> {
        xform.set_slot(XformSlot::Final);
        self.final_xform.replace(xform)
    }

    pub fn take_final(&mut self) -> Option<Transform> {
        self.final_xform.take()
    }

    /// Attributes without a typed field, kept verbatim.
    pub fn extras(&self) -> &BTreeMap<String, AttrValue> {
        &self.extras
    }

    /// Keep an attribute that has no typed field.
    ///
    /// Names with typed handling are rejected so an extra never shadows a field on write.
    pub fn set_extra(&mut self, name: impl Into<String>, value: AttrValue) -> FlameResult<()> {
        let name = name.into();
        if BESPOKE_ATTRS.contains(&name.as_str()) || FlameAttr::from_name(&name).is_some() {
            return Err(FlameError::validation(format!(
                "'{name}' is a typed flame attribute, not an extra"
            )));
        }
        self.extras.insert(name, value);
        Ok(())
    }

    /// Read a `flame` element.
    #[tracing::instrument(skip(el), fields(name = el.get("name").unwrap_or(DEFAULT_NAME)))]
    pub fn from_element(el: &Element) -> FlameResult<Self> {
        let mut flame = Self::default();

        for (key, raw) in &el.attrs {
            match key.as_str() {
                "name" => {
                    if !raw.is_empty() {
                        flame.name = raw.clone();
                    }
                }
                "size" => {
                    let [w, h] = parse_f64_array::<2>("size", raw)?;
                    flame.width = positive_int("size", w)?;
                    flame.height = positive_int("size", h)?;
                }
                "center" => {
                    let [x, y] = parse_f64_array::<2>("center", raw)?;
                    flame.center = Point::new(x, y);
                }
                "scale" => flame.doc_scale = parse_f64("scale", raw)?,
                name => match FlameAttr::from_name(name) {
                    Some(attr) => attr.apply(&mut flame, raw)?,
                    None => {
                        tracing::debug!(attr = name, "keeping unrecognized flame attribute");
                        flame.extras.insert(name.to_owned(), AttrValue::parse(raw));
                    }
                },
            }
        }

        let xform_els: Vec<&Element> = el.children_named(XFORM_TAG).collect();
        let siblings = xform_els.len();
        for (i, x) in xform_els.into_iter().enumerate() {
            flame
                .xforms
                .push(Transform::from_element(x, XformSlot::Indexed(i), siblings)?);
        }

        let mut finals = el.children_named(FINAL_XFORM_TAG);
        if let Some(first) = finals.next() {
            if finals.next().is_some() {
                return Err(FlameError::validation(format!(
                    "flame '{}' has more than one final transform",
                    flame.name
                )));
            }
            flame.final_xform = Some(Transform::from_element(first, XformSlot::Final, siblings)?);
        }

        flame.palette = Palette::from_elements(el.children_named(COLOR_TAG))?;

        for child in &el.children {
            if ![XFORM_TAG, FINAL_XFORM_TAG, COLOR_TAG].contains(&child.tag.as_str()) {
                tracing::debug!(tag = %child.tag, "ignoring unsupported flame child");
            }
        }
        Ok(flame)
    }

    /// Write this flame, its transforms and its palette as an element.
    pub fn to_element(&self) -> Element {
        let mut el = Element::new(FLAME_TAG)
            .with_attr("name", self.name.as_str())
            .with_attr("size", format!("{} {}", self.width, self.height))
            .with_attr("center", format_numbers(&[self.center.x, self.center.y]))
            .with_attr("scale", format_number(self.doc_scale));
        for attr in FlameAttr::ALL {
            el.set(attr.name(), attr.value(self).render());
        }
        for (k, v) in &self.extras {
            el.set(k.as_str(), v.render());
        }
        el.children
            .extend(self.xforms.iter().map(Transform::to_element));
        if let Some(final_xform) = &self.final_xform {
            el.push(final_xform.to_element());
        }
        el.children.extend(self.palette.to_elements());
        el
    }

    /// Independent copy with every transform's bindings applied at time `t`.
    pub fn state_at(&self, t: f64) -> Flame {
        let mut work = self.clone();
        for xf in work.xforms.iter_mut() {
            *xf = xf.state_at(t);
        }
        if let Some(final_xform) = work.final_xform.as_mut() {
            *final_xform = final_xform.state_at(t);
        }
        work
    }

    /// Serialized snapshot of the flame at normalized time `t` in `[0, 1)`.
    ///
    /// The persisted flame is never modified.
    #[tracing::instrument(skip(self), fields(name = %self.name))]
    pub fn get_at(&self, t: f64) -> Element {
        self.state_at(t).to_element()
    }

    /// Deep copy through a full serialize/parse cycle.
    pub fn copy(&self) -> FlameResult<Flame> {
        Self::from_element(&self.to_element())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/flame.rs"]
mod tests;

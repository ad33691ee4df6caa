use std::collections::BTreeMap;

use crate::{
    animation::binding::{BindingTarget, LFO_TAG, OscillatorBinding, TargetAttr},
    catalog::variations::{VariableId, VariationId},
    document::element::Element,
    foundation::{
        error::FlameResult,
        value::{AttrValue, format_number, parse_f64},
    },
    model::{
        chaos::ChaosMatrix,
        coefs::{AffineMap, Coefs},
        post::PostTransform,
    },
};

/// Document tag of an ordinary transform.
pub const XFORM_TAG: &str = "xform";
/// Document tag of the final transform.
pub const FINAL_XFORM_TAG: &str = "finalxform";

/// Where a transform sits in its flame.
///
/// This is a handle into the owning flame's storage, not a reference to it. The flame
/// keeps it current whenever its transform list changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum XformSlot {
    /// Position in the ordered transform list.
    Indexed(usize),
    /// The flame's final transform.
    Final,
}

/// One affine map plus variation weights, scalar parameters and optional extras.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    coefs: Coefs,
    /// Selection weight, `>= 0`.
    pub weight: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Palette coordinate in `[0, 1]`.
    pub color: f64,
    /// Color blending speed in `[0, 1]`.
    pub color_speed: f64,
    /// Whether the animation loop rotates this transform.
    pub animate: bool,
    variations: BTreeMap<VariationId, f64>,
    variables: BTreeMap<VariableId, f64>,
    post: Option<PostTransform>,
    chaos: Option<ChaosMatrix>,
    bindings: Vec<OscillatorBinding>,
    extras: BTreeMap<String, AttrValue>,
    slot: XformSlot,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            coefs: Coefs::IDENTITY,
            weight: 1.0,
            opacity: 1.0,
            color: 0.0,
            color_speed: 0.5,
            animate: true,
            variations: BTreeMap::from([(VariationId::LINEAR, 1.0)]),
            variables: BTreeMap::new(),
            post: None,
            chaos: None,
            bindings: Vec::new(),
            extras: BTreeMap::new(),
            slot: XformSlot::Indexed(0),
        }
    }
}

impl Transform {
    /// Identity transform with full `linear` weight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot in the owning flame.
    pub fn slot(&self) -> XformSlot {
        self.slot
    }

    pub(crate) fn set_slot(&mut self, slot: XformSlot) {
        self.slot = slot;
        if slot == XformSlot::Final {
            self.animate = false;
        }
    }

    /// Position in the owner's transform list; `None` for the final transform.
    pub fn index(&self) -> Option<usize> {
        match self.slot {
            XformSlot::Indexed(i) => Some(i),
            XformSlot::Final => None,
        }
    }

    /// `true` when this is the owner's final transform.
    pub fn is_final(&self) -> bool {
        self.slot == XformSlot::Final
    }

    /// Weight of the `linear` variation (0 when absent).
    pub fn linear(&self) -> f64 {
        self.variation(VariationId::LINEAR).unwrap_or(0.0)
    }

    /// Weight of a variation, if set.
    pub fn variation(&self, id: VariationId) -> Option<f64> {
        self.variations.get(&id).copied()
    }

    /// Set a variation weight.
    pub fn set_variation(&mut self, id: VariationId, weight: f64) {
        self.variations.insert(id, weight);
    }

    /// Drop a variation, returning its weight.
    pub fn remove_variation(&mut self, id: VariationId) -> Option<f64> {
        self.variations.remove(&id)
    }

    /// Set variations in catalog order.
    pub fn variations(&self) -> impl Iterator<Item = (VariationId, f64)> + '_ {
        self.variations.iter().map(|(id, w)| (*id, *w))
    }

    /// Names of variations with non-zero weight, in catalog order.
    pub fn list_vars(&self) -> Vec<&'static str> {
        self.variations
            .iter()
            .filter(|(_, w)| **w != 0.0)
            .map(|(id, _)| id.name())
            .collect()
    }

    /// Value of a variation variable, if set.
    pub fn variable(&self, id: VariableId) -> Option<f64> {
        self.variables.get(&id).copied()
    }

    /// Set a variation variable.
    pub fn set_variable(&mut self, id: VariableId, value: f64) {
        self.variables.insert(id, value);
    }

    /// Set variables in catalog order.
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, f64)> + '_ {
        self.variables.iter().map(|(id, v)| (*id, *v))
    }

    /// Attributes that are neither typed fields nor catalog entries.
    pub fn extras(&self) -> &BTreeMap<String, AttrValue> {
        &self.extras
    }

    /// Current value of a scalar attribute (0 for an unset variation or variable).
    pub fn attr(&self, attr: TargetAttr) -> f64 {
        match attr {
            TargetAttr::Color => self.color,
            TargetAttr::ColorSpeed => self.color_speed,
            TargetAttr::Weight => self.weight,
            TargetAttr::Opacity => self.opacity,
            TargetAttr::Variation(id) => self.variation(id).unwrap_or(0.0),
            TargetAttr::Variable(id) => self.variable(id).unwrap_or(0.0),
        }
    }

    /// Mutable scalar attribute; an unset variation or variable is created at 0.
    pub fn attr_mut(&mut self, attr: TargetAttr) -> &mut f64 {
        match attr {
            TargetAttr::Color => &mut self.color,
            TargetAttr::ColorSpeed => &mut self.color_speed,
            TargetAttr::Weight => &mut self.weight,
            TargetAttr::Opacity => &mut self.opacity,
            TargetAttr::Variation(id) => self.variations.entry(id).or_insert(0.0),
            TargetAttr::Variable(id) => self.variables.entry(id).or_insert(0.0),
        }
    }

    pub fn post(&self) -> Option<&PostTransform> {
        self.post.as_ref()
    }

    pub fn post_mut(&mut self) -> Option<&mut PostTransform> {
        self.post.as_mut()
    }

    /// Attach a post-transform, or overwrite the coefficients of the existing one.
    pub fn add_post(&mut self, coefs: Coefs) -> &mut PostTransform {
        let post = self.post.get_or_insert_with(PostTransform::identity);
        post.set_coefs(coefs);
        post
    }

    /// Detach the post-transform.
    pub fn remove_post(&mut self) -> Option<PostTransform> {
        self.post.take()
    }

    pub fn chaos(&self) -> Option<&ChaosMatrix> {
        self.chaos.as_ref()
    }

    pub fn chaos_mut(&mut self) -> Option<&mut ChaosMatrix> {
        self.chaos.as_mut()
    }

    /// Attach or replace the chaos matrix.
    pub fn set_chaos(&mut self, chaos: Option<ChaosMatrix>) {
        self.chaos = chaos;
    }

    /// Oscillator bindings in application order.
    pub fn bindings(&self) -> &[OscillatorBinding] {
        &self.bindings
    }

    /// Attach a binding. An unset variation/variable target is created at 0 so the
    /// binding always refers to an existing attribute.
    pub fn bind(&mut self, binding: OscillatorBinding) {
        if let BindingTarget::Attribute(attr) = binding.target() {
            self.attr_mut(attr);
        }
        self.bindings.push(binding);
    }

    /// Attach a default binding to a named target and return it for configuration.
    pub fn bind_target(&mut self, target: &str) -> FlameResult<&mut OscillatorBinding> {
        let binding = OscillatorBinding::for_target(target)?;
        let at = self.bindings.len();
        self.bind(binding);
        Ok(&mut self.bindings[at])
    }

    /// Remove all bindings.
    pub fn clear_bindings(&mut self) -> Vec<OscillatorBinding> {
        std::mem::take(&mut self.bindings)
    }

    fn apply_binding(&mut self, binding: &OscillatorBinding, i: f64) {
        if !binding.is_active() {
            return;
        }
        let delta = binding.sample(i);
        tracing::trace!(attr = binding.target().name(), delta, "apply oscillator");
        match binding.target() {
            BindingTarget::Rotate => self.rotate(delta),
            BindingTarget::RotateX => self.rotate_x(delta),
            BindingTarget::RotateY => self.rotate_y(delta),
            BindingTarget::Orbit => self.orbit(delta),
            BindingTarget::PostRotate => self.post_or_identity().rotate(delta),
            BindingTarget::PostRotateX => self.post_or_identity().rotate_x(delta),
            BindingTarget::PostRotateY => self.post_or_identity().rotate_y(delta),
            BindingTarget::PostOrbit => self.post_or_identity().orbit(delta),
            BindingTarget::Attribute(attr) => *self.attr_mut(attr) += delta,
        }
    }

    fn post_or_identity(&mut self) -> &mut PostTransform {
        self.post.get_or_insert_with(PostTransform::identity)
    }

    /// Independent copy with every active binding applied at normalized time `i`.
    ///
    /// The copy carries no bindings; `self` is left untouched.
    pub fn state_at(&self, i: f64) -> Transform {
        let mut work = self.clone();
        work.bindings.clear();
        for binding in &self.bindings {
            work.apply_binding(binding, i);
        }
        work
    }

    /// Serialized snapshot of [`Transform::state_at`].
    pub fn get_at(&self, i: f64) -> Element {
        self.state_at(i).to_element()
    }

    /// Read an `xform` or `finalxform` element.
    ///
    /// `siblings` is the number of ordinary transforms in the owning flame and sizes the
    /// chaos matrix.
    pub fn from_element(el: &Element, slot: XformSlot, siblings: usize) -> FlameResult<Self> {
        let mut xf = Self {
            variations: BTreeMap::new(),
            ..Self::default()
        };
        xf.set_slot(slot);

        for (key, raw) in &el.attrs {
            match key.as_str() {
                "coefs" => xf.coefs = Coefs::parse(key, raw)?,
                "post" => {
                    let post = PostTransform::parse(raw)?;
                    xf.post = post.is_active().then_some(post);
                }
                "chaos" => {
                    let chaos = ChaosMatrix::parse(raw, siblings)?;
                    xf.chaos = chaos.is_active().then_some(chaos);
                }
                "weight" => xf.weight = parse_f64(key, raw)?,
                "opacity" => xf.opacity = parse_f64(key, raw)?,
                "color" => xf.color = parse_f64(key, raw)?,
                "color_speed" => xf.color_speed = parse_f64(key, raw)?,
                "animate" => xf.animate = parse_f64(key, raw)? != 0.0,
                name => {
                    if let Some(id) = VariationId::from_name(name) {
                        xf.variations.insert(id, parse_f64(key, raw)?);
                    } else if let Some(id) = VariableId::from_name(name) {
                        xf.variables.insert(id, parse_f64(key, raw)?);
                    } else {
                        tracing::debug!(attr = name, "keeping unrecognized transform attribute");
                        xf.extras.insert(name.to_owned(), AttrValue::parse(raw));
                    }
                }
            }
        }

        for lfo in el.children_named(LFO_TAG) {
            xf.bind(OscillatorBinding::from_element(lfo)?);
        }
        Ok(xf)
    }

    /// Write this transform, including its bindings, as an element.
    pub fn to_element(&self) -> Element {
        let tag = if self.is_final() {
            FINAL_XFORM_TAG
        } else {
            XFORM_TAG
        };
        let mut el = Element::new(tag).with_attr("coefs", self.coefs.render());
        if let Some(post) = self.post.filter(PostTransform::is_active) {
            el.set("post", post.render());
        }
        if let Some(chaos) = self.chaos.as_ref().filter(|c| c.is_active()) {
            el.set("chaos", chaos.render());
        }
        el.set("weight", format_number(self.weight));
        el.set("color", format_number(self.color));
        el.set("color_speed", format_number(self.color_speed));
        el.set("opacity", format_number(self.opacity));
        if self.animate == self.is_final() {
            el.set("animate", if self.animate { "1" } else { "0" });
        }
        for (id, w) in &self.variations {
            el.set(id.name(), format_number(*w));
        }
        for (id, v) in &self.variables {
            el.set(id.name(), format_number(*v));
        }
        for (k, v) in &self.extras {
            el.set(k.as_str(), v.render());
        }
        for binding in &self.bindings {
            el.push(binding.to_element());
        }
        el
    }
}

impl AffineMap for Transform {
    fn coefs(&self) -> &Coefs {
        &self.coefs
    }

    fn coefs_mut(&mut self) -> &mut Coefs {
        &mut self.coefs
    }

    fn is_post(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/transform.rs"]
mod tests;

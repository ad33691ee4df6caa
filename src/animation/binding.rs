use crate::{
    animation::oscillator::Waveform,
    catalog::variations::{VariableId, VariationId},
    document::element::Element,
    foundation::{
        error::{FlameError, FlameResult},
        value::{format_number, parse_f64},
    },
};

/// Document tag of a binding.
pub const LFO_TAG: &str = "lfo";

/// Scalar transform attribute an oscillator can add to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetAttr {
    /// Color index.
    Color,
    /// Color speed.
    ColorSpeed,
    /// Selection weight.
    Weight,
    /// Opacity.
    Opacity,
    /// A variation weight.
    Variation(VariationId),
    /// A variation variable.
    Variable(VariableId),
}

impl TargetAttr {
    /// Attribute name in the document.
    pub fn name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::ColorSpeed => "color_speed",
            Self::Weight => "weight",
            Self::Opacity => "opacity",
            Self::Variation(id) => id.name(),
            Self::Variable(id) => id.name(),
        }
    }
}

/// What an oscillator binding drives.
///
/// The set is closed: the rotation operations of a transform or its post-transform, or
/// plain addition onto a scalar attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingTarget {
    /// Rotate both basis vectors.
    Rotate,
    /// Rotate the x basis vector.
    RotateX,
    /// Rotate the y basis vector.
    RotateY,
    /// Rotate the origin about (0, 0).
    Orbit,
    /// [`BindingTarget::Rotate`] on the post-transform.
    PostRotate,
    /// [`BindingTarget::RotateX`] on the post-transform.
    PostRotateX,
    /// [`BindingTarget::RotateY`] on the post-transform.
    PostRotateY,
    /// [`BindingTarget::Orbit`] on the post-transform.
    PostOrbit,
    /// Add the sample to an attribute.
    Attribute(TargetAttr),
}

impl BindingTarget {
    /// Resolve a target name, rejecting anything outside the valid set.
    pub fn parse(name: &str) -> FlameResult<Self> {
        let target = match name {
            "rotate" => Self::Rotate,
            "rotate_x" => Self::RotateX,
            "rotate_y" => Self::RotateY,
            "orbit" => Self::Orbit,
            "protate" => Self::PostRotate,
            "protate_x" => Self::PostRotateX,
            "protate_y" => Self::PostRotateY,
            "porbit" => Self::PostOrbit,
            "color" => Self::Attribute(TargetAttr::Color),
            "color_speed" => Self::Attribute(TargetAttr::ColorSpeed),
            "weight" => Self::Attribute(TargetAttr::Weight),
            "opacity" => Self::Attribute(TargetAttr::Opacity),
            other => {
                if let Some(id) = VariationId::from_name(other) {
                    Self::Attribute(TargetAttr::Variation(id))
                } else if let Some(id) = VariableId::from_name(other) {
                    Self::Attribute(TargetAttr::Variable(id))
                } else {
                    return Err(FlameError::validation(format!(
                        "'{other}' is an invalid oscillator target"
                    )));
                }
            }
        };
        Ok(target)
    }

    /// Target name in the document.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rotate => "rotate",
            Self::RotateX => "rotate_x",
            Self::RotateY => "rotate_y",
            Self::Orbit => "orbit",
            Self::PostRotate => "protate",
            Self::PostRotateX => "protate_x",
            Self::PostRotateY => "protate_y",
            Self::PostOrbit => "porbit",
            Self::Attribute(attr) => attr.name(),
        }
    }
}

impl serde::Serialize for BindingTarget {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for BindingTarget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Self::parse(&name).map_err(serde::de::Error::custom)
    }
}

/// A periodic waveform bound to one transform attribute (an "LFO").
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OscillatorBinding {
    target: BindingTarget,
    /// Cycles per unit of normalized time.
    pub freq: f64,
    /// Waveform.
    pub shape: Waveform,
    /// Amplitude; zero disables the binding.
    pub amp: f64,
    /// Phase offset in degrees.
    pub phase: f64,
}

impl OscillatorBinding {
    /// Binding with default frequency 1, sine shape, zero amplitude and zero phase.
    pub fn new(target: BindingTarget) -> Self {
        Self {
            target,
            freq: 1.0,
            shape: Waveform::Sine,
            amp: 0.0,
            phase: 0.0,
        }
    }

    /// Binding for a named target; unknown names fail here, never at sample time.
    pub fn for_target(name: &str) -> FlameResult<Self> {
        Ok(Self::new(BindingTarget::parse(name)?))
    }

    /// Set the frequency.
    pub fn with_freq(mut self, freq: f64) -> Self {
        self.freq = freq;
        self
    }

    /// Set the waveform.
    pub fn with_shape(mut self, shape: Waveform) -> Self {
        self.shape = shape;
        self
    }

    /// Set the amplitude.
    pub fn with_amp(mut self, amp: f64) -> Self {
        self.amp = amp;
        self
    }

    /// Set the phase in degrees.
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Bound target.
    pub fn target(&self) -> BindingTarget {
        self.target
    }

    /// A binding only contributes when its amplitude is non-zero.
    pub fn is_active(&self) -> bool {
        self.amp != 0.0
    }

    /// Delta at normalized time `i`.
    pub fn sample(&self, i: f64) -> f64 {
        if !self.is_active() {
            return 0.0;
        }
        self.shape.sample(i * self.freq, self.amp, self.phase)
    }

    /// Read an `lfo` element.
    pub fn from_element(el: &Element) -> FlameResult<Self> {
        let target = el
            .get("target")
            .ok_or_else(|| FlameError::validation("oscillator binding has no target"))?;
        let mut binding = Self::for_target(target)?;
        if let Some(raw) = el.get("freq") {
            binding.freq = parse_f64("freq", raw)?;
        }
        if let Some(raw) = el.get("shape") {
            binding.shape = Waveform::parse(raw)?;
        }
        if let Some(raw) = el.get("amp") {
            binding.amp = parse_f64("amp", raw)?;
        }
        if let Some(raw) = el.get("phase") {
            binding.phase = parse_f64("phase", raw)?;
        }
        Ok(binding)
    }

    /// Write an `lfo` element.
    pub fn to_element(&self) -> Element {
        Element::new(LFO_TAG)
            .with_attr("target", self.target.name())
            .with_attr("freq", format_number(self.freq))
            .with_attr("shape", self.shape.as_str())
            .with_attr("amp", format_number(self.amp))
            .with_attr("phase", format_number(self.phase))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/binding.rs"]
mod tests;

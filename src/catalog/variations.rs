//! Static catalog of variation names and their numeric variables.

/// Number of variations known to the catalog.
pub const VARIATION_COUNT: usize = 99;

/// Variation names in catalog order.
pub const VARIATIONS: [&str; VARIATION_COUNT] = [
    "linear",
    "sinusoidal",
    "spherical",
    "swirl",
    "horseshoe",
    "polar",
    "handkerchief",
    "heart",
    "disc",
    "spiral",
    "hyperbolic",
    "diamond",
    "ex",
    "julia",
    "bent",
    "waves",
    "fisheye",
    "popcorn",
    "exponential",
    "power",
    "cosine",
    "rings",
    "fan",
    "blob",
    "pdj",
    "fan2",
    "rings2",
    "eyefish",
    "bubble",
    "cylinder",
    "perspective",
    "noise",
    "julian",
    "juliascope",
    "blur",
    "gaussian_blur",
    "radial_blur",
    "pie",
    "ngon",
    "curl",
    "rectangles",
    "arch",
    "tangent",
    "square",
    "rays",
    "blade",
    "secant2",
    "twintrian",
    "cross",
    "disc2",
    "super_shape",
    "flower",
    "conic",
    "parabola",
    "bent2",
    "bipolar",
    "boarders",
    "butterfly",
    "cell",
    "cpow",
    "curve",
    "edisc",
    "elliptic",
    "escher",
    "foci",
    "lazysusan",
    "loonie",
    "pre_blur",
    "modulus",
    "oscilloscope",
    "polar2",
    "popcorn2",
    "scry",
    "separation",
    "split",
    "splits",
    "stripes",
    "wedge",
    "wedge_julia",
    "wedge_sph",
    "whorl",
    "waves2",
    "exp",
    "log",
    "sin",
    "cos",
    "tan",
    "sec",
    "csc",
    "cot",
    "sinh",
    "cosh",
    "tanh",
    "sech",
    "csch",
    "coth",
    "auger",
    "flux",
    "mobius",
];

/// Number of variables known to the catalog.
pub const VARIABLE_COUNT: usize = 109;

/// `(variable, owning variation)` pairs in catalog order.
pub const VARIABLES: [(&str, &str); VARIABLE_COUNT] = [
    ("blob_low", "blob"),
    ("blob_high", "blob"),
    ("blob_waves", "blob"),
    ("pdj_a", "pdj"),
    ("pdj_b", "pdj"),
    ("pdj_c", "pdj"),
    ("pdj_d", "pdj"),
    ("fan2_x", "fan2"),
    ("fan2_y", "fan2"),
    ("rings2_val", "rings2"),
    ("perspective_angle", "perspective"),
    ("perspective_dist", "perspective"),
    ("julian_power", "julian"),
    ("julian_dist", "julian"),
    ("juliascope_power", "juliascope"),
    ("juliascope_dist", "juliascope"),
    ("radial_blur_angle", "radial_blur"),
    ("pie_slices", "pie"),
    ("pie_rotation", "pie"),
    ("pie_thickness", "pie"),
    ("ngon_sides", "ngon"),
    ("ngon_power", "ngon"),
    ("ngon_circle", "ngon"),
    ("ngon_corners", "ngon"),
    ("curl_c1", "curl"),
    ("curl_c2", "curl"),
    ("rectangles_x", "rectangles"),
    ("rectangles_y", "rectangles"),
    ("disc2_rot", "disc2"),
    ("disc2_twist", "disc2"),
    ("super_shape_rnd", "super_shape"),
    ("super_shape_m", "super_shape"),
    ("super_shape_n1", "super_shape"),
    ("super_shape_n2", "super_shape"),
    ("super_shape_n3", "super_shape"),
    ("super_shape_holes", "super_shape"),
    ("flower_petals", "flower"),
    ("flower_holes", "flower"),
    ("conic_eccentricity", "conic"),
    ("conic_holes", "conic"),
    ("parabola_height", "parabola"),
    ("parabola_width", "parabola"),
    ("bent2_x", "bent2"),
    ("bent2_y", "bent2"),
    ("bipolar_shift", "bipolar"),
    ("cell_size", "cell"),
    ("cpow_r", "cpow"),
    ("cpow_i", "cpow"),
    ("cpow_power", "cpow"),
    ("curve_xamp", "curve"),
    ("curve_yamp", "curve"),
    ("curve_xlength", "curve"),
    ("curve_ylength", "curve"),
    ("escher_beta", "escher"),
    ("lazysusan_spin", "lazysusan"),
    ("lazysusan_space", "lazysusan"),
    ("lazysusan_twist", "lazysusan"),
    ("lazysusan_x", "lazysusan"),
    ("lazysusan_y", "lazysusan"),
    ("modulus_x", "modulus"),
    ("modulus_y", "modulus"),
    ("oscilloscope_separation", "oscilloscope"),
    ("oscilloscope_frequency", "oscilloscope"),
    ("oscilloscope_amplitude", "oscilloscope"),
    ("oscilloscope_damping", "oscilloscope"),
    ("popcorn2_x", "popcorn2"),
    ("popcorn2_y", "popcorn2"),
    ("popcorn2_c", "popcorn2"),
    ("separation_x", "separation"),
    ("separation_xinside", "separation"),
    ("separation_y", "separation"),
    ("separation_yinside", "separation"),
    ("split_xsize", "split"),
    ("split_ysize", "split"),
    ("splits_x", "splits"),
    ("splits_y", "splits"),
    ("stripes_space", "stripes"),
    ("stripes_warp", "stripes"),
    ("wedge_angle", "wedge"),
    ("wedge_hole", "wedge"),
    ("wedge_count", "wedge"),
    ("wedge_swirl", "wedge"),
    ("wedge_julia_angle", "wedge_julia"),
    ("wedge_julia_count", "wedge_julia"),
    ("wedge_julia_power", "wedge_julia"),
    ("wedge_julia_dist", "wedge_julia"),
    ("wedge_sph_angle", "wedge_sph"),
    ("wedge_sph_count", "wedge_sph"),
    ("wedge_sph_hole", "wedge_sph"),
    ("wedge_sph_swirl", "wedge_sph"),
    ("whorl_inside", "whorl"),
    ("whorl_outside", "whorl"),
    ("waves2_freqx", "waves2"),
    ("waves2_scalex", "waves2"),
    ("waves2_freqy", "waves2"),
    ("waves2_scaley", "waves2"),
    ("auger_freq", "auger"),
    ("auger_scale", "auger"),
    ("auger_sym", "auger"),
    ("auger_weight", "auger"),
    ("flux_spread", "flux"),
    ("mobius_re_a", "mobius"),
    ("mobius_im_a", "mobius"),
    ("mobius_re_b", "mobius"),
    ("mobius_im_b", "mobius"),
    ("mobius_re_c", "mobius"),
    ("mobius_im_c", "mobius"),
    ("mobius_re_d", "mobius"),
    ("mobius_im_d", "mobius"),
];
/// Position of a variation in [`VARIATIONS`].
///
/// Ordering follows catalog order, so maps keyed by this id iterate the way the catalog
/// lists variations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariationId(u8);

impl VariationId {
    /// The `linear` variation.
    pub const LINEAR: Self = Self(0);

    /// Look up a variation by name.
    pub fn from_name(name: &str) -> Option<Self> {
        VARIATIONS
            .iter()
            .position(|v| *v == name)
            .map(|i| Self(i as u8))
    }

    /// Catalog name of the variation.
    pub fn name(self) -> &'static str {
        VARIATIONS[usize::from(self.0)]
    }

    /// Catalog position.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Every variation in catalog order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..VARIATION_COUNT).map(|i| Self(i as u8))
    }

    /// Variables that parameterize this variation, in catalog order.
    pub fn variables(self) -> impl Iterator<Item = VariableId> {
        let name = self.name();
        VARIABLES
            .iter()
            .enumerate()
            .filter(move |(_, (_, owner))| *owner == name)
            .map(|(i, _)| VariableId(i as u8))
    }
}

/// Position of a variable in [`VARIABLES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableId(u8);

impl VariableId {
    /// Look up a variable by its full attribute name (e.g. `julian_power`).
    pub fn from_name(name: &str) -> Option<Self> {
        VARIABLES
            .iter()
            .position(|(v, _)| *v == name)
            .map(|i| Self(i as u8))
    }

    /// Full attribute name.
    pub fn name(self) -> &'static str {
        VARIABLES[usize::from(self.0)].0
    }

    /// Name of the variation this variable belongs to.
    pub fn variation_name(self) -> &'static str {
        VARIABLES[usize::from(self.0)].1
    }

    /// The variation this variable belongs to.
    pub fn variation(self) -> Option<VariationId> {
        VariationId::from_name(self.variation_name())
    }

    /// Every variable in catalog order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..VARIABLE_COUNT).map(|i| Self(i as u8))
    }
}

macro_rules! impl_name_serde {
    ($ty:ident, $what:literal) => {
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let name = String::deserialize(deserializer)?;
                Self::from_name(&name).ok_or_else(|| {
                    serde::de::Error::custom(format!(concat!("unknown ", $what, " '{}'"), name))
                })
            }
        }
    };
}

impl_name_serde!(VariationId, "variation");
impl_name_serde!(VariableId, "variable");

#[cfg(test)]
#[path = "../../tests/unit/catalog/variations.rs"]
mod tests;

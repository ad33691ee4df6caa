use crate::{
    document::element::Element,
    foundation::{
        error::{FlameError, FlameResult},
        value::{format_number, parse_f64, parse_f64_array},
    },
};

/// Document tag of a palette entry.
pub const COLOR_TAG: &str = "color";

/// Hue, saturation and value, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsv {
    /// Hue as a fraction of a full turn.
    pub h: f64,
    /// Saturation.
    pub s: f64,
    /// Value.
    pub v: f64,
}

/// One palette slot.
///
/// RGB is kept exactly as the source wrote it. The HSV view assumes 0..255 channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    rgb: [f64; 3],
}

impl Color {
    /// Black.
    pub const BLACK: Self = Self { rgb: [0.0; 3] };

    /// Color from raw channels.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { rgb: [r, g, b] }
    }

    /// Raw channels.
    pub fn rgb(&self) -> [f64; 3] {
        self.rgb
    }

    /// Replace all channels.
    pub fn set_rgb(&mut self, rgb: [f64; 3]) {
        self.rgb = rgb;
    }

    /// Red channel.
    pub fn r(&self) -> f64 {
        self.rgb[0]
    }

    /// Green channel.
    pub fn g(&self) -> f64 {
        self.rgb[1]
    }

    /// Blue channel.
    pub fn b(&self) -> f64 {
        self.rgb[2]
    }

    /// Set the red channel.
    pub fn set_r(&mut self, r: f64) {
        self.rgb = [r, self.rgb[1], self.rgb[2]];
    }

    /// Set the green channel.
    pub fn set_g(&mut self, g: f64) {
        self.rgb = [self.rgb[0], g, self.rgb[2]];
    }

    /// Set the blue channel.
    pub fn set_b(&mut self, b: f64) {
        self.rgb = [self.rgb[0], self.rgb[1], b];
    }

    /// HSV view of the channels, scaled down by 255.
    pub fn to_hsv(&self) -> Hsv {
        let [r, g, b] = self.rgb.map(|c| c / 255.0);
        rgb_to_hsv(r, g, b)
    }

    /// Color from HSV, scaled up by 255.
    pub fn from_hsv(hsv: Hsv) -> Self {
        let [r, g, b] = hsv_to_rgb(hsv.h, hsv.s, hsv.v);
        Self::new(r * 255.0, g * 255.0, b * 255.0)
    }

    /// Rewrite the channels from an HSV triple.
    pub fn set_hsv(&mut self, hsv: Hsv) {
        *self = Self::from_hsv(hsv);
    }

    /// Replace hue, keeping saturation and value.
    pub fn set_h(&mut self, h: f64) {
        self.set_hsv(Hsv { h, ..self.to_hsv() });
    }

    /// Replace saturation, keeping hue and value.
    pub fn set_s(&mut self, s: f64) {
        self.set_hsv(Hsv { s, ..self.to_hsv() });
    }

    /// Replace value, keeping hue and saturation.
    pub fn set_v(&mut self, v: f64) {
        self.set_hsv(Hsv { v, ..self.to_hsv() });
    }

    /// Read a `color` element into `(index, color)`.
    pub fn from_element(el: &Element) -> FlameResult<(usize, Self)> {
        let raw = el
            .get("index")
            .ok_or_else(|| FlameError::format("color element has no index"))?;
        let index = parse_f64("index", raw)?;
        if index.fract() != 0.0 || !(0.0..256.0).contains(&index) {
            return Err(FlameError::format(format!(
                "color index '{raw}' is outside 0..=255"
            )));
        }
        let rgb = match el.get("rgb") {
            Some(raw) => parse_f64_array::<3>("rgb", raw)?,
            None => [0.0; 3],
        };
        Ok((index as usize, Self { rgb }))
    }

    /// Write a `color` element for palette slot `index`.
    pub fn to_element(&self, index: usize) -> Element {
        Element::new(COLOR_TAG)
            .with_attr("index", index.to_string())
            .with_attr(
                "rgb",
                self.rgb
                    .iter()
                    .map(|c| format_number(*c))
                    .collect::<Vec<_>>()
                    .join(" "),
            )
    }
}

fn rgb_to_hsv(r: f64, g: f64, b: f64) -> Hsv {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let v = maxc;
    if minc == maxc || maxc == 0.0 {
        return Hsv { h: 0.0, s: 0.0, v };
    }
    let span = maxc - minc;
    let s = span / maxc;
    let rc = (maxc - r) / span;
    let gc = (maxc - g) / span;
    let bc = (maxc - b) / span;
    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    Hsv {
        h: (h / 6.0).rem_euclid(1.0),
        s,
        v,
    }
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    if s == 0.0 {
        return [v, v, v];
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/color.rs"]
mod tests;

//! Affine coefficients and the rotation/scale editing shared by transforms and
//! post-transforms.
//!
//! Raw coefficients are the only stored form. Polar pairs are computed on demand and
//! written back through the setters, so there is never a stale derived copy.

use kurbo::{Affine, Point, Vec2};

use crate::foundation::{
    coords::{Polar, polar, rect},
    error::FlameResult,
    value::{format_numbers, parse_f64_array},
};

/// The six coefficients of an affine map: `x' = xx*x + yx*y + ox`, `y' = xy*x + yy*y + oy`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coefs {
    /// x component of the x basis vector.
    pub xx: f64,
    /// y component of the x basis vector.
    pub xy: f64,
    /// x component of the y basis vector.
    pub yx: f64,
    /// y component of the y basis vector.
    pub yy: f64,
    /// x offset.
    pub ox: f64,
    /// y offset.
    pub oy: f64,
}

/// The three basis/origin vectors of a [`Coefs`] in polar form.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polars {
    /// x basis vector.
    pub x: Polar,
    /// y basis vector.
    pub y: Polar,
    /// Origin.
    pub o: Polar,
}

impl Default for Coefs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Coefs {
    /// The identity map.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Build from the six coefficients in document order.
    pub const fn new(xx: f64, xy: f64, yx: f64, yy: f64, ox: f64, oy: f64) -> Self {
        Self {
            xx,
            xy,
            yx,
            yy,
            ox,
            oy,
        }
    }

    /// Build from an array in document order.
    pub fn from_array(c: [f64; 6]) -> Self {
        Self::new(c[0], c[1], c[2], c[3], c[4], c[5])
    }

    /// Coefficients in document order.
    pub fn to_array(self) -> [f64; 6] {
        [self.xx, self.xy, self.yx, self.yy, self.ox, self.oy]
    }

    /// Parse six whitespace separated numbers.
    pub fn parse(attr: &str, raw: &str) -> FlameResult<Self> {
        Ok(Self::from_array(parse_f64_array::<6>(attr, raw)?))
    }

    /// Space-joined document form.
    pub fn render(self) -> String {
        format_numbers(&self.to_array())
    }

    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    pub fn x(self) -> Vec2 {
        Vec2::new(self.xx, self.xy)
    }

    pub fn y(self) -> Vec2 {
        Vec2::new(self.yx, self.yy)
    }

    pub fn o(self) -> Vec2 {
        Vec2::new(self.ox, self.oy)
    }

    pub fn set_x(&mut self, v: Vec2) {
        self.xx = v.x;
        self.xy = v.y;
    }

    pub fn set_y(&mut self, v: Vec2) {
        self.yx = v.x;
        self.yy = v.y;
    }

    pub fn set_o(&mut self, v: Vec2) {
        self.ox = v.x;
        self.oy = v.y;
    }

    pub fn x_polar(self) -> Polar {
        polar(self.x())
    }

    pub fn y_polar(self) -> Polar {
        polar(self.y())
    }

    pub fn o_polar(self) -> Polar {
        polar(self.o())
    }

    pub fn set_x_polar(&mut self, p: Polar) {
        self.set_x(rect(p));
    }

    pub fn set_y_polar(&mut self, p: Polar) {
        self.set_y(rect(p));
    }

    pub fn set_o_polar(&mut self, p: Polar) {
        self.set_o(rect(p));
    }

    /// All three vectors in polar form.
    pub fn to_polars(self) -> Polars {
        Polars {
            x: self.x_polar(),
            y: self.y_polar(),
            o: self.o_polar(),
        }
    }

    /// Rebuild coefficients from polar form.
    pub fn from_polars(p: Polars) -> Self {
        let mut c = Self::IDENTITY;
        c.set_x_polar(p.x);
        c.set_y_polar(p.y);
        c.set_o_polar(p.o);
        c
    }

    /// Same map as a [`kurbo::Affine`].
    pub fn to_affine(self) -> Affine {
        Affine::new(self.to_array())
    }

    /// Coefficients of a [`kurbo::Affine`].
    pub fn from_affine(a: Affine) -> Self {
        Self::from_array(a.as_coeffs())
    }
}

/// Editing operations shared by anything that owns a [`Coefs`].
pub trait AffineMap {
    /// Current coefficients.
    fn coefs(&self) -> &Coefs;

    /// Mutable coefficients.
    fn coefs_mut(&mut self) -> &mut Coefs;

    /// `true` when this map is chained after another transform's primary map.
    fn is_post(&self) -> bool;

    /// Replace all six coefficients.
    fn set_coefs(&mut self, coefs: Coefs) {
        *self.coefs_mut() = coefs;
    }

    /// Polar view of the coefficients.
    fn polars(&self) -> Polars {
        self.coefs().to_polars()
    }

    /// Replace the coefficients from polar form.
    fn set_polars(&mut self, p: Polars) {
        *self.coefs_mut() = Coefs::from_polars(p);
    }

    /// Multiply both basis lengths by `v`.
    fn scale(&mut self, v: f64) {
        self.scale_x(v);
        self.scale_y(v);
    }

    /// Multiply the x basis length by `v`.
    fn scale_x(&mut self, v: f64) {
        let c = self.coefs_mut();
        let mut p = c.x_polar();
        p.len *= v;
        c.set_x_polar(p);
    }

    /// Multiply the y basis length by `v`.
    fn scale_y(&mut self, v: f64) {
        let c = self.coefs_mut();
        let mut p = c.y_polar();
        p.len *= v;
        c.set_y_polar(p);
    }

    /// Rotate both basis vectors by `deg`.
    fn rotate(&mut self, deg: f64) {
        self.rotate_x(deg);
        self.rotate_y(deg);
    }

    /// Rotate the x basis vector by `deg`.
    fn rotate_x(&mut self, deg: f64) {
        let c = self.coefs_mut();
        let mut p = c.x_polar();
        p.angle_deg += deg;
        c.set_x_polar(p);
    }

    /// Rotate the y basis vector by `deg`.
    fn rotate_y(&mut self, deg: f64) {
        let c = self.coefs_mut();
        let mut p = c.y_polar();
        p.angle_deg += deg;
        c.set_y_polar(p);
    }

    /// Rotate the origin about (0, 0) by `deg`.
    fn orbit(&mut self, deg: f64) {
        let c = self.coefs_mut();
        let mut p = c.o_polar();
        p.angle_deg += deg;
        c.set_o_polar(p);
    }

    /// Rotate the origin about `pivot` by `deg`.
    fn orbit_about(&mut self, deg: f64, pivot: Point) {
        if pivot == Point::ORIGIN {
            self.orbit(deg);
            return;
        }
        let c = self.coefs_mut();
        let pivot = pivot.to_vec2();
        let mut p = polar(c.o() - pivot);
        p.angle_deg += deg;
        c.set_o(rect(p) + pivot);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/coefs.rs"]
mod tests;

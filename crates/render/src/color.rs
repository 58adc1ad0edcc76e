use serde::Serialize;

/// Straight-alpha sRGB color, rendered as a CSS `rgba(...)` string.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn scale_alpha(self, factor: f64) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn css(&self) -> String {
        let a = self.a.clamp(0.0, 1.0);
        format!("rgba({},{},{},{a})", self.r, self.g, self.b)
    }
}

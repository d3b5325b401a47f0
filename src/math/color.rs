use serde::{Deserialize, Serialize};

/// RGBA color with straight (non-premultiplied) alpha, components in [0, 1].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 0xRRGGBB plus a separate alpha, the form palette constants take.
    pub fn from_hex(hex: u32, alpha: f32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
            a: alpha,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Gamma-expanded copy for submission to an sRGB surface. Alpha stays
    /// linear.
    pub fn to_linear_array(self) -> [f32; 4] {
        [
            self.r.powf(2.2),
            self.g.powf(2.2),
            self.b.powf(2.2),
            self.a,
        ]
    }
}

//! Cosmetic body colors and the generator that picks them.
//!
//! Physics never reads a color; it only travels with the body so the renderer
//! can keep each ball's look stable between frames.

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BodyColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BodyColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from HSV. Range: h [0, 360), s [0, 1], v [0, 1].
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let h = h.rem_euclid(360.0);
        let c = v * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_byte = |f: f64| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_byte(r), to_byte(g), to_byte(b))
    }

    /// Normalized channels for GPU upload.
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Pastel color with a random hue (saturation 0.5, value 1).
    pub fn pastel(&mut self) -> BodyColor {
        BodyColor::from_hsv(self.next_f64() * 360.0, 0.5, 1.0)
    }
}

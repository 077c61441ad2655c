//! # Colours
//!
//! Linear RGBA colour with the handful of operations the recolouring rules
//! need, plus the palette gas giants are tinted from.

use serde::{Deserialize, Serialize};

const fn opaque() -> f32 {
    1.0
}

/// RGBA colour, each channel nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    #[serde(default = "opaque")]
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Creates a colour from all four channels.
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque colour.
    #[inline]
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a colour from 8-bit channels.
    #[must_use]
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::new(
            f32::from(rgba[0]) / 255.0,
            f32::from(rgba[1]) / 255.0,
            f32::from(rgba[2]) / 255.0,
            f32::from(rgba[3]) / 255.0,
        )
    }

    /// Quantises to 8-bit channels, clamping out-of-range values.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Returns the same colour with a different alpha.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Componentwise linear interpolation, `t` clamped to `[0, 1]`.
    ///
    /// Exact at both ends: `t = 0` yields `self`, `t = 1` yields `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;
        Self::new(
            self.r * s + other.r * t,
            self.g * s + other.g * t,
            self.b * s + other.b * t,
            self.a * s + other.a * t,
        )
    }

    /// Halves a colour that has any channel above 0.5. Alpha is halved too.
    #[must_use]
    pub fn dark(self) -> Self {
        if self.r > 0.5 || self.g > 0.5 || self.b > 0.5 {
            Self::new(self.r * 0.5, self.g * 0.5, self.b * 0.5, self.a * 0.5)
        } else {
            self
        }
    }

    /// Turns `self` into a multiplier that maps `average` onto `self`.
    ///
    /// Average channels are floored at one 8-bit step so a black texture
    /// does not produce infinite multipliers.
    #[must_use]
    pub fn recolor(self, average: Self) -> Self {
        const FLOOR: f32 = 1.0 / 255.0;
        Self::rgb(
            self.r / average.r.max(FLOOR),
            self.g / average.g.max(FLOOR),
            self.b / average.b.max(FLOOR),
        )
    }

    /// Channelwise complement, alpha included.
    #[must_use]
    pub fn inverted(self) -> Self {
        Self::new(1.0 - self.r, 1.0 - self.g, 1.0 - self.b, 1.0 - self.a)
    }

    /// Largest absolute channel difference to `other`.
    #[must_use]
    pub fn max_difference(self, other: Self) -> f32 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
            .max((self.a - other.a).abs())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Named colours gas giants are re-tinted from.
pub const PALETTE: &[(&str, Color)] = &[
    ("acid green", Color::rgb(0.561, 0.996, 0.035)),
    ("amber", Color::rgb(0.996, 0.702, 0.031)),
    ("aqua marine", Color::rgb(0.180, 0.910, 0.733)),
    ("avocado", Color::rgb(0.565, 0.694, 0.204)),
    ("azure", Color::rgb(0.024, 0.604, 0.953)),
    ("blood orange", Color::rgb(0.996, 0.294, 0.012)),
    ("blue grey", Color::rgb(0.459, 0.553, 0.639)),
    ("brick", Color::rgb(0.627, 0.212, 0.137)),
    ("burnt sienna", Color::rgb(0.690, 0.306, 0.059)),
    ("butterscotch", Color::rgb(0.992, 0.694, 0.278)),
    ("cerulean", Color::rgb(0.016, 0.522, 0.820)),
    ("clay", Color::rgb(0.714, 0.416, 0.314)),
    ("cobalt", Color::rgb(0.118, 0.282, 0.561)),
    ("coral", Color::rgb(0.988, 0.353, 0.314)),
    ("cream", Color::rgb(1.000, 1.000, 0.761)),
    ("dusty rose", Color::rgb(0.753, 0.451, 0.478)),
    ("eggplant", Color::rgb(0.220, 0.031, 0.208)),
    ("faded blue", Color::rgb(0.396, 0.549, 0.733)),
    ("fawn", Color::rgb(0.812, 0.686, 0.482)),
    ("forest", Color::rgb(0.043, 0.333, 0.035)),
    ("gold", Color::rgb(0.859, 0.706, 0.047)),
    ("grey teal", Color::rgb(0.369, 0.608, 0.541)),
    ("ice blue", Color::rgb(0.843, 1.000, 0.996)),
    ("indigo", Color::rgb(0.220, 0.008, 0.510)),
    ("khaki", Color::rgb(0.667, 0.651, 0.384)),
    ("lavender", Color::rgb(0.780, 0.624, 0.937)),
    ("lemon", Color::rgb(0.992, 1.000, 0.322)),
    ("light peach", Color::rgb(1.000, 0.847, 0.694)),
    ("mauve", Color::rgb(0.682, 0.443, 0.506)),
    ("moss", Color::rgb(0.463, 0.600, 0.345)),
    ("mustard", Color::rgb(0.808, 0.702, 0.004)),
    ("ochre", Color::rgb(0.749, 0.565, 0.020)),
    ("pale teal", Color::rgb(0.510, 0.796, 0.698)),
    ("periwinkle", Color::rgb(0.557, 0.510, 0.996)),
    ("pumpkin", Color::rgb(0.882, 0.467, 0.004)),
    ("rust", Color::rgb(0.659, 0.235, 0.035)),
    ("sage", Color::rgb(0.529, 0.682, 0.451)),
    ("sand", Color::rgb(0.886, 0.792, 0.463)),
    ("slate", Color::rgb(0.318, 0.396, 0.447)),
    ("steel blue", Color::rgb(0.353, 0.490, 0.604)),
    ("tan", Color::rgb(0.820, 0.698, 0.435)),
    ("terracotta", Color::rgb(0.792, 0.400, 0.255)),
    ("twilight", Color::rgb(0.306, 0.318, 0.545)),
    ("umber", Color::rgb(0.698, 0.392, 0.000)),
    ("violet", Color::rgb(0.604, 0.055, 0.918)),
    ("wheat", Color::rgb(0.984, 0.867, 0.494)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints_exact() {
        let a = Color::rgb(0.1, 0.7, 0.3);
        let b = Color::new(0.9, 0.2, 0.6, 0.5);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 7.0), b, "t is clamped");
    }

    #[test]
    fn test_dark_only_bright_colors() {
        let dim = Color::rgb(0.2, 0.3, 0.4);
        assert_eq!(dim.dark(), dim);

        let bright = Color::rgb(0.8, 0.2, 0.2);
        let darkened = bright.dark();
        assert!((darkened.r - 0.4).abs() < 1e-6);
        assert!((darkened.g - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_recolor_black_average_is_finite() {
        let multiplier = Color::rgb(0.5, 0.5, 0.5).recolor(Color::BLACK);
        assert!(multiplier.r.is_finite() && multiplier.g.is_finite() && multiplier.b.is_finite());
    }

    #[test]
    fn test_rgba8_round_trip_of_extremes() {
        assert_eq!(Color::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::from_rgba8([0, 0, 0, 255]), Color::BLACK);
        assert_eq!(Color::rgb(2.0, -1.0, 0.5).to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn test_palette_is_usable() {
        assert!(PALETTE.len() > 20);
        for (name, color) in PALETTE {
            assert!(
                (0.0..=1.0).contains(&color.r) && (0.0..=1.0).contains(&color.g) && (0.0..=1.0).contains(&color.b),
                "palette colour {name} out of range"
            );
        }
    }
}

//! # Colour Gradients
//!
//! A sparse, ordered set of colour stops sampled by linear interpolation.
//!
//! ## Sampling Rules
//!
//! - Below the first stop: the first stop's colour (clamp low)
//! - Above the last stop: the last stop's colour (clamp high)
//! - Exactly on a stop: that stop's colour, with no interpolation error
//! - Between two stops: linear interpolation of the two neighbours
//!
//! ## Coincident Stops
//!
//! Stops are keyed by position. Adding a stop at an existing position
//! replaces it (last write wins), so two neighbours never share a position and
//! the interpolation span is always positive.

use crate::color::Color;

/// Default width of generated colour ramps.
pub const RAMP_WIDTH: usize = 512;

/// Deep blue stop of the atmosphere rim gradient.
const RIM_MID: Color = Color::rgb(0.0549, 0.0784, 0.141);
/// Near-black stop of the atmosphere rim gradient.
const RIM_OUTER: Color = Color::rgb(0.0196, 0.0196, 0.0196);

/// Colour gradient with sorted, position-unique stops.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gradient {
    stops: Vec<(f32, Color)>,
}

impl Gradient {
    /// Creates an empty gradient.
    #[must_use]
    pub const fn new() -> Self {
        Self { stops: Vec::new() }
    }

    /// The three-stop rim gradient used for atmosphere rim ramps.
    #[must_use]
    pub fn rim(base: Color) -> Self {
        let mut gradient = Self::new();
        gradient.add(0.0, base);
        gradient.add(0.2, RIM_MID);
        gradient.add(1.0, RIM_OUTER);
        gradient
    }

    /// Inserts a stop, replacing any stop at the same position.
    pub fn add(&mut self, position: f32, color: Color) {
        match self
            .stops
            .binary_search_by(|(p, _)| p.total_cmp(&position))
        {
            Ok(index) => self.stops[index].1 = color,
            Err(index) => self.stops.insert(index, (position, color)),
        }
    }

    /// Number of stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the gradient has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stops in ascending position order.
    #[must_use]
    pub fn stops(&self) -> &[(f32, Color)] {
        &self.stops
    }

    /// Samples the gradient. An empty gradient is black.
    #[must_use]
    pub fn color_at(&self, position: f32) -> Color {
        let mut previous: Option<(f32, Color)> = None;

        for &(b_position, b_color) in &self.stops {
            if b_position >= position {
                let Some((a_position, a_color)) = previous else {
                    return b_color;
                };
                let span = b_position - a_position;
                if b_position == position || span <= 0.0 {
                    return b_color;
                }
                return a_color.lerp(b_color, (position - a_position) / span);
            }
            previous = Some((b_position, b_color));
        }

        previous.map_or(Color::BLACK, |(_, color)| color)
    }

    /// Samples `width` colours, sample `i` taken at `i / width`.
    #[must_use]
    pub fn ramp(&self, width: usize) -> Vec<Color> {
        (0..width)
            .map(|i| self.color_at(i as f32 / width as f32))
            .collect()
    }

    /// Same as [`Gradient::ramp`], as a raw RGBA8 pixel row.
    #[must_use]
    pub fn ramp_rgba8(&self, width: usize) -> Vec<u8> {
        self.ramp(width)
            .into_iter()
            .flat_map(Color::to_rgba8)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_white() -> Gradient {
        let mut gradient = Gradient::new();
        gradient.add(0.0, Color::BLACK);
        gradient.add(1.0, Color::WHITE);
        gradient
    }

    #[test]
    fn test_midpoint_is_grey() {
        let mid = black_white().color_at(0.5);
        let grey = Color::rgb(0.5, 0.5, 0.5);
        assert!(mid.max_difference(grey) < 1e-6, "expected mid grey, got {mid:?}");
    }

    #[test]
    fn test_clamp_outside_range() {
        let mut gradient = Gradient::new();
        let low = Color::rgb(0.2, 0.4, 0.6);
        let high = Color::rgb(0.9, 0.1, 0.3);
        gradient.add(0.25, low);
        gradient.add(0.75, high);

        assert_eq!(gradient.color_at(-10.0), low);
        assert_eq!(gradient.color_at(0.0), low);
        assert_eq!(gradient.color_at(0.9), high);
        assert_eq!(gradient.color_at(10.0), high);
    }

    #[test]
    fn test_exact_stop_has_no_error() {
        let mut gradient = Gradient::new();
        let stops = [
            (0.0, Color::rgb(0.1, 0.2, 0.3)),
            (0.2, Color::rgb(0.0549, 0.0784, 0.141)),
            (0.7, Color::rgb(0.33, 0.66, 0.99)),
            (1.0, Color::rgb(0.0196, 0.0196, 0.0196)),
        ];
        for (p, c) in stops {
            gradient.add(p, c);
        }
        for (p, c) in stops {
            assert_eq!(gradient.color_at(p), c, "stop at {p} must be exact");
        }
    }

    #[test]
    fn test_coincident_stop_last_write_wins() {
        let mut gradient = black_white();
        let red = Color::rgb(1.0, 0.0, 0.0);
        gradient.add(1.0, red);

        assert_eq!(gradient.len(), 2, "duplicate position must not add a stop");
        assert_eq!(gradient.color_at(1.0), red);
        assert_eq!(gradient.color_at(2.0), red);
        let mid = gradient.color_at(0.5);
        assert!((mid.r - 0.5).abs() < 1e-6 && mid.g.abs() < 1e-6);
    }

    #[test]
    fn test_stops_stay_sorted() {
        let mut gradient = Gradient::new();
        for p in [0.9, 0.1, 0.5, -0.3, 0.7] {
            gradient.add(p, Color::WHITE);
        }
        let positions: Vec<f32> = gradient.stops().iter().map(|(p, _)| *p).collect();
        assert_eq!(positions, vec![-0.3, 0.1, 0.5, 0.7, 0.9]);
    }

    #[test]
    fn test_empty_gradient_is_black() {
        assert_eq!(Gradient::new().color_at(0.3), Color::BLACK);
    }

    #[test]
    fn test_rim_ramp() {
        let base = Color::rgb(0.8, 0.6, 0.4);
        let ramp = Gradient::rim(base).ramp(RAMP_WIDTH);
        assert_eq!(ramp.len(), RAMP_WIDTH);
        assert_eq!(ramp[0], base);
        // Last sample sits just below 1.0, already close to the outer stop
        assert!(ramp[RAMP_WIDTH - 1].max_difference(RIM_OUTER) < 1e-3);

        let bytes = Gradient::rim(base).ramp_rgba8(RAMP_WIDTH);
        assert_eq!(bytes.len(), RAMP_WIDTH * 4);
        assert_eq!(&bytes[0..4], &base.to_rgba8());
    }
}

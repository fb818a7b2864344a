//! Linear color ramps used by biome and ocean coloring.

use glam::Vec4;

/// One keyed color in a [`Gradient`], positioned in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position of the stop along the ramp, clamped to `[0, 1]`.
    pub position: f32,
    /// Linear RGBA color at this position.
    pub color: Vec4,
}

impl GradientStop {
    /// Construct a stop, clamping `position` to `[0, 1]`.
    #[must_use]
    pub fn new(position: f32, color: Vec4) -> Self {
        Self {
            position: position.clamp(0.0, 1.0),
            color,
        }
    }
}

/// An ordered set of color stops sampled by linear interpolation.
///
/// Sampling clamps to the first/last stop outside their positions. A gradient
/// always holds at least one stop: constructing from an empty list yields a
/// single opaque-black stop so sampling is total.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    stops: Vec<GradientStop>,
}

impl Gradient {
    /// Build a gradient from stops, sorting them by position.
    #[must_use]
    pub fn new(mut stops: Vec<GradientStop>) -> Self {
        if stops.is_empty() {
            stops.push(GradientStop::new(0.0, Vec4::new(0.0, 0.0, 0.0, 1.0)));
        }
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { stops }
    }

    /// A single-color gradient.
    #[must_use]
    pub fn solid(color: Vec4) -> Self {
        Self::new(vec![GradientStop::new(0.0, color)])
    }

    /// Sample the ramp at `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn evaluate(&self, t: f32) -> Vec4 {
        let t = t.clamp(0.0, 1.0);
        let first = &self.stops[0];
        if t <= first.position {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if t <= b.position {
                let span = b.position - a.position;
                if span <= f32::EPSILON {
                    return b.color;
                }
                let local = (t - a.position) / span;
                return a.color.lerp(b.color, local);
            }
        }
        self.stops[self.stops.len() - 1].color
    }

    /// The stops of this gradient, sorted by position.
    #[must_use]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }
}

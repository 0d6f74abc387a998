//! Runtime-tunable behavior parameters.
//!
//! Angles are stored in radians.  The engine applies no range checks: a
//! negative decay or sensing distance simply produces unusual numerics on the
//! next step.  [`ParamBounds`] is the opt-in policy for callers (sliders, config
//! files) that want values kept inside sane ranges.

/// Parameters read by every step.  Mutating them between steps affects only
/// subsequent steps.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimParams {
    /// Distance travelled per step.
    pub speed: f64,
    /// Distance from the agent to each sensor.
    pub sensing_dist: f64,
    /// Angular offset of the left/right sensors, radians.
    pub sensing_angle: f64,
    /// Heading change per turn, radians.
    pub heading_rate: f64,
    /// Gaussian blur sigma applied to the trail map each step.
    pub diffusion_sigma: f64,
    /// Multiplicative decay applied to both fields each step.
    pub decay_factor: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            sensing_dist: 3.0,
            sensing_angle: 0.7,
            heading_rate: 0.5,
            diffusion_sigma: 0.2,
            decay_factor: 0.95,
        }
    }
}

impl SimParams {
    /// Long sensing reach with gentle turns; forms sparse, long-range
    /// networks.
    pub fn long_range() -> Self {
        Self {
            sensing_dist: 27.0,
            heading_rate: 0.1,
            ..Self::default()
        }
    }

    /// Sensor offsets `[forward, left, right]` relative to heading.
    #[inline]
    pub fn sensor_offsets(&self) -> [f64; 3] {
        [0.0, self.sensing_angle, -self.sensing_angle]
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_sensing_dist(mut self, dist: f64) -> Self {
        self.sensing_dist = dist;
        self
    }

    pub fn with_sensing_angle_deg(mut self, degrees: f64) -> Self {
        self.sensing_angle = degrees.to_radians();
        self
    }

    pub fn with_heading_rate_deg(mut self, degrees: f64) -> Self {
        self.heading_rate = degrees.to_radians();
        self
    }

    pub fn with_diffusion_sigma(mut self, sigma: f64) -> Self {
        self.diffusion_sigma = sigma;
        self
    }

    pub fn with_decay_factor(mut self, decay: f64) -> Self {
        self.decay_factor = decay;
        self
    }
}

// ── ParamBounds ───────────────────────────────────────────────────────────────

/// Closed interval `[min, max]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `v` into the interval.  NaN maps to `min`.
    #[inline]
    pub fn clamp(self, v: f64) -> f64 {
        v.max(self.min).min(self.max)
    }

    #[inline]
    pub fn contains(self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Explicit range policy for [`SimParams`].  Never applied by the engine.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamBounds {
    pub speed: ParamRange,
    pub sensing_dist: ParamRange,
    /// Radians.
    pub sensing_angle: ParamRange,
    /// Radians.
    pub heading_rate: ParamRange,
    pub diffusion_sigma: ParamRange,
    pub decay_factor: ParamRange,
    /// Display contrast; carried here so a control panel has one table.
    pub contrast: ParamRange,
}

impl ParamBounds {
    /// Ranges of the interactive control panel.
    pub const SLIDER: ParamBounds = ParamBounds {
        speed: ParamRange::new(0.0, 5.0),
        sensing_dist: ParamRange::new(0.0, 100.0),
        sensing_angle: ParamRange::new(
            10.0 * std::f64::consts::PI / 180.0,
            170.0 * std::f64::consts::PI / 180.0,
        ),
        heading_rate: ParamRange::new(0.0, std::f64::consts::PI),
        diffusion_sigma: ParamRange::new(0.0, 3.0),
        decay_factor: ParamRange::new(0.5, 1.0),
        contrast: ParamRange::new(0.1, 10.0),
    };

    /// Copy of `params` with every field clamped into its range.
    pub fn clamp(&self, params: &SimParams) -> SimParams {
        SimParams {
            speed: self.speed.clamp(params.speed),
            sensing_dist: self.sensing_dist.clamp(params.sensing_dist),
            sensing_angle: self.sensing_angle.clamp(params.sensing_angle),
            heading_rate: self.heading_rate.clamp(params.heading_rate),
            diffusion_sigma: self.diffusion_sigma.clamp(params.diffusion_sigma),
            decay_factor: self.decay_factor.clamp(params.decay_factor),
        }
    }

    /// `true` if every field of `params` is inside its range.
    pub fn contains(&self, params: &SimParams) -> bool {
        self.speed.contains(params.speed)
            && self.sensing_dist.contains(params.sensing_dist)
            && self.sensing_angle.contains(params.sensing_angle)
            && self.heading_rate.contains(params.heading_rate)
            && self.diffusion_sigma.contains(params.diffusion_sigma)
            && self.decay_factor.contains(params.decay_factor)
    }
}

//! Three-sensor array: forward, left and right probes ahead of every agent.
//!
//! Stored as `[Vec<f64>; 3]` per quantity (sensor-major, 3 × N) so each
//! sensor's row is a contiguous slice the engine can sweep or split across
//! threads.

/// One of the three probes.  The discriminant is the row index in
/// [`SensorArray`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sensor {
    Forward = 0,
    Left    = 1,
    Right   = 2,
}

impl Sensor {
    pub const ALL: [Sensor; 3] = [Sensor::Forward, Sensor::Left, Sensor::Right];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Sensor positions and the trail values sampled there, 3 × N.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorArray {
    /// Row coordinate of each probe.  Not wrapped: the engine reduces indices
    /// modulo the field when sampling, and overlays draw the raw positions.
    pub x: [Vec<f64>; 3],

    /// Column coordinate of each probe.
    pub y: [Vec<f64>; 3],

    /// Trail value at the nearest cell to each probe.
    pub readings: [Vec<f64>; 3],
}

impl SensorArray {
    /// Zeroed array for `count` agents.
    pub fn new(count: usize) -> Self {
        Self {
            x:        std::array::from_fn(|_| vec![0.0; count]),
            y:        std::array::from_fn(|_| vec![0.0; count]),
            readings: std::array::from_fn(|_| vec![0.0; count]),
        }
    }

    /// Number of agents covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.readings[0].len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `[forward, left, right]` readings for one agent.
    #[inline]
    pub fn readings_for(&self, agent: usize) -> [f64; 3] {
        [
            self.readings[0][agent],
            self.readings[1][agent],
            self.readings[2][agent],
        ]
    }

    /// Position of `sensor` for one agent.
    #[inline]
    pub fn position(&self, sensor: Sensor, agent: usize) -> (f64, f64) {
        (self.x[sensor.index()][agent], self.y[sensor.index()][agent])
    }

    /// Zero all readings, keeping positions.
    pub fn clear_readings(&mut self) {
        for row in &mut self.readings {
            row.fill(0.0);
        }
    }
}

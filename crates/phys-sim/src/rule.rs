//! Heading-update rule.
//!
//! A strict hierarchy over the three sensor readings:
//!
//! 1. forward strictly greatest → keep heading
//! 2. left > right              → turn left (`+rate`)
//! 3. right > left              → turn right (`-rate`)
//! 4. left == right             → random turn, one shared sign per step
//!
//! Comparisons are exact.  NaN readings compare false everywhere and fall
//! through to the random branch.

/// Outcome of the rule for one agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    Forward,
    Left,
    Right,
    Random,
}

impl Turn {
    /// Classify one agent's `[forward, left, right]` readings.
    #[inline]
    pub fn decide(forward: f64, left: f64, right: f64) -> Turn {
        if forward > left && forward > right {
            Turn::Forward
        } else if left > right {
            Turn::Left
        } else if right > left {
            Turn::Right
        } else {
            Turn::Random
        }
    }

    /// New heading after applying this turn.  `sign` is the step's shared
    /// random sign (`±1.0`) and is only read by `Turn::Random`.
    #[inline]
    pub fn apply(self, heading: f64, rate: f64, sign: f64) -> f64 {
        match self {
            Turn::Forward => heading,
            Turn::Left    => heading + rate,
            Turn::Right   => heading - rate,
            Turn::Random  => heading + rate * sign,
        }
    }
}

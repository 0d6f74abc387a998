//! The `Engine` struct and its step pipeline.

use std::time::Instant;

use log::{Level, debug, info, log_enabled, warn};
use phys_agent::{AgentStore, SensorArray};
use phys_core::grid::{out_of_range, wrap_coord};
use phys_core::{GridDims, SimConfig, SimParams, SimRng, Step};
use phys_field::{Field, PeriodicBlur, bin_points_into};

use crate::{EngineBuilder, SimObserver, SimResult, Turn};

/// Amount each agent lays down per step.
pub const DEPOSIT_PER_STEP: f64 = 1.0;

// ── Per-agent kernels ─────────────────────────────────────────────────────────

/// Point `dist` ahead of `(x, y)` along `angle`.  Not wrapped.
#[inline]
fn probe(x: f64, y: f64, angle: f64, dist: f64) -> (f64, f64) {
    (x + dist * angle.cos(), y + dist * angle.sin())
}

/// Advance one coordinate by `delta` on an axis of length `dim`, returning
/// `(new, last)`.  `last` is the pre-move value unless the move crossed an
/// edge, in which case it is the wrapped value.
#[inline]
fn advance_axis(v: f64, delta: f64, dim: f64) -> (f64, f64) {
    let moved = v + delta;
    if out_of_range(moved, dim) {
        let wrapped = wrap_coord(moved, dim);
        (wrapped, wrapped)
    } else {
        (moved, v)
    }
}

#[inline]
fn move_agent(
    x:       &mut f64,
    y:       &mut f64,
    last_x:  &mut f64,
    last_y:  &mut f64,
    heading: f64,
    speed:   f64,
    dims:    GridDims,
) {
    let (nx, lx) = advance_axis(*x, heading.cos() * speed, dims.height as f64);
    let (ny, ly) = advance_axis(*y, heading.sin() * speed, dims.width as f64);
    *x = nx;
    *y = ny;
    *last_x = lx;
    *last_y = ly;
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// The simulation engine.
///
/// Owns the agent population, the sensor array, the behavior-driving
/// `trail_map` and the never-clipped `history` field.  One call to
/// [`step`](Self::step) runs the full pipeline:
///
/// 1. **Sense**: place three sensors ahead of every agent and sample the
///    trail at the nearest cell.
/// 2. **Rotate**: apply [`Turn::decide`] to the readings.
/// 3. **Move**: advance along the new heading and wrap onto the torus.
/// 4. **Deposit**: bin positions into cells, add counts to both fields.
/// 5. **Diffuse and decay**: periodic Gaussian blur of the trail, decay
///    both fields, clamp the trail to `[0, 1]`.
///
/// Every mutating method takes `&mut self`, so a step can never overlap a
/// parameter change or a read of half-updated state.
///
/// Create via [`EngineBuilder`] or [`Engine::new`].
pub struct Engine {
    pub(crate) config:  SimConfig,
    pub(crate) dims:    GridDims,
    pub(crate) params:  SimParams,
    pub(crate) agents:  AgentStore,
    pub(crate) sensors: SensorArray,
    pub(crate) trail:   Field,
    pub(crate) history: Field,
    /// Per-step occupancy counts, reused across steps.
    pub(crate) counts:  Field,
    pub(crate) blur:    PeriodicBlur,
    pub(crate) rng:     SimRng,
    pub(crate) step:    Step,
}

impl Engine {
    /// `agent_count` agents on a `height × width` field, seeded with `seed`.
    pub fn new(
        agent_count: usize,
        height:      usize,
        width:       usize,
        params:      SimParams,
        seed:        u64,
    ) -> SimResult<Self> {
        EngineBuilder::new(SimConfig::new(agent_count, height, width, seed))
            .params(params)
            .build()
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Run from the current step to `config.end_step()`.
    ///
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.step < self.config.end_step() {
            self.advance(observer);
        }
        observer.on_sim_end(self.step);
        Ok(())
    }

    /// Run exactly `n` steps from the current position (ignores `end_step`
    /// and does not call `on_sim_end`).
    ///
    /// Drivers that inject an external texture between steps call this with
    /// `n = 1` after each `deposit_external`.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.advance(observer);
        }
        Ok(())
    }

    fn advance<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.step;
        observer.on_step_start(now);
        self.step();
        observer.on_step_end(now, self);
        if now.is_multiple_of(self.config.output_interval_steps) {
            observer.on_snapshot(now, &self.agents, &self.sensors);
        }
    }

    /// One full pipeline pass: sense, rotate, move, deposit, diffuse and
    /// decay.  Increments the step counter.
    pub fn step(&mut self) {
        let started = log_enabled!(Level::Debug).then(Instant::now);

        self.sense();
        self.rotate();
        self.move_agents();
        self.deposit(DEPOSIT_PER_STEP);
        self.diffuse_and_decay();

        if let Some(started) = started {
            debug!(
                "step {}, n = {}, history max: {:.6}, time: {:.3}ms",
                self.step.0,
                self.agents.count,
                self.history.max(),
                started.elapsed().as_secs_f64() * 1e3,
            );
        }
        self.step = self.step.next();
    }

    // ── Pipeline stages ───────────────────────────────────────────────────

    /// Recompute sensor positions and sample the trail at each of them.
    pub fn sense(&mut self) {
        self.update_sensor_positions();

        let trail = &self.trail;
        for s in 0..3 {
            let (xs, ys) = (&self.sensors.x[s], &self.sensors.y[s]);
            let readings = &mut self.sensors.readings[s];

            #[cfg(not(feature = "parallel"))]
            {
                for (i, r) in readings.iter_mut().enumerate() {
                    *r = trail.sample(xs[i], ys[i]);
                }
            }

            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;
                (readings.par_iter_mut(), xs.par_iter(), ys.par_iter())
                    .into_par_iter()
                    .for_each(|(r, &px, &py)| *r = trail.sample(px, py));
            }
        }
    }

    /// Place the forward, left and right sensors `sensing_dist` ahead of each
    /// agent.  Readings are left as they are.
    pub(crate) fn update_sensor_positions(&mut self) {
        let dist = self.params.sensing_dist;
        let agents = &self.agents;

        for (s, offset) in self.params.sensor_offsets().into_iter().enumerate() {
            let sx = &mut self.sensors.x[s];
            let sy = &mut self.sensors.y[s];

            #[cfg(not(feature = "parallel"))]
            {
                for i in 0..agents.count {
                    let (px, py) = probe(agents.x[i], agents.y[i], agents.heading[i] + offset, dist);
                    sx[i] = px;
                    sy[i] = py;
                }
            }

            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;
                (
                    sx.par_iter_mut(),
                    sy.par_iter_mut(),
                    agents.x.par_iter(),
                    agents.y.par_iter(),
                    agents.heading.par_iter(),
                )
                    .into_par_iter()
                    .for_each(|(px, py, &x, &y, &h)| {
                        (*px, *py) = probe(x, y, h + offset, dist);
                    });
            }
        }
    }

    /// Update headings from the current readings, drawing this step's
    /// tie-break sign from the engine RNG.
    ///
    /// The sign is drawn whether or not any agent ties.
    pub fn rotate(&mut self) {
        let sign = self.rng.sign();
        self.rotate_with_sign(sign);
    }

    /// [`rotate`](Self::rotate) with an explicit tie-break sign (`±1.0`).
    /// Consumes no randomness.
    pub fn rotate_with_sign(&mut self, sign: f64) {
        let rate = self.params.heading_rate;
        let [forward, left, right] = &self.sensors.readings;
        for (i, heading) in self.agents.heading.iter_mut().enumerate() {
            *heading = Turn::decide(forward[i], left[i], right[i]).apply(*heading, rate, sign);
        }
    }

    /// Advance every agent by `speed` along its heading and wrap onto the
    /// torus.  Records `last_x`/`last_y`.
    pub fn move_agents(&mut self) {
        let speed = self.params.speed;
        let dims = self.dims;
        let AgentStore { x, y, heading, last_x, last_y, .. } = &mut self.agents;

        #[cfg(not(feature = "parallel"))]
        {
            for i in 0..x.len() {
                move_agent(&mut x[i], &mut y[i], &mut last_x[i], &mut last_y[i], heading[i], speed, dims);
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (
                x.par_iter_mut(),
                y.par_iter_mut(),
                last_x.par_iter_mut(),
                last_y.par_iter_mut(),
                heading.par_iter(),
            )
                .into_par_iter()
                .for_each(|(x, y, lx, ly, &h)| move_agent(x, y, lx, ly, h, speed, dims));
        }
    }

    /// Add `amount` per agent to both fields at each agent's cell.
    pub fn deposit(&mut self, amount: f64) {
        bin_points_into(&mut self.counts, &self.agents.x, &self.agents.y);
        let counts = self.counts.as_slice();
        let trail = self.trail.as_mut_slice();
        let history = self.history.as_mut_slice();
        for ((t, h), &c) in trail.iter_mut().zip(history.iter_mut()).zip(counts) {
            if c != 0.0 {
                *t += c * amount;
                *h += c * amount;
            }
        }
    }

    /// Add an externally supplied texture (e.g. food sources) into the trail
    /// map.  History is not touched.
    ///
    /// On a shape mismatch the trail is left unchanged.
    pub fn deposit_external(&mut self, texture: &Field) -> SimResult<()> {
        if let Err(e) = self.trail.add_field(texture) {
            warn!("rejected external deposit: {e}");
            return Err(e.into());
        }
        Ok(())
    }

    /// Blur the trail, decay both fields, clamp the trail into `[0, 1]`.
    pub fn diffuse_and_decay(&mut self) {
        self.blur.apply(&mut self.trail, self.params.diffusion_sigma);
        self.trail.scale(self.params.decay_factor);
        self.history.scale(self.params.decay_factor);
        self.trail.clamp(0.0, 1.0);
    }

    // ── Control ───────────────────────────────────────────────────────────

    /// Redraw agent state, zero both fields and the sensor readings, and
    /// recompute sensor positions.  Parameters, dimensions, agent count and
    /// the step counter are kept.  The RNG stream continues.
    pub fn reset(&mut self) {
        self.agents.randomize(self.dims, &mut self.rng);
        self.sensors.clear_readings();
        self.trail.clear();
        self.history.clear();
        self.update_sensor_positions();
        info!("engine reset at step {}: {} agents redrawn", self.step.0, self.agents.count);
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.params.speed = speed;
    }

    pub fn set_sensing_dist(&mut self, dist: f64) {
        self.params.sensing_dist = dist;
    }

    /// Degrees in, radians stored.
    pub fn set_sensing_angle_deg(&mut self, degrees: f64) {
        self.params.sensing_angle = degrees.to_radians();
    }

    /// Degrees in, radians stored.
    pub fn set_heading_rate_deg(&mut self, degrees: f64) {
        self.params.heading_rate = degrees.to_radians();
    }

    pub fn set_diffusion_sigma(&mut self, sigma: f64) {
        self.params.diffusion_sigma = sigma;
    }

    pub fn set_decay_factor(&mut self, decay: f64) {
        self.params.decay_factor = decay;
    }

    /// Replace all parameters at once.
    pub fn set_params(&mut self, params: SimParams) {
        self.params = params;
    }

    // ── Observation ───────────────────────────────────────────────────────

    #[inline]
    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    #[inline]
    pub fn sensors(&self) -> &SensorArray {
        &self.sensors
    }

    /// The behavior-driving field, in `[0, 1]` after every step.
    #[inline]
    pub fn trail_map(&self) -> &Field {
        &self.trail
    }

    /// Accumulated deposits with the same decay as the trail but no blur and
    /// no clipping.
    #[inline]
    pub fn history(&self) -> &Field {
        &self.history
    }

    /// Number of steps executed so far.
    #[inline]
    pub fn step_count(&self) -> Step {
        self.step
    }

    #[inline]
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

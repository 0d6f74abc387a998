//! Integration tests for phys-sim.

use phys_core::{SimConfig, SimParams, Step};

use crate::{Engine, EngineBuilder, NoopObserver, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One agent at `(x, y)` with `heading` on a 10 × 10 field.
fn single_agent(x: f64, y: f64, heading: f64, params: SimParams) -> Engine {
    EngineBuilder::new(SimConfig::new(1, 10, 10, 7))
        .params(params)
        .initial_agents(vec![x], vec![y], vec![heading])
        .build()
        .unwrap()
}

fn random_engine(n: usize, seed: u64) -> Engine {
    Engine::new(n, 32, 48, SimParams::default(), seed).unwrap()
}

/// Decay 1 and no blur: deposits accumulate untouched.
fn lossless() -> SimParams {
    SimParams::default().with_decay_factor(1.0).with_diffusion_sigma(0.0)
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;
    use phys_agent::AgentError;
    use phys_core::PhysError;

    #[test]
    fn builds_with_defaults() {
        let engine = random_engine(200, 1);
        assert_eq!(engine.agents().count, 200);
        assert_eq!(engine.sensors().len(), 200);
        assert_eq!(engine.dims().height, 32);
        assert_eq!(engine.dims().width, 48);
        assert_eq!(engine.step_count(), Step::ZERO);
        assert_eq!(*engine.params(), SimParams::default());
        assert_eq!(engine.trail_map().sum(), 0.0);
        assert_eq!(engine.history().sum(), 0.0);
    }

    #[test]
    fn zero_agents_rejected() {
        let result = Engine::new(0, 10, 10, SimParams::default(), 0);
        assert_eq!(result.err(), Some(SimError::Core(PhysError::InvalidAgentCount)));
    }

    #[test]
    fn zero_dimension_rejected() {
        let result = Engine::new(5, 0, 10, SimParams::default(), 0);
        assert_eq!(
            result.err(),
            Some(SimError::Core(PhysError::InvalidDimensions { height: 0, width: 10 }))
        );
    }

    #[test]
    fn initial_agent_length_mismatch_rejected() {
        let result = EngineBuilder::new(SimConfig::new(2, 10, 10, 0))
            .initial_agents(vec![1.0], vec![1.0, 2.0], vec![0.0, 0.0])
            .build();
        assert_eq!(
            result.err(),
            Some(SimError::Agent(AgentError::AgentCountMismatch {
                expected: 2,
                got:      1,
                what:     "x positions",
            }))
        );
    }

    #[test]
    fn sensors_placed_at_construction() {
        let engine = single_agent(5.0, 5.0, 0.0, SimParams::default());
        let s = engine.sensors();
        // Forward sensor is sensing_dist straight ahead along x.
        assert!((s.x[0][0] - 8.0).abs() < 1e-12);
        assert!((s.y[0][0] - 5.0).abs() < 1e-12);
        // Left and right are mirror images across the heading.
        assert!((s.x[1][0] - s.x[2][0]).abs() < 1e-12);
        assert!((s.y[1][0] - 5.0 + (s.y[2][0] - 5.0)).abs() < 1e-12);
        assert!(s.y[1][0] > 5.0);
        assert_eq!(s.readings_for(0), [0.0; 3]);
    }
}

// ── Rule ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rule_tests {
    use crate::Turn;

    #[test]
    fn decide_table() {
        assert_eq!(Turn::decide(1.0, 0.0, 0.0), Turn::Forward);
        assert_eq!(Turn::decide(0.5, 0.5, 0.0), Turn::Left);
        assert_eq!(Turn::decide(0.0, 0.2, 0.1), Turn::Left);
        assert_eq!(Turn::decide(0.0, 0.0, 1.0), Turn::Right);
        assert_eq!(Turn::decide(0.0, 0.0, 0.0), Turn::Random);
        assert_eq!(Turn::decide(1.0, 1.0, 1.0), Turn::Random);
        assert_eq!(Turn::decide(0.2, 0.5, 0.5), Turn::Random);
    }

    #[test]
    fn nan_falls_through_to_random() {
        assert_eq!(Turn::decide(f64::NAN, 0.0, 0.0), Turn::Random);
        assert_eq!(Turn::decide(0.0, f64::NAN, 0.0), Turn::Random);
    }

    #[test]
    fn apply_turns() {
        assert_eq!(Turn::Forward.apply(1.0, 0.5, -1.0), 1.0);
        assert_eq!(Turn::Left.apply(1.0, 0.5, -1.0), 1.5);
        assert_eq!(Turn::Right.apply(1.0, 0.5, 1.0), 0.5);
        assert_eq!(Turn::Random.apply(1.0, 0.5, 1.0), 1.5);
        assert_eq!(Turn::Random.apply(1.0, 0.5, -1.0), 0.5);
    }
}

// ── Pipeline stages ───────────────────────────────────────────────────────────

#[cfg(test)]
mod stage_tests {
    use super::*;
    use phys_core::GridDims;
    use phys_field::{Field, FieldError};

    use crate::SimError;

    #[test]
    fn forward_reading_keeps_heading() {
        let mut engine = single_agent(5.0, 5.0, 0.0, SimParams::default());
        engine.trail.set(8, 5, 0.5);
        engine.sense();
        assert_eq!(engine.sensors().readings_for(0), [0.5, 0.0, 0.0]);
        engine.rotate_with_sign(1.0);
        assert_eq!(engine.agents().heading[0], 0.0);
    }

    #[test]
    fn stronger_left_turns_left() {
        // Left sensor sits near (7.29, 6.93) → cell (7, 7); right → (7, 3).
        let mut engine = single_agent(5.0, 5.0, 0.0, SimParams::default());
        engine.trail.set(7, 7, 0.3);
        engine.sense();
        assert_eq!(engine.sensors().readings_for(0), [0.0, 0.3, 0.0]);
        engine.rotate_with_sign(-1.0);
        assert_eq!(engine.agents().heading[0], 0.5);
    }

    #[test]
    fn stronger_right_turns_right() {
        let mut engine = single_agent(5.0, 5.0, 0.0, SimParams::default());
        engine.trail.set(7, 3, 0.3);
        engine.sense();
        engine.rotate_with_sign(1.0);
        assert_eq!(engine.agents().heading[0], -0.5);
    }

    #[test]
    fn sensing_wraps_far_coordinates() {
        // Forward sensor at x = 5 + 23 = 28 → row 8 on a 10-row field.
        let mut engine = single_agent(5.0, 5.0, 0.0, SimParams::default().with_sensing_dist(23.0));
        engine.trail.set(8, 5, 0.75);
        engine.sense();
        assert_eq!(engine.sensors().readings[0][0], 0.75);
    }

    #[test]
    fn tie_turns_by_heading_rate_then_moves_along_new_heading() {
        let mut engine = single_agent(5.0, 5.0, 0.0, SimParams::default());
        engine.step();

        let h = engine.agents().heading[0];
        assert_eq!(h.abs(), 0.5);
        assert!((engine.agents().x[0] - (5.0 + h.cos())).abs() < 1e-12);
        assert!((engine.agents().y[0] - (5.0 + h.sin())).abs() < 1e-12);
        assert_eq!(engine.agents().last_x[0], 5.0);
        assert_eq!(engine.agents().last_y[0], 5.0);
        assert_eq!(engine.step_count(), Step(1));
    }

    #[test]
    fn explicit_sign_on_tie() {
        let mut engine = single_agent(5.0, 5.0, 0.0, SimParams::default());
        engine.rotate_with_sign(-1.0);
        assert_eq!(engine.agents().heading[0], -0.5);
        engine.rotate_with_sign(1.0);
        assert_eq!(engine.agents().heading[0], 0.0);
    }

    #[test]
    fn tied_agents_share_one_sign_per_step() {
        let mut engine = random_engine(200, 13);
        for _ in 0..4 {
            engine.sense();
            let before = engine.agents().heading.clone();
            engine.rotate();
            let deltas: Vec<f64> = engine.agents().heading.iter().zip(&before).map(|(h, b)| h - b).collect();
            assert!((deltas[0].abs() - 0.5).abs() < 1e-12, "delta {}", deltas[0]);
            assert!(deltas.iter().all(|d| (d - deltas[0]).abs() < 1e-12));
        }
    }

    #[test]
    fn wrapped_axis_records_post_wrap_last_position() {
        let mut engine = EngineBuilder::new(SimConfig::new(2, 10, 10, 0))
            .initial_agents(vec![9.5, 2.0], vec![5.0, 2.0], vec![0.0, 0.0])
            .build()
            .unwrap();
        engine.move_agents();

        let agents = engine.agents();
        assert_eq!(agents.x[0], 0.5);
        assert_eq!(agents.last_x[0], 0.5);
        assert_eq!(agents.y[0], 5.0);
        assert_eq!(agents.last_y[0], 5.0);

        assert_eq!(agents.x[1], 3.0);
        assert_eq!(agents.last_x[1], 2.0);
    }

    #[test]
    fn negative_move_wraps_to_far_edge() {
        let mut engine = single_agent(0.25, 5.0, std::f64::consts::PI, SimParams::default());
        engine.move_agents();
        let x = engine.agents().x[0];
        assert!((x - 9.25).abs() < 1e-12);
        assert_eq!(engine.agents().last_x[0], x);
    }

    #[test]
    fn deposit_lands_in_nearest_cell() {
        let mut engine = single_agent(2.4, 7.6, 0.0, SimParams::default());
        engine.deposit(1.0);
        assert_eq!(engine.trail_map().get(2, 8), 1.0);
        assert_eq!(engine.trail_map().sum(), 1.0);
        assert_eq!(engine.history().get(2, 8), 1.0);
        assert_eq!(engine.history().sum(), 1.0);

        engine.deposit(2.5);
        assert_eq!(engine.history().get(2, 8), 3.5);
    }

    #[test]
    fn coincident_agents_accumulate() {
        let mut engine = EngineBuilder::new(SimConfig::new(3, 10, 10, 0))
            .initial_agents(vec![4.0, 4.2, 3.6], vec![1.0, 0.9, 1.4], vec![0.0; 3])
            .build()
            .unwrap();
        engine.deposit(0.5);
        assert_eq!(engine.history().get(4, 1), 1.5);
        assert_eq!(engine.history().sum(), 1.5);
    }

    #[test]
    fn external_deposit_touches_trail_only() {
        let mut engine = random_engine(10, 3);
        let dims = engine.dims();
        let food = Field::from_fn(dims, |_, _| 0.25);
        engine.deposit_external(&food).unwrap();
        assert_eq!(engine.trail_map().sum(), 0.25 * dims.cells() as f64);
        assert_eq!(engine.history().sum(), 0.0);
    }

    #[test]
    fn mismatched_external_deposit_rejected() {
        let mut engine = random_engine(10, 3);
        engine.step();
        let before = engine.trail_map().clone();

        let food = Field::zeros(GridDims::new(5, 5).unwrap());
        let result = engine.deposit_external(&food);
        assert_eq!(
            result.unwrap_err(),
            SimError::Field(FieldError::ShapeMismatch {
                expected_height: 32,
                expected_width:  48,
                got_height:      5,
                got_width:       5,
            })
        );
        assert_eq!(*engine.trail_map(), before);
    }

    #[test]
    fn diffuse_and_decay_clamps_trail_not_history() {
        let mut engine = single_agent(5.0, 5.0, 0.0, SimParams::default().with_diffusion_sigma(0.0));
        engine.deposit(4.0);
        engine.diffuse_and_decay();
        assert_eq!(engine.trail_map().get(5, 5), 1.0);
        assert!((engine.history().get(5, 5) - 4.0 * 0.95).abs() < 1e-12);
    }

    #[test]
    fn blur_conserves_unclipped_mass() {
        let params = SimParams::default().with_diffusion_sigma(1.5).with_decay_factor(1.0);
        let mut engine = single_agent(5.0, 5.0, 0.0, params);
        engine.deposit(0.5);
        engine.diffuse_and_decay();
        assert!((engine.trail_map().sum() - 0.5).abs() < 1e-12);
        assert!(engine.trail_map().get(5, 5) < 0.5);
        assert!(engine.trail_map().get(5, 6) > 0.0);
    }
}

// ── Step invariants ───────────────────────────────────────────────────────────

#[cfg(test)]
mod invariant_tests {
    use super::*;

    #[test]
    fn positions_stay_in_range() {
        let params = SimParams::default().with_speed(3.7);
        let mut engine = Engine::new(300, 32, 48, params, 11).unwrap();
        for _ in 0..40 {
            engine.step();
            let agents = engine.agents();
            assert!(agents.x.iter().all(|&x| (0.0..32.0).contains(&x)));
            assert!(agents.y.iter().all(|&y| (0.0..48.0).contains(&y)));
        }
    }

    #[test]
    fn trail_stays_in_unit_interval() {
        let mut engine = random_engine(500, 5);
        for _ in 0..30 {
            engine.step();
            let trail = engine.trail_map();
            assert!(trail.min() >= 0.0);
            assert!(trail.max() <= 1.0);
        }
        // Dense deposits drive history well past the trail's ceiling.
        assert!(engine.history().max() > 1.0);
    }

    #[test]
    fn population_size_is_fixed() {
        let mut engine = random_engine(123, 2);
        engine.run_steps(10, &mut NoopObserver).unwrap();
        engine.reset();
        engine.step();
        let agents = engine.agents();
        for len in [agents.x.len(), agents.y.len(), agents.heading.len(), agents.last_x.len(), agents.last_y.len()] {
            assert_eq!(len, 123);
        }
        assert_eq!(engine.sensors().len(), 123);
    }

    #[test]
    fn lossless_trail_mass_never_decreases() {
        let mut engine = Engine::new(50, 16, 16, lossless(), 9).unwrap();
        let mut mass = engine.trail_map().sum();
        for _ in 0..20 {
            engine.step();
            let next = engine.trail_map().sum();
            assert!(next >= mass);
            mass = next;
        }
        // History is never clipped, so it holds exactly one unit per agent-step.
        assert_eq!(engine.history().sum(), 50.0 * 20.0);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let mut a = random_engine(200, 42);
        let mut b = random_engine(200, 42);
        for _ in 0..25 {
            a.step();
            b.step();
        }
        assert_eq!(a.agents(), b.agents());
        assert_eq!(a.trail_map(), b.trail_map());
        assert_eq!(a.history(), b.history());
        assert_eq!(a.sensors(), b.sensors());
    }

    #[test]
    fn different_seeds_diverge() {
        let a = random_engine(50, 1);
        let b = random_engine(50, 2);
        assert_ne!(a.agents().x, b.agents().x);
    }
}

// ── Control ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod control_tests {
    use super::*;

    #[test]
    fn reset_zeroes_fields_and_keeps_params() {
        let params = SimParams::long_range();
        let mut engine = Engine::new(100, 20, 30, params, 4).unwrap();
        engine.run_steps(5, &mut NoopObserver).unwrap();
        assert!(engine.history().sum() > 0.0);
        let before = engine.agents().clone();

        engine.reset();

        assert_eq!(engine.trail_map().sum(), 0.0);
        assert_eq!(engine.history().sum(), 0.0);
        assert!(engine.sensors().readings.iter().flatten().all(|&r| r == 0.0));
        assert_eq!(*engine.params(), params);
        assert_eq!(engine.agents().count, 100);
        assert_eq!(engine.dims().cells(), 600);
        assert_eq!(engine.step_count(), Step(5));
        assert_ne!(engine.agents().x, before.x);
        assert_eq!(engine.agents().last_x, engine.agents().x);
    }

    #[test]
    fn reset_recomputes_sensor_positions() {
        let mut engine = random_engine(20, 8);
        engine.step();
        engine.reset();
        let (agents, sensors) = (engine.agents(), engine.sensors());
        let dist = engine.params().sensing_dist;
        for i in 0..agents.count {
            let fx = agents.x[i] + dist * agents.heading[i].cos();
            assert!((sensors.x[0][i] - fx).abs() < 1e-12);
        }
    }

    #[test]
    fn setters_take_effect() {
        let mut engine = random_engine(10, 0);
        engine.set_speed(2.0);
        engine.set_sensing_dist(9.0);
        engine.set_sensing_angle_deg(90.0);
        engine.set_heading_rate_deg(45.0);
        engine.set_diffusion_sigma(1.0);
        engine.set_decay_factor(0.5);

        let p = *engine.params();
        assert_eq!(p.speed, 2.0);
        assert_eq!(p.sensing_dist, 9.0);
        assert_eq!(p.sensing_angle, 90f64.to_radians());
        assert_eq!(p.heading_rate, 45f64.to_radians());
        assert_eq!(p.diffusion_sigma, 1.0);
        assert_eq!(p.decay_factor, 0.5);

        engine.set_params(SimParams::default());
        assert_eq!(*engine.params(), SimParams::default());
    }

    #[test]
    fn out_of_range_params_are_not_validated() {
        let mut engine = random_engine(10, 0);
        engine.set_decay_factor(-1.0);
        engine.set_speed(-2.0);
        engine.step();
        assert_eq!(engine.params().decay_factor, -1.0);
        // Clamping still holds the trail in [0, 1].
        assert!(engine.trail_map().min() >= 0.0);
    }

    #[test]
    fn huge_sigma_spreads_mass_evenly() {
        let mut engine = Engine::new(50, 16, 16, lossless(), 3).unwrap();
        engine.set_diffusion_sigma(1e18);
        for n in 1..=3 {
            engine.step();
            let trail = engine.trail_map();
            assert!((trail.sum() - 50.0 * n as f64).abs() < 1e-9);
            assert!(trail.min() >= 0.0 && trail.max() <= 1.0);
            assert!((trail.max() - trail.min()).abs() < 1e-12);
        }
    }

    #[test]
    fn new_heading_rate_applies_to_next_step() {
        let mut engine = single_agent(5.0, 5.0, 0.0, SimParams::default());
        engine.set_heading_rate_deg(90.0);
        engine.step();
        assert!((engine.agents().heading[0].abs() - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use phys_agent::{AgentStore, SensorArray};

    #[derive(Default)]
    struct Counter {
        starts:    u64,
        ends:      u64,
        snapshots: Vec<Step>,
        finished:  Option<Step>,
        mismatch:  bool,
    }

    impl SimObserver for Counter {
        fn on_step_start(&mut self, _step: Step) {
            self.starts += 1;
        }

        fn on_step_end(&mut self, step: Step, engine: &Engine) {
            self.ends += 1;
            if engine.step_count() != step.next() {
                self.mismatch = true;
            }
        }

        fn on_snapshot(&mut self, step: Step, agents: &AgentStore, sensors: &SensorArray) {
            assert_eq!(agents.count, sensors.len());
            self.snapshots.push(step);
        }

        fn on_sim_end(&mut self, final_step: Step) {
            self.finished = Some(final_step);
        }
    }

    #[test]
    fn run_calls_hooks_until_end_step() {
        let mut config = SimConfig::new(20, 16, 16, 1);
        config.total_steps = 10;
        config.output_interval_steps = 5;
        let mut engine = EngineBuilder::new(config).build().unwrap();

        let mut obs = Counter::default();
        engine.run(&mut obs).unwrap();

        assert_eq!(obs.starts, 10);
        assert_eq!(obs.ends, 10);
        assert_eq!(obs.snapshots, vec![Step(0), Step(5)]);
        assert_eq!(obs.finished, Some(Step(10)));
        assert!(!obs.mismatch);
        assert_eq!(engine.step_count(), Step(10));
    }

    #[test]
    fn run_steps_skips_sim_end_and_disabled_snapshots() {
        let mut engine = random_engine(20, 1);
        let mut obs = Counter::default();
        engine.run_steps(3, &mut obs).unwrap();

        assert_eq!(obs.starts, 3);
        assert_eq!(obs.ends, 3);
        assert!(obs.snapshots.is_empty());
        assert_eq!(obs.finished, None);
        assert_eq!(engine.step_count(), Step(3));
    }

    #[test]
    fn run_matches_manual_steps() {
        let mut config = SimConfig::new(40, 16, 24, 6);
        config.total_steps = 8;
        let mut driven = EngineBuilder::new(config.clone()).build().unwrap();
        let mut manual = EngineBuilder::new(config).build().unwrap();

        driven.run(&mut NoopObserver).unwrap();
        for _ in 0..8 {
            manual.step();
        }
        assert_eq!(driven.agents(), manual.agents());
        assert_eq!(driven.history(), manual.history());
    }
}

//! Simulation observer trait for progress reporting and data collection.

use phys_agent::{AgentStore, SensorArray};
use phys_core::Step;

use crate::Engine;

/// Callbacks invoked by [`Engine::run`] and [`Engine::run_steps`] around
/// each step.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, step: Step, engine: &Engine) {
///         if step.0 % self.interval == 0 {
///             println!("{step}: trail mass {:.1}", engine.trail_map().sum());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the step runs.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called after the step completes, with read-only access to the whole
    /// engine (fields, agents, parameters).
    fn on_step_end(&mut self, _step: Step, _engine: &Engine) {}

    /// Called at snapshot intervals (every `config.output_interval_steps`
    /// steps) with the agent and sensor arrays, e.g. for scatter overlays.
    fn on_snapshot(&mut self, _step: Step, _agents: &AgentStore, _sensors: &SensorArray) {}

    /// Called once after `Engine::run` finishes.
    fn on_sim_end(&mut self, _final_step: Step) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

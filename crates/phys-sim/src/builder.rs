//! Fluent builder for constructing an [`Engine`].

use log::info;
use phys_agent::{AgentStoreBuilder, SensorArray};
use phys_core::{SimConfig, SimParams, SimRng, Step};
use phys_field::{Field, PeriodicBlur};

use crate::{Engine, SimResult};

/// Fluent builder for [`Engine`].
///
/// # Required inputs
///
/// - [`SimConfig`]: agent count, field size, seed, run length
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default                                   |
/// |---------------------------|-------------------------------------------|
/// | `.params(p)`              | `SimParams::default()`                    |
/// | `.initial_agents(x,y,h)`  | Uniform random positions and headings     |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(SimConfig::new(3_000, 480, 720, 42))
///     .params(SimParams::long_range())
///     .build()?;
/// engine.step();
/// ```
pub struct EngineBuilder {
    config:  SimConfig,
    params:  SimParams,
    initial: Option<(Vec<f64>, Vec<f64>, Vec<f64>)>,
}

impl EngineBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            params:  SimParams::default(),
            initial: None,
        }
    }

    /// Initial behavior parameters.
    pub fn params(mut self, params: SimParams) -> Self {
        self.params = params;
        self
    }

    /// Place agents explicitly instead of drawing them.  Each vector must be
    /// length `config.agent_count`; positions are wrapped onto the torus.
    ///
    /// The engine RNG is still seeded from `config.seed` and drives the
    /// per-step tie-break sign and any later `reset`.
    pub fn initial_agents(mut self, x: Vec<f64>, y: Vec<f64>, heading: Vec<f64>) -> Self {
        self.initial = Some((x, y, heading));
        self
    }

    /// Validate inputs, draw or install agent state, and return an engine
    /// with both fields zeroed and sensor positions computed.
    pub fn build(self) -> SimResult<Engine> {
        let dims = self.config.validate()?;
        let mut rng = SimRng::new(self.config.seed);

        let mut agents = AgentStoreBuilder::new(self.config.agent_count, dims);
        if let Some((x, y, heading)) = self.initial {
            agents = agents.positions(x, y).headings(heading);
        }
        let agents = agents.build(&mut rng)?;

        let mut engine = Engine {
            dims,
            params:  self.params,
            sensors: SensorArray::new(agents.count),
            agents,
            trail:   Field::zeros(dims),
            history: Field::zeros(dims),
            counts:  Field::zeros(dims),
            blur:    PeriodicBlur::new(),
            rng,
            step:    Step::ZERO,
            config:  self.config,
        };
        engine.update_sensor_positions();

        info!(
            "engine ready: {} agents on a {}x{} field (seed {})",
            engine.agents.count, dims.height, dims.width, engine.config.seed,
        );
        Ok(engine)
    }
}

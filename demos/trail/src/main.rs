//! trail: command-line driver for the rust_physarum engine.
//!
//! Runs one of two presets on a 480 × 720 field: 3 000 agents with the
//! interactive defaults, or 500 agents with long sensing reach and gentle
//! turns.  An attractant texture (synthetic rings or a PNG) can be fed in
//! before every step.  Writes per-step CSV summaries, agent snapshots and
//! PNG images of the final trail map and history.
//!
//! ```text
//! RUST_LOG=debug cargo run --release -p trail -- --preset long-range --steps 200 --food
//! ```

mod food;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{info, warn};
use serde::Deserialize;

use phys_agent::{AgentStore, SensorArray};
use phys_core::{ParamBounds, SimConfig, SimParams, Step};
use phys_field::Field;
use phys_output::{Contrast, CsvWriter, OutputWriter, SimOutputObserver, write_png};
use phys_sim::{Engine, EngineBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const HEIGHT:         usize = 480;
const WIDTH:          usize = 720;
const SEED:           u64   = 42;
const DEFAULT_STEPS:  u64   = 300;
const PROGRESS_EVERY: u64   = 50;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Preset {
    /// 3 000 agents, interactive defaults
    Gui,
    /// 500 agents, sensing distance 27, heading rate 0.1 rad
    LongRange,
}

impl Preset {
    fn agent_count(self) -> usize {
        match self {
            Preset::Gui       => 3_000,
            Preset::LongRange => 500,
        }
    }

    fn params(self) -> SimParams {
        match self {
            Preset::Gui       => SimParams::default(),
            Preset::LongRange => SimParams::long_range(),
        }
    }
}

/// Physarum trail simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Preset used when no config file is given
    #[arg(long, value_enum, default_value_t = Preset::Gui)]
    preset: Preset,

    /// JSON run file with a `config` object and an optional `params` object
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of steps
    #[arg(long)]
    steps: Option<u64>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write agent snapshots every N steps (0 disables)
    #[arg(long)]
    snapshot_every: Option<u64>,

    /// Output directory
    #[arg(long, default_value = "output/trail")]
    out: PathBuf,

    /// Feed a synthetic ring texture before every step
    #[arg(long)]
    food: bool,

    /// Feed a PNG texture (centered, gray) before every step
    #[arg(long, conflicts_with = "food")]
    food_image: Option<PathBuf>,

    /// Peak value of the food texture
    #[arg(long, default_value_t = 1.0)]
    food_strength: f64,

    /// Display contrast for the PNG snapshots
    #[arg(long, default_value_t = 2.0)]
    contrast: f64,

    /// Clamp parameters into the control-panel ranges
    #[arg(long)]
    clamp_params: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// On-disk run description.
#[derive(Deserialize)]
struct RunFile {
    config: SimConfig,
    #[serde(default)]
    params: SimParams,
}

fn load_run(args: &Args) -> Result<(SimConfig, SimParams)> {
    let (mut config, mut params) = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let run: RunFile = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            (run.config, run.params)
        }
        None => {
            let mut config = SimConfig::new(args.preset.agent_count(), HEIGHT, WIDTH, SEED);
            config.total_steps = DEFAULT_STEPS;
            (config, args.preset.params())
        }
    };

    if let Some(steps) = args.steps {
        config.total_steps = steps;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(every) = args.snapshot_every {
        config.output_interval_steps = every;
    }
    if args.clamp_params {
        let bounded = ParamBounds::SLIDER.clamp(&params);
        if bounded != params {
            warn!("parameters clamped into control-panel ranges: {bounded:?}");
        }
        params = bounded;
    }
    Ok((config, params))
}

// ── Observer wrapper to count rows and report progress ────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_step_end(&mut self, step: Step, engine: &Engine) {
        self.summary_rows += 1;
        if step.next().is_multiple_of(PROGRESS_EVERY) {
            info!(
                "{}: trail mass {:.1}, history max {:.3}",
                step.next(),
                engine.trail_map().sum(),
                engine.history().max(),
            );
        }
        self.inner.on_step_end(step, engine);
    }

    fn on_snapshot(&mut self, step: Step, agents: &AgentStore, sensors: &SensorArray) {
        self.snapshot_rows += agents.count;
        self.inner.on_snapshot(step, agents, sensors);
    }

    fn on_sim_end(&mut self, final_step: Step) {
        self.inner.on_sim_end(final_step);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    // 1. Resolve configuration.
    let (config, params) = load_run(&args)?;
    println!("=== trail: physarum simulation ===");
    println!(
        "Agents: {}  |  Field: {}x{}  |  Steps: {}  |  Seed: {}",
        config.agent_count, config.height, config.width, config.total_steps, config.seed,
    );
    println!("Params: {params:?}");
    println!();

    // 2. Build engine.
    let mut engine = EngineBuilder::new(config).params(params).build()?;

    // 3. Optional food texture.
    let food: Option<Field> = match (&args.food_image, args.food) {
        (Some(path), _) => Some(food::load_texture(path, engine.dims(), args.food_strength)?),
        (None, true)    => Some(food::ring_texture(engine.dims(), args.food_strength)),
        (None, false)   => None,
    };
    if let Some(texture) = &food {
        info!("feeding food texture with total mass {:.1} every step", texture.sum());
    }

    // 4. Set up output.
    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    let writer = CsvWriter::new(&args.out)?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 5. Run.
    let t0 = Instant::now();
    match &food {
        None => engine.run(&mut obs)?,
        Some(texture) => {
            while engine.step_count() < engine.config().end_step() {
                engine.deposit_external(texture)?;
                engine.run_steps(1, &mut obs)?;
            }
            obs.on_sim_end(engine.step_count());
        }
    }
    let elapsed = t0.elapsed();

    check_output(&mut obs.inner)?;

    // 6. Images.
    let contrast = Contrast::clamped(args.contrast);
    write_png(&args.out.join("history.png"), engine.history(), contrast)?;
    write_png(&args.out.join("trail_map.png"), engine.trail_map(), contrast)?;

    // 7. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    print_outputs(&args.out, &obs);
    println!();

    // 8. First few agents.
    let agents = engine.agents();
    println!("{:<8} {:>10} {:>10} {:>10}", "Agent", "x", "y", "heading");
    println!("{}", "-".repeat(41));
    for id in agents.agent_ids().take(8) {
        let (x, y) = agents.position(id);
        println!("{:<8} {:>10.3} {:>10.3} {:>10.3}", id.0, x, y, agents.heading[id.index()]);
    }

    Ok(())
}

/// Fail the run if any CSV write failed.
fn check_output<W: OutputWriter>(obs: &mut SimOutputObserver<W>) -> Result<()> {
    match obs.take_error() {
        Some(e) => Err(e).context("writing simulation output"),
        None    => Ok(()),
    }
}

fn print_outputs<W: OutputWriter>(out: &Path, obs: &CountingObserver<W>) {
    println!("  {}/step_summaries.csv  : {} rows", out.display(), obs.summary_rows);
    println!("  {}/agent_snapshots.csv : {} rows", out.display(), obs.snapshot_rows);
    println!("  {}/history.png, trail_map.png", out.display());
}

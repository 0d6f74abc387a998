//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use phys_agent::{AgentStore, SensorArray};
use phys_core::Step;
use phys_sim::{Engine, SimObserver};

use crate::row::{AgentSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes a summary row after every step and agent
/// snapshots at the engine's output interval.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).  Returns `None` if all writes
    /// succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, step: Step, engine: &Engine) {
        let row = StepSummaryRow {
            step:        step.0,
            agent_count: engine.agents().count as u64,
            trail_mass:  engine.trail_map().sum(),
            trail_max:   engine.trail_map().max(),
            history_max: engine.history().max(),
        };
        let result = self.writer.write_step_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, step: Step, agents: &AgentStore, _sensors: &SensorArray) {
        let rows: Vec<AgentSnapshotRow> = agents
            .agent_ids()
            .map(|id| {
                let i = id.index();
                AgentSnapshotRow {
                    step:    step.0,
                    agent:   id.0,
                    x:       agents.x[i],
                    y:       agents.y[i],
                    heading: agents.heading[i],
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_step: Step) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

use phys_agent::AgentError;
use phys_core::PhysError;
use phys_field::FieldError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("engine configuration error: {0}")]
    Core(#[from] PhysError),

    #[error("agent state error: {0}")]
    Agent(#[from] AgentError),

    #[error("field error: {0}")]
    Field(#[from] FieldError),
}

pub type SimResult<T> = Result<T, SimError>;

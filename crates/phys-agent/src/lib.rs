//! `phys-agent`: Structure-of-Arrays agent storage for the `rust_physarum`
//! simulation.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `AgentStore` (x, y, heading, last position)               |
//! | [`sensors`]     | `Sensor`, `SensorArray` (3 × N positions and readings)    |
//! | [`builder`]     | `AgentStoreBuilder` (random or explicit initial state)    |
//! | [`error`]       | `AgentError`, `AgentResult<T>`                            |

pub mod builder;
pub mod error;
pub mod sensors;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use sensors::{Sensor, SensorArray};
pub use store::AgentStore;

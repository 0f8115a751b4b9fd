pub mod brain;
pub mod command;
pub mod entity;
pub mod error;
pub mod intent;
pub mod pipeline;
pub mod rng;
pub mod systems;

pub use pipeline::{Simulation, TickReport};

#[cfg(test)]
mod test_harness;

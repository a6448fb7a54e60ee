//! Configuration module for loading run parameters.

mod parameters;

pub use parameters::SimulationParameters;

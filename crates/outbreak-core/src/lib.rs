//! Core types and utilities for the toroidal outbreak simulation.

pub mod types;
pub mod config;
pub mod error;
pub mod model;
pub mod stats;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use model::{Categorical, InfectionModel};
pub use stats::{Census, StatisticsRecord};

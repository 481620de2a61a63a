//! World simulation engine.
//!
//! This module implements the toroidal grid where entities live, infect their
//! neighbors, wander, and recover or die.

pub mod entity;
pub mod grid;
pub mod world;
pub mod outbreak;

pub use entity::Entity;
pub use grid::Grid;
pub use world::World;
pub use outbreak::{Outbreak, OutbreakResult, Termination};

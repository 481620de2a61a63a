//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position in the world, addressed as (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn add(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Apply toroidal wrapping for a square world of the given size
    pub fn wrap(&self, size: i32) -> Self {
        Self {
            row: ((self.row % size) + size) % size,
            col: ((self.col % size) + size) % size,
        }
    }

    /// Adjacent position one step in `direction`, wrapped onto the torus
    pub fn step(&self, direction: Direction, size: i32) -> Self {
        let (d_row, d_col) = direction.to_delta();
        self.add(d_row, d_col).wrap(size)
    }

    /// The four orthogonal neighbors, in `Direction::all()` order.
    ///
    /// On grids of side 1 or 2 the returned positions repeat.
    pub fn neighbors(&self, size: i32) -> [Position; 4] {
        Direction::all().map(|direction| self.step(direction, size))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal direction for movement and neighbor lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    South,
    North,
    West,
    East,
}

impl Direction {
    /// (row, col) offset
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::South => (1, 0),
            Direction::North => (-1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
        }
    }

    pub fn all() -> [Direction; 4] {
        [
            Direction::South,
            Direction::North,
            Direction::West,
            Direction::East,
        ]
    }
}

/// Health state of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityState {
    Healthy,
    Immune,
    Infected,
    Healed,
    Dead,
}

impl EntityState {
    /// Single-character symbol used by tile dumps
    pub fn symbol(&self) -> char {
        match self {
            EntityState::Healthy => '*',
            EntityState::Immune => '~',
            EntityState::Infected => 'O',
            EntityState::Dead => '+',
            EntityState::Healed => '.',
        }
    }

    pub fn all() -> [EntityState; 5] {
        [
            EntityState::Healthy,
            EntityState::Immune,
            EntityState::Infected,
            EntityState::Healed,
            EntityState::Dead,
        ]
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymptomStatus {
    Asymptomatic,
    Symptomatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MortalityStatus {
    Normal,
    Severe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurvivalOutcome {
    Survives,
    Dies,
}

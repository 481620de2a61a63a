//! Population counts and per-tick statistics records.

use crate::types::{EntityState, MortalityStatus, SymptomStatus};
use serde::{Deserialize, Serialize};

/// Raw per-state counts from one scan of the grid.
///
/// The five state counters partition the population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub healthy: usize,
    pub immune: usize,
    pub infected: usize,
    pub healed: usize,
    pub dead: usize,
    /// Breakdown of the currently infected
    pub symptomatic: usize,
    pub asymptomatic: usize,
    pub severe: usize,
    pub normal: usize,
}

impl Census {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one entity
    pub fn record(
        &mut self,
        state: EntityState,
        symptom: Option<SymptomStatus>,
        mortality: Option<MortalityStatus>,
    ) {
        match state {
            EntityState::Healthy => self.healthy += 1,
            EntityState::Immune => self.immune += 1,
            EntityState::Healed => self.healed += 1,
            EntityState::Dead => self.dead += 1,
            EntityState::Infected => {
                self.infected += 1;

                match symptom {
                    Some(SymptomStatus::Symptomatic) => self.symptomatic += 1,
                    Some(SymptomStatus::Asymptomatic) => self.asymptomatic += 1,
                    None => {}
                }

                match mortality {
                    Some(MortalityStatus::Severe) => self.severe += 1,
                    Some(MortalityStatus::Normal) => self.normal += 1,
                    None => {}
                }
            }
        }
    }

    pub fn count(&self, state: EntityState) -> usize {
        match state {
            EntityState::Healthy => self.healthy,
            EntityState::Immune => self.immune,
            EntityState::Infected => self.infected,
            EntityState::Healed => self.healed,
            EntityState::Dead => self.dead,
        }
    }

    /// Sum of the state counters; equals the number of occupied cells
    pub fn total(&self) -> usize {
        self.healthy + self.immune + self.infected + self.healed + self.dead
    }

    pub fn to_record(&self, iteration: u64) -> StatisticsRecord {
        StatisticsRecord {
            iteration,
            infected: self.infected,
            healed: self.healed,
            immune: self.immune + self.healed,
            healthy: self.healthy + self.immune + self.healed,
            symptomatic: self.symptomatic,
            asymptomatic: self.asymptomatic,
            severe: self.severe,
            normal: self.normal,
            dead: self.dead,
        }
    }
}

/// Reported statistics for one tick.
///
/// `immune` includes healed entities and `healthy` counts everyone who is
/// neither infected nor dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    pub iteration: u64,
    pub infected: usize,
    pub healed: usize,
    pub immune: usize,
    pub healthy: usize,
    pub symptomatic: usize,
    pub asymptomatic: usize,
    pub severe: usize,
    pub normal: usize,
    pub dead: usize,
}

impl StatisticsRecord {
    pub const CSV_HEADER: &'static str =
        "iteration,infected,healed,immune,healthy,symptomatic,asymptomatic,severe,normal,dead";

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{}",
            self.iteration,
            self.infected,
            self.healed,
            self.immune,
            self.healthy,
            self.symptomatic,
            self.asymptomatic,
            self.severe,
            self.normal,
            self.dead
        )
    }

    /// Population size implied by the combined counters
    pub fn population(&self) -> usize {
        self.healthy + self.infected + self.dead
    }
}

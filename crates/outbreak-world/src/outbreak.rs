//! Run a world until the infection dies out.

use crate::world::World;
use outbreak_core::{Census, OutbreakConfig, Result, StatisticsRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, event, info, instrument, warn, Level};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// No infected entity remained
    Extinct,
    /// `max_iterations` was reached first
    IterationLimit,
}

pub struct Outbreak {
    world: World,
    max_iterations: u64,
}

impl Outbreak {
    pub fn new(config: &OutbreakConfig) -> Result<Self> {
        Ok(Self {
            world: World::new(config)?,
            max_iterations: config.max_iterations,
        })
    }

    pub fn from_world(world: World, max_iterations: u64) -> Self {
        Self {
            world,
            max_iterations,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Tick while at least one entity is infected
    #[instrument(skip(self), fields(size = self.world.size(), max_iterations = self.max_iterations))]
    pub fn run(&mut self) -> OutbreakResult {
        info!(
            "Starting outbreak on a {}x{} world",
            self.world.size(),
            self.world.size()
        );

        let termination = loop {
            if self.world.infected_count() == 0 {
                break Termination::Extinct;
            }

            if self.world.iteration_step() >= self.max_iterations {
                warn!(
                    infected = self.world.infected_count(),
                    "Iteration limit reached with infection still active"
                );
                break Termination::IterationLimit;
            }

            let record = self.world.next_iteration();
            debug!("Step # {} done.", record.iteration);

            if record.iteration % 100 == 0 && record.iteration > 0 {
                Self::emit_population_metrics(&record);
            }
        };

        let result = OutbreakResult {
            iterations: self.world.iteration_step(),
            termination,
            history: self.world.history().to_vec(),
            final_census: self.world.census(),
        };

        Self::emit_summary(&result);
        result
    }

    fn emit_population_metrics(record: &StatisticsRecord) {
        info!(
            event = "population_metrics",
            tick = record.iteration,
            infected = record.infected,
            healed = record.healed,
            immune = record.immune,
            healthy = record.healthy,
            dead = record.dead,
            "Population metrics snapshot"
        );

        event!(
            Level::INFO,
            gauge_name = "infected_total",
            gauge_value = record.infected,
            tick = record.iteration,
            "Infected gauge"
        );
    }

    fn emit_summary(result: &OutbreakResult) {
        let census = &result.final_census;
        let ever_infected = census.healed + census.dead + census.infected;

        info!(
            event = "outbreak_summary",
            iterations = result.iterations,
            termination = ?result.termination,
            population = census.total(),
            ever_infected = ever_infected,
            peak_infected = result.peak_infected(),
            healed = census.healed,
            dead = census.dead,
            never_infected = census.healthy,
            seeded_immune = census.immune,
            "Outbreak complete"
        );

        event!(
            Level::INFO,
            histogram_name = "outbreak_duration",
            histogram_value = result.iterations,
            "Outbreak duration histogram"
        );
    }
}

/// Outcome of a complete run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutbreakResult {
    pub iterations: u64,
    pub termination: Termination,
    pub history: Vec<StatisticsRecord>,
    pub final_census: Census,
}

impl OutbreakResult {
    pub fn peak_infected(&self) -> usize {
        self.history
            .iter()
            .map(|record| record.infected)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Entity, Grid};
    use outbreak_core::{
        InfectionConfig, InfectionModel, OutcomeWeights, Position, SymptomStatus, WorldConfig,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(size: i32, seed: u64, max_iterations: u64) -> OutbreakConfig {
        OutbreakConfig {
            seed,
            max_iterations,
            world: WorldConfig {
                size,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_outbreak_runs_to_extinction() {
        let mut outbreak = Outbreak::new(&config(10, 42, 10_000)).unwrap();
        let result = outbreak.run();

        assert_eq!(result.termination, Termination::Extinct);
        assert_eq!(result.final_census.infected, 0);
        assert_eq!(result.final_census.total(), 100);
        assert_eq!(result.history.len() as u64, result.iterations);
        assert_eq!(outbreak.world().infected_count(), 0);

        for (tick, record) in result.history.iter().enumerate() {
            assert_eq!(record.iteration, tick as u64);
            assert_eq!(record.population(), 100);
        }
    }

    #[test]
    fn test_outbreak_respects_iteration_limit() {
        let mut outbreak = Outbreak::new(&config(10, 7, 3)).unwrap();
        let result = outbreak.run();

        if outbreak.world().infected_count() > 0 {
            assert_eq!(result.termination, Termination::IterationLimit);
            assert_eq!(result.iterations, 3);
        } else {
            assert_eq!(result.termination, Termination::Extinct);
            assert!(result.iterations <= 3);
        }
    }

    #[test]
    fn test_outbreak_from_hand_built_world() {
        let model = InfectionModel::from_config(&InfectionConfig {
            symptoms: OutcomeWeights::new(
                vec![SymptomStatus::Asymptomatic, SymptomStatus::Symptomatic],
                vec![1.0, 0.0],
            ),
            ..Default::default()
        })
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut grid = Grid::new(3).unwrap();
        grid.place(Entity::new(Position::new(0, 0), true, false, &model, &mut rng));
        for pos in grid.positions().collect::<Vec<_>>() {
            grid.place(Entity::healthy(pos));
        }
        let world = World::from_grid(grid, model, rng).unwrap();

        // Nobody can heal before tick 21, so the limit stops the run.
        let mut outbreak = Outbreak::from_world(world, 5);
        let result = outbreak.run();

        assert_eq!(result.termination, Termination::IterationLimit);
        assert_eq!(result.iterations, 5);
        assert_eq!(result.history.len(), 5);
        assert_eq!(result.final_census.total(), 9);
        assert_eq!(result.final_census.dead, 0);
        assert!(result.peak_infected() >= 5);
        assert_eq!(outbreak.world().iteration_step(), 5);
    }

    #[test]
    fn test_outbreak_invalid_config() {
        assert!(Outbreak::new(&config(0, 1, 10)).is_err());
    }

    #[test]
    fn test_result_serialization() {
        let mut outbreak = Outbreak::new(&config(4, 1, 100)).unwrap();
        let result = outbreak.run();

        let json = serde_json::to_string(&result).unwrap();
        let deserialized: OutbreakResult = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.iterations, result.iterations);
        assert_eq!(deserialized.history, result.history);
        assert_eq!(deserialized.final_census, result.final_census);
    }
}

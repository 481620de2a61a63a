//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::{MortalityStatus, SurvivalOutcome, SymptomStatus};
use serde::{Deserialize, Serialize};

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Side length of the square world grid
    pub size: i32,
    /// Fraction of the population (minus the initial infected) seeded immune
    pub immune_fraction: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: 10,
            immune_fraction: 0.05,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size < 1 {
            return Err(Error::Config(format!(
                "world size must be at least 1, got {}",
                self.size
            )));
        }

        if !(0.0..=1.0).contains(&self.immune_fraction) {
            return Err(Error::Config(format!(
                "immune fraction must be within [0, 1], got {}",
                self.immune_fraction
            )));
        }

        Ok(())
    }

    /// Number of cells in the grid
    pub fn population(&self) -> usize {
        let side = self.size.max(0) as usize;
        side * side
    }

    /// Number of immune entities placed during seeding.
    ///
    /// Always leaves at least one cell free for the initial infected entity.
    pub fn immune_target(&self) -> usize {
        let candidates = self.population().saturating_sub(1);
        let target = (candidates as f64 * self.immune_fraction).round() as usize;
        target.min(candidates)
    }
}

/// Categorical distribution over a fixed set of outcomes.
///
/// Weights need not sum to one; they are normalized when sampled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeWeights<T> {
    pub outcomes: Vec<T>,
    pub weights: Vec<f64>,
}

impl<T> OutcomeWeights<T> {
    pub fn new(outcomes: Vec<T>, weights: Vec<f64>) -> Self {
        Self { outcomes, weights }
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if self.outcomes.is_empty() {
            return Err(Error::Config(format!("{} has no outcomes", name)));
        }

        if self.outcomes.len() != self.weights.len() {
            return Err(Error::Config(format!(
                "{} has {} outcomes but {} weights",
                name,
                self.outcomes.len(),
                self.weights.len()
            )));
        }

        if let Some(bad) = self.weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(Error::Config(format!(
                "{} contains an invalid weight: {}",
                name, bad
            )));
        }

        let total: f64 = self.weights.iter().sum();
        if total <= 0.0 {
            return Err(Error::Config(format!("{} weights sum to zero", name)));
        }

        Ok(())
    }
}

/// Infection progression parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfectionConfig {
    /// Ticks an infected entity stays infected before healing
    pub infection_duration: u32,
    pub symptoms: OutcomeWeights<SymptomStatus>,
    /// Only sampled for symptomatic entities
    pub mortality: OutcomeWeights<MortalityStatus>,
    /// Only sampled for severe cases
    pub survival: OutcomeWeights<SurvivalOutcome>,
}

impl Default for InfectionConfig {
    fn default() -> Self {
        Self {
            infection_duration: 20,
            symptoms: OutcomeWeights::new(
                vec![SymptomStatus::Asymptomatic, SymptomStatus::Symptomatic],
                vec![0.8, 0.2],
            ),
            mortality: OutcomeWeights::new(
                vec![MortalityStatus::Normal, MortalityStatus::Severe],
                vec![0.98, 0.02],
            ),
            survival: OutcomeWeights::new(
                vec![SurvivalOutcome::Survives, SurvivalOutcome::Dies],
                vec![0.9881, 0.0119],
            ),
        }
    }
}

impl InfectionConfig {
    pub fn validate(&self) -> Result<()> {
        self.symptoms.validate("symptom distribution")?;
        self.mortality.validate("mortality distribution")?;
        self.survival.validate("survival distribution")?;
        Ok(())
    }
}

/// Full configuration of one outbreak run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutbreakConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Upper bound on ticks, in case the infection never dies out
    pub max_iterations: u64,
    pub world: WorldConfig,
    pub infection: InfectionConfig,
}

impl Default for OutbreakConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_iterations: 10_000,
            world: WorldConfig::default(),
            infection: InfectionConfig::default(),
        }
    }
}

impl OutbreakConfig {
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        self.infection.validate()?;
        Ok(())
    }
}

/// Runner binary configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub outbreak: OutbreakConfig,
    /// CSV destination; stdout when unset
    pub output_path: Option<String>,
    /// Print the final tile dump after the run
    pub print_tiles: bool,
}

impl RunnerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RunnerConfig = serde_json::from_str(json)?;
        config.outbreak.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let world_config = WorldConfig::default();
        assert_eq!(world_config.size, 10);
        assert_eq!(world_config.population(), 100);

        let infection_config = InfectionConfig::default();
        assert_eq!(infection_config.infection_duration, 20);
        assert_eq!(infection_config.symptoms.weights, vec![0.8, 0.2]);

        let outbreak_config = OutbreakConfig::default();
        assert_eq!(outbreak_config.max_iterations, 10_000);
        assert!(outbreak_config.validate().is_ok());
    }

    #[test]
    fn test_immune_target() {
        let target = |size| {
            WorldConfig {
                size,
                ..Default::default()
            }
            .immune_target()
        };

        assert_eq!(target(1), 0);
        assert_eq!(target(2), 0);
        assert_eq!(target(4), 1); // 15 * 0.05 = 0.75
        assert_eq!(target(10), 5); // 99 * 0.05 = 4.95
        assert_eq!(target(100), 500);
    }

    #[test]
    fn test_immune_target_leaves_room_for_infected() {
        let config = WorldConfig {
            size: 3,
            immune_fraction: 1.0,
        };
        assert_eq!(config.immune_target(), 8);
    }

    #[test]
    fn test_degenerate_world_size_rejected() {
        for size in [0, -1, -10] {
            let config = WorldConfig {
                size,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(Error::Config(_))));
        }
    }

    #[test]
    fn test_immune_fraction_out_of_range_rejected() {
        let config = WorldConfig {
            immune_fraction: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_weights_rejected() {
        let negative = OutcomeWeights::new(vec![1, 2], vec![0.5, -0.1]);
        assert!(negative.validate("negative").is_err());

        let zero = OutcomeWeights::new(vec![1, 2], vec![0.0, 0.0]);
        assert!(zero.validate("zero").is_err());

        let mismatched = OutcomeWeights::new(vec![1, 2, 3], vec![0.5, 0.5]);
        assert!(mismatched.validate("mismatched").is_err());

        let empty: OutcomeWeights<u8> = OutcomeWeights::new(vec![], vec![]);
        assert!(empty.validate("empty").is_err());

        let nan = OutcomeWeights::new(vec![1, 2], vec![f64::NAN, 1.0]);
        assert!(nan.validate("nan").is_err());
    }

    #[test]
    fn test_unnormalized_weights_accepted() {
        let weights = OutcomeWeights::new(vec![1, 2], vec![3.0, 1.0]);
        assert!(weights.validate("unnormalized").is_ok());
    }

    #[test]
    fn test_runner_config_serialization() {
        let config = RunnerConfig {
            output_path: Some("stats.csv".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized = RunnerConfig::from_json(&json).unwrap();
        assert_eq!(deserialized.output_path, config.output_path);
        assert_eq!(deserialized.outbreak.world.size, config.outbreak.world.size);
        assert_eq!(
            deserialized.outbreak.infection.survival.outcomes,
            config.outbreak.infection.survival.outcomes
        );
    }

    #[test]
    fn test_runner_config_rejects_invalid_world() {
        let mut config = RunnerConfig::default();
        config.outbreak.world.size = 0;
        let json = serde_json::to_string(&config).unwrap();
        assert!(RunnerConfig::from_json(&json).is_err());
    }

    #[test]
    fn test_runner_config_rejects_malformed_json() {
        let result = RunnerConfig::from_json("{\"outbreak\": ");
        assert!(matches!(result, Err(crate::Error::Serialization(_))));
    }
}

//! Validated infection model used to sample infection outcomes.

use crate::config::{InfectionConfig, OutcomeWeights};
use crate::error::{Error, Result};
use crate::types::{MortalityStatus, SurvivalOutcome, SymptomStatus};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Categorical sampler over a fixed set of outcomes
#[derive(Debug, Clone)]
pub struct Categorical<T> {
    outcomes: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T: Copy> Categorical<T> {
    pub fn from_weights(weights: &OutcomeWeights<T>, name: &str) -> Result<Self> {
        weights.validate(name)?;
        let index = WeightedIndex::new(&weights.weights)
            .map_err(|e| Error::Config(format!("{}: {}", name, e)))?;

        Ok(Self {
            outcomes: weights.outcomes.clone(),
            index,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.outcomes[self.index.sample(rng)]
    }
}

/// Infection parameters with probability tables checked up front
#[derive(Debug, Clone)]
pub struct InfectionModel {
    infection_duration: u32,
    symptoms: Categorical<SymptomStatus>,
    mortality: Categorical<MortalityStatus>,
    survival: Categorical<SurvivalOutcome>,
}

impl InfectionModel {
    pub fn from_config(config: &InfectionConfig) -> Result<Self> {
        Ok(Self {
            infection_duration: config.infection_duration,
            symptoms: Categorical::from_weights(&config.symptoms, "symptom distribution")?,
            mortality: Categorical::from_weights(&config.mortality, "mortality distribution")?,
            survival: Categorical::from_weights(&config.survival, "survival distribution")?,
        })
    }

    pub fn infection_duration(&self) -> u32 {
        self.infection_duration
    }

    pub fn sample_symptom<R: Rng + ?Sized>(&self, rng: &mut R) -> SymptomStatus {
        self.symptoms.sample(rng)
    }

    pub fn sample_mortality<R: Rng + ?Sized>(&self, rng: &mut R) -> MortalityStatus {
        self.mortality.sample(rng)
    }

    pub fn sample_survival<R: Rng + ?Sized>(&self, rng: &mut R) -> SurvivalOutcome {
        self.survival.sample(rng)
    }
}

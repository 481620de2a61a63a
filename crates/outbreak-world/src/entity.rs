//! Entity state and infection lifecycle.

use outbreak_core::{
    Direction, EntityState, InfectionModel, MortalityStatus, Position, SurvivalOutcome,
    SymptomStatus,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An occupant of one grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    position: Position,
    state: EntityState,
    life_span: u32,
    symptom_status: Option<SymptomStatus>,
    mortality_status: Option<MortalityStatus>,
    survival_outcome: Option<SurvivalOutcome>,
}

impl Entity {
    /// Create an entity. An infected entity is never immune, and it samples
    /// its infection outcome right away (which may kill it).
    pub fn new<R: Rng + ?Sized>(
        position: Position,
        is_infected: bool,
        is_immune: bool,
        model: &InfectionModel,
        rng: &mut R,
    ) -> Self {
        let is_immune = is_immune && !is_infected;

        let state = if is_immune {
            EntityState::Immune
        } else if is_infected {
            EntityState::Infected
        } else {
            EntityState::Healthy
        };

        let mut entity = Self {
            position,
            state,
            life_span: 0,
            symptom_status: None,
            mortality_status: None,
            survival_outcome: None,
        };

        if entity.state == EntityState::Infected {
            entity.define_infection_outcome(model, rng);
        }

        entity
    }

    pub fn healthy(position: Position) -> Self {
        Self {
            position,
            state: EntityState::Healthy,
            life_span: 0,
            symptom_status: None,
            mortality_status: None,
            survival_outcome: None,
        }
    }

    pub fn immune(position: Position) -> Self {
        Self {
            state: EntityState::Immune,
            ..Self::healthy(position)
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn state(&self) -> EntityState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state != EntityState::Dead
    }

    pub fn life_span(&self) -> u32 {
        self.life_span
    }

    pub fn symptom_status(&self) -> Option<SymptomStatus> {
        self.symptom_status
    }

    pub fn mortality_status(&self) -> Option<MortalityStatus> {
        self.mortality_status
    }

    pub fn survival_outcome(&self) -> Option<SurvivalOutcome> {
        self.survival_outcome
    }

    /// Infect a healthy entity. Returns whether the infection took.
    pub fn get_infected<R: Rng + ?Sized>(&mut self, model: &InfectionModel, rng: &mut R) -> bool {
        if !self.is_alive() || self.state != EntityState::Healthy {
            return false;
        }

        self.state = EntityState::Infected;
        self.define_infection_outcome(model, rng);
        true
    }

    /// Age an infected entity by one tick, healing it once the infection has
    /// run its course.
    pub fn increase_life_span(&mut self, model: &InfectionModel) {
        if !self.is_alive() || self.state != EntityState::Infected {
            return;
        }

        if self.life_span >= model.infection_duration() {
            self.heal();
        }
        self.life_span += 1;
    }

    pub fn heal(&mut self) {
        if !self.is_alive() || self.state != EntityState::Infected {
            return;
        }

        self.state = EntityState::Healed;
        debug!(
            event = "entity_healed",
            row = self.position.row,
            col = self.position.col,
            life_span = self.life_span,
            "Entity healed"
        );
    }

    pub fn die(&mut self) {
        if !self.is_alive() {
            return;
        }

        self.state = EntityState::Dead;
        debug!(
            event = "entity_death",
            row = self.position.row,
            col = self.position.col,
            life_span = self.life_span,
            "Entity died"
        );
    }

    /// Step to a uniformly chosen orthogonal neighbor on a torus of side
    /// `world_size`. Dead entities stay put and return `None`.
    pub fn move_randomly<R: Rng + ?Sized>(
        &mut self,
        world_size: i32,
        rng: &mut R,
    ) -> Option<Position> {
        if !self.is_alive() {
            return None;
        }

        let direction = *Direction::all().choose(rng)?;
        let next = self.position.step(direction, world_size);
        self.position = next;
        Some(next)
    }

    /// Record a cell change imposed by the grid (swaps), regardless of state
    pub(crate) fn relocate(&mut self, position: Position) {
        self.position = position;
    }

    pub fn is_death(outcome: SurvivalOutcome) -> bool {
        outcome == SurvivalOutcome::Dies
    }

    pub fn is_severe(status: MortalityStatus) -> bool {
        status == MortalityStatus::Severe
    }

    pub fn is_symptomatic(status: SymptomStatus) -> bool {
        status == SymptomStatus::Symptomatic
    }

    pub fn is_asymptomatic(status: SymptomStatus) -> bool {
        status == SymptomStatus::Asymptomatic
    }

    // Outcome fields are written here only, once per entity.
    fn define_infection_outcome<R: Rng + ?Sized>(&mut self, model: &InfectionModel, rng: &mut R) {
        if !self.is_alive() || self.symptom_status.is_some() {
            return;
        }

        let symptom = model.sample_symptom(rng);
        self.symptom_status = Some(symptom);
        if !Self::is_symptomatic(symptom) {
            return;
        }

        let mortality = model.sample_mortality(rng);
        self.mortality_status = Some(mortality);
        if !Self::is_severe(mortality) {
            return;
        }

        let survival = model.sample_survival(rng);
        self.survival_outcome = Some(survival);
        if Self::is_death(survival) {
            self.die();
        }
    }
}

//! World engine: seeding, per-tick advancement and statistics.

use crate::entity::Entity;
use crate::grid::Grid;
use outbreak_core::{
    Census, EntityState, Error, InfectionModel, OutbreakConfig, Position, Result,
    StatisticsRecord, WorldConfig,
};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use tracing::{debug, event, info, trace, Level};

pub struct World {
    grid: Grid,
    model: InfectionModel,
    rng: ChaCha8Rng,
    iteration_step: u64,
    history: Vec<StatisticsRecord>,
}

impl World {
    /// Build and seed a world, drawing randomness from `config.seed`
    pub fn new(config: &OutbreakConfig) -> Result<Self> {
        config.validate()?;
        let model = InfectionModel::from_config(&config.infection)?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(&config.world, model, rng)
    }

    /// Seed a world with immune, then one infected, then healthy entities.
    pub fn with_rng(config: &WorldConfig, model: InfectionModel, rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;

        let mut world = Self {
            grid: Grid::new(config.size)?,
            model,
            rng,
            iteration_step: 0,
            history: Vec::new(),
        };

        world.add_immune_entities(config.immune_target())?;
        world.add_infected_entity()?;
        world.add_healthy_entities();

        let census = world.census();
        info!(
            event = "seeding_complete",
            size = config.size,
            population = census.total(),
            immune = census.immune,
            infected = census.infected,
            dead = census.dead,
            healthy = census.healthy,
            "World seeded"
        );

        Ok(world)
    }

    /// Adopt a fully populated grid, e.g. a hand-built scenario.
    pub fn from_grid(grid: Grid, model: InfectionModel, rng: ChaCha8Rng) -> Result<Self> {
        if !grid.is_full() {
            return Err(Error::InvalidState(
                "every tile must hold an entity before the world can run".to_string(),
            ));
        }

        Ok(Self {
            grid,
            model,
            rng,
            iteration_step: 0,
            history: Vec::new(),
        })
    }

    pub fn size(&self) -> i32 {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn get(&self, pos: Position) -> Option<&Entity> {
        self.grid.get(pos)
    }

    pub fn iteration_step(&self) -> u64 {
        self.iteration_step
    }

    /// Statistics recorded after each completed tick
    pub fn history(&self) -> &[StatisticsRecord] {
        &self.history
    }

    pub fn positions_matching(&self, state: EntityState) -> Vec<Position> {
        self.grid.positions_matching(state)
    }

    pub fn infected_count(&self) -> usize {
        self.grid.count_matching(EntityState::Infected)
    }

    pub fn census(&self) -> Census {
        self.grid.census()
    }

    /// Current statistics, stamped with the upcoming iteration number
    pub fn statistics(&self) -> StatisticsRecord {
        self.census().to_record(self.iteration_step)
    }

    /// Tile dump, one line per row
    pub fn render(&self) -> String {
        self.grid.to_string()
    }

    /// Advance every entity that is infected at the start of the tick: age it,
    /// infect its four neighbors, then swap it with a random adjacent tile.
    pub fn next_iteration(&mut self) -> StatisticsRecord {
        let size = self.grid.size();

        // Entities infected during this tick are not in the list, so they only
        // start spreading on the next one.
        let mut pending = self.grid.positions_matching(EntityState::Infected);
        let mut slots: HashMap<Position, usize> = pending
            .iter()
            .enumerate()
            .map(|(slot, pos)| (*pos, slot))
            .collect();

        let mut new_infections = 0u64;

        for slot in 0..pending.len() {
            let position = pending[slot];
            slots.remove(&position);

            match self.grid.get_mut(position) {
                Some(entity) => entity.increase_life_span(&self.model),
                None => continue,
            }

            for neighbor in position.neighbors(size) {
                if let Some(occupant) = self.grid.get_mut(neighbor) {
                    if occupant.get_infected(&self.model, &mut self.rng) {
                        new_infections += 1;
                        trace!(
                            source_row = position.row,
                            source_col = position.col,
                            row = neighbor.row,
                            col = neighbor.col,
                            "Neighbor infected"
                        );
                    }
                }
            }

            let destination = self
                .grid
                .get_mut(position)
                .and_then(|entity| entity.move_randomly(size, &mut self.rng));

            if let Some(destination) = destination {
                self.grid.swap(position, destination);

                // A pending entity pushed out of `destination` now waits at `position`.
                if let Some(displaced) = slots.remove(&destination) {
                    pending[displaced] = position;
                    slots.insert(position, displaced);
                }

                trace!(
                    from_row = position.row,
                    from_col = position.col,
                    to_row = destination.row,
                    to_col = destination.col,
                    "Entity moved"
                );
            }
        }

        let record = self.statistics();
        self.history.push(record);
        self.iteration_step += 1;

        event!(
            Level::DEBUG,
            counter_name = "new_infections",
            counter_value = new_infections,
            tick = record.iteration,
            "New infections this tick"
        );
        debug!(
            event = "tick_complete",
            tick = record.iteration,
            acted = pending.len(),
            infected = record.infected,
            healed = record.healed,
            dead = record.dead,
            "Tick complete"
        );

        record
    }

    fn get_random_tile(&mut self) -> Position {
        let size = self.grid.size();
        let row = self.rng.gen_range(0..size);
        let col = self.rng.gen_range(0..size);
        Position::new(row, col)
    }

    fn empty_tiles(&self) -> usize {
        self.grid.len() - self.grid.iter().count()
    }

    /// Rejection-sample empty tiles for `amount` immune entities
    fn add_immune_entities(&mut self, amount: usize) -> Result<()> {
        if amount > self.empty_tiles() {
            return Err(Error::Config(format!(
                "cannot seed {} immune entities into {} empty tiles",
                amount,
                self.empty_tiles()
            )));
        }

        let mut remaining = amount;
        while remaining > 0 {
            let position = self.get_random_tile();
            if self.grid.is_tile_empty(position) {
                self.grid.place(Entity::immune(position));
                remaining -= 1;
            }
        }

        Ok(())
    }

    fn add_infected_entity(&mut self) -> Result<()> {
        if self.empty_tiles() == 0 {
            return Err(Error::InvalidState(
                "no empty tile left for the initial infected entity".to_string(),
            ));
        }

        loop {
            let position = self.get_random_tile();
            if self.grid.is_tile_empty(position) {
                let entity = Entity::new(position, true, false, &self.model, &mut self.rng);
                debug!(
                    row = position.row,
                    col = position.col,
                    state = ?entity.state(),
                    "Initial infected entity placed"
                );
                self.grid.place(entity);
                return Ok(());
            }
        }
    }

    /// Fill every remaining tile in row-major order
    fn add_healthy_entities(&mut self) {
        let empty: Vec<Position> = self
            .grid
            .positions()
            .filter(|pos| self.grid.is_tile_empty(*pos))
            .collect();

        for position in empty {
            self.grid.place(Entity::healthy(position));
        }
    }
}

//! Dense square toroidal grid of optional entities.

use crate::entity::Entity;
use outbreak_core::{Census, EntityState, Error, Position, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A square toroidal grid holding at most one entity per tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    size: i32,
    tiles: Vec<Option<Entity>>,
}

impl Grid {
    pub fn new(size: i32) -> Result<Self> {
        if size < 1 {
            return Err(Error::Config(format!(
                "grid size must be at least 1, got {}",
                size
            )));
        }

        let cells = (size as usize) * (size as usize);
        Ok(Self {
            size,
            tiles: vec![None; cells],
        })
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Get the occupant of a tile (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> Option<&Entity> {
        let index = self.pos_to_index(pos);
        self.tiles[index].as_ref()
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Entity> {
        let index = self.pos_to_index(pos);
        self.tiles[index].as_mut()
    }

    pub fn is_tile_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Place an entity on its own tile if that tile is empty
    pub fn place(&mut self, entity: Entity) -> bool {
        let index = self.pos_to_index(entity.position());
        match self.tiles[index] {
            Some(_) => false,
            None => {
                self.tiles[index] = Some(entity);
                true
            }
        }
    }

    /// Exchange the contents of two tiles, keeping each occupant's position in
    /// step with the tile it now sits on.
    pub fn swap(&mut self, a: Position, b: Position) {
        let (a, b) = (a.wrap(self.size), b.wrap(self.size));
        let (index_a, index_b) = (self.pos_to_index(a), self.pos_to_index(b));
        if index_a == index_b {
            if let Some(entity) = self.tiles[index_a].as_mut() {
                entity.relocate(a);
            }
            return;
        }

        self.tiles.swap(index_a, index_b);
        if let Some(entity) = self.tiles[index_a].as_mut() {
            entity.relocate(a);
        }
        if let Some(entity) = self.tiles[index_b].as_mut() {
            entity.relocate(b);
        }
    }

    pub fn is_full(&self) -> bool {
        self.tiles.iter().all(Option::is_some)
    }

    /// Positions of every entity in `state`, in row-major order
    pub fn positions_matching(&self, state: EntityState) -> Vec<Position> {
        self.iter()
            .filter(|(_, entity)| entity.state() == state)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn count_matching(&self, state: EntityState) -> usize {
        self.iter().filter(|(_, entity)| entity.state() == state).count()
    }

    pub fn census(&self) -> Census {
        let mut census = Census::new();
        for (_, entity) in self.iter() {
            census.record(
                entity.state(),
                entity.symptom_status(),
                entity.mortality_status(),
            );
        }
        census
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        let wrapped = pos.wrap(self.size);
        (wrapped.row * self.size + wrapped.col) as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let row = (index as i32) / self.size;
        let col = (index as i32) % self.size;
        Position::new(row, col)
    }

    /// Iterator over all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.tiles.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over occupied tiles with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Entity)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(move |(i, tile)| tile.as_ref().map(|entity| (self.index_to_pos(i), entity)))
    }
}

/// One line per row, one state symbol per tile; empty tiles print as a space.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.size as usize) {
            let line: String = row
                .iter()
                .map(|tile| tile.as_ref().map_or(' ', |entity| entity.state().symbol()))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10).unwrap();
        assert_eq!(grid.size(), 10);
        assert_eq!(grid.len(), 100);
        assert!(!grid.is_full());
        assert_eq!(grid.iter().count(), 0);
    }

    #[test]
    fn test_degenerate_size_rejected() {
        assert!(matches!(Grid::new(0), Err(Error::Config(_))));
        assert!(matches!(Grid::new(-3), Err(Error::Config(_))));
    }

    #[test]
    fn test_toroidal_wrapping() {
        let mut grid = Grid::new(10).unwrap();
        assert!(grid.place(Entity::immune(Position::new(9, 9))));

        let entity = grid.get(Position::new(-1, -1)).unwrap();
        assert_eq!(entity.state(), EntityState::Immune);
        assert!(grid.get(Position::new(10, 10)).is_none());
    }

    #[test]
    fn test_place_refuses_occupied_tile() {
        let mut grid = Grid::new(3).unwrap();
        assert!(grid.place(Entity::healthy(Position::new(1, 1))));
        assert!(!grid.place(Entity::immune(Position::new(1, 1))));
        assert_eq!(
            grid.get(Position::new(1, 1)).unwrap().state(),
            EntityState::Healthy
        );
    }

    #[test]
    fn test_swap_updates_positions() {
        let mut grid = Grid::new(3).unwrap();
        grid.place(Entity::healthy(Position::new(0, 0)));
        grid.place(Entity::immune(Position::new(0, 1)));

        grid.swap(Position::new(0, 0), Position::new(0, 1));

        let moved = grid.get(Position::new(0, 1)).unwrap();
        assert_eq!(moved.state(), EntityState::Healthy);
        assert_eq!(moved.position(), Position::new(0, 1));

        let displaced = grid.get(Position::new(0, 0)).unwrap();
        assert_eq!(displaced.state(), EntityState::Immune);
        assert_eq!(displaced.position(), Position::new(0, 0));
    }

    #[test]
    fn test_swap_into_empty_tile() {
        let mut grid = Grid::new(3).unwrap();
        grid.place(Entity::healthy(Position::new(2, 2)));

        grid.swap(Position::new(2, 2), Position::new(0, 2));
        assert!(grid.is_tile_empty(Position::new(2, 2)));
        assert_eq!(
            grid.get(Position::new(0, 2)).unwrap().position(),
            Position::new(0, 2)
        );
    }

    #[test]
    fn test_positions_matching_is_row_major() {
        let mut grid = Grid::new(3).unwrap();
        for pos in [Position::new(2, 0), Position::new(0, 2), Position::new(1, 1)] {
            grid.place(Entity::immune(pos));
        }
        grid.place(Entity::healthy(Position::new(0, 0)));

        assert_eq!(
            grid.positions_matching(EntityState::Immune),
            vec![Position::new(0, 2), Position::new(1, 1), Position::new(2, 0)]
        );
        assert_eq!(grid.count_matching(EntityState::Healthy), 1);
    }

    #[test]
    fn test_display_dumps_symbols() {
        let mut grid = Grid::new(2).unwrap();
        grid.place(Entity::healthy(Position::new(0, 0)));
        grid.place(Entity::immune(Position::new(0, 1)));
        grid.place(Entity::healthy(Position::new(1, 1)));

        assert_eq!(grid.to_string(), "*~\n *\n");
    }

    #[test]
    fn test_census_counts_every_entity() {
        let mut grid = Grid::new(2).unwrap();
        for pos in grid.positions().collect::<Vec<_>>() {
            grid.place(Entity::healthy(pos));
        }

        let census = grid.census();
        assert!(grid.is_full());
        assert_eq!(census.total(), 4);
        assert_eq!(census.healthy, 4);
    }
}

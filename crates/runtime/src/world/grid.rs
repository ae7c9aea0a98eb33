//! Bounded grid maps holding every movable and fixed entity.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use teleport_core::action::radial_cells;
use teleport_core::{
    Cell, EntityHandle, EntityId, EntityKind, EntityWorld, Location, MapDimensions, MapId,
    TeleportConfig,
};
use tracing::{trace, warn};

use super::rng::ScatterRng;

/// Random probes made before falling back to the nearest free cell.
const SCATTER_ATTEMPTS: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMap {
    pub dimensions: MapDimensions,
    blocked: BTreeSet<Cell>,
}

impl GridMap {
    pub fn new(dimensions: MapDimensions, blocked: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            dimensions,
            blocked: blocked.into_iter().collect(),
        }
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.dimensions.contains(cell) && !self.blocked.contains(&cell)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldEntity {
    pub kind: EntityKind,
    pub location: Option<Location>,
    pub name: Option<String>,
}

impl WorldEntity {
    pub fn new(kind: EntityKind, location: Location) -> Self {
        Self {
            kind,
            location: Some(location),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// In-memory host world backing [`EntityWorld`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridWorld {
    maps: BTreeMap<MapId, GridMap>,
    entities: BTreeMap<EntityId, WorldEntity>,
    rng: ScatterRng,
}

impl GridWorld {
    pub fn new(seed: u64) -> Self {
        Self {
            maps: BTreeMap::new(),
            entities: BTreeMap::new(),
            rng: ScatterRng::new(seed),
        }
    }

    pub fn add_map(&mut self, id: MapId, map: GridMap) {
        self.maps.insert(id, map);
    }

    pub fn map(&self, id: MapId) -> Option<&GridMap> {
        self.maps.get(&id)
    }

    pub fn insert_entity(&mut self, id: EntityId, entity: WorldEntity) {
        self.entities.insert(id, entity);
    }

    /// Removes an entity entirely, e.g. when it dies.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<WorldEntity> {
        self.entities.remove(&id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&WorldEntity> {
        self.entities.get(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &WorldEntity)> {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }

    /// Display name, falling back to the id.
    pub fn name_of(&self, id: EntityId) -> String {
        self.entities
            .get(&id)
            .and_then(|entity| entity.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

impl EntityWorld for GridWorld {
    fn dimensions(&self, map: MapId) -> Option<MapDimensions> {
        self.maps.get(&map).map(|grid| grid.dimensions)
    }

    fn entities_at(&self, map: MapId, cell: Cell) -> Vec<EntityHandle> {
        let here = Location::new(map, cell);
        self.entities
            .iter()
            .filter(|(_, entity)| entity.location == Some(here))
            .map(|(id, entity)| EntityHandle::new(*id, entity.kind))
            .collect()
    }

    fn location(&self, entity: EntityId) -> Option<Location> {
        self.entities.get(&entity).and_then(|entity| entity.location)
    }

    fn owns(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    fn despawn(&mut self, entity: EntityId) {
        if let Some(placed) = self.entities.get_mut(&entity) {
            placed.location = None;
        }
    }

    fn spawn(&mut self, entity: EntityId, map: MapId, cell: Cell) {
        match self.entities.get_mut(&entity) {
            Some(placed) => {
                trace!(%entity, %map, %cell, "spawned");
                placed.location = Some(Location::new(map, cell));
            }
            None => warn!(%entity, "spawn requested for an entity the world does not own"),
        }
    }

    fn random_walkable_cell_near(&mut self, map: MapId, cell: Cell, radius: u32) -> Cell {
        let Some(grid) = self.maps.get(&map) else {
            return cell;
        };
        let radius = radius.min(TeleportConfig::MAX_RADIUS);
        let reach = radius as i32;
        for _ in 0..SCATTER_ATTEMPTS {
            let dx = self.rng.range(-reach, reach);
            let dz = self.rng.range(-reach, reach);
            let candidate = cell.offset(dx, dz);
            if grid.is_walkable(candidate) {
                return candidate;
            }
        }
        radial_cells(cell, radius)
            .into_iter()
            .find(|candidate| grid.is_walkable(*candidate))
            .unwrap_or(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: MapId = MapId(0);

    fn world() -> GridWorld {
        let mut world = GridWorld::new(9);
        world.add_map(
            MAP,
            GridMap::new(MapDimensions::new(10, 10), [Cell::new(5, 5)]),
        );
        world.insert_entity(
            EntityId(1),
            WorldEntity::new(EntityKind::Agent, Location::new(MAP, Cell::new(2, 2))).named("Ada"),
        );
        world.insert_entity(
            EntityId(2),
            WorldEntity::new(EntityKind::Structure, Location::new(MAP, Cell::new(2, 2))),
        );
        world
    }

    #[test]
    fn entities_at_reports_kinds_in_id_order() {
        let world = world();
        let here = world.entities_at(MAP, Cell::new(2, 2));
        assert_eq!(
            here,
            vec![
                EntityHandle::new(EntityId(1), EntityKind::Agent),
                EntityHandle::new(EntityId(2), EntityKind::Structure),
            ]
        );
        assert_eq!(world.name_of(EntityId(1)), "Ada");
        assert_eq!(world.name_of(EntityId(2)), "entity#2");
    }

    #[test]
    fn despawn_then_spawn_moves_entity() {
        let mut world = world();
        world.despawn(EntityId(1));
        assert_eq!(world.location(EntityId(1)), None);

        world.spawn(EntityId(1), MAP, Cell::new(7, 7));
        assert_eq!(
            world.location(EntityId(1)),
            Some(Location::new(MAP, Cell::new(7, 7)))
        );

        world.spawn(EntityId(99), MAP, Cell::ORIGIN);
        assert!(world.entity(EntityId(99)).is_none());
        assert!(world.owns(EntityId(1)));
        assert!(!world.owns(EntityId(99)));
    }

    #[test]
    fn scatter_stays_walkable_and_near() {
        let mut world = world();
        for _ in 0..50 {
            let cell = world.random_walkable_cell_near(MAP, Cell::new(5, 4), 1);
            assert!(world.map(MAP).unwrap().is_walkable(cell));
            assert!((cell.x - 5).abs() <= 1 && (cell.z - 4).abs() <= 1);
        }
    }

    #[test]
    fn scatter_with_an_enormous_radius_still_lands_on_the_map() {
        let mut world = world();
        for radius in [1 << 30, u32::MAX] {
            let cell = world.random_walkable_cell_near(MAP, Cell::new(5, 4), radius);
            assert!(world.map(MAP).unwrap().is_walkable(cell));
        }
    }

    #[test]
    fn scatter_is_reproducible_per_seed() {
        let mut a = world();
        let mut b = world();
        let picks_a: Vec<_> = (0..8)
            .map(|_| a.random_walkable_cell_near(MAP, Cell::new(4, 4), 3))
            .collect();
        let picks_b: Vec<_> = (0..8)
            .map(|_| b.random_walkable_cell_near(MAP, Cell::new(4, 4), 3))
            .collect();
        assert_eq!(picks_a, picks_b);
    }
}

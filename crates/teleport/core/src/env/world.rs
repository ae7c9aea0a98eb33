use crate::state::{Cell, EntityId, Location, MapId};

/// Host world access needed to locate and relocate entities.
///
/// Implementations own every entity; the core only holds ids. `despawn`
/// followed by `spawn` for the same entity must happen without the host
/// observing the gap.
pub trait EntityWorld {
    /// Bounds of a loaded map, `None` if the map is unknown.
    fn dimensions(&self, map: MapId) -> Option<MapDimensions>;

    /// Everything currently placed on `cell`, structures included.
    fn entities_at(&self, map: MapId, cell: Cell) -> Vec<EntityHandle>;

    /// Where the entity is placed, `None` if it is not in the world.
    fn location(&self, entity: EntityId) -> Option<Location>;

    /// Whether the host still holds the entity at all, placed or not.
    ///
    /// Entities the host destroyed while an action charged are skipped by
    /// transfers instead of being reported as moved.
    fn owns(&self, _entity: EntityId) -> bool {
        true
    }

    fn despawn(&mut self, entity: EntityId);

    fn spawn(&mut self, entity: EntityId, map: MapId, cell: Cell);

    /// A walkable cell within `radius` of `cell`, chosen at random by the host.
    fn random_walkable_cell_near(&mut self, map: MapId, cell: Cell, radius: u32) -> Cell;

    fn contains(&self, location: Location) -> bool {
        self.dimensions(location.map)
            .is_some_and(|dimensions| dimensions.contains(location.cell))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.z >= 0 && cell.x < self.width as i32 && cell.z < self.height as i32
    }
}

/// Classification the locator uses to decide what may be moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    /// Mobile agent (colonist, animal, drone).
    Agent,
    /// Loose item.
    Item,
    /// Fixed structure. Never relocated.
    Structure,
}

impl EntityKind {
    pub fn is_movable(self) -> bool {
        !matches!(self, EntityKind::Structure)
    }
}

/// An entity as reported by [`EntityWorld::entities_at`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityHandle {
    pub id: EntityId,
    pub kind: EntityKind,
}

impl EntityHandle {
    pub const fn new(id: EntityId, kind: EntityKind) -> Self {
        Self { id, kind }
    }
}

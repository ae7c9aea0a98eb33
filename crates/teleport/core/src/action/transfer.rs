//! Batch relocation of entities.
//!
//! Each entity is despawned (when placed) and spawned at its destination in one
//! step, and the whole batch runs inside a single engine call, so the host never
//! observes a partially applied transfer. Entities the host no longer owns are
//! skipped and left out of the report.

use tracing::debug;

use super::error::TransferError;
use crate::env::EntityWorld;
use crate::state::{Cell, EntityId, EntitySet, Location, MapId};

/// Where one entity ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub entity: EntityId,
    pub destination: Location,
}

/// Result of a transfer. An empty batch is a no-op, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferReport {
    NothingToMove,
    Moved(Vec<Placement>),
}

impl TransferReport {
    pub fn placements(&self) -> &[Placement] {
        match self {
            TransferReport::NothingToMove => &[],
            TransferReport::Moved(placements) => placements,
        }
    }

    pub fn moved_count(&self) -> usize {
        self.placements().len()
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, TransferReport::NothingToMove)
    }
}

/// Distributes the batch over `cells` cyclically: entity `i` lands on
/// `cells[i % cells.len()]`.
///
/// # Errors
///
/// Returns `TransferError::NoDestinationCells` for a non-empty batch with no cells.
pub fn transfer_to_cells<W>(
    world: &mut W,
    entities: &EntitySet,
    map: MapId,
    cells: &[Cell],
) -> Result<TransferReport, TransferError>
where
    W: EntityWorld + ?Sized,
{
    if entities.is_empty() {
        return Ok(TransferReport::NothingToMove);
    }
    if cells.is_empty() {
        return Err(TransferError::NoDestinationCells {
            pending: entities.len(),
        });
    }

    let placements = entities
        .iter()
        .zip(cells.iter().cycle())
        .filter_map(|(entity, cell)| relocate(world, entity, Location::new(map, *cell)))
        .collect();
    Ok(report(placements))
}

/// Sends every entity to its own random walkable cell near `destination`.
pub fn transfer_scattered<W>(
    world: &mut W,
    entities: &EntitySet,
    destination: Location,
    radius: u32,
) -> TransferReport
where
    W: EntityWorld + ?Sized,
{
    if entities.is_empty() {
        return TransferReport::NothingToMove;
    }

    let placements = entities
        .iter()
        .filter_map(|entity| {
            if !held(&*world, entity) {
                return None;
            }
            let cell = world.random_walkable_cell_near(destination.map, destination.cell, radius);
            relocate(world, entity, Location::new(destination.map, cell))
        })
        .collect();
    report(placements)
}

fn report(placements: Vec<Placement>) -> TransferReport {
    if placements.is_empty() {
        TransferReport::NothingToMove
    } else {
        TransferReport::Moved(placements)
    }
}

fn held<W>(world: &W, entity: EntityId) -> bool
where
    W: EntityWorld + ?Sized,
{
    if world.location(entity).is_some() || world.owns(entity) {
        return true;
    }
    debug!(%entity, "skipping entity the world no longer holds");
    false
}

fn relocate<W>(world: &mut W, entity: EntityId, destination: Location) -> Option<Placement>
where
    W: EntityWorld + ?Sized,
{
    if !held(&*world, entity) {
        return None;
    }
    if let Some(from) = world.location(entity) {
        world.despawn(entity);
        debug!(%entity, %from, %destination, "relocating entity");
    }
    world.spawn(entity, destination.map, destination.cell);
    Some(Placement {
        entity,
        destination,
    })
}

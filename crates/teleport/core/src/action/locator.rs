//! Selection of the entities an action relocates.
//!
//! Recall gathers radially around the anchor when it starts; forward teleport
//! gathers the source platform's footprint when it fires. Fixed structures are
//! never selected.

use crate::config::TeleportConfig;
use crate::env::EntityWorld;
use crate::state::{Cell, EntityId, EntitySet, Footprint, MapId};

/// Cells within `radius` of `center`, nearest first.
///
/// A cell qualifies when `dx² + dz² <= radius²`. Equal distances are ordered by
/// `(dz, dx)` so the scan is stable. Bounds are not checked here. The radius is
/// capped at [`TeleportConfig::MAX_RADIUS`].
pub fn radial_cells(center: Cell, radius: u32) -> Vec<Cell> {
    let r = radius.min(TeleportConfig::MAX_RADIUS) as i32;
    let limit = i64::from(r) * i64::from(r);
    let mut offsets = Vec::new();
    for dz in -r..=r {
        for dx in -r..=r {
            let dist = i64::from(dx) * i64::from(dx) + i64::from(dz) * i64::from(dz);
            if dist <= limit {
                offsets.push((dist, dz, dx));
            }
        }
    }
    offsets.sort_unstable();
    offsets
        .into_iter()
        .map(|(_, dz, dx)| center.offset(dx, dz))
        .collect()
}

/// Movable entities within `radius` of `center`, with `anchor` always included.
///
/// The anchor comes first; everything else follows in scan order.
pub fn gather_around<W>(
    world: &W,
    map: MapId,
    center: Cell,
    radius: u32,
    anchor: EntityId,
) -> EntitySet
where
    W: EntityWorld + ?Sized,
{
    let mut set = EntitySet::new();
    set.insert(anchor);

    let Some(bounds) = world.dimensions(map) else {
        return set;
    };
    for cell in radial_cells(center, radius) {
        if !bounds.contains(cell) {
            continue;
        }
        collect_movable(world, map, cell, &mut set);
    }
    set
}

/// Movable entities standing on `footprint`, in row-major cell order.
pub fn gather_footprint<W>(world: &W, map: MapId, footprint: Footprint) -> EntitySet
where
    W: EntityWorld + ?Sized,
{
    let mut set = EntitySet::new();
    for cell in footprint.cells() {
        collect_movable(world, map, cell, &mut set);
    }
    set
}

fn collect_movable<W>(world: &W, map: MapId, cell: Cell, set: &mut EntitySet)
where
    W: EntityWorld + ?Sized,
{
    for handle in world.entities_at(map, cell) {
        if handle.kind.is_movable() {
            set.insert(handle.id);
        }
    }
}

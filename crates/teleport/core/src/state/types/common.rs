use std::fmt;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

numeric_id!(
    /// Stable identity of a stationary device (controller or platform).
    DeviceId,
    "device"
);
numeric_id!(
    /// Handle of a movable entity owned by the host world.
    EntityId,
    "entity"
);
numeric_id!(
    /// Identifies one loaded host map.
    MapId,
    "map"
);
numeric_id!(
    /// Identifies a shared power network.
    NetworkId,
    "net"
);
numeric_id!(
    /// Identifies a homing charge holder.
    ChargeSourceId,
    "homer"
);

/// Discrete grid cell on a host map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub const ORIGIN: Self = Self { x: 0, z: 0 };

    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// A cell on a specific map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub map: MapId,
    pub cell: Cell,
}

impl Location {
    pub const fn new(map: MapId, cell: Cell) -> Self {
        Self { map, cell }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.cell, self.map)
    }
}

/// Rectangular area occupied by a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub origin: Cell,
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub const fn new(origin: Cell, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Single-cell footprint.
    pub const fn single(origin: Cell) -> Self {
        Self::new(origin, 1, 1)
    }

    /// Occupied cells in row-major order starting at the origin.
    ///
    /// Cells past the edge of the `i32` coordinate space are dropped.
    pub fn cells(&self) -> Vec<Cell> {
        let mut cells = Vec::new();
        for dz in 0..i64::from(self.height) {
            let Ok(z) = i32::try_from(i64::from(self.origin.z) + dz) else {
                break;
            };
            for dx in 0..i64::from(self.width) {
                let Ok(x) = i32::try_from(i64::from(self.origin.x) + dx) else {
                    break;
                };
                cells.push(Cell::new(x, z));
            }
        }
        cells
    }

    pub fn contains(&self, cell: Cell) -> bool {
        let (x, z) = (i64::from(cell.x), i64::from(cell.z));
        let (left, top) = (i64::from(self.origin.x), i64::from(self.origin.z));
        x >= left
            && z >= top
            && x < left + i64::from(self.width)
            && z < top + i64::from(self.height)
    }
}

/// Simulation clock expressed in whole ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_cells_are_row_major() {
        let footprint = Footprint::new(Cell::new(4, 7), 2, 2);
        assert_eq!(
            footprint.cells(),
            vec![
                Cell::new(4, 7),
                Cell::new(5, 7),
                Cell::new(4, 8),
                Cell::new(5, 8),
            ]
        );
        assert!(footprint.contains(Cell::new(5, 8)));
        assert!(!footprint.contains(Cell::new(6, 8)));
    }

    #[test]
    fn footprint_at_the_coordinate_edge_stays_in_range() {
        let footprint = Footprint::new(Cell::new(i32::MAX - 1, 0), u32::MAX, 1);
        assert!(footprint.contains(Cell::new(i32::MAX, 0)));
        assert!(!footprint.contains(Cell::new(i32::MAX - 2, 0)));
        assert_eq!(
            footprint.cells(),
            vec![Cell::new(i32::MAX - 1, 0), Cell::new(i32::MAX, 0)]
        );
    }

    #[test]
    fn ids_render_with_prefix() {
        assert_eq!(DeviceId(3).to_string(), "device#3");
        assert_eq!(ChargeSourceId(1).to_string(), "homer#1");
    }
}

//! sectors.bin decode and area queries.
//!
//! Format (big-endian, 6-byte records): a 128x128 grid partitioning the
//! graph bounds, row-major from the south-west corner. Each cell stores
//!
//!   start_node_id: i32  // first node of the sector
//!   node_count:    u16  // number of nodes in the sector
//!
//! Nodes are sorted by sector in nodes.bin, so each cell covers a contiguous
//! id range and "all nodes near a point" never scans the whole node table.

use crate::geo::{bounds, Point};
use crate::math;

use super::buffer::GraphBuffer;

const GRID_SIDE: i32 = 128;
const RECORD_SIZE: usize = 6;
const OFFSET_COUNT: usize = 4;

/// A contiguous node-id range `[start_node_id, end_node_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector {
    pub start_node_id: u32,
    pub end_node_id: u32,
}

/// Random-access view over the sector grid.
#[derive(Debug)]
pub struct SectorTable {
    data: GraphBuffer,
}

impl SectorTable {
    pub fn new(data: impl Into<GraphBuffer>) -> Self {
        Self { data: data.into() }
    }

    /// All sectors intersecting the square of side `2 * distance` centered on
    /// `center`, clamped to the grid.
    pub fn sectors_in_area(&self, center: Point, distance: f64) -> Vec<Sector> {
        let sector_width = bounds::WIDTH / f64::from(GRID_SIDE);
        let sector_height = bounds::HEIGHT / f64::from(GRID_SIDE);

        let x_min = grid_coord(center.e - distance - bounds::MIN_E, sector_width);
        let x_max = grid_coord(center.e + distance - bounds::MIN_E, sector_width);
        let y_min = grid_coord(center.n - distance - bounds::MIN_N, sector_height);
        let y_max = grid_coord(center.n + distance - bounds::MIN_N, sector_height);

        let mut sectors = Vec::with_capacity(((x_max - x_min + 1) * (y_max - y_min + 1)) as usize);
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let offset = RECORD_SIZE * (y * GRID_SIDE + x) as usize;
                let start = self.data.i32_at(offset) as u32;
                let count = u32::from(self.data.u16_at(offset + OFFSET_COUNT));
                sectors.push(Sector {
                    start_node_id: start,
                    end_node_id: start + count,
                });
            }
        }
        sectors
    }
}

fn grid_coord(offset_m: f64, cell_size_m: f64) -> i32 {
    math::clamp_i32(0, (offset_m / cell_size_m) as i32, GRID_SIDE - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A full 128x128 grid where cell (x, y) starts at node y*128+x and holds
    /// one node.
    fn one_node_per_sector() -> SectorTable {
        let mut raw = Vec::with_capacity(RECORD_SIZE * (GRID_SIDE * GRID_SIDE) as usize);
        for id in 0..(GRID_SIDE * GRID_SIDE) {
            raw.extend_from_slice(&id.to_be_bytes());
            raw.extend_from_slice(&1u16.to_be_bytes());
        }
        SectorTable::new(raw)
    }

    #[test]
    fn small_area_hits_single_sector() {
        let table = one_node_per_sector();
        let sector_width = bounds::WIDTH / 128.0;
        let sector_height = bounds::HEIGHT / 128.0;
        // Center of cell (5, 3).
        let center = Point::new(
            bounds::MIN_E + 5.5 * sector_width,
            bounds::MIN_N + 3.5 * sector_height,
        );
        let sectors = table.sectors_in_area(center, 1.0);
        assert_eq!(sectors.len(), 1);
        assert_eq!(sectors[0].start_node_id, 3 * 128 + 5);
        assert_eq!(sectors[0].end_node_id, 3 * 128 + 6);
    }

    #[test]
    fn larger_area_spans_neighbouring_sectors() {
        let table = one_node_per_sector();
        let sector_width = bounds::WIDTH / 128.0;
        let sector_height = bounds::HEIGHT / 128.0;
        let center = Point::new(
            bounds::MIN_E + 5.5 * sector_width,
            bounds::MIN_N + 3.5 * sector_height,
        );
        // 2 km reaches one cell in each direction for both cell sizes: 3x3.
        let sectors = table.sectors_in_area(center, 2000.0);
        assert_eq!(sectors.len(), 9);
        assert_eq!(sectors[0].start_node_id, 2 * 128 + 4);
        assert_eq!(sectors[8].start_node_id, 4 * 128 + 6);
    }

    #[test]
    fn area_is_clamped_to_grid() {
        let table = one_node_per_sector();
        let corner = Point::new(bounds::MIN_E, bounds::MIN_N);
        let sectors = table.sectors_in_area(corner, 1.0);
        assert_eq!(sectors.len(), 1);
        assert_eq!(sectors[0].start_node_id, 0);

        // A huge radius covers the whole grid, no more.
        let all = table.sectors_in_area(corner, bounds::WIDTH + bounds::HEIGHT);
        assert_eq!(all.len(), (GRID_SIDE * GRID_SIDE) as usize);
    }
}

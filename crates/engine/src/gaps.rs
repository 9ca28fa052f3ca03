//! Free-space discovery over a voxel grid.
//!
//! After the corner sweep, the remaining free volume of a container can be
//! fragmented into pockets whose corners no longer coincide with placed-box
//! corners. This module voxelizes the container, marks occupied cells and
//! extracts the connected empty regions with an iterative flood fill, so
//! deep stacks never recurse.

use nalgebra::Vector3;

use cartonize_core::geom::Aabb;

/// Upper bound on grid cells along the longest container axis.
const MAX_CELLS_PER_AXIS: usize = 32;

/// Occupancy grid over a container's interior.
///
/// Cells are cubes of a single edge length. The resolution adapts to the
/// requested finest feature size but is clamped so the total cell count
/// stays bounded regardless of container dimensions.
#[derive(Debug, Clone)]
pub struct FreeSpaceGrid {
    inner: Vector3<f64>,
    cell: f64,
    nx: usize,
    ny: usize,
    nz: usize,
    occupied: Vec<bool>,
}

impl FreeSpaceGrid {
    /// Builds the grid for a container interior and a set of occupied boxes.
    ///
    /// `finest` is the smallest feature size worth resolving, typically half
    /// the smallest dimension of the item being recovered.
    pub fn build(inner: Vector3<f64>, boxes: &[Aabb], finest: f64) -> Self {
        let longest = inner.x.max(inner.y).max(inner.z);
        let cell = finest
            .max(longest / MAX_CELLS_PER_AXIS as f64)
            .max(f64::EPSILON);

        let nx = ((inner.x / cell).ceil() as usize).max(1);
        let ny = ((inner.y / cell).ceil() as usize).max(1);
        let nz = ((inner.z / cell).ceil() as usize).max(1);

        let mut grid = Self {
            inner,
            cell,
            nx,
            ny,
            nz,
            occupied: vec![false; nx * ny * nz],
        };

        for x in 0..nx {
            for y in 0..ny {
                for z in 0..nz {
                    let cell_box = grid.cell_box(x, y, z);
                    if boxes.iter().any(|b| b.overlaps(&cell_box)) {
                        let index = grid.index(x, y, z);
                        grid.occupied[index] = true;
                    }
                }
            }
        }

        grid
    }

    /// Returns the cell edge length.
    pub fn cell_size(&self) -> f64 {
        self.cell
    }

    /// Returns the grid dimensions (cells along x, y, z).
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    /// Returns whether a cell is occupied.
    pub fn is_occupied(&self, x: usize, y: usize, z: usize) -> bool {
        self.occupied[self.index(x, y, z)]
    }

    /// Returns the bounding boxes of the connected empty regions.
    ///
    /// Connectivity is 6-neighborhood. Regions are traversed with an
    /// explicit stack and reported sorted bottom-up (z, then y, then x of
    /// the region corner) for deterministic candidate order.
    pub fn empty_regions(&self) -> Vec<Aabb> {
        let total = self.occupied.len();
        let mut visited = vec![false; total];
        let mut stack: Vec<usize> = Vec::new();
        let mut regions = Vec::new();

        for start in 0..total {
            if visited[start] || self.occupied[start] {
                continue;
            }

            visited[start] = true;
            stack.push(start);

            let mut min_cell = (self.nx, self.ny, self.nz);
            let mut max_cell = (0usize, 0usize, 0usize);

            while let Some(index) = stack.pop() {
                let (x, y, z) = self.coords(index);
                min_cell = (min_cell.0.min(x), min_cell.1.min(y), min_cell.2.min(z));
                max_cell = (max_cell.0.max(x), max_cell.1.max(y), max_cell.2.max(z));

                for (nx, ny, nz) in self.neighbors(x, y, z) {
                    let neighbor = self.index(nx, ny, nz);
                    if !visited[neighbor] && !self.occupied[neighbor] {
                        visited[neighbor] = true;
                        stack.push(neighbor);
                    }
                }
            }

            regions.push(self.region_box(min_cell, max_cell));
        }

        regions.sort_by(|a, b| {
            a.min
                .z
                .partial_cmp(&b.min.z)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(
                    a.min
                        .y
                        .partial_cmp(&b.min.y)
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
                .then(
                    a.min
                        .x
                        .partial_cmp(&b.min.x)
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
        });

        regions
    }

    // Flat arena layout, x-major.
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.ny + y) * self.nz + z
    }

    fn coords(&self, index: usize) -> (usize, usize, usize) {
        let z = index % self.nz;
        let y = (index / self.nz) % self.ny;
        let x = index / (self.ny * self.nz);
        (x, y, z)
    }

    fn neighbors(&self, x: usize, y: usize, z: usize) -> Vec<(usize, usize, usize)> {
        let mut out = Vec::with_capacity(6);
        if x > 0 {
            out.push((x - 1, y, z));
        }
        if x + 1 < self.nx {
            out.push((x + 1, y, z));
        }
        if y > 0 {
            out.push((x, y - 1, z));
        }
        if y + 1 < self.ny {
            out.push((x, y + 1, z));
        }
        if z > 0 {
            out.push((x, y, z - 1));
        }
        if z + 1 < self.nz {
            out.push((x, y, z + 1));
        }
        out
    }

    fn cell_box(&self, x: usize, y: usize, z: usize) -> Aabb {
        let min = Vector3::new(
            x as f64 * self.cell,
            y as f64 * self.cell,
            z as f64 * self.cell,
        );
        let max = Vector3::new(
            ((x + 1) as f64 * self.cell).min(self.inner.x),
            ((y + 1) as f64 * self.cell).min(self.inner.y),
            ((z + 1) as f64 * self.cell).min(self.inner.z),
        );
        Aabb::new(min, max)
    }

    fn region_box(&self, min_cell: (usize, usize, usize), max_cell: (usize, usize, usize)) -> Aabb {
        let min = Vector3::new(
            min_cell.0 as f64 * self.cell,
            min_cell.1 as f64 * self.cell,
            min_cell.2 as f64 * self.cell,
        );
        let max = Vector3::new(
            ((max_cell.0 + 1) as f64 * self.cell).min(self.inner.x),
            ((max_cell.1 + 1) as f64 * self.cell).min(self.inner.y),
            ((max_cell.2 + 1) as f64 * self.cell).min(self.inner.z),
        );
        Aabb::new(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_container_is_one_region() {
        let inner = Vector3::new(100.0, 100.0, 100.0);
        let grid = FreeSpaceGrid::build(inner, &[], 10.0);
        let regions = grid.empty_regions();

        assert_eq!(regions.len(), 1);
        assert_relative_eq!(regions[0].min.x, 0.0);
        assert_relative_eq!(regions[0].max.x, 100.0);
        assert_relative_eq!(regions[0].max.z, 100.0);
    }

    #[test]
    fn test_full_container_has_no_regions() {
        let inner = Vector3::new(100.0, 100.0, 100.0);
        let full = Aabb::from_position_size(Vector3::new(0.0, 0.0, 0.0), inner);
        let grid = FreeSpaceGrid::build(inner, &[full], 10.0);
        assert!(grid.empty_regions().is_empty());
    }

    #[test]
    fn test_half_filled_container() {
        let inner = Vector3::new(100.0, 100.0, 100.0);
        let lower = Aabb::from_position_size(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(100.0, 100.0, 50.0),
        );
        let grid = FreeSpaceGrid::build(inner, &[lower], 5.0);
        let regions = grid.empty_regions();

        assert_eq!(regions.len(), 1);
        // Free region sits on top of the placed slab.
        assert_relative_eq!(regions[0].min.z, 50.0);
        assert_relative_eq!(regions[0].max.z, 100.0);
    }

    #[test]
    fn test_disconnected_pockets_are_separate_regions() {
        let inner = Vector3::new(100.0, 100.0, 100.0);
        // A wall through the middle leaves two disconnected pockets.
        let wall = Aabb::from_position_size(
            Vector3::new(40.0, 0.0, 0.0),
            Vector3::new(20.0, 100.0, 100.0),
        );
        let grid = FreeSpaceGrid::build(inner, &[wall], 5.0);
        let regions = grid.empty_regions();

        assert_eq!(regions.len(), 2);
        assert_relative_eq!(regions[0].min.x, 0.0);
        assert_relative_eq!(regions[0].max.x, 40.0);
        assert_relative_eq!(regions[1].min.x, 60.0);
        assert_relative_eq!(regions[1].max.x, 100.0);
    }

    #[test]
    fn test_resolution_is_clamped() {
        let inner = Vector3::new(3200.0, 3200.0, 3200.0);
        // A tiny finest size must not explode the cell count.
        let grid = FreeSpaceGrid::build(inner, &[], 0.001);
        let (nx, ny, nz) = grid.shape();
        assert!(nx <= MAX_CELLS_PER_AXIS);
        assert!(ny <= MAX_CELLS_PER_AXIS);
        assert!(nz <= MAX_CELLS_PER_AXIS);
    }

    #[test]
    fn test_large_grid_flood_fill_is_iterative() {
        // A maximal empty grid exercises the explicit-stack traversal on
        // every cell in one component.
        let inner = Vector3::new(320.0, 320.0, 320.0);
        let grid = FreeSpaceGrid::build(inner, &[], 10.0);
        let (nx, ny, nz) = grid.shape();
        assert_eq!((nx, ny, nz), (32, 32, 32));
        let regions = grid.empty_regions();
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn test_regions_sorted_bottom_up() {
        let inner = Vector3::new(100.0, 100.0, 100.0);
        // A full horizontal slab splits the space into below and above.
        let slab = Aabb::from_position_size(
            Vector3::new(0.0, 0.0, 40.0),
            Vector3::new(100.0, 100.0, 20.0),
        );
        let grid = FreeSpaceGrid::build(inner, &[slab], 5.0);
        let regions = grid.empty_regions();

        assert_eq!(regions.len(), 2);
        assert!(regions[0].min.z < regions[1].min.z);
    }
}

//! Goal-rooted workspace distance field.
//!
//! An unweighted breadth-first flood over the collision grid's voxels,
//! computed once per plan from the goal's cell. The resulting
//! distance-to-goal map is a lower bound on workspace travel and backs the
//! optional workspace heuristic.

use std::collections::VecDeque;

/// Unweighted 6-connected BFS over a labeled voxel grid.
///
/// Cells on the outer boundary of the grid are implicit walls: they are
/// never enqueued and their distances stay at [`Bfs3D::UNREACHABLE`].
#[derive(Clone, Debug)]
pub struct Bfs3D {
    nx: usize,
    ny: usize,
    nz: usize,
    walls: Vec<bool>,
    distances: Vec<u32>,
}

impl Bfs3D {
    /// Distance value of walls and cells the flood never reached.
    pub const UNREACHABLE: u32 = u32::MAX;

    /// Create a grid of the given cell counts, all cells open and
    /// undiscovered.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        let total = nx * ny * nz;
        Self {
            nx,
            ny,
            nz,
            walls: vec![false; total],
            distances: vec![Self::UNREACHABLE; total],
        }
    }

    /// Grid dimensions as (nx, ny, nz).
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.ny + y) * self.nx + x
    }

    #[inline]
    fn in_interior(&self, x: usize, y: usize, z: usize) -> bool {
        x >= 1 && y >= 1 && z >= 1 && x + 1 < self.nx && y + 1 < self.ny && z + 1 < self.nz
    }

    /// Mark a cell as a wall.
    pub fn set_wall(&mut self, x: usize, y: usize, z: usize) {
        let idx = self.index(x, y, z);
        self.walls[idx] = true;
    }

    /// Whether a cell is a wall.
    #[inline]
    pub fn is_wall(&self, x: usize, y: usize, z: usize) -> bool {
        self.walls[self.index(x, y, z)]
    }

    /// Distance in cells from the flood source, or [`Bfs3D::UNREACHABLE`].
    #[inline]
    pub fn distance(&self, x: usize, y: usize, z: usize) -> u32 {
        self.distances[self.index(x, y, z)]
    }

    /// One z-plane of the distance field, row-major in (x, y). Diagnostic.
    pub fn distance_slice(&self, z: usize) -> &[u32] {
        let plane = self.nx * self.ny;
        &self.distances[z * plane..(z + 1) * plane]
    }

    /// Flood distances from a source cell.
    ///
    /// Fills every reachable non-wall interior cell with its 6-connected
    /// unweighted shortest path length from `(sx, sy, sz)`. Repeat runs
    /// start from a clean field.
    pub fn run(&mut self, sx: usize, sy: usize, sz: usize) {
        self.distances.fill(Self::UNREACHABLE);

        if !self.in_interior(sx, sy, sz) {
            tracing::warn!(sx, sy, sz, "BFS source on or outside the grid boundary");
            return;
        }
        if self.is_wall(sx, sy, sz) {
            tracing::warn!(sx, sy, sz, "BFS source is a wall cell");
            return;
        }

        let source = self.index(sx, sy, sz);
        self.distances[source] = 0;

        let mut queue = VecDeque::new();
        queue.push_back((sx, sy, sz));

        const NEIGHBORS: [(i64, i64, i64); 6] = [
            (-1, 0, 0),
            (1, 0, 0),
            (0, -1, 0),
            (0, 1, 0),
            (0, 0, -1),
            (0, 0, 1),
        ];

        while let Some((x, y, z)) = queue.pop_front() {
            let next_dist = self.distances[self.index(x, y, z)] + 1;

            for &(dx, dy, dz) in &NEIGHBORS {
                let qx = x as i64 + dx;
                let qy = y as i64 + dy;
                let qz = z as i64 + dz;
                if qx < 0 || qy < 0 || qz < 0 {
                    continue;
                }
                let (qx, qy, qz) = (qx as usize, qy as usize, qz as usize);
                if !self.in_interior(qx, qy, qz) {
                    continue;
                }
                let idx = self.index(qx, qy, qz);
                if self.walls[idx] || self.distances[idx] != Self::UNREACHABLE {
                    continue;
                }
                self.distances[idx] = next_dist;
                queue.push_back((qx, qy, qz));
            }
        }
    }
}

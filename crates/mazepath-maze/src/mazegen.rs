//! Two-region maze generation.
//!
//! The grid is laid out as a lattice: cells at (even, even) coordinates are
//! rooms and every other cell starts as a wall. A wall at (odd, odd) joins
//! nothing and is never opened while the regions grow.
//!
//! Generation runs in phases:
//! 1. Lay the lattice and seed one region at the origin and one at the
//!    target.
//! 2. Snap endpoints that sit on a wall cell into the lattice.
//! 3. Grow both regions at random (a randomized Prim's walk per region)
//!    until every room belongs to one of them. Each region stays a tree.
//! 4. Open exactly `solutions` walls between the two regions.
//! 5. Optionally thin an all-wall bottom row / right column.

use std::collections::HashSet;

use mazepath_core::{Point, WallGrid};
use rand::Rng;

use crate::error::MazeError;
use crate::frontier::WallFrontier;

/// Neighbour offsets in the order they are examined.
const DIRS: [Point; 4] = [
    Point::new(1, 0),
    Point::new(-1, 0),
    Point::new(0, 1),
    Point::new(0, -1),
];

/// Whether `p` is a room of the lattice.
#[inline]
pub fn is_lattice(p: Point) -> bool {
    p.x % 2 == 0 && p.y % 2 == 0
}

/// Whether the wall at `p` may be opened during growth.
#[inline]
pub fn is_removable(p: Point) -> bool {
    p.x % 2 == 0 || p.y % 2 == 0
}

/// Finishing options for [`MazeGen`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeOptions {
    /// Open every fourth cell of an all-wall bottom row or right column.
    /// Purely cosmetic: the openings are dead ends.
    pub thin_border: bool,
}

impl Default for MazeOptions {
    fn default() -> Self {
        Self { thin_border: true }
    }
}

/// A generated maze.
#[derive(Debug, Clone)]
pub struct Maze {
    pub grid: WallGrid,
    pub origin: Point,
    pub target: Point,
    /// The walls opened to join the two regions, one per solution.
    pub solution_walls: Vec<Point>,
}

/// Maze generator over a caller-supplied random source.
///
/// Seed the generator (e.g. with `StdRng::seed_from_u64`) to get the same
/// maze for the same inputs.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    pub options: MazeOptions,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self::with_options(rng, MazeOptions::default())
    }

    pub fn with_options(rng: R, options: MazeOptions) -> Self {
        Self { rng, options }
    }

    /// Build a `width` × `height` wall grid in which the origin and target
    /// are joined by exactly `solutions` openings between their regions.
    pub fn create_maze(
        &mut self,
        width: i32,
        height: i32,
        origin: Point,
        target: Point,
        solutions: usize,
    ) -> Result<WallGrid, MazeError> {
        self.generate(width, height, origin, target, solutions)
            .map(|m| m.grid)
    }

    /// Like [`create_maze`](Self::create_maze), also reporting which walls
    /// were opened as solutions.
    pub fn generate(
        &mut self,
        width: i32,
        height: i32,
        origin: Point,
        target: Point,
        solutions: usize,
    ) -> Result<Maze, MazeError> {
        if width <= 0 || height <= 0 {
            return Err(MazeError::DegenerateGrid { width, height });
        }
        for p in [origin, target] {
            if p.x < 0 || p.y < 0 || p.x >= width || p.y >= height {
                return Err(MazeError::InvalidEndpoint(p));
            }
        }
        if origin == target {
            return Err(MazeError::CoincidentEndpoints(origin));
        }
        if solutions == 0 {
            return Err(MazeError::NoSolutionsRequested);
        }

        let mut state = MazeState::new(width, height, origin, target);
        if state.regions_touch() {
            return Err(MazeError::TouchingEndpoints { origin, target });
        }
        state.grow(&mut self.rng);
        let solution_walls = state.carve_solutions(&mut self.rng, solutions)?;
        if self.options.thin_border {
            state.thin_border();
        }
        log::debug!(
            "maze {width}x{height}: {} solution walls, {} walls left",
            solution_walls.len(),
            state.walls.len()
        );

        Ok(Maze {
            grid: state.to_grid()?,
            origin,
            target,
            solution_walls,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Origin = 0,
    Target = 1,
}

impl Region {
    fn other(self) -> Self {
        match self {
            Self::Origin => Self::Target,
            Self::Target => Self::Origin,
        }
    }
}

/// Working sets of one generation run.
struct MazeState {
    width: i32,
    height: i32,
    origin: Point,
    target: Point,
    regions: [HashSet<Point>; 2],
    frontiers: [WallFrontier; 2],
    undiscovered: HashSet<Point>,
    walls: HashSet<Point>,
}

impl MazeState {
    /// Phases 1 and 2: lay the lattice, seed both regions, and snap
    /// endpoints that sit on wall cells.
    fn new(width: i32, height: i32, origin: Point, target: Point) -> Self {
        let mut undiscovered = HashSet::new();
        for x in (0..width).step_by(2) {
            for y in (0..height).step_by(2) {
                let p = Point::new(x, y);
                if p != origin && p != target {
                    undiscovered.insert(p);
                }
            }
        }

        let mut walls = HashSet::new();
        for x in (1..width).step_by(2) {
            for y in 0..height {
                walls.insert(Point::new(x, y));
            }
        }
        for y in (1..height).step_by(2) {
            for x in 0..width {
                walls.insert(Point::new(x, y));
            }
        }

        let mut state = Self {
            width,
            height,
            origin,
            target,
            regions: [HashSet::from([origin]), HashSet::from([target])],
            frontiers: [WallFrontier::new(), WallFrontier::new()],
            undiscovered,
            walls,
        };
        for (region, seed) in [(Region::Origin, origin), (Region::Target, target)] {
            let adjacent = state.removable_walls_around(seed);
            state.frontiers[region as usize].extend(adjacent);
        }
        state.snap(origin, Region::Origin);
        state.snap(target, Region::Target);
        state
    }

    fn removable_walls_around(&self, p: Point) -> Vec<Point> {
        DIRS.iter()
            .map(|&d| p + d)
            .filter(|n| self.walls.contains(n) && is_removable(*n))
            .collect()
    }

    /// Move `cell` from undiscovered into `region` and fold its walls into
    /// the region's frontier.
    fn claim(&mut self, cell: Point, region: Region) {
        self.undiscovered.remove(&cell);
        self.regions[region as usize].insert(cell);
        let adjacent = self.removable_walls_around(cell);
        self.frontiers[region as usize].extend(adjacent);
    }

    fn snap(&mut self, seed: Point, region: Region) {
        if is_lattice(seed) {
            return;
        }
        self.walls.remove(&seed);
        if !is_removable(seed) {
            // An (odd, odd) seed already has its walls in the frontier.
            return;
        }
        for d in DIRS {
            let n = seed + d;
            if self.undiscovered.contains(&n) {
                self.claim(n, region);
            }
        }
    }

    /// Whether a cell of one region sits next to a cell of the other, i.e.
    /// the endpoints are already joined without any wall between them.
    fn regions_touch(&self) -> bool {
        let [a, b] = &self.regions;
        a.iter().any(|&p| p.neighbors_4().iter().any(|n| b.contains(n)))
    }

    fn touches(&self, wall: Point, region: Region) -> bool {
        let cells = &self.regions[region as usize];
        DIRS.iter().any(|&d| cells.contains(&(wall + d)))
    }

    /// Phase 3: alternate random growth steps until every room is claimed.
    fn grow(&mut self, rng: &mut impl Rng) {
        while !self.undiscovered.is_empty() {
            if self.frontiers.iter().all(WallFrontier::is_empty) {
                log::warn!(
                    "maze growth stalled with {} rooms unclaimed",
                    self.undiscovered.len()
                );
                break;
            }
            self.grow_step(rng, Region::Origin);
            self.grow_step(rng, Region::Target);
        }
    }

    fn grow_step(&mut self, rng: &mut impl Rng, region: Region) {
        let Some(wall) = self.frontiers[region as usize].pick(rng) else {
            return;
        };
        self.frontiers[region as usize].remove(wall);

        // Already opened, or opening it would join the two regions early.
        if !self.walls.contains(&wall) || self.touches(wall, region.other()) {
            return;
        }
        let revealed: Vec<Point> = DIRS
            .iter()
            .map(|&d| wall + d)
            .filter(|n| self.undiscovered.contains(n))
            .collect();
        if revealed.is_empty() {
            return;
        }
        self.walls.remove(&wall);
        for cell in revealed {
            self.claim(cell, region);
        }
    }

    /// Whether opening `wall` would join an origin cell to a target cell.
    fn connects_regions(&self, wall: Point) -> bool {
        self.touches(wall, Region::Origin) && self.touches(wall, Region::Target)
    }

    /// Phase 4: open `n` distinct walls chosen uniformly among those that
    /// separate the two regions.
    fn carve_solutions(&mut self, rng: &mut impl Rng, n: usize) -> Result<Vec<Point>, MazeError> {
        let mut candidates: Vec<Point> = self
            .walls
            .iter()
            .copied()
            .filter(|&w| self.connects_regions(w))
            .collect();
        if candidates.len() < n {
            return Err(MazeError::UnsatisfiableSolutionCount {
                requested: n,
                available: candidates.len(),
            });
        }
        // Sorted first so a seeded rng picks the same walls every run.
        candidates.sort();
        for i in 0..n {
            let j = rng.random_range(i..candidates.len());
            candidates.swap(i, j);
        }
        candidates.truncate(n);
        for w in &candidates {
            self.walls.remove(w);
        }
        Ok(candidates)
    }

    fn near_endpoint(&self, p: Point) -> bool {
        [self.origin, self.target]
            .iter()
            .any(|&e| e == p || e.is_adjacent(p))
    }

    /// Phase 5: an even height leaves the bottom row all wall (and an even
    /// width the right column); open every fourth cell of it.
    fn thin_border(&mut self) {
        if self.height % 2 == 0 {
            for x in (0..self.width).step_by(4) {
                let p = Point::new(x, self.height - 1);
                if !self.near_endpoint(p) {
                    self.walls.remove(&p);
                }
            }
        }
        if self.width % 2 == 0 {
            for y in (0..self.height).step_by(4) {
                let p = Point::new(self.width - 1, y);
                if !self.near_endpoint(p) {
                    self.walls.remove(&p);
                }
            }
        }
    }

    fn to_grid(&self) -> Result<WallGrid, MazeError> {
        let mut grid = WallGrid::new(self.width, self.height).map_err(|_| MazeError::DegenerateGrid {
            width: self.width,
            height: self.height,
        })?;
        for &w in &self.walls {
            grid.set(w, true);
        }
        Ok(grid)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_options_round_trip() {
        let opts = MazeOptions { thin_border: false };
        let json = serde_json::to_string(&opts).unwrap();
        let back: MazeOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(opts, back);
    }
}

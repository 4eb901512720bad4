//! Randomized maze generation with a chosen number of solutions.
//!
//! [`MazeGen`] grows two disjoint spanning trees, one rooted at the origin
//! and one at the target, then opens exactly `solutions` walls between
//! them. With both endpoints on the room lattice (even coordinates), the
//! open cells form a single connected graph with `solutions - 1`
//! independent cycles, so there are exactly `solutions` distinct routes
//! through the region boundary.
//!
//! ```
//! use mazepath_core::{GridView, Point};
//! use mazepath_maze::MazeGen;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut mg = MazeGen::new(StdRng::seed_from_u64(1));
//! let grid = mg
//!     .create_maze(11, 7, Point::new(0, 0), Point::new(10, 6), 1)
//!     .unwrap();
//! assert!(!grid.is_wall(Point::new(0, 0)));
//! ```

mod error;
mod frontier;
mod mazegen;

pub use error::MazeError;
pub use frontier::WallFrontier;
pub use mazegen::{Maze, MazeGen, MazeOptions, is_lattice, is_removable};

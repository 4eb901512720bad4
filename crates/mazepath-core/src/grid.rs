//! A boolean wall grid.
//!
//! [`WallGrid`] stores one flag per cell in row-major order, `true` meaning
//! impassable. Searches only read it through the [`GridView`] trait, so a
//! caller can lend a grid to several engines at once.

use std::fmt;

use crate::geom::{Point, Range};

/// Read-only view of a walled grid.
pub trait GridView {
    /// The rectangle of valid positions.
    fn bounds(&self) -> Range;

    /// Whether `p` is impassable. Positions outside [`bounds`](Self::bounds)
    /// count as walls.
    fn is_wall(&self, p: Point) -> bool;

    /// Whether `p` is in bounds and not a wall.
    fn is_open(&self, p: Point) -> bool {
        self.bounds().contains(p) && !self.is_wall(p)
    }
}

impl<T: GridView + ?Sized> GridView for &T {
    fn bounds(&self) -> Range {
        (**self).bounds()
    }

    fn is_wall(&self, p: Point) -> bool {
        (**self).is_wall(p)
    }
}

/// Errors that can occur when building a [`WallGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is zero or negative.
    Degenerate { width: i32, height: i32 },
    /// A row's length differs from the first row's.
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The cell buffer does not hold `width * height` flags.
    CellCount { expected: usize, found: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degenerate { width, height } => {
                write!(f, "grid: degenerate size {width}x{height}")
            }
            Self::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::CellCount { expected, found } => {
                write!(f, "grid: {found} cells given, expected {expected}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A rectangular matrix of wall flags anchored at (0, 0).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawWallGrid"))]
pub struct WallGrid {
    cells: Vec<bool>,
    width: i32,
    height: i32,
}

/// Unchecked wire form of a [`WallGrid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawWallGrid {
    cells: Vec<bool>,
    width: i32,
    height: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWallGrid> for WallGrid {
    type Error = GridError;

    fn try_from(raw: RawWallGrid) -> Result<Self, GridError> {
        let mut grid = Self::new(raw.width, raw.height)?;
        if raw.cells.len() != grid.cells.len() {
            return Err(GridError::CellCount {
                expected: grid.cells.len(),
                found: raw.cells.len(),
            });
        }
        grid.cells = raw.cells;
        Ok(grid)
    }
}

impl WallGrid {
    /// Create an all-open grid.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::Degenerate { width, height });
        }
        Ok(Self {
            cells: vec![false; (width as usize) * (height as usize)],
            width,
            height,
        })
    }

    /// Build a grid from rows indexed `[row][column]`.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(GridError::Degenerate {
                width: width as i32,
                height: height as i32,
            });
        }
        let mut cells = Vec::with_capacity(width * height);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRows {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            cells,
            width: width as i32,
            height: height as i32,
        })
    }

    /// Parse a grid from text, one line per row: `#` is a wall, anything
    /// else is open.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let rows: Vec<Vec<bool>> = text
            .lines()
            .map(|l| l.chars().map(|c| c == '#').collect())
            .collect();
        Self::from_rows(&rows)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the size as a Point (width = x, height = y).
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds().contains(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Get the wall flag at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<bool> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the wall flag at a point. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, wall: bool) {
        if let Some(i) = self.index(p) {
            self.cells[i] = wall;
        }
    }

    /// Set every cell to `wall`.
    pub fn fill(&mut self, wall: bool) {
        self.cells.fill(wall);
    }

    /// Number of wall cells.
    pub fn count_walls(&self) -> usize {
        self.cells.iter().filter(|&&w| w).count()
    }

    /// Iterate over `(Point, wall)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, bool)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    /// Snapshot as rows indexed `[row][column]`.
    pub fn rows(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.width as usize)
            .map(<[bool]>::to_vec)
            .collect()
    }
}

impl GridView for WallGrid {
    fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    fn is_wall(&self, p: Point) -> bool {
        self.at(p).unwrap_or(true)
    }
}

impl fmt::Display for WallGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.width as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &w in row {
                f.write_str(if w { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

//! **mazepath-core**: foundational types shared by the mazepath crates.
//!
//! Provides grid geometry ([`Point`], [`Range`]), the boolean [`WallGrid`]
//! and the read-only [`GridView`] trait that search engines consume.

pub mod geom;
pub mod grid;

pub use geom::{Point, Range, RangeIter};
pub use grid::{GridError, GridView, WallGrid};

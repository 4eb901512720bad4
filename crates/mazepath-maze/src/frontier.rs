use std::collections::HashMap;

use mazepath_core::Point;
use rand::Rng;

/// A set of wall positions supporting uniform random picks.
///
/// Positions live in a `Vec` with an index map beside it, so insertion,
/// removal (swap-remove) and picking are all O(1). Iteration order depends
/// only on the order of operations, which keeps seeded generation
/// reproducible.
#[derive(Debug, Default, Clone)]
pub struct WallFrontier {
    items: Vec<Point>,
    index: HashMap<Point, usize>,
}

impl WallFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a wall. Returns `false` if it was already present.
    pub fn insert(&mut self, p: Point) -> bool {
        if self.index.contains_key(&p) {
            return false;
        }
        self.index.insert(p, self.items.len());
        self.items.push(p);
        true
    }

    /// Remove a wall. Returns `false` if it was not present.
    pub fn remove(&mut self, p: Point) -> bool {
        let Some(i) = self.index.remove(&p) else {
            return false;
        };
        self.items.swap_remove(i);
        if let Some(&moved) = self.items.get(i) {
            self.index.insert(moved, i);
        }
        true
    }

    pub fn contains(&self, p: Point) -> bool {
        self.index.contains_key(&p)
    }

    /// A uniformly random wall, or `None` when empty.
    pub fn pick(&self, rng: &mut impl Rng) -> Option<Point> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.items[rng.random_range(0..self.items.len())])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.items.iter().copied()
    }
}

impl Extend<Point> for WallFrontier {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for p in iter {
            self.insert(p);
        }
    }
}

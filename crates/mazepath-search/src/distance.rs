use mazepath_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible and consistent on 4-connected unit-cost grids, which is what
/// the greedy and A* frontiers rank by.
#[inline]
pub fn manhattan(a: Point, b: Point) -> usize {
    ((a.x - b.x).unsigned_abs() + (a.y - b.y).unsigned_abs()) as usize
}

//! The shared stepping engine.

use std::collections::HashSet;

use mazepath_core::{GridView, Point};

use crate::error::{Endpoint, SearchError};
use crate::frontier::Frontier;
use crate::node::{Node, Trail};
use crate::strategy::Strategy;

/// Outcome of one [`SearchEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// A node was expanded; call `step` again.
    Continuing,
    /// The target was dequeued. Terminal.
    Found,
    /// The frontier ran dry without reaching the target. Terminal.
    Exhausted,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Continuing)
    }
}

/// An incremental search over a [`GridView`].
///
/// Each call to [`step`](Self::step) expands exactly one node, so a host
/// loop can show the search unfold one tick at a time. Between steps the
/// engine exposes the node it is on, every position discovered so far, and
/// the path that led to the current node.
pub struct SearchEngine<G: GridView> {
    grid: G,
    strategy: Strategy,
    start: Point,
    target: Point,
    frontier: Box<dyn Frontier>,
    seen: HashSet<Point>,
    trail: Trail,
    current: Point,
    path: Vec<Point>,
    status: Option<SearchStatus>,
    // scratch buffer for the children of one expansion
    nbuf: Vec<Node>,
}

impl<G: GridView> SearchEngine<G> {
    /// Bind a new search to `grid`.
    ///
    /// `start` and `target` must be open cells inside the grid. They may be
    /// equal, in which case the first step reports [`SearchStatus::Found`].
    pub fn new(strategy: Strategy, start: Point, target: Point, grid: G) -> Result<Self, SearchError> {
        if grid.bounds().is_empty() {
            return Err(SearchError::DegenerateGrid);
        }
        for (endpoint, pos) in [(Endpoint::Start, start), (Endpoint::Target, target)] {
            if !grid.is_open(pos) {
                return Err(SearchError::InvalidEndpoint { endpoint, pos });
            }
        }

        let mut frontier = strategy.frontier(target);
        frontier.insert(Node::root(start));

        Ok(Self {
            grid,
            strategy,
            start,
            target,
            frontier,
            seen: HashSet::from([start]),
            trail: Trail::default(),
            current: start,
            path: Vec::new(),
            status: None,
            nbuf: Vec::with_capacity(4),
        })
    }

    /// Expand one node.
    ///
    /// Returns [`SearchError::Terminated`] if a previous step already
    /// reported `Found` or `Exhausted`.
    pub fn step(&mut self) -> Result<SearchStatus, SearchError> {
        if let Some(status) = self.status.filter(|s| s.is_terminal()) {
            return Err(SearchError::Terminated(status));
        }

        let Some(node) = self.frontier.remove_next() else {
            log::debug!(
                "{}: exhausted after {} expansions",
                self.strategy,
                self.trail.len()
            );
            return Ok(self.finish(SearchStatus::Exhausted));
        };

        self.current = node.pos;
        self.trail.path_to(node.parent, &mut self.path);
        let idx = self.trail.push(&node);
        log::trace!("{}: expand {} at depth {}", self.strategy, node.pos, node.depth);

        if node.pos == self.target {
            log::debug!(
                "{}: found {} after {} expansions, path length {}",
                self.strategy,
                self.target,
                self.trail.len(),
                self.path.len()
            );
            return Ok(self.finish(SearchStatus::Found));
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        for d in self.strategy.scan_order() {
            let np = node.pos + d;
            if !self.grid.is_open(np) {
                continue;
            }
            let child = Node {
                pos: np,
                depth: node.depth + 1,
                parent: Some(idx),
            };
            if self.seen.insert(np) {
                nbuf.push(child);
            } else {
                self.frontier.relax(child);
            }
        }
        self.frontier.insert_batch(&mut nbuf);
        self.nbuf = nbuf;

        Ok(self.finish(SearchStatus::Continuing))
    }

    /// Step until the search finds the target or runs out of nodes.
    pub fn run(&mut self) -> Result<SearchStatus, SearchError> {
        loop {
            let status = self.step()?;
            if status.is_terminal() {
                return Ok(status);
            }
        }
    }

    fn finish(&mut self, status: SearchStatus) -> SearchStatus {
        self.status = Some(status);
        status
    }

    /// The most recently dequeued position (the start before any step).
    pub fn current(&self) -> Point {
        self.current
    }

    /// Every position discovered so far, including the start.
    pub fn visited(&self) -> &HashSet<Point> {
        &self.seen
    }

    /// The path from the start up to, but not including, [`current`](Self::current).
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// The status returned by the last step, if any.
    pub fn status(&self) -> Option<SearchStatus> {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_some_and(SearchStatus::is_terminal)
    }

    /// Number of nodes dequeued so far.
    pub fn expanded(&self) -> usize {
        self.trail.len()
    }

    /// Number of positions still waiting in the frontier.
    pub fn pending(&self) -> usize {
        self.frontier.len()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use mazepath_core::WallGrid;

    fn open(w: i32, h: i32) -> WallGrid {
        WallGrid::new(w, h).unwrap()
    }

    /// Full path including the node the engine stopped on.
    fn route<G: GridView>(e: &SearchEngine<G>) -> Vec<Point> {
        let mut r = e.path().to_vec();
        r.push(e.current());
        r
    }

    fn assert_valid_route(grid: &WallGrid, route: &[Point], start: Point, target: Point) {
        assert_eq!(route.first(), Some(&start));
        assert_eq!(route.last(), Some(&target));
        for w in route.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} is not a step", w[0], w[1]);
        }
        for p in route {
            assert!(grid.is_open(*p), "{p} is a wall");
        }
    }

    const WALLED: &str = "\
.......
.#####.
.#...#.
.#.#.#.
...#...";

    #[test]
    fn test_bfs_three_by_three() {
        let g = open(3, 3);
        let (s, t) = (Point::new(0, 0), Point::new(2, 2));
        let mut e = SearchEngine::new(Strategy::BreadthFirst, s, t, &g).unwrap();
        assert_eq!(e.run(), Ok(SearchStatus::Found));
        assert_eq!(e.current(), t);
        assert_eq!(e.path().len(), 4);
        // +x is scanned first, so the route hugs the top row.
        assert_eq!(
            route(&e),
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2)
            ]
        );
    }

    #[test]
    fn test_astar_expands_no_more_than_bfs_on_open_grid() {
        let g = open(3, 3);
        let (s, t) = (Point::new(0, 0), Point::new(2, 2));
        let mut bfs = SearchEngine::new(Strategy::BreadthFirst, s, t, &g).unwrap();
        let mut astar = SearchEngine::new(Strategy::AStar, s, t, &g).unwrap();
        bfs.run().unwrap();
        astar.run().unwrap();
        assert_eq!(astar.path().len(), 4);
        assert!(astar.expanded() <= bfs.expanded());
    }

    #[test]
    fn test_bfs_length_matches_manhattan_on_open_grids() {
        let g = open(7, 5);
        for (s, t) in [
            (Point::new(0, 0), Point::new(6, 4)),
            (Point::new(3, 2), Point::new(0, 4)),
            (Point::new(6, 0), Point::new(6, 3)),
            (Point::new(5, 4), Point::new(1, 1)),
        ] {
            let mut e = SearchEngine::new(Strategy::BreadthFirst, s, t, &g).unwrap();
            assert_eq!(e.run(), Ok(SearchStatus::Found));
            assert_eq!(e.path().len(), manhattan(s, t));
        }
    }

    #[test]
    fn test_start_equal_to_target_is_found_immediately() {
        let g = open(2, 2);
        let p = Point::new(1, 1);
        for s in Strategy::ALL {
            let mut e = SearchEngine::new(s, p, p, &g).unwrap();
            assert_eq!(e.step(), Ok(SearchStatus::Found));
            assert!(e.path().is_empty());
            assert_eq!(e.expanded(), 1);
        }
    }

    #[test]
    fn test_invalid_endpoints_are_rejected() {
        let g = WallGrid::parse("..\n.#").unwrap();
        let s = Point::new(0, 0);
        assert_eq!(
            SearchEngine::new(Strategy::AStar, s, Point::new(1, 1), &g).err(),
            Some(SearchError::InvalidEndpoint {
                endpoint: Endpoint::Target,
                pos: Point::new(1, 1)
            })
        );
        assert_eq!(
            SearchEngine::new(Strategy::BreadthFirst, Point::new(-1, 0), s, &g).err(),
            Some(SearchError::InvalidEndpoint {
                endpoint: Endpoint::Start,
                pos: Point::new(-1, 0)
            })
        );
    }

    #[test]
    fn test_stepping_after_finish_is_an_error() {
        let g = open(2, 1);
        let mut e =
            SearchEngine::new(Strategy::DepthFirst, Point::new(0, 0), Point::new(1, 0), &g).unwrap();
        assert_eq!(e.run(), Ok(SearchStatus::Found));
        assert!(e.is_finished());
        assert_eq!(e.step(), Err(SearchError::Terminated(SearchStatus::Found)));
        assert_eq!(e.status(), Some(SearchStatus::Found));

        // Target cut off by a wall column.
        let g = WallGrid::parse(".#.").unwrap();
        let mut e =
            SearchEngine::new(Strategy::BreadthFirst, Point::new(0, 0), Point::new(2, 0), &g).unwrap();
        assert_eq!(e.run(), Ok(SearchStatus::Exhausted));
        assert!(e.is_finished());
        assert_eq!(
            e.step(),
            Err(SearchError::Terminated(SearchStatus::Exhausted))
        );
        assert_eq!(e.run(), Err(SearchError::Terminated(SearchStatus::Exhausted)));
        assert_eq!(e.status(), Some(SearchStatus::Exhausted));
    }

    #[test]
    fn test_visited_grows_and_nodes_expand_once() {
        let g = WallGrid::parse(WALLED).unwrap();
        let (s, t) = (Point::new(0, 4), Point::new(4, 3));
        for strategy in Strategy::ALL {
            let mut e = SearchEngine::new(strategy, s, t, &g).unwrap();
            let mut dequeued = HashSet::new();
            let mut last_seen = e.visited().clone();
            loop {
                let status = e.step().unwrap();
                assert!(e.visited().is_superset(&last_seen), "{strategy}: visited shrank");
                last_seen = e.visited().clone();
                if status == SearchStatus::Exhausted {
                    panic!("{strategy}: target is reachable");
                }
                assert!(dequeued.insert(e.current()), "{strategy}: {} twice", e.current());
                if status == SearchStatus::Found {
                    break;
                }
            }
            assert_valid_route(&g, &route(&e), s, t);
        }
    }

    #[test]
    fn test_optimal_strategies_agree_on_length() {
        let g = WallGrid::parse(WALLED).unwrap();
        let (s, t) = (Point::new(0, 4), Point::new(4, 3));
        let mut bfs = SearchEngine::new(Strategy::BreadthFirst, s, t, &g).unwrap();
        let mut astar = SearchEngine::new(Strategy::AStar, s, t, &g).unwrap();
        bfs.run().unwrap();
        astar.run().unwrap();
        // In through the gap at (2,3) rather than around the outside.
        assert_eq!(bfs.path().len(), 7);
        assert_eq!(astar.path().len(), bfs.path().len());
    }

    #[test]
    fn test_astar_corrects_a_costly_first_discovery() {
        // Depth tie-breaking sends A* down the left column first, so (2,1)
        // is discovered from below at depth 5. The route along the top row
        // reaches it at depth 3, and the target is only reachable through it.
        let g = WallGrid::parse(
            "\
...##
.#...
...#.
####.",
        )
        .unwrap();
        let (s, t) = (Point::new(0, 0), Point::new(4, 3));
        let mut bfs = SearchEngine::new(Strategy::BreadthFirst, s, t, &g).unwrap();
        let mut astar = SearchEngine::new(Strategy::AStar, s, t, &g).unwrap();
        bfs.run().unwrap();
        assert_eq!(astar.run(), Ok(SearchStatus::Found));
        assert_eq!(bfs.path().len(), 7);
        assert_eq!(astar.path().len(), 7);
        let r = route(&astar);
        assert_valid_route(&g, &r, s, t);
        assert!(r.contains(&Point::new(2, 0)));
    }

    #[test]
    fn test_exhaustion_covers_the_reachable_region_once() {
        // The target is sealed off in the right-hand pocket.
        let g = WallGrid::parse(
            "\
..#..
..#.#
###..",
        )
        .unwrap();
        let reachable = 4; // the 2x2 block on the left
        for strategy in Strategy::ALL {
            let mut e =
                SearchEngine::new(strategy, Point::new(0, 0), Point::new(3, 0), &g).unwrap();
            let mut dequeued = HashSet::new();
            loop {
                match e.step().unwrap() {
                    SearchStatus::Continuing => assert!(dequeued.insert(e.current())),
                    SearchStatus::Exhausted => break,
                    SearchStatus::Found => panic!("{strategy}: target is unreachable"),
                }
            }
            assert_eq!(dequeued.len(), reachable);
            assert_eq!(e.visited().len(), reachable);
            assert_eq!(e.expanded(), reachable);
        }
    }

    #[test]
    fn test_dfs_follows_first_scanned_direction() {
        let g = open(3, 3);
        let mut e =
            SearchEngine::new(Strategy::DepthFirst, Point::new(1, 1), Point::new(0, 0), &g).unwrap();
        e.step().unwrap();
        // -x is pushed last, so it is popped first.
        e.step().unwrap();
        assert_eq!(e.current(), Point::new(0, 1));
        assert_eq!(e.path(), &[Point::new(1, 1)]);
    }

    #[test]
    fn test_greedy_heads_straight_for_the_target() {
        let g = open(6, 6);
        let (s, t) = (Point::new(0, 0), Point::new(5, 5));
        let mut e = SearchEngine::new(Strategy::GreedyBestFirst, s, t, &g).unwrap();
        assert_eq!(e.run(), Ok(SearchStatus::Found));
        // Never wanders on an open grid.
        assert_eq!(e.expanded(), manhattan(s, t) + 1);
        assert_valid_route(&g, &route(&e), s, t);
    }

    #[test]
    fn test_greedy_breaks_distance_ties_by_scan_order() {
        let g = open(3, 3);
        let mut e = SearchEngine::new(
            Strategy::GreedyBestFirst,
            Point::new(0, 0),
            Point::new(2, 2),
            &g,
        )
        .unwrap();
        e.step().unwrap();
        e.step().unwrap();
        // +y and +x tie; +x is scanned later and pushed last.
        assert_eq!(e.current(), Point::new(1, 0));
    }

    #[test]
    fn test_path_excludes_current() {
        let g = open(4, 1);
        let mut e =
            SearchEngine::new(Strategy::BreadthFirst, Point::new(0, 0), Point::new(3, 0), &g).unwrap();
        assert_eq!(e.current(), Point::new(0, 0));
        assert!(e.path().is_empty());
        e.step().unwrap();
        assert!(e.path().is_empty());
        e.step().unwrap();
        assert_eq!(e.current(), Point::new(1, 0));
        assert_eq!(e.path(), &[Point::new(0, 0)]);
    }

    #[test]
    fn test_owned_grid_is_accepted() {
        let mut e =
            SearchEngine::new(Strategy::AStar, Point::new(0, 0), Point::new(1, 1), open(2, 2)).unwrap();
        assert_eq!(e.run(), Ok(SearchStatus::Found));
        assert_eq!(e.grid().width(), 2);
    }
}

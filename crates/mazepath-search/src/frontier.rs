//! Frontier containers, one per search strategy.
//!
//! The engine only talks to the [`Frontier`] trait; the container decides
//! which pending node comes out next.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use mazepath_core::Point;

use crate::distance::manhattan;
use crate::node::Node;

/// Pending nodes of one search.
pub trait Frontier {
    /// Add one newly discovered node.
    fn insert(&mut self, node: Node);

    /// Add the children of one expansion, given in scan order. The default
    /// inserts them one by one; the batch is left empty.
    fn insert_batch(&mut self, nodes: &mut Vec<Node>) {
        for n in nodes.drain(..) {
            self.insert(n);
        }
    }

    /// Take the next node to expand.
    fn remove_next(&mut self) -> Option<Node>;

    /// Offer a shorter route to a position that was already discovered.
    /// Returns `true` if the pending entry was improved. Frontiers that do
    /// not track cost ignore the offer.
    fn relax(&mut self, _node: Node) -> bool {
        false
    }

    /// Number of positions still pending.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// FIFO
// ---------------------------------------------------------------------------

/// First in, first out. Breadth-first order.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<Node>,
}

impl Frontier for FifoFrontier {
    fn insert(&mut self, node: Node) {
        self.queue.push_back(node);
    }

    fn remove_next(&mut self) -> Option<Node> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

// ---------------------------------------------------------------------------
// LIFO
// ---------------------------------------------------------------------------

/// Last in, first out. Depth-first order.
#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<Node>,
}

impl Frontier for LifoFrontier {
    fn insert(&mut self, node: Node) {
        self.stack.push(node);
    }

    fn remove_next(&mut self) -> Option<Node> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

// ---------------------------------------------------------------------------
// Greedy
// ---------------------------------------------------------------------------

/// A stack whose batches are sorted farthest-first before being pushed, so
/// the child nearest the target is popped next.
#[derive(Debug)]
pub struct GreedyFrontier {
    target: Point,
    stack: Vec<Node>,
}

impl GreedyFrontier {
    pub fn new(target: Point) -> Self {
        Self {
            target,
            stack: Vec::new(),
        }
    }
}

impl Frontier for GreedyFrontier {
    fn insert(&mut self, node: Node) {
        self.stack.push(node);
    }

    fn insert_batch(&mut self, nodes: &mut Vec<Node>) {
        // Stable: equally distant children keep their scan order.
        let target = self.target;
        nodes.sort_by(|a, b| manhattan(b.pos, target).cmp(&manhattan(a.pos, target)));
        self.stack.append(nodes);
    }

    fn remove_next(&mut self) -> Option<Node> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

// ---------------------------------------------------------------------------
// A*
// ---------------------------------------------------------------------------

/// Heap entry ordered so that `BinaryHeap` (a max-heap) pops the lowest
/// `f`, then the deepest node, then the earliest inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    f: usize,
    seq: u64,
    node: Node,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.node.depth.cmp(&other.node.depth))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority frontier keyed by `depth + manhattan(pos, target)`.
///
/// Improved entries are pushed alongside the old ones; an entry whose depth
/// no longer matches the best known depth for its position is stale and
/// skipped on removal.
#[derive(Debug)]
pub struct AstarFrontier {
    target: Point,
    open: BinaryHeap<Entry>,
    /// Best depth of every position that is queued but not yet removed.
    pending: HashMap<Point, usize>,
    seq: u64,
}

impl AstarFrontier {
    pub fn new(target: Point) -> Self {
        Self {
            target,
            open: BinaryHeap::new(),
            pending: HashMap::new(),
            seq: 0,
        }
    }

    fn push(&mut self, node: Node) {
        let seq = self.seq;
        self.seq += 1;
        self.pending.insert(node.pos, node.depth);
        self.open.push(Entry {
            f: node.depth + manhattan(node.pos, self.target),
            seq,
            node,
        });
    }
}

impl Frontier for AstarFrontier {
    fn insert(&mut self, node: Node) {
        self.push(node);
    }

    fn remove_next(&mut self) -> Option<Node> {
        while let Some(Entry { node, .. }) = self.open.pop() {
            if self.pending.get(&node.pos) == Some(&node.depth) {
                self.pending.remove(&node.pos);
                return Some(node);
            }
        }
        None
    }

    fn relax(&mut self, node: Node) -> bool {
        match self.pending.get(&node.pos) {
            Some(&best) if node.depth < best => {
                self.push(node);
                true
            }
            _ => false,
        }
    }

    fn len(&self) -> usize {
        self.pending.len()
    }
}

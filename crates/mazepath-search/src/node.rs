use mazepath_core::Point;

/// A discovered position waiting in (or taken from) a frontier.
///
/// Nodes don't carry their path. `parent` indexes the engine's expansion
/// trail, and the path is rebuilt from it once the node is dequeued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub pos: Point,
    /// Number of steps from the start, i.e. the length of the path to `pos`.
    pub depth: usize,
    pub parent: Option<usize>,
}

impl Node {
    /// The root node of a search.
    pub fn root(pos: Point) -> Self {
        Self {
            pos,
            depth: 0,
            parent: None,
        }
    }
}

/// Append-only record of expanded nodes.
#[derive(Debug, Default, Clone)]
pub(crate) struct Trail {
    steps: Vec<(Point, Option<usize>)>,
}

impl Trail {
    /// Record an expansion and return its index.
    pub(crate) fn push(&mut self, node: &Node) -> usize {
        self.steps.push((node.pos, node.parent));
        self.steps.len() - 1
    }

    /// Positions from the root up to and including `idx`.
    pub(crate) fn path_to(&self, idx: Option<usize>, out: &mut Vec<Point>) {
        out.clear();
        let mut ci = idx;
        while let Some(i) = ci {
            let (pos, parent) = self.steps[i];
            out.push(pos);
            ci = parent;
        }
        out.reverse();
    }

    pub(crate) fn len(&self) -> usize {
        self.steps.len()
    }
}

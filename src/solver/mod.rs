use std::time::Duration;

pub mod dfs;
pub mod ida;
pub mod perimeter;
pub mod tt;

pub use dfs::PerimeterBuilder;
pub use ida::{Ida, SearchResult};
pub use perimeter::PerimeterDb;
pub use tt::{Probe, TransTable};

/// Pre-expansion decision for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneStatus {
    /// Not over budget and not memoized; expand it.
    NeedsExpansion,
    /// `g + h` exceeds the current bound.
    PrunedByCost,
    /// Already visited at least as cheaply within the relevant iteration.
    PrunedByTt,
}

/// Post-expansion outcome of a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// Goal reached; unwinds the whole recursion.
    FoundSolution,
    /// Every child was memoized; nothing new below here.
    AllChildrenInTt,
    /// The node itself was memoized; its children are unknown.
    NodeInTt,
    /// At least one descendant hit the cost frontier.
    SomeChildrenLeaf,
}

/// Effort snapshot for one outer bound iteration. Node counts are
/// cumulative across the run, so they are non-decreasing by construction
/// and the per-iteration deltas can be recovered by differencing.
#[derive(Debug, Clone, Copy)]
pub struct BoundStats {
    pub bound: i32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub tt_fill: f64,
}

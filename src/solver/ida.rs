use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::SearchConfig;
use crate::domain::Domain;
use crate::hash::priority_from_hash;
use crate::search_state::SearchState;
use crate::solver::perimeter::PerimeterDb;
use crate::solver::tt::{Probe, TransTable};
use crate::solver::{BoundStats, NodeStatus, PruneStatus};

/// Outcome of one full search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Optimal solution length, or -1 when no solution was found within
    /// the bound cap.
    pub length: i32,
    /// Total nodes generated across all bound iterations.
    pub nodes: u64,
    /// One record per bound iteration, in increasing bound order.
    pub bounds: Vec<BoundStats>,
}

/// Iterative Deepening A*: repeated cost-bounded depth-first searches
/// with the bound raised by 1 per iteration, pruned by the admissible
/// heuristic, the transposition table, and the perimeter database.
///
/// The engine owns its transposition table for its whole lifetime and
/// borrows the perimeter database read-only; both are consulted on a
/// strictly single-threaded hot path.
pub struct Ida<'d, D: Domain> {
    config: SearchConfig,
    goal: SearchState<'d, D>,
    tt: Option<TransTable<D::State>>,
    perimeter: Option<&'d PerimeterDb<D::State>>,
    nodes: u64,
}

impl<'d, D: Domain> Ida<'d, D> {
    #[must_use]
    pub fn new(
        config: SearchConfig,
        goal: SearchState<'d, D>,
        perimeter: Option<&'d PerimeterDb<D::State>>,
    ) -> Self {
        let tt = config.use_tt.then(|| TransTable::new(&config));
        Self {
            config,
            goal,
            tt,
            perimeter,
            nodes: 0,
        }
    }

    #[must_use]
    pub fn nodes_generated(&self) -> u64 {
        self.nodes
    }

    /// Run one complete search from `start` to the engine's goal.
    ///
    /// The bound starts at 0 and is raised by 1 each iteration up to the
    /// configured cap; the transposition table is cleared at the start
    /// of the run, and again per iteration unless lazily retained.
    pub fn search(&mut self, start: &SearchState<'d, D>) -> SearchResult {
        self.nodes = 0;
        if let Some(tt) = self.tt.as_mut() {
            tt.reset();
        }

        let cap = self.config.bound_cap();
        let mut bound = 0;
        let mut status = NodeStatus::SomeChildrenLeaf;
        let mut bounds = Vec::new();
        let mut total = Duration::ZERO;

        while status != NodeStatus::FoundSolution && bound < cap {
            bound += 1;
            if !self.config.lazy_tt {
                if let Some(tt) = self.tt.as_mut() {
                    tt.reset();
                }
            }

            let iter_start = Instant::now();
            let mut node = start.clone();
            let mut floor = 0;
            status = self.ida_recursive(&mut node, bound, &mut floor);
            total += iter_start.elapsed();

            let tt_fill = self.tt.as_ref().map_or(0.0, TransTable::fill_fraction);
            let secs = total.as_secs_f64();
            #[allow(clippy::cast_precision_loss)]
            let nps = if secs > 0.0 { self.nodes as f64 / secs } else { 0.0 };
            info!(
                "bound={bound:3} nodes={:13} time={secs:6.2}s nps={nps:9.0} fill={tt_fill:.3}",
                self.nodes
            );
            bounds.push(BoundStats {
                bound,
                nodes: self.nodes,
                elapsed: total,
                tt_fill,
            });
        }

        let length = if status == NodeStatus::FoundSolution {
            bound
        } else {
            // Bound cap exhausted; reported as a sentinel, not an error.
            -1
        };
        SearchResult {
            length,
            nodes: self.nodes,
            bounds,
        }
    }

    /// Best available heuristic for a node: the incrementally maintained
    /// domain value, the perimeter bound, and the cached TT value, each
    /// admissible, so their max is too.
    fn heuristic_for(&self, node: &SearchState<'d, D>) -> i32 {
        let mut h = 0;
        if self.config.use_heuristic {
            h = node.heuristic;
        }
        if let Some(db) = self.perimeter {
            h = h.max(db.heuristic(&node.state, node.hash));
        }
        if let Some(tt) = self.tt.as_ref() {
            h = h.max(tt.cached_heuristic(&node.state, node.hash));
        }
        h
    }

    /// Fold a (possibly BPMX-raised) heuristic into the TT's cache slot
    /// for this exact state.
    fn check_heuristic(&mut self, node: &SearchState<'d, D>, heuristic: i32) {
        if let Some(tt) = self.tt.as_mut() {
            tt.update_cached_heuristic(&node.state, node.hash, heuristic);
        }
    }

    /// Pre-expansion decision: cost frontier first, then the table.
    fn prune(&mut self, node: &SearchState<'d, D>, bound: i32, heuristic: i32) -> PruneStatus {
        if node.cost + heuristic > bound {
            return PruneStatus::PrunedByCost;
        }
        if let Some(tt) = self.tt.as_mut() {
            if tt.prune_state(&node.state, node.hash, heuristic, node.cost, bound) == Probe::Prune
            {
                return PruneStatus::PrunedByTt;
            }
        }
        PruneStatus::NeedsExpansion
    }

    /// Cost-bounded depth-first expansion.
    ///
    /// `floor` is the heuristic floor inherited from the parent: under
    /// BPMX it is raised by children whose own heuristic turns out large
    /// (adjacent states' admissible values differ by at most the unit
    /// edge cost, so `child_h - 1` bounds the parent and the parent's
    /// value minus 1 bounds every child).
    fn ida_recursive(
        &mut self,
        node: &mut SearchState<'d, D>,
        bound: i32,
        floor: &mut i32,
    ) -> NodeStatus {
        self.nodes += 1;

        let mut heuristic = self.heuristic_for(node);
        if self.config.use_bpmx {
            heuristic = heuristic.max(*floor - 1);
            *floor = (*floor).max(heuristic - 1);
        }
        if self.config.tt_heuristic_cache {
            self.check_heuristic(node, heuristic);
        }

        if log::log_enabled!(log::Level::Debug) {
            let indent = usize::try_from(node.cost.max(0)).unwrap_or(0);
            debug!(
                "{:indent$}{} g={} h={heuristic} bound={bound}",
                "",
                node.render(),
                node.cost
            );
        }

        match self.prune(node, bound, heuristic) {
            PruneStatus::PrunedByTt => return NodeStatus::NodeInTt,
            PruneStatus::PrunedByCost => {
                if self.config.use_lookahead {
                    // Past the frontier: try to surface a large cached
                    // heuristic for later iterations. No obligations.
                    let margin = self.config.lookahead_margin;
                    self.lookahead_recursive(node, bound + margin, &mut heuristic);
                }
                return NodeStatus::SomeChildrenLeaf;
            }
            PruneStatus::NeedsExpansion => {}
        }

        if node.same_state(&self.goal) {
            info!("solution: {} length={}", node.render(), node.cost);
            return NodeStatus::FoundSolution;
        }

        let mut children_status = NodeStatus::AllChildrenInTt;
        let ops = node.successor_ops(self.config.skip_reverse_op);

        for op in ops {
            node.apply(op);
            let status = self.ida_recursive(node, bound, &mut heuristic);
            node.unapply(op);

            match status {
                NodeStatus::FoundSolution => {
                    debug!("  via {} op={op:?}", node.render());
                    return NodeStatus::FoundSolution;
                }
                NodeStatus::SomeChildrenLeaf => children_status = NodeStatus::SomeChildrenLeaf,
                NodeStatus::AllChildrenInTt | NodeStatus::NodeInTt => {}
            }

            if self.config.tt_heuristic_cache {
                // The child may have raised our heuristic via BPMX.
                self.check_heuristic(node, heuristic);
            }
            if self.config.use_bpmx && node.cost + heuristic > bound {
                // Back-propagated heuristic caused a parental cutoff.
                *floor = (*floor).max(heuristic - 1);
                return NodeStatus::SomeChildrenLeaf;
            }
        }

        children_status
    }

    /// Priority-greedy walk past the cost frontier: probe every child
    /// once, then follow only the one whose hash-derived priority is
    /// highest, until cost or the table stops it. Purely a best-effort
    /// attempt to populate the heuristic cache with large values.
    fn lookahead_recursive(
        &mut self,
        node: &mut SearchState<'d, D>,
        bound: i32,
        floor: &mut i32,
    ) -> NodeStatus {
        self.nodes += 1;

        let mut heuristic = self.heuristic_for(node);
        if self.config.use_bpmx {
            heuristic = heuristic.max(*floor - 1);
            *floor = (*floor).max(heuristic - 1);
        }

        match self.prune(node, bound, heuristic) {
            PruneStatus::PrunedByTt => return NodeStatus::NodeInTt,
            PruneStatus::PrunedByCost => return NodeStatus::SomeChildrenLeaf,
            PruneStatus::NeedsExpansion => {}
        }

        let ops = node.successor_ops(self.config.skip_reverse_op);
        let mut best: Option<(u32, D::Op)> = None;
        for op in ops {
            node.apply(op);
            self.nodes += 1;
            let priority = priority_from_hash(node.hash);
            if best.is_none_or(|(p, _)| priority > p) {
                best = Some((priority, op));
            }
            node.unapply(op);
        }

        if let Some((_, op)) = best {
            node.apply(op);
            self.lookahead_recursive(node, bound, &mut heuristic);
            node.unapply(op);
        }

        if self.config.use_bpmx && node.cost + heuristic > bound {
            *floor = (*floor).max(heuristic - 1);
            return NodeStatus::SomeChildrenLeaf;
        }

        NodeStatus::AllChildrenInTt
    }
}

use std::time::Instant;

use log::{debug, info};

use crate::config::SearchConfig;
use crate::domain::Domain;
use crate::search_state::SearchState;
use crate::solver::perimeter::PerimeterDb;
use crate::solver::tt::Probe;

/// Backward depth-first search that fills a [`PerimeterDb`] outward from
/// the goal, one depth pass at a time.
///
/// Passes run in increasing depth over a persistent table, so each pass
/// only re-expands states whose recorded cost improved or that an
/// earlier pass never reached; within the configured radius the table
/// converges to exact goal distances (modulo priority eviction when
/// capacity is smaller than the reachable set).
pub struct PerimeterBuilder<'d, D: Domain> {
    domain: &'d D,
    config: SearchConfig,
    nodes: u64,
}

impl<'d, D: Domain> PerimeterBuilder<'d, D> {
    #[must_use]
    pub fn new(domain: &'d D, config: SearchConfig) -> Self {
        Self {
            domain,
            config,
            nodes: 0,
        }
    }

    /// Populate `db` from `goal` out to `config.perimeter_depth`.
    pub fn build(&mut self, db: &mut PerimeterDb<D::State>, goal: &SearchState<'d, D>) {
        info!(
            "populating perimeter db: depth={} capacity={}",
            self.config.perimeter_depth,
            db.capacity()
        );
        let start = Instant::now();
        for pass in 0..self.config.perimeter_depth {
            let mut cursor = goal.clone();
            self.recurse(&mut cursor, db, pass, pass);
            info!(
                "perimeter pass={pass:3} entries={} fill={:.3} avg_depth={:.2} nodes={} elapsed={:.2?}",
                db.occupied(),
                db.fill_fraction(),
                db.avg_depth(),
                self.nodes,
                start.elapsed()
            );
        }
    }

    /// Total nodes generated across all passes so far.
    #[must_use]
    pub fn nodes_generated(&self) -> u64 {
        self.nodes
    }

    fn recurse(
        &mut self,
        node: &mut SearchState<'d, D>,
        db: &mut PerimeterDb<D::State>,
        limit: i32,
        iteration: i32,
    ) {
        self.nodes += 1;
        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "perimeter visit {} cost={} limit={limit} iteration={iteration}",
                node.render(),
                node.cost
            );
        }

        if self.prune(node, db, limit, iteration) {
            return;
        }

        let ops = node.predecessor_ops(self.config.skip_reverse_op);
        for op in ops {
            node.apply(op);
            self.recurse(node, db, limit, iteration);
            node.unapply(op);
        }
    }

    /// True when the branch stops here: either over the pass's depth
    /// limit, or the database says the state was already recorded at
    /// least as cheaply.
    fn prune(
        &self,
        node: &SearchState<'d, D>,
        db: &mut PerimeterDb<D::State>,
        limit: i32,
        iteration: i32,
    ) -> bool {
        if node.cost > limit {
            return true;
        }
        db.prune_state(&node.state, node.hash, node.cost, iteration) == Probe::Prune
    }
}

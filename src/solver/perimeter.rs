use crate::config::SearchConfig;
use crate::hash::priority_from_hash;
use crate::solver::tt::{Entry, Probe};

/// Perimeter pattern database: goal distances for states near the goal.
///
/// Shares the direct-mapped entry shape and slot discipline with the
/// transposition table, but is keyed purely by hash and stamped with the
/// builder's pass index. Populated once by [`crate::PerimeterBuilder`],
/// read-only from the main search's perspective.
#[derive(Debug)]
pub struct PerimeterDb<S> {
    entries: Vec<Entry<S>>,
    lazy: bool,
    priority_replacement: bool,
}

impl<S: Clone + Eq + Default> PerimeterDb<S> {
    /// # Panics
    /// If the configured capacity is zero.
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        assert!(
            config.perimeter_capacity > 0,
            "perimeter capacity must be positive"
        );
        Self {
            entries: vec![Entry::default(); config.perimeter_capacity],
            lazy: config.lazy_perimeter,
            priority_replacement: config.perimeter_priority_replacement,
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        #[allow(clippy::cast_possible_truncation)]
        {
            (hash % self.entries.len() as u64) as usize
        }
    }

    /// Admissible lower bound on distance-to-goal: the stored cost when
    /// the resident matches, else 0. Never a misleading nonzero value
    /// for a non-matching state.
    #[must_use]
    pub fn heuristic(&self, state: &S, hash: u64) -> i32 {
        let entry = &self.entries[self.index(hash)];
        if entry.state == *state {
            entry.cost
        } else {
            0
        }
    }

    /// Builder-side insert/update; same replacement policy as the TT
    /// with the pass index standing in for the bound stamp. A pruned
    /// branch is not expanded further by the builder.
    pub fn prune_state(&mut self, state: &S, hash: u64, cost: i32, iteration: i32) -> Probe {
        let lazy = self.lazy;
        let priority_replacement = self.priority_replacement;
        let index = self.index(hash);
        let entry = &mut self.entries[index];

        if entry.state == *state {
            return entry.revisit(cost, iteration, lazy);
        }

        if entry.is_empty() {
            entry.state = state.clone();
            entry.cost = cost;
            entry.stamp = iteration;
            entry.priority = priority_from_hash(hash);
            return Probe::Expand;
        }

        if priority_replacement {
            let priority = priority_from_hash(hash);
            if priority > entry.priority {
                // Deliberate approximation: the displaced resident is
                // forgotten, and the incomer's cost may still be above
                // its true distance until a later pass improves it.
                entry.state = state.clone();
                entry.cost = cost;
                entry.stamp = iteration;
                entry.priority = priority;
            }
        }

        Probe::Expand
    }

    #[must_use]
    pub fn occupied(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_empty()).count()
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fill_fraction(&self) -> f64 {
        self.occupied() as f64 / self.entries.len() as f64
    }

    /// Mean stored distance over occupied slots; 0.0 when empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_depth(&self) -> f64 {
        let mut n = 0u64;
        let mut sum = 0i64;
        for entry in &self.entries {
            if !entry.is_empty() {
                n += 1;
                sum += i64::from(entry.cost);
            }
        }
        if n == 0 {
            0.0
        } else {
            sum as f64 / n as f64
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }
}

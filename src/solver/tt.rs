use crate::config::{SearchConfig, MAX_COST};
use crate::hash::priority_from_hash;

/// Verdict of a table probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Probe {
    /// New, improved, or revisited under a deeper bound; expand it.
    Expand,
    /// Seen at least as cheaply already; cut the branch.
    Prune,
}

/// One direct-mapped slot. `cost == MAX_COST` marks an empty slot; the
/// default state filling it never equals a reachable state, so a stale
/// slot can never make a false claim about a different query.
#[derive(Debug, Clone)]
pub(crate) struct Entry<S> {
    pub state: S,
    pub cost: i32,
    /// Bound stamp (TT) or builder pass (perimeter) of the last visit.
    pub stamp: i32,
    pub cached_heuristic: i32,
    pub priority: u32,
}

impl<S: Default> Default for Entry<S> {
    fn default() -> Self {
        Self {
            state: S::default(),
            cost: MAX_COST,
            stamp: -1,
            cached_heuristic: 0,
            priority: 0,
        }
    }
}

impl<S> Entry<S> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cost == MAX_COST
    }

    /// Replacement policy for a resident entry matching the incoming
    /// state. Returns `Expand` when the caller must (re-)expand, having
    /// updated the slot; `Prune` when the visit is redundant.
    ///
    /// Lazy variant: a cost tie pruned only if stamped by the same
    /// iteration — a later, deeper iteration must re-examine the subtree
    /// because the remaining budget grew. Non-lazy collapses the tie
    /// cases into `cost >= resident` and relies on the owner clearing
    /// the whole table between iterations.
    #[inline]
    pub fn revisit(&mut self, cost: i32, stamp: i32, lazy: bool) -> Probe {
        if lazy {
            if cost > self.cost {
                return Probe::Prune;
            }
            if cost == self.cost {
                if stamp == self.stamp {
                    return Probe::Prune;
                }
                self.stamp = stamp;
                return Probe::Expand;
            }
        } else if cost >= self.cost {
            return Probe::Prune;
        }
        self.cost = cost;
        self.stamp = stamp;
        Probe::Expand
    }
}

/// Fixed-capacity direct-mapped transposition table.
///
/// One slot per `hash % capacity`, no chaining; collisions are resolved
/// purely by the replacement policy, so the table can never overflow and
/// needs no error path. Capacity should be prime.
#[derive(Debug)]
pub struct TransTable<S> {
    entries: Vec<Entry<S>>,
    lazy: bool,
    heuristic_cache: bool,
    priority_replacement: bool,
}

impl<S: Clone + Eq + Default> TransTable<S> {
    /// # Panics
    /// If the configured capacity is zero.
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        assert!(config.tt_capacity > 0, "TT capacity must be positive");
        Self {
            entries: vec![Entry::default(); config.tt_capacity],
            lazy: config.lazy_tt,
            heuristic_cache: config.tt_heuristic_cache,
            priority_replacement: config.tt_priority_replacement,
        }
    }

    /// Clear every slot back to the sentinel.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            *entry = Entry::default();
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        #[allow(clippy::cast_possible_truncation)]
        {
            (hash % self.entries.len() as u64) as usize
        }
    }

    /// Memoize a visit and decide whether to expand the node.
    ///
    /// A genuinely new state always gets `Expand`: displacement of a
    /// colliding resident (under priority replacement) is a pure caching
    /// side-effect and never blocks expansion.
    pub fn prune_state(
        &mut self,
        state: &S,
        hash: u64,
        heuristic: i32,
        cost: i32,
        bound: i32,
    ) -> Probe {
        let lazy = self.lazy;
        let heuristic_cache = self.heuristic_cache;
        let priority_replacement = self.priority_replacement;
        let index = self.index(hash);
        let entry = &mut self.entries[index];

        if entry.state == *state {
            if heuristic_cache && entry.cached_heuristic < heuristic {
                entry.cached_heuristic = heuristic;
            }
            return entry.revisit(cost, bound, lazy);
        }

        if entry.is_empty() {
            entry.state = state.clone();
            entry.cost = cost;
            entry.stamp = bound;
            entry.cached_heuristic = heuristic;
            entry.priority = priority_from_hash(hash);
            return Probe::Expand;
        }

        if priority_replacement {
            let priority = priority_from_hash(hash);
            if priority > entry.priority {
                entry.state = state.clone();
                entry.cost = cost;
                entry.stamp = bound;
                entry.cached_heuristic = heuristic;
                entry.priority = priority;
            }
        }

        // Slot occupied by a different state: nothing was recorded for
        // the query, so it must be expanded.
        Probe::Expand
    }

    /// Best heuristic ever observed for exactly this state, or 0 when
    /// the slot is empty or holds a different state. Only consulted when
    /// heuristic caching is enabled.
    #[must_use]
    pub fn cached_heuristic(&self, state: &S, hash: u64) -> i32 {
        if !self.heuristic_cache {
            return 0;
        }
        let entry = &self.entries[self.index(hash)];
        if entry.state == *state {
            entry.cached_heuristic
        } else {
            0
        }
    }

    /// Fold a freshly computed heuristic into the slot's running max.
    /// Never changes pruning outcomes, only sharpens future lookups.
    pub fn update_cached_heuristic(&mut self, state: &S, hash: u64, heuristic: i32) {
        if !self.heuristic_cache {
            return;
        }
        let index = self.index(hash);
        let entry = &mut self.entries[index];
        if entry.state == *state && entry.cached_heuristic < heuristic {
            entry.cached_heuristic = heuristic;
        }
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

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }
}

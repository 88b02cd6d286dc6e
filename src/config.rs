use serde::{Deserialize, Serialize};

/// Hard cap on any path cost the solver will consider. Doubles as the
/// sentinel cost marking an empty table slot.
pub const MAX_COST: i32 = 150;

/// Immutable search configuration.
///
/// Every knob that the solver consults lives here and is fixed at
/// construction time; there is no global state and no conditional
/// compilation. Capacities should be prime to reduce systematic
/// collisions in the direct-mapped tables (the defaults are).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)] // each toggle is independent
pub struct SearchConfig {
    /// Consult the domain's incremental heuristic. With this off (and no
    /// perimeter database) the search degenerates to plain iterative
    /// deepening DFS.
    pub use_heuristic: bool,

    /// Sibling/parent heuristic propagation (BPMX). Exploits consistency
    /// of the heuristic across unit-cost edges: adjacent states' values
    /// differ by at most 1, so a large child value tightens the parent
    /// and later siblings for free.
    pub use_bpmx: bool,

    /// At a cost frontier, run a priority-greedy depth-first walk past
    /// the bound hoping to cache a usefully large heuristic value.
    /// Best-effort only.
    pub use_lookahead: bool,

    /// Extra cost budget granted to the lookahead walk beyond the bound.
    pub lookahead_margin: i32,

    /// Skip the operator that exactly undoes the previous move. Longer
    /// cycles survive; this is a best-effort transposition reduction,
    /// not a guarantee.
    pub skip_reverse_op: bool,

    /// Transposition table on/off. Disabling it never changes the
    /// reported solution length, only the node count.
    pub use_tt: bool,

    /// Slot count of the transposition table. Prefer a prime.
    pub tt_capacity: usize,

    /// Keep TT contents across bound iterations, distinguishing stale
    /// entries by their bound stamp instead of clearing the whole table.
    pub lazy_tt: bool,

    /// Additionally store the maximum heuristic ever observed per cached
    /// state. Sharpens future lookups; never affects pruning decisions.
    pub tt_heuristic_cache: bool,

    /// On a hash collision, let a higher-priority state displace the
    /// resident TT entry.
    pub tt_priority_replacement: bool,

    /// Perimeter database on/off.
    pub use_perimeter: bool,

    /// Slot count of the perimeter database. Prefer a prime.
    pub perimeter_capacity: usize,

    /// Radius of the perimeter: the builder runs passes 0..depth.
    pub perimeter_depth: i32,

    /// Keep perimeter contents across builder passes, using the pass
    /// index as the stamp. The non-lazy variant would need a clear per
    /// pass and re-expand everything.
    pub lazy_perimeter: bool,

    /// On a hash collision, let a higher-priority state displace the
    /// resident perimeter entry.
    pub perimeter_priority_replacement: bool,

    /// Outer-loop cap on the cost bound; clamped to [`MAX_COST`].
    pub max_cost: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            use_heuristic: true,
            use_bpmx: true,
            use_lookahead: false,
            lookahead_margin: 3,
            skip_reverse_op: true,
            use_tt: true,
            tt_capacity: 100_003,
            lazy_tt: true,
            tt_heuristic_cache: true,
            tt_priority_replacement: false,
            use_perimeter: true,
            perimeter_capacity: 100_003,
            perimeter_depth: 8,
            lazy_perimeter: true,
            perimeter_priority_replacement: true,
            max_cost: MAX_COST,
        }
    }
}

impl SearchConfig {
    /// Effective outer-loop cap: `max_cost` clamped into `1..=MAX_COST`.
    #[inline]
    #[must_use]
    pub fn bound_cap(&self) -> i32 {
        self.max_cost.clamp(1, MAX_COST)
    }
}

use rand::Rng;

use crate::domain::Domain;

/// A domain state decorated with everything the search threads through
/// apply/unapply: path cost, the operator that produced it, and the
/// incrementally maintained hash and heuristic.
///
/// Invariant: `hash` and `heuristic` are always exactly consistent with
/// `state`; they are updated by the domain on every apply and are never
/// recomputed lazily.
#[derive(Debug)]
pub struct SearchState<'d, D: Domain> {
    domain: &'d D,
    pub state: D::State,
    /// Path length from the anchor this node was initialized at.
    pub cost: i32,
    /// Operator most recently applied, used for anti-transposition
    /// elimination. `None` at an anchor.
    pub prev_op: Option<D::Op>,
    pub heuristic: i32,
    pub hash: u64,
}

// Manual impl: a derived Clone would demand `D: Clone`, but the domain
// is only ever held by reference and copying that reference is enough.
impl<'d, D: Domain> Clone for SearchState<'d, D> {
    fn clone(&self) -> Self {
        Self {
            domain: self.domain,
            state: self.state.clone(),
            cost: self.cost,
            prev_op: self.prev_op,
            heuristic: self.heuristic,
            hash: self.hash,
        }
    }
}

impl<'d, D: Domain> SearchState<'d, D> {
    /// Node anchored at the domain goal.
    #[must_use]
    pub fn at_goal(domain: &'d D) -> Self {
        Self::from_state(domain, domain.goal())
    }

    /// Node anchored at an arbitrary state, with hash and heuristic
    /// recomputed from scratch.
    #[must_use]
    pub fn from_state(domain: &'d D, state: D::State) -> Self {
        let hash = domain.compute_hash(&state);
        let heuristic = domain.compute_heuristic(&state);
        Self {
            domain,
            state,
            cost: 0,
            prev_op: None,
            heuristic,
            hash,
        }
    }

    /// Parse an anchor node from a text description.
    ///
    /// # Errors
    /// Propagates the domain's parse error.
    pub fn parse(domain: &'d D, text: &str) -> Result<Self, String> {
        Ok(Self::from_state(domain, domain.parse(text)?))
    }

    #[inline]
    #[must_use]
    pub fn domain(&self) -> &'d D {
        self.domain
    }

    /// Re-anchor here: zero the cost and forget the previous operator.
    /// Hash and heuristic are already consistent and stay untouched.
    #[inline]
    pub fn reanchor(&mut self) {
        self.cost = 0;
        self.prev_op = None;
    }

    #[inline]
    fn apply_inner(&mut self, op: D::Op) -> i32 {
        let edge = self
            .domain
            .apply(&mut self.state, op, &mut self.hash, &mut self.heuristic);
        self.prev_op = Some(op);
        edge
    }

    /// Apply `op`, adding its edge cost to the path cost.
    #[inline]
    pub fn apply(&mut self, op: D::Op) {
        let edge = self.apply_inner(op);
        self.cost += edge;
    }

    /// Undo the most recently applied operator by literally replaying
    /// its reverse, subtracting the edge cost instead of adding it.
    ///
    /// CAREFUL: `prev_op` afterwards holds the reversing operator, not
    /// whatever preceded the undone move. Callers that rely on it across
    /// an unapply must save and restore it themselves.
    #[inline]
    pub fn unapply(&mut self, op: D::Op) {
        let reversed = self.domain.reverse(op);
        let edge = self.apply_inner(reversed);
        self.cost -= edge;
    }

    /// Legal operators out of this node. When `skip_reverse_op` is set,
    /// the operator undoing `prev_op` is excluded.
    #[inline]
    #[must_use]
    pub fn successor_ops(&self, skip_reverse_op: bool) -> Vec<D::Op> {
        self.domain
            .successor_ops(&self.state, self.forbidden(skip_reverse_op))
    }

    /// Legal operators into this node, with the same exclusion rule.
    #[inline]
    #[must_use]
    pub fn predecessor_ops(&self, skip_reverse_op: bool) -> Vec<D::Op> {
        self.domain
            .predecessor_ops(&self.state, self.forbidden(skip_reverse_op))
    }

    #[inline]
    fn forbidden(&self, skip_reverse_op: bool) -> Option<D::Op> {
        if skip_reverse_op {
            self.prev_op.map(|op| self.domain.reverse(op))
        } else {
            None
        }
    }

    /// Configuration equality: hash first as a cheap reject, then the
    /// full structural compare. Cost and previous operator do not count.
    #[inline]
    #[must_use]
    pub fn same_state(&self, other: &Self) -> bool {
        self.hash == other.hash && self.state == other.state
    }

    /// Scramble with `steps` random predecessor operators. Threading
    /// `prev_op` through keeps a scramble from immediately undoing
    /// itself; the walk still may revisit states via longer cycles.
    /// Callers building start states should [`SearchState::reanchor`]
    /// afterwards.
    pub fn randomize<R: Rng>(&mut self, steps: usize, skip_reverse_op: bool, rng: &mut R) {
        for _ in 0..steps {
            let ops = self.predecessor_ops(skip_reverse_op);
            if ops.is_empty() {
                continue;
            }
            let op = ops[rng.gen_range(0..ops.len())];
            self.apply(op);
        }
    }

    /// From-scratch consistency check, used by tests and debug assertions.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.hash == self.domain.compute_hash(&self.state)
            && self.heuristic == self.domain.compute_heuristic(&self.state)
    }

    /// Compact rendering for logs.
    #[must_use]
    pub fn render(&self) -> String {
        self.domain.render(&self.state)
    }
}

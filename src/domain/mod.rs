pub mod pancake;
pub mod tile;

use std::fmt::Debug;

/// Capability surface the search core requires from a puzzle.
///
/// A domain owns all of its lookup tables (operator tables, heuristic
/// distance tables, hash token tables), built once in its constructor
/// and shared by reference with every search component.
///
/// `State::default()` must produce an inert value that never compares
/// equal to any reachable state; it is what occupies empty table slots.
pub trait Domain {
    type State: Clone + Eq + Debug + Default;
    type Op: Copy + Eq + Debug;

    /// Canonical goal configuration.
    fn goal(&self) -> Self::State;

    /// Parse a start state from whitespace-separated integers. Fails
    /// fast on malformed input; never fabricates a state.
    ///
    /// # Errors
    /// Describes the first token or structural problem encountered.
    fn parse(&self, text: &str) -> Result<Self::State, String>;

    /// Inverse operator, used both to undo a move and to forbid the
    /// immediately-reversing move.
    fn reverse(&self, op: Self::Op) -> Self::Op;

    /// Apply `op` in place, maintaining `hash` and `heuristic`
    /// incrementally, and return the edge cost.
    fn apply(&self, state: &mut Self::State, op: Self::Op, hash: &mut u64, heuristic: &mut i32)
        -> i32;

    /// Legal operators out of `state`, excluding `forbidden` (the
    /// already-reversed previous operator) when it is given.
    fn successor_ops(&self, state: &Self::State, forbidden: Option<Self::Op>) -> Vec<Self::Op>;

    /// Legal operators into `state`. Identical to the successor set in
    /// both shipped domains, kept separate for asymmetric puzzles.
    fn predecessor_ops(&self, state: &Self::State, forbidden: Option<Self::Op>) -> Vec<Self::Op>;

    /// From-scratch hash; the incremental form in [`Domain::apply`] must
    /// always agree with this.
    fn compute_hash(&self, state: &Self::State) -> u64;

    /// From-scratch heuristic; must be admissible, and the incremental
    /// form must always agree with it.
    fn compute_heuristic(&self, state: &Self::State) -> i32;

    /// Compact rendering for logs.
    fn render(&self, state: &Self::State) -> String;
}

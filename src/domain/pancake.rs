use std::fmt::Write as _;

use crate::domain::Domain;
use crate::hash::ZobristTable;

const HASH_SEED: u64 = 2;

/// Virtual plate value, one below the smallest pancake so the goal's
/// bottom adjacency is gap-free. It sits at the non-flipping end.
const PLATE: i32 = -1;

/// Reverse the stack prefix `0..=index`. `Flip(1)` swaps the top two
/// pancakes; `Flip(k-1)` reverses the whole stack. Every flip is its own
/// inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip(pub u8);

/// Pancake stack, top at index 0.
///
/// The default value (empty stack) is the inert filler for empty table
/// slots and never equals a reachable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PancakeState {
    pub pancakes: Vec<u8>,
}

/// Pancake-sorting puzzle with the gap heuristic.
///
/// Goal is the descending stack (largest pancake on top). The gap
/// heuristic counts adjacent pairs differing by more than 1, including
/// a virtual plate beneath the bottom pancake; it is admissible because
/// a prefix flip changes exactly one adjacency, the seam below the
/// flipped prefix (the plate pair when the whole stack flips). The top
/// of the stack has nothing above it, so flipping never perturbs a
/// second pair.
#[derive(Debug)]
pub struct PancakeDomain {
    count: usize,
    zobrist: ZobristTable,
}

impl PancakeDomain {
    /// Build a domain for a stack of `count` pancakes (at least 2).
    ///
    /// # Errors
    /// Rejects degenerate stack sizes.
    pub fn new(count: usize) -> Result<Self, String> {
        if count < 2 {
            return Err(format!("pancake stack must have at least 2, got {count}"));
        }
        Ok(Self {
            count,
            zobrist: ZobristTable::new(count, count, HASH_SEED),
        })
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    fn ops_excluding(&self, forbidden: Option<Flip>) -> Vec<Flip> {
        #[allow(clippy::cast_possible_truncation)]
        let all = (1..self.count).map(|i| Flip(i as u8));
        match forbidden {
            None => all.collect(),
            Some(f) => all.filter(|&op| op != f).collect(),
        }
    }
}

#[inline]
fn gap(above: i32, below: i32) -> i32 {
    i32::from((above - below).abs() > 1)
}

impl Domain for PancakeDomain {
    type State = PancakeState;
    type Op = Flip;

    fn goal(&self) -> PancakeState {
        #[allow(clippy::cast_possible_truncation)]
        let pancakes: Vec<u8> = (0..self.count)
            .map(|i| (self.count - 1 - i) as u8)
            .collect();
        PancakeState { pancakes }
    }

    fn parse(&self, text: &str) -> Result<PancakeState, String> {
        let mut pancakes = Vec::with_capacity(self.count);
        for tok in text.split_whitespace() {
            let p: u8 = tok
                .parse()
                .map_err(|e| format!("bad pancake '{tok}': {e}"))?;
            if usize::from(p) >= self.count {
                return Err(format!(
                    "pancake {p} out of range for stack of {}",
                    self.count
                ));
            }
            pancakes.push(p);
        }
        if pancakes.len() != self.count {
            return Err(format!(
                "expected {} pancakes, got {}",
                self.count,
                pancakes.len()
            ));
        }
        let mut seen = vec![false; self.count];
        for &p in &pancakes {
            if seen[usize::from(p)] {
                return Err(format!("duplicate pancake {p}"));
            }
            seen[usize::from(p)] = true;
        }
        Ok(PancakeState { pancakes })
    }

    #[inline]
    fn reverse(&self, op: Flip) -> Flip {
        op
    }

    #[inline]
    fn apply(
        &self,
        state: &mut PancakeState,
        op: Flip,
        hash: &mut u64,
        heuristic: &mut i32,
    ) -> i32 {
        let top = usize::from(op.0);

        // Seam pair before the flip; both endpoints of the prefix move.
        // A whole-stack flip has no seam, its changing pair is the plate.
        let old_top = i32::from(state.pancakes[0]);
        let new_top = i32::from(state.pancakes[top]);
        let below = state.pancakes.get(top + 1).map_or(PLATE, |&b| i32::from(b));

        let middle = (top + 1) / 2;
        for i in 0..middle {
            let j = top - i;
            state.pancakes.swap(i, j);
            let a = usize::from(state.pancakes[i]);
            let b = usize::from(state.pancakes[j]);
            *hash ^= self.zobrist.token(a, i);
            *hash ^= self.zobrist.token(a, j);
            *hash ^= self.zobrist.token(b, i);
            *hash ^= self.zobrist.token(b, j);
        }

        // Pairs interior to the flipped prefix keep their |difference|;
        // only the pair straddling the flip boundary changes.
        *heuristic -= gap(new_top, below);
        *heuristic += gap(old_top, below);

        1
    }

    #[inline]
    fn successor_ops(&self, _state: &PancakeState, forbidden: Option<Flip>) -> Vec<Flip> {
        self.ops_excluding(forbidden)
    }

    #[inline]
    fn predecessor_ops(&self, _state: &PancakeState, forbidden: Option<Flip>) -> Vec<Flip> {
        // Flips are self-inverse, so predecessors == successors.
        self.ops_excluding(forbidden)
    }

    fn compute_hash(&self, state: &PancakeState) -> u64 {
        let mut value = 0u64;
        for (loc, &p) in state.pancakes.iter().enumerate() {
            value ^= self.zobrist.token(usize::from(p), loc);
        }
        value
    }

    fn compute_heuristic(&self, state: &PancakeState) -> i32 {
        // Walk bottom-up, anchored at the plate.
        let mut sum = 0i32;
        let mut below = PLATE;
        for &p in state.pancakes.iter().rev() {
            let p = i32::from(p);
            sum += gap(p, below);
            below = p;
        }
        sum
    }

    fn render(&self, state: &PancakeState) -> String {
        let mut out = String::with_capacity(state.pancakes.len() * 3);
        for &p in &state.pancakes {
            let _ = write!(out, "{p:x}");
        }
        out
    }
}

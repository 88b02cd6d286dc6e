use std::fmt::Write as _;

use crate::domain::Domain;
use crate::hash::ZobristTable;

const HASH_SEED: u64 = 1;

/// Blank moves. Ordering matters: operator enumeration follows this
/// order, which fixes the expansion order and therefore the exact node
/// counts for a given configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileOp {
    Right,
    Left,
    Up,
    Down,
}

const ALL_OPS: [TileOp; 4] = [TileOp::Right, TileOp::Left, TileOp::Up, TileOp::Down];

/// Tile permutation plus the cached blank location.
///
/// The default value (no tiles) is the inert filler for empty table
/// slots and never equals a reachable state.
#[derive(Debug, Clone, Default)]
pub struct TileState {
    pub tiles: Vec<u8>,
    pub blank: usize,
}

impl PartialEq for TileState {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // blank is derivable from tiles; comparing tiles alone is exact.
        self.tiles == other.tiles
    }
}

impl Eq for TileState {}

/// Sliding-tile puzzle on a `width` x `height` grid.
///
/// Goal is the identity permutation with the blank at index 0. The
/// Manhattan-distance table, the per-blank-location operator lists, and
/// the hash token table are all built in the constructor.
#[derive(Debug)]
pub struct TileDomain {
    width: usize,
    height: usize,
    /// `md[tile * cells + location]`: Manhattan distance from `location`
    /// to `tile`'s goal cell.
    md: Vec<u8>,
    /// Legal operators per blank location.
    ops_by_blank: Vec<Vec<TileOp>>,
    zobrist: ZobristTable,
}

impl TileDomain {
    /// Build a domain for a `width` x `height` board. Both dimensions
    /// must be at least 2.
    ///
    /// # Errors
    /// Rejects degenerate dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self, String> {
        if width < 2 || height < 2 {
            return Err(format!(
                "tile board must be at least 2x2, got {width}x{height}"
            ));
        }
        let cells = width * height;

        let mut md = vec![0u8; cells * cells];
        for tile in 0..cells {
            for loc in 0..cells {
                let dx = (loc % width).abs_diff(tile % width);
                let dy = (loc / width).abs_diff(tile / width);
                #[allow(clippy::cast_possible_truncation)]
                {
                    md[tile * cells + loc] = (dx + dy) as u8;
                }
            }
        }

        let mut ops_by_blank = Vec::with_capacity(cells);
        for blank in 0..cells {
            let mut ops = Vec::with_capacity(4);
            for op in ALL_OPS {
                if legal(blank, op, width, height) {
                    ops.push(op);
                }
            }
            ops_by_blank.push(ops);
        }

        Ok(Self {
            width,
            height,
            md,
            ops_by_blank,
            zobrist: ZobristTable::new(cells, cells, HASH_SEED),
        })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn cells(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    fn blank_destination(&self, blank: usize, op: TileOp) -> usize {
        match op {
            TileOp::Right => blank + 1,
            TileOp::Left => blank - 1,
            TileOp::Up => blank - self.width,
            TileOp::Down => blank + self.width,
        }
    }

    fn ops_excluding(&self, blank: usize, forbidden: Option<TileOp>) -> Vec<TileOp> {
        let legal = &self.ops_by_blank[blank];
        match forbidden {
            None => legal.clone(),
            Some(f) => legal.iter().copied().filter(|&op| op != f).collect(),
        }
    }
}

#[inline]
fn legal(blank: usize, op: TileOp, width: usize, height: usize) -> bool {
    match op {
        TileOp::Right => (blank + 1) % width != 0,
        TileOp::Left => blank % width != 0,
        TileOp::Up => blank / width != 0,
        TileOp::Down => blank / width != height - 1,
    }
}

impl Domain for TileDomain {
    type State = TileState;
    type Op = TileOp;

    fn goal(&self) -> TileState {
        #[allow(clippy::cast_possible_truncation)]
        let tiles: Vec<u8> = (0..self.cells()).map(|i| i as u8).collect();
        TileState { tiles, blank: 0 }
    }

    fn parse(&self, text: &str) -> Result<TileState, String> {
        let cells = self.cells();
        let mut tiles = Vec::with_capacity(cells);
        for tok in text.split_whitespace() {
            let tile: u8 = tok
                .parse()
                .map_err(|e| format!("bad tile '{tok}': {e}"))?;
            if usize::from(tile) >= cells {
                return Err(format!("tile {tile} out of range for {cells} cells"));
            }
            tiles.push(tile);
        }
        if tiles.len() != cells {
            return Err(format!(
                "expected {cells} tiles, got {}",
                tiles.len()
            ));
        }
        let mut seen = vec![false; cells];
        for &t in &tiles {
            if seen[usize::from(t)] {
                return Err(format!("duplicate tile {t}"));
            }
            seen[usize::from(t)] = true;
        }
        let blank = tiles
            .iter()
            .position(|&t| t == 0)
            .ok_or_else(|| "no blank (0) in state".to_string())?;
        Ok(TileState { tiles, blank })
    }

    #[inline]
    fn reverse(&self, op: TileOp) -> TileOp {
        match op {
            TileOp::Right => TileOp::Left,
            TileOp::Left => TileOp::Right,
            TileOp::Up => TileOp::Down,
            TileOp::Down => TileOp::Up,
        }
    }

    #[inline]
    fn apply(&self, state: &mut TileState, op: TileOp, hash: &mut u64, heuristic: &mut i32) -> i32 {
        let old_blank = state.blank;
        let new_blank = self.blank_destination(old_blank, op);

        // The tile at the blank's destination slides into the old hole.
        let tile = state.tiles[new_blank];
        state.tiles[old_blank] = tile;
        state.tiles[new_blank] = 0;
        state.blank = new_blank;

        let tile = usize::from(tile);
        let cells = self.cells();
        *hash ^= self.zobrist.token(tile, new_blank);
        *hash ^= self.zobrist.token(tile, old_blank);
        *heuristic -= i32::from(self.md[tile * cells + new_blank]);
        *heuristic += i32::from(self.md[tile * cells + old_blank]);

        1
    }

    #[inline]
    fn successor_ops(&self, state: &TileState, forbidden: Option<TileOp>) -> Vec<TileOp> {
        self.ops_excluding(state.blank, forbidden)
    }

    #[inline]
    fn predecessor_ops(&self, state: &TileState, forbidden: Option<TileOp>) -> Vec<TileOp> {
        // Every blank move is reversible, so predecessors == successors.
        self.ops_excluding(state.blank, forbidden)
    }

    fn compute_hash(&self, state: &TileState) -> u64 {
        let mut value = 0u64;
        for (loc, &tile) in state.tiles.iter().enumerate() {
            if tile != 0 {
                // The blank contributes nothing; its position is implied.
                value ^= self.zobrist.token(usize::from(tile), loc);
            }
        }
        value
    }

    fn compute_heuristic(&self, state: &TileState) -> i32 {
        let cells = self.cells();
        let mut sum = 0i32;
        for (loc, &tile) in state.tiles.iter().enumerate() {
            if tile != 0 {
                sum += i32::from(self.md[usize::from(tile) * cells + loc]);
            }
        }
        sum
    }

    fn render(&self, state: &TileState) -> String {
        let mut out = String::with_capacity(state.tiles.len() * 3);
        for &t in &state.tiles {
            let _ = write!(out, "{t:x}");
        }
        out
    }
}

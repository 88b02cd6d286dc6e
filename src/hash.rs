/// SplitMix64 PRNG step for stable, fast token generation.
#[inline]
#[must_use]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn token_from_seed(seed: u64) -> u64 {
    // Two rounds to decorrelate nearby seeds.
    let a = splitmix64(seed ^ 0xC0FF_EE00_D15E_CAFE);
    splitmix64(seed ^ 0xDEAD_BEEF_F00D_FACE ^ a.rotate_left(17))
}

/// Zobrist token table indexed by `(value, position)`.
///
/// Owned by the domain that uses it and built eagerly at construction;
/// the same seed always yields the same tokens, so hashes are stable
/// across runs.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    tokens: Vec<u64>,
    positions: usize,
}

impl ZobristTable {
    #[must_use]
    pub fn new(values: usize, positions: usize, seed: u64) -> Self {
        let mut tokens = Vec::with_capacity(values * positions);
        for value in 0..values {
            for position in 0..positions {
                let mixed = seed ^ ((value as u64) << 24) ^ (position as u64);
                tokens.push(token_from_seed(mixed));
            }
        }
        Self { tokens, positions }
    }

    #[inline]
    #[must_use]
    pub fn token(&self, value: usize, position: usize) -> u64 {
        self.tokens[value * self.positions + position]
    }
}

/// Replacement priority derived from a state hash.
///
/// This transform is not well distributed (small low words map to huge
/// priorities) but it is the policy the tables were tuned with; treat it
/// as replaceable, not as statistically sound.
#[inline]
#[must_use]
pub fn priority_from_hash(hash: u64) -> u32 {
    #[allow(clippy::cast_possible_truncation)]
    let low = (hash as u32).max(1);
    u32::MAX / low
}

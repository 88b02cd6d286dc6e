use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::domain::Domain;
use crate::search_state::SearchState;

/// Load start states from a text file, one per line of
/// whitespace-separated integers. Blank lines are skipped; any
/// unparsable line aborts the whole load with its line number.
///
/// # Errors
/// I/O failure or the first malformed line.
pub fn load_instances<'d, D: Domain>(
    domain: &'d D,
    path: &Path,
) -> Result<Vec<SearchState<'d, D>>, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

    let mut states = Vec::new();
    for (lineno, line) in data.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let state = SearchState::parse(domain, line)
            .map_err(|e| format!("{}:{}: {e}", path.display(), lineno + 1))?;
        states.push(state);
    }
    Ok(states)
}

/// Generate start states by scrambling the goal with `steps` random
/// reversible operators each, drawn from a single PCG stream seeded
/// once. The same seed and count always produce the same instances.
#[must_use]
pub fn random_instances<'d, D: Domain>(
    domain: &'d D,
    count: usize,
    steps: usize,
    seed: u64,
    skip_reverse_op: bool,
) -> Vec<SearchState<'d, D>> {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut states = Vec::with_capacity(count);
    for _ in 0..count {
        let mut state = SearchState::at_goal(domain);
        state.randomize(steps, skip_reverse_op, &mut rng);
        state.reanchor();
        states.push(state);
    }
    states
}

use idasolve::{Probe, SearchConfig, TransTable};

fn config(capacity: usize, lazy: bool, cache: bool, priority: bool) -> SearchConfig {
    SearchConfig {
        tt_capacity: capacity,
        lazy_tt: lazy,
        tt_heuristic_cache: cache,
        tt_priority_replacement: priority,
        ..SearchConfig::default()
    }
}

#[test]
fn lazy_replacement_policy() {
    let mut tt = TransTable::<Vec<u8>>::new(&config(7, true, true, false));
    let a = vec![1u8, 2, 3];

    // Fresh insert at cost 2 under bound 10.
    assert_eq!(tt.prune_state(&a, 3, 4, 2, 10), Probe::Expand);
    // Exact duplicate within the same iteration.
    assert_eq!(tt.prune_state(&a, 3, 4, 2, 10), Probe::Prune);
    // Strictly worse path.
    assert_eq!(tt.prune_state(&a, 3, 4, 3, 10), Probe::Prune);
    // Cost tie under a deeper bound: the subtree must be re-examined
    // once, then the refreshed stamp prunes repeats.
    assert_eq!(tt.prune_state(&a, 3, 4, 2, 11), Probe::Expand);
    assert_eq!(tt.prune_state(&a, 3, 4, 2, 11), Probe::Prune);
    // A cheaper path always re-expands.
    assert_eq!(tt.prune_state(&a, 3, 4, 1, 11), Probe::Expand);
    assert_eq!(tt.prune_state(&a, 3, 4, 2, 11), Probe::Prune);
}

#[test]
fn eager_policy_prunes_cost_ties_across_bounds() {
    let mut tt = TransTable::<Vec<u8>>::new(&config(7, false, true, false));
    let a = vec![1u8];

    assert_eq!(tt.prune_state(&a, 3, 0, 2, 10), Probe::Expand);
    // Non-lazy tables are cleared between iterations by their owner, so
    // a tie is redundant no matter what bound stamped it.
    assert_eq!(tt.prune_state(&a, 3, 0, 2, 11), Probe::Prune);
    assert_eq!(tt.prune_state(&a, 3, 0, 1, 11), Probe::Expand);
}

#[test]
fn collision_without_priority_keeps_resident() {
    let mut tt = TransTable::<Vec<u8>>::new(&config(7, true, true, false));
    let resident = vec![1u8];
    let intruder = vec![2u8];

    assert_eq!(tt.prune_state(&resident, 3, 5, 1, 10), Probe::Expand);
    // Same slot (10 % 7 == 3), different state: nothing is recorded for
    // the intruder, so it must be expanded, every time.
    assert_eq!(tt.prune_state(&intruder, 10, 9, 1, 10), Probe::Expand);
    assert_eq!(tt.prune_state(&intruder, 10, 9, 1, 10), Probe::Expand);

    assert_eq!(tt.cached_heuristic(&resident, 3), 5);
    assert_eq!(tt.cached_heuristic(&intruder, 10), 0);
}

#[test]
fn collision_with_priority_displaces_only_upward() {
    let mut tt = TransTable::<Vec<u8>>::new(&config(7, true, true, true));
    let resident = vec![1u8];
    let strong = vec![2u8];
    let weak = vec![3u8];

    // hash 14 -> slot 0, priority u32::MAX / 14.
    assert_eq!(tt.prune_state(&resident, 14, 5, 1, 10), Probe::Expand);
    // hash 21 -> slot 0 but lower priority; resident survives.
    assert_eq!(tt.prune_state(&weak, 21, 9, 1, 10), Probe::Expand);
    assert_eq!(tt.cached_heuristic(&resident, 14), 5);
    assert_eq!(tt.cached_heuristic(&weak, 21), 0);
    // hash 7 -> slot 0 and higher priority; displacement is a caching
    // side-effect, the verdict is still Expand.
    assert_eq!(tt.prune_state(&strong, 7, 9, 1, 10), Probe::Expand);
    assert_eq!(tt.cached_heuristic(&strong, 7), 9);
    assert_eq!(tt.cached_heuristic(&resident, 14), 0);
}

#[test]
fn heuristic_cache_keeps_running_max() {
    let mut tt = TransTable::<Vec<u8>>::new(&config(7, true, true, false));
    let a = vec![4u8];

    assert_eq!(tt.prune_state(&a, 1, 3, 0, 10), Probe::Expand);
    tt.update_cached_heuristic(&a, 1, 6);
    assert_eq!(tt.cached_heuristic(&a, 1), 6);
    // A smaller value never regresses the cache.
    tt.update_cached_heuristic(&a, 1, 2);
    assert_eq!(tt.cached_heuristic(&a, 1), 6);
    // Revisits fold their heuristic in through the probe as well.
    let _ = tt.prune_state(&a, 1, 8, 0, 10);
    assert_eq!(tt.cached_heuristic(&a, 1), 8);
}

#[test]
fn heuristic_cache_disabled_reads_zero() {
    let mut tt = TransTable::<Vec<u8>>::new(&config(7, true, false, false));
    let a = vec![4u8];

    assert_eq!(tt.prune_state(&a, 1, 3, 0, 10), Probe::Expand);
    tt.update_cached_heuristic(&a, 1, 6);
    assert_eq!(tt.cached_heuristic(&a, 1), 0);
}

#[test]
fn reset_empties_every_slot() {
    let mut tt = TransTable::<Vec<u8>>::new(&config(7, true, true, false));
    for i in 0..5u8 {
        let _ = tt.prune_state(&vec![i + 1], u64::from(i), 0, 1, 10);
    }
    assert!(tt.occupied() > 0);
    assert!(tt.fill_fraction() > 0.0);

    tt.reset();
    assert_eq!(tt.occupied(), 0);
    assert_eq!(tt.capacity(), 7);
    // A previously pruned state expands again after the wipe.
    let a = vec![1u8];
    assert_eq!(tt.prune_state(&a, 0, 0, 1, 10), Probe::Expand);
}

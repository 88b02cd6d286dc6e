use std::fs;

use idasolve::{load_instances, random_instances, PancakeDomain, TileDomain};

#[test]
fn loads_states_and_skips_blank_lines() {
    let domain = TileDomain::new(3, 3).expect("3x3 domain");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("starts.txt");
    fs::write(&path, "1 0 2 3 4 5 6 7 8\n\n0 1 2 3 4 5 6 7 8\n").expect("write");

    let states = load_instances(&domain, &path).expect("load");
    assert_eq!(states.len(), 2);
    assert_eq!(states[0].state.blank, 1);
    assert_eq!(states[0].cost, 0);
    assert!(states[0].is_consistent());
}

#[test]
fn bad_line_reports_its_number() {
    let domain = TileDomain::new(3, 3).expect("3x3 domain");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("starts.txt");
    fs::write(&path, "0 1 2 3 4 5 6 7 8\n9 9 9\n").expect("write");

    let err = load_instances(&domain, &path).expect_err("must fail");
    assert!(err.contains(":2:"), "error lacks the line number: {err}");
}

#[test]
fn missing_file_is_an_error() {
    let domain = TileDomain::new(3, 3).expect("3x3 domain");
    let err = load_instances(&domain, std::path::Path::new("/no/such/file"))
        .expect_err("must fail");
    assert!(err.contains("failed to read"), "unexpected error: {err}");
}

#[test]
fn scrambles_are_reproducible() {
    let domain = PancakeDomain::new(8).expect("8-pancake domain");

    let a = random_instances(&domain, 5, 50, 42, true);
    let b = random_instances(&domain, 5, 50, 42, true);
    assert_eq!(a.len(), 5);
    for (x, y) in a.iter().zip(&b) {
        assert!(x.same_state(y), "same seed produced different instances");
        assert_eq!(x.cost, 0);
        assert!(x.prev_op.is_none());
        assert!(x.is_consistent());
    }

    let c = random_instances(&domain, 5, 50, 43, true);
    assert!(
        a.iter().zip(&c).any(|(x, y)| !x.same_state(y)),
        "different seeds produced identical instance sets"
    );
}

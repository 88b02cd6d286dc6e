use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn solves_tile_batch() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("solve")?;
    cmd.env("RUST_LOG", "warn").args([
        "--domain",
        "tile",
        "--width",
        "3",
        "--height",
        "3",
        "--searches",
        "2",
        "--random-steps",
        "8",
        "--seed",
        "1",
        "--perimeter-depth",
        "4",
        "--tt-capacity",
        "1009",
        "--perimeter-capacity",
        "1009",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("avg_solution_length="))
        .stdout(predicate::str::contains("searches=2"));
    Ok(())
}

#[test]
fn solves_pancake_batch() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("solve")?;
    cmd.env("RUST_LOG", "warn").args([
        "--domain",
        "pancake",
        "--pancakes",
        "6",
        "--searches",
        "2",
        "--random-steps",
        "6",
        "--perimeter-depth",
        "4",
        "--tt-capacity",
        "1009",
        "--perimeter-capacity",
        "1009",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("avg_nodes_generated="));
    Ok(())
}

#[test]
fn rejects_degenerate_board() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("solve")?;
    cmd.env("RUST_LOG", "warn")
        .args(["--domain", "tile", "--width", "1", "--height", "3"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("2x2"));
    Ok(())
}

#[test]
fn reports_unreadable_input_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("solve")?;
    cmd.env("RUST_LOG", "warn")
        .args(["--domain", "tile", "--input", "/no/such/starts.txt"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
    Ok(())
}

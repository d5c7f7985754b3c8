use std::process::{Command, Output};

fn hero_defence(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hero-defence"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch the hero-defence binary")
}

#[test]
fn plays_the_requested_waves() {
    let output = hero_defence(&[
        "--seed",
        "3",
        "--waves",
        "1",
        "--hero",
        "archer@4,4",
        "--hero",
        "warrior@2,4",
    ]);
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wave 1 cleared"), "{stdout}");
    assert!(stdout.contains("final: wave 2"), "{stdout}");
    assert!(stdout.contains("archer #1 at (4, 4)"), "{stdout}");
}

#[test]
fn malformed_hero_placement_is_rejected() {
    let output = hero_defence(&["--hero", "knight@1,1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("knight"), "{stderr}");
}

#[test]
fn missing_catalog_file_is_reported() {
    let output = hero_defence(&["--catalog", "does/not/exist.toml"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load catalog overrides"), "{stderr}");
}

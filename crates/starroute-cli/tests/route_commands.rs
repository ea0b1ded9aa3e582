use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
        .canonicalize()
        .expect("fixture present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("starroute");
    cmd.env("STARROUTE_GALAXY", fixture("galaxy.json"))
        .env_remove("STARROUTE_SHIPS")
        .env("RUST_LOG", "error");
    cmd
}

#[test]
fn route_prefers_fewest_days_then_least_danger() {
    cli()
        .args(["route", "--from", "Sol", "--to", "Sirius"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route: Sol -> Sirius (3 hops, 3 days, 300 fuel)",
        ))
        .stdout(predicate::str::contains("Wolf (4) via hyperlane"))
        .stdout(predicate::str::contains("Barnard").not());
}

#[test]
fn route_uses_wormholes_when_enabled() {
    cli()
        .args(["route", "--from", "Sol", "--to", "Sirius", "--wormholes", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route: Sol -> Sirius (3 hops, 2 days, 200 fuel)",
        ))
        .stdout(predicate::str::contains("Vega (6) via wormhole, 0 fuel"));
}

#[test]
fn route_json_output_is_structured() {
    let output = cli()
        .args(["--format", "json", "route", "--from", "Sol", "--to", "Sirius"])
        .output()
        .expect("run starroute");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is valid JSON");
    assert_eq!(value["found"], true);
    assert_eq!(value["hops"], 3);
    assert_eq!(value["days"], 3);
    assert_eq!(value["fuel"], 300);
    let names: Vec<&str> = value["steps"]
        .as_array()
        .expect("steps array")
        .iter()
        .map(|step| step["name"].as_str().expect("step name"))
        .collect();
    assert_eq!(names, ["Proxima", "Wolf", "Sirius"]);
    assert_eq!(value["steps"][0]["method"], "hyperlane");
}

#[test]
fn route_with_ship_from_catalog_uses_jump_drive() {
    cli()
        .env("STARROUTE_SHIPS", fixture("ship_data.csv"))
        .args(["route", "--from", "Sol", "--to", "Sirius", "--ship", "explorer"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route: Sol -> Sirius (1 hops, 1 days, 150 fuel)",
        ))
        .stdout(predicate::str::contains("via jump"));
}

#[test]
fn ship_without_catalog_is_rejected() {
    cli()
        .args(["route", "--from", "Sol", "--to", "Sirius", "--ship", "Explorer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--ship requires a ship catalog"));
}

#[test]
fn unknown_ship_lists_available_names() {
    cli()
        .env("STARROUTE_SHIPS", fixture("ship_data.csv"))
        .args(["route", "--from", "Sol", "--to", "Sirius", "--ship", "Dreadnought"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown ship 'Dreadnought'"))
        .stderr(predicate::str::contains("Courier"));
}

#[test]
fn unreachable_destination_reports_no_route() {
    cli()
        .args(["route", "--from", "Sol", "--to", "Sirius", "--visited", "Sol"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "No route: Sol -> Sirius is unreachable",
        ))
        .stderr(predicate::str::contains(
            "no route found between Sol and Sirius",
        ));
}

#[test]
fn unknown_system_suggests_close_names() {
    cli()
        .args(["route", "--from", "Sol", "--to", "Sirus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown system name: Sirus"))
        .stderr(predicate::str::contains("Did you mean"))
        .stderr(predicate::str::contains("Sirius"));
}

#[test]
fn missing_galaxy_is_reported() {
    let mut cmd = cargo_bin_cmd!("starroute");
    cmd.env_remove("STARROUTE_GALAXY")
        .env("RUST_LOG", "error")
        .args(["route", "--from", "Sol", "--to", "Sirius"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no galaxy file given"));
}

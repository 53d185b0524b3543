use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn run(store: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_polyset"))
        .arg("--store")
        .arg(store)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn polyset")
}

fn json(out: &Output) -> Value {
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).expect("json on stdout")
}

#[test]
fn submit_get_list_roundtrip() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("polygons.json");

    let p = json(&run(&store, &["submit", "--name", "t1", "--points", "0,0 10,0 10,10"]));
    assert_eq!(p["name"], "t1");
    assert_eq!(p["area"], -50.0);
    assert_eq!(p["points"].as_array().unwrap().len(), 4);

    let got = json(&run(&store, &["get", "t1"]));
    assert_eq!(got, p);

    let all = json(&run(&store, &["list"]));
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[test]
fn duplicate_and_short_rings_fail() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("polygons.json");
    json(&run(&store, &["submit", "--name", "t1", "--points", "0,0 10,0 10,10"]));

    let dup = run(&store, &["submit", "--name", "t1", "--points", "50,50 60,50 60,60"]);
    assert!(!dup.status.success());
    assert!(String::from_utf8_lossy(&dup.stderr).contains("already exists"));

    let short = run(&store, &["submit", "--name", "t2", "--points", "0,0 10,10"]);
    assert!(!short.status.success());
    assert!(String::from_utf8_lossy(&short.stderr).contains("at least 3 vertices"));

    let missing = run(&store, &["get", "nope"]);
    assert!(!missing.status.success());
    assert!(String::from_utf8_lossy(&missing.stderr).contains("polygon not found"));

    assert_eq!(json(&run(&store, &["list"])).as_array().unwrap().len(), 1);
}

#[test]
fn generate_reports_accepted_count() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("polygons.json");
    let summary = json(&run(&store, &["generate", "--size", "30", "--seed", "11"]));
    let accepted = summary["accepted_count"].as_u64().unwrap();
    assert!(accepted <= 30);
    let all = json(&run(&store, &["list"]));
    assert_eq!(all.as_array().unwrap().len() as u64, accepted);

    let report = json(&run(
        &store,
        &["generate", "--size", "5", "--seed", "12", "--report"],
    ));
    assert_eq!(report["attempted"], 5);
    assert_eq!(report["batch_id"], 12);
}

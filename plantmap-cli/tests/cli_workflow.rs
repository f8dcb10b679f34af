//! End-to-end tests for the plantmap binary.
//!
//! Each test runs the built binary with `HOME` pointed at a temporary
//! directory so config and log files never touch the real home.
//!
//! Run with: `cargo test -p plantmap-cli --test cli_workflow`

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

const RECORDS: &str = r#"[
    {"id": 1, "tree_name": "Pradu", "quantity": 5, "lat": "6.6238", "lng": "99.95",
     "district_name": "Mueang Satun", "tambon_name": "Phiman", "planter_name": "Somchai"},
    {"id": 2, "tree_name": "Yang", "quantity": 3, "lat": 6.87, "lng": 99.73,
     "district_name": "La-ngu", "tambon_name": "Kamphaeng", "planter_name": "Malee"},
    {"id": 3, "tree_name": "Pradu", "quantity": 2, "lat": 6.61, "lng": 99.97,
     "district_name": "Mueang Satun", "tambon_name": "Khlong Khut", "planter_name": "Somchai"}
]"#;

fn run_cli(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plantmap"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn write_records(dir: &Path) -> String {
    let path = dir.join("records.json");
    fs::write(&path, RECORDS).unwrap();
    path.to_string_lossy().to_string()
}

fn write_boundaries(dir: &Path) -> String {
    let boundaries = dir.join("boundaries");
    fs::create_dir_all(&boundaries).unwrap();
    let square = json!({
        "type": "Polygon",
        "coordinates": [[[99.9, 6.6], [100.0, 6.6], [100.0, 6.7], [99.9, 6.7], [99.9, 6.6]]]
    });
    let districts = json!({
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "name": "Mueang Satun" }, "geometry": square },
            { "type": "Feature", "properties": { "name": "La-ngu" }, "geometry": square }
        ]
    });
    let villages = json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "name": "Ban X",
                "tambonName": "Phiman",
                "districtName": "Mueang Satun"
            },
            "geometry": square
        }]
    });
    fs::write(boundaries.join("districts.geojson"), districts.to_string()).unwrap();
    fs::write(boundaries.join("tambons.geojson"), r#"{"error": "query failed"}"#).unwrap();
    fs::write(boundaries.join("villages.geojson"), villages.to_string()).unwrap();
    boundaries.to_string_lossy().to_string()
}

#[test]
fn test_color_is_stable_across_runs() {
    let home = TempDir::new().unwrap();

    let first = run_cli(home.path(), &["color", "Pradu", "Yang"]);
    let second = run_cli(home.path(), &["color", "Pradu"]);

    assert!(first.status.success());
    let first = stdout(&first);
    let pradu = first.lines().find(|l| l.starts_with("Pradu")).unwrap();
    assert!(pradu.contains("hsl("));
    assert!(pradu.contains("70%, 45%"));
    assert_eq!(pradu.split_whitespace().last(), stdout(&second).split_whitespace().last());
}

#[test]
fn test_stats_json_with_district_filter() {
    let home = TempDir::new().unwrap();
    let records = write_records(home.path());

    let output = run_cli(
        home.path(),
        &["stats", "--records", &records, "--district", "Mueang Satun", "--json"],
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["summary"]["total_records"], 2);
    assert_eq!(value["summary"]["total_quantity"], 7);
    assert_eq!(value["summary"]["unique_planters"], 1);
    assert_eq!(value["species"][0]["name"], "Pradu");
    assert_eq!(value["shares"][0]["fraction"], 1.0);
}

#[test]
fn test_render_with_one_tier_unavailable() {
    let home = TempDir::new().unwrap();
    let records = write_records(home.path());
    let boundaries = write_boundaries(home.path());

    let output = run_cli(
        home.path(),
        &[
            "render",
            "--records",
            &records,
            "--boundaries-dir",
            &boundaries,
            "--heatmap",
            "--json",
        ],
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let kinds: Vec<&str> = value["layers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["base", "boundary", "boundary", "density", "markers"]);
    assert_eq!(value["boundaries"]["districts"], "2 features");
    assert_eq!(value["boundaries"]["tambons"], "unavailable");
    assert_eq!(value["layers"][4]["markers"].as_array().unwrap().len(), 3);

    // Logging went to the file under the temporary home
    assert!(home.path().join(".plantmap/logs/plantmap.log").exists());
}

#[test]
fn test_render_hidden_layers_and_satellite() {
    let home = TempDir::new().unwrap();
    let records = write_records(home.path());
    let boundaries = write_boundaries(home.path());

    let output = run_cli(
        home.path(),
        &[
            "render",
            "--records",
            &records,
            "--boundaries-dir",
            &boundaries,
            "--hide-districts",
            "--satellite",
            "--species",
            "Yang",
        ],
    );

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("base       satellite"));
    assert!(!text.contains("districts  2 features,"));
    assert!(text.contains("Showing 1 of 3 records"));
}

#[test]
fn test_render_repeated_species_flag_keeps_filter() {
    let home = TempDir::new().unwrap();
    let records = write_records(home.path());
    let boundaries = write_boundaries(home.path());

    let output = run_cli(
        home.path(),
        &[
            "render",
            "--records",
            &records,
            "--boundaries-dir",
            &boundaries,
            "--species",
            "Pradu",
            "--species",
            "Pradu",
        ],
    );

    assert!(output.status.success());
    assert!(stdout(&output).contains("Showing 2 of 3 records"));
}

#[test]
fn test_render_district_focuses_view() {
    let home = TempDir::new().unwrap();
    let records = write_records(home.path());
    let boundaries = write_boundaries(home.path());

    let output = run_cli(
        home.path(),
        &[
            "render",
            "--records",
            &records,
            "--boundaries-dir",
            &boundaries,
            "--district",
            "Mueang Satun",
            "--json",
        ],
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let lat = value["view"]["lat"].as_f64().unwrap();
    let lng = value["view"]["lng"].as_f64().unwrap();
    assert!((lat - 6.65).abs() < 1e-9);
    assert!((lng - 99.95).abs() < 1e-9);
    assert_eq!(value["summary"]["total_records"], 2);
}

#[test]
fn test_missing_records_file_fails() {
    let home = TempDir::new().unwrap();

    let output = run_cli(home.path(), &["stats", "--records", "/nonexistent/records.json"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn test_config_init_then_show() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.ini");
    let config = config.to_string_lossy().to_string();

    let init = run_cli(home.path(), &["--config", &config, "config", "init"]);
    assert!(init.status.success());
    assert!(stdout(&init).contains("Created"));

    let again = run_cli(home.path(), &["--config", &config, "config", "init"]);
    assert!(stdout(&again).contains("already exists"));

    let show = run_cli(home.path(), &["--config", &config, "config", "show"]);
    assert!(show.status.success());
    let text = stdout(&show);
    assert!(text.contains("base_url    = http://localhost:3000"));
    assert!(text.contains("zoom        = 10"));
}

#[test]
fn test_invalid_config_value_is_reported() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("bad.ini");
    fs::write(&config, "[map]\nzoom = 42\n").unwrap();

    let output = run_cli(
        home.path(),
        &["--config", &config.to_string_lossy(), "color", "Pradu"],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("config init --force"));
}

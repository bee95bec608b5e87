use clap::Parser as _;
use pwf_cli::BaseArgs;
use rstest::*;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn data(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("samples")
        .join(name)
        .display()
        .to_string()
}

#[fixture]
fn workdir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn run(args: &[&str]) -> anyhow::Result<()> {
    BaseArgs::try_parse_from(std::iter::once("pwf").chain(args.iter().copied()))?.run()
}

fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

fn output(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[rstest]
fn evaluate_staircase(workdir: TempDir) {
    let out = output(&workdir, "out.json");
    run(&[
        "evaluate",
        &data("staircase.json"),
        "-o",
        out.to_str().unwrap(),
        "-x",
        "-100",
        "-50",
        "30.5",
    ])
    .unwrap();

    assert_eq!(
        read_json(&out),
        json!([
            { "x": -100.0, "y": 30.0 },
            { "x": -50.0, "y": 20.0 },
            { "x": 30.5, "y": -10.0 },
        ])
    );
}

#[rstest]
fn evaluate_flat_tail_at_infinity(workdir: TempDir) {
    let out = output(&workdir, "out.json");
    run(&[
        "evaluate",
        &data("ramp.json"),
        "-o",
        out.to_str().unwrap(),
        "--at=-inf",
    ])
    .unwrap();

    assert_eq!(read_json(&out), json!([{ "x": "-inf", "y": 0.0 }]));
}

#[rstest]
#[case("31")]
#[case("-100.5")]
fn evaluate_outside_domain_fails(workdir: TempDir, #[case] at: &str) {
    let out = output(&workdir, "out.json");
    let result = run(&[
        "evaluate",
        &data("staircase.json"),
        "-o",
        out.to_str().unwrap(),
        "-x",
        at,
    ]);
    assert!(result.is_err());
}

#[rstest]
fn extrema_of_ramp(workdir: TempDir) {
    let out = output(&workdir, "out.json");
    run(&["extrema", &data("ramp.json"), "-o", out.to_str().unwrap()]).unwrap();

    // The flat tails reach 0 and the peak is reported at the left end of the rising segment
    assert_eq!(
        read_json(&out),
        json!({
            "minimum": { "value": 0.0, "argument": "-inf" },
            "maximum": { "value": 1.0, "argument": -1.0 },
        })
    );
}

#[rstest]
fn domain_of_ramp(workdir: TempDir) {
    let out = output(&workdir, "out.json");
    run(&["domain", &data("ramp.json"), "-o", out.to_str().unwrap()]).unwrap();
    assert_eq!(read_json(&out), json!({ "lower": "-inf", "upper": "inf" }));
}

#[rstest]
fn sample_infers_csv(workdir: TempDir) {
    let out = output(&workdir, "grid.csv");
    run(&[
        "sample",
        &data("staircase.json"),
        "-o",
        out.to_str().unwrap(),
        "--x-min",
        "-100",
        "--x-max",
        "20",
        "-n",
        "3",
    ])
    .unwrap();

    let csv = std::fs::read_to_string(&out).unwrap();
    assert_eq!(csv, "x,y\n-100,30\n-40,20\n20,-10\n");
}

#[rstest]
fn sample_uses_config_defaults(workdir: TempDir) {
    let config = output(&workdir, "pwf.toml");
    std::fs::write(&config, "[sample]\nx_min = -1.0\nx_max = 1.0\nnum_points = 5\n").unwrap();

    let out = output(&workdir, "grid.json");
    run(&[
        "--config",
        config.to_str().unwrap(),
        "sample",
        &data("ramp.json"),
        "-o",
        out.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(
        read_json(&out),
        json!([
            { "x": -1.0, "y": 0.0 },
            { "x": -0.5, "y": 0.5 },
            { "x": 0.0, "y": 1.0 },
            { "x": 0.5, "y": 0.5 },
            { "x": 1.0, "y": 0.0 },
        ])
    );
}

#[rstest]
fn sample_beyond_domain_fails(workdir: TempDir) {
    let out = output(&workdir, "grid.json");
    let result = run(&[
        "sample",
        &data("staircase.json"),
        "-o",
        out.to_str().unwrap(),
        "--x-min",
        "0",
        "--x-max",
        "31",
    ]);
    assert!(result.is_err());
}

#[rstest]
fn sample_rejects_unknown_extension(workdir: TempDir) {
    let out = output(&workdir, "grid.png");
    let result = run(&[
        "sample",
        &data("staircase.json"),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(result.is_err());
}

#[rstest]
fn invalid_function_is_rejected(workdir: TempDir) {
    let input = output(&workdir, "bad.json");
    std::fs::write(&input, r#"{"breakpoints": [0, 0, 1], "values": [1, 2]}"#).unwrap();
    let result = run(&["domain", input.to_str().unwrap()]);
    assert!(result.is_err());
}

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_effcorr"))
}

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let mut p = std::env::temp_dir();
    p.push(format!("effcorr_cli_{}_{}_{}", std::process::id(), nanos, name));
    std::fs::create_dir_all(&p).unwrap();
    p
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

/// Two pions, back to back in the transverse plane, inside the fiducial region.
fn record(i: usize, reco_ok: bool) -> String {
    let pt = 0.2 + 0.02 * i as f64;
    let pz = 0.05 * (i % 7) as f64 - 0.15;
    let generated = format!("{pt},0,{pz},-{pt},0.01,{}", -pz);
    let reco = if reco_ok { generated.clone() } else { ["-999"; 6].join(",") };
    format!("{generated},{reco},211,-211,{}", u8::from(reco_ok))
}

fn write_dataset(dir: &Path, name: &str, n: usize) {
    let lines: Vec<String> = (0..n).map(|i| record(i, i % 4 != 0)).collect();
    std::fs::write(dir.join(format!("{name}.csv")), lines.join("\n")).unwrap();
    let weights: Vec<&str> = (0..n).map(|_| "0.8").collect();
    std::fs::write(dir.join(format!("{name}.out")), weights.join(" ")).unwrap();
}

fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("run.yaml");
    let yaml = format!(
        "kinematics_dir: {d}\nweights_dir: {d}\nfigures_dir: {d}/figs\nviz:\n  theme: minimal\n",
        d = dir.display()
    );
    std::fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn run_prints_average_and_writes_summary() {
    let dir = tmp_dir("run");
    write_dataset(&dir, "toy", 30);
    let config = write_config(&dir);
    let summary = dir.join("summary.json");

    let out = run(&[
        "run",
        "--config",
        config.to_string_lossy().as_ref(),
        "--dataset",
        "toy",
        "--summary",
        summary.to_string_lossy().as_ref(),
    ]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("AVERAGE: <Chi2 / ndf> = "), "stdout={stdout}");
    assert!(stdout.contains("h1eta1"), "stdout={stdout}");

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    let reports = v.as_array().expect("summary should be an array");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["name"], "toy");
    assert_eq!(reports[0]["events_read"], 30);
    assert_eq!(reports[0]["events_reconstructed"], 22);
    assert_eq!(reports[0]["chi2_ndf"].as_array().unwrap().len(), 6);

    assert!(dir.join("figs/toy/h1M.svg").is_file());
    assert!(dir.join("figs/toy/h2etaeta.svg").is_file());
}

#[test]
fn missing_dataset_is_skipped() {
    let dir = tmp_dir("skip");
    write_dataset(&dir, "present", 10);
    let config = write_config(&dir);

    let out = run(&[
        "run",
        "--config",
        config.to_string_lossy().as_ref(),
        "--dataset",
        "absent",
        "--dataset",
        "present",
        "--threads",
        "2",
    ]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.matches("AVERAGE").count(), 1, "stdout={stdout}");
    assert!(String::from_utf8_lossy(&out.stderr).contains("absent"));
}

#[test]
fn all_datasets_failing_is_an_error() {
    let dir = tmp_dir("fail");
    let config = write_config(&dir);
    let out = run(&["run", "--config", config.to_string_lossy().as_ref(), "--dataset", "nope"]);
    assert!(!out.status.success());
}

#[test]
fn max_events_limits_the_pass() {
    let dir = tmp_dir("max");
    write_dataset(&dir, "toy", 20);
    let config = write_config(&dir);
    let summary = dir.join("summary.json");

    let out = run(&[
        "run",
        "--config",
        config.to_string_lossy().as_ref(),
        "--dataset",
        "toy",
        "--max-events",
        "5",
        "--summary",
        summary.to_string_lossy().as_ref(),
    ]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(v[0]["events_accepted"], 5);
    assert_eq!(v[0]["hit_max_events"], true);
}

#[test]
fn render_reproduces_saved_figure() {
    let dir = tmp_dir("render");
    write_dataset(&dir, "toy", 12);
    let config = write_config(&dir);
    let out = run(&["run", "--config", config.to_string_lossy().as_ref(), "--dataset", "toy"]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));

    let input = dir.join("figs/toy/h1Pt.json");
    let output = dir.join("rerender/h1Pt_log.svg");
    let out = run(&[
        "render",
        "--input",
        input.to_string_lossy().as_ref(),
        "--kind",
        "triplet1d_logy",
        "--output",
        output.to_string_lossy().as_ref(),
    ]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.starts_with("<svg"), "{}", &svg[..svg.len().min(80)]);

    let bad = run(&[
        "render",
        "--input",
        input.to_string_lossy().as_ref(),
        "--kind",
        "pie",
        "--output",
        output.to_string_lossy().as_ref(),
    ]);
    assert!(!bad.status.success());
}

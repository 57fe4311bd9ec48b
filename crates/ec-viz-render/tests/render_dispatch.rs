use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use ec_hist::{Binning, Hist1D, Hist2D, chi2_test_ww};
use ec_viz::{
    LegendPosition, triplet1d_artifact, triplet2d_artifact, weight_control_artifact,
    weight_distribution_artifact,
};
use ec_viz_render::config::resolve_config;
use ec_viz_render::{KINDS, RenderError, render_svg, render_to_file};

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let mut p = std::env::temp_dir();
    p.push(format!("effcorr_render_{}_{}_{}", std::process::id(), nanos, name));
    p
}

fn artifacts() -> Vec<(&'static str, String)> {
    let b = Binning::uniform(5, 0.0, 5.0).unwrap();
    let mut t = Hist1D::new("h1M", b.clone());
    let mut r = Hist1D::new("h1M_reco", b.clone());
    let mut c = Hist1D::new("h1M_corr", b.clone());
    for i in 0..50 {
        let x = (i % 5) as f64 + 0.5;
        t.fill(x, 1.0);
        if i % 2 == 0 {
            r.fill(x, 1.0);
            c.fill(x, 2.0);
        }
    }
    let chi2 = chi2_test_ww(&t, &c).unwrap();
    let a1 = triplet1d_artifact("M [GeV]", &t, &r, &c, &chi2, LegendPosition::SouthEast).unwrap();

    let mut t2 = Hist2D::new("h2PtM", b.clone(), b.clone());
    let mut r2 = Hist2D::new("h2PtM_reco", b.clone(), b.clone());
    let mut c2 = Hist2D::new("h2PtM_corr", b.clone(), b.clone());
    t2.fill(1.5, 2.5, 4.0);
    r2.fill(1.5, 2.5, 1.0);
    c2.fill(1.5, 2.5, 4.0);
    let a2 = triplet2d_artifact("M [GeV]", "p_T [GeV]", &t2, &r2, &c2).unwrap();

    let mut w = Hist2D::new("h1M_weights", b, Binning::uniform(5, 0.0, 1.0).unwrap());
    w.fill(0.5, 0.5, 1.0);
    let a3 = weight_control_artifact("M [GeV]", &w);

    let mut e = Hist1D::new("hx_weights", Binning::uniform(200, 0.0, 1.0).unwrap());
    e.fill(0.5, 1.0);
    let a4 = weight_distribution_artifact(&e);

    let j1 = serde_json::to_string(&a1).unwrap();
    vec![
        ("triplet1d", j1.clone()),
        ("triplet1d_logy", j1),
        ("triplet2d", serde_json::to_string(&a2).unwrap()),
        ("weight_control", serde_json::to_string(&a3).unwrap()),
        ("weights", serde_json::to_string(&a4).unwrap()),
    ]
}

#[test]
fn every_kind_renders_from_json() {
    let config = resolve_config(None).unwrap();
    let arts = artifacts();
    assert_eq!(arts.len(), KINDS.len());
    for (kind, json) in &arts {
        assert!(KINDS.contains(kind));
        let svg = render_svg(json, kind, &config)
            .unwrap_or_else(|e| panic!("render {kind} failed: {e}"));
        assert!(svg.starts_with("<svg"), "{kind}");
        assert!(svg.trim_end().ends_with("</svg>"), "{kind}");
        assert!(!svg.contains("NaN"), "{kind}");
    }
}

#[test]
fn minimal_theme_renders_too() {
    let config = resolve_config(Some("theme: minimal\n")).unwrap();
    for (kind, json) in &artifacts() {
        render_svg(json, kind, &config).unwrap_or_else(|e| panic!("render {kind} failed: {e}"));
    }
}

#[test]
fn wrong_payload_is_a_deserialize_error() {
    let config = resolve_config(None).unwrap();
    let err = render_svg(r#"{"name": "x"}"#, "triplet1d", &config).unwrap_err();
    assert!(matches!(err, RenderError::Deserialize(_)));
}

#[test]
fn render_to_file_creates_parent_dirs() {
    let config = resolve_config(None).unwrap();
    let (kind, json) = &artifacts()[0];
    let dir = tmp_dir("nested");
    let path = dir.join("plots").join("h1M.svg");
    render_to_file(json, kind, &path, &config).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Reconstructed"));
    let _ = std::fs::remove_dir_all(&dir);
}

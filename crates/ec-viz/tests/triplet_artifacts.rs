use approx::assert_abs_diff_eq;
use ec_hist::{Binning, Hist1D, chi2_test_ww};
use ec_viz::{LegendPosition, triplet1d_artifact};

#[test]
fn triplet1d_artifact_contract_smoke() {
    let b = Binning::uniform(10, 0.0, 2.0).expect("binning");
    let mut truth = Hist1D::new("h1pt1", b.clone());
    let mut reco = Hist1D::new("h1pt1_reco", b.clone());
    let mut corr = Hist1D::new("h1pt1_corr", b);
    for i in 0..200 {
        let x = 0.005 + i as f64 * 0.01;
        let eff = 0.5;
        truth.fill(x, 1.0);
        if i % 2 == 0 {
            reco.fill(x, 1.0);
            corr.fill(x, 1.0 / eff);
        }
    }
    let chi2 = chi2_test_ww(&truth, &corr).expect("chi2");
    let art = triplet1d_artifact(
        "p_{T,1} [GeV]",
        &truth,
        &reco,
        &corr,
        &chi2,
        LegendPosition::NorthEast,
    )
    .expect("artifact");

    assert_eq!(art.schema_version, "effcorr_triplet1d_v1");
    assert_eq!(art.meta.tool, "effcorr");
    let n_bins = art.bin_edges.len() - 1;
    assert_eq!(n_bins, 10);
    for s in [&art.truth, &art.reco, &art.corrected, &art.ratio_reco, &art.ratio_corrected] {
        assert_eq!(s.y.len(), n_bins);
        assert_eq!(s.yerr.len(), n_bins);
        assert!(s.y.iter().chain(&s.yerr).all(|v| v.is_finite()));
    }
    for (r, c) in art.ratio_reco.y.iter().zip(&art.ratio_corrected.y) {
        assert_abs_diff_eq!(*r, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(*c, 1.0, epsilon = 1e-12);
    }
    assert_abs_diff_eq!(art.chi2.chi2, 0.0, epsilon = 1e-9);
    assert_eq!(art.chi2.ndf, 9);
    assert_eq!(art.chi2.residuals.len(), n_bins);

    let v: serde_json::Value = serde_json::to_value(&art).expect("to json");
    assert!(v["truth"]["y"].is_array());
    assert_eq!(v["legend_position"], "north_east");
}

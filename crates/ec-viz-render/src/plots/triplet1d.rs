use ec_viz::{Series, Triplet1DArtifact};

use crate::RenderError;
use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::header::draw_experiment_header;
use crate::layout::axes::Axis;
use crate::layout::legend::{self, LegendEntry, LegendKind};
use crate::layout::margins::{PlotArea, header_height, left_margin};
use crate::layout::multi_panel::MainRatioLayout;
use crate::plots::axes_draw::{AxesDecor, draw_axes, draw_reference_line};
use crate::primitives::*;

/// Y scale of the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YScale {
    Linear,
    Log,
}

/// Generated / reconstructed / corrected comparison with a ratio panel below.
pub fn render(art: &Triplet1DArtifact, config: &VizConfig, scale: YScale) -> crate::Result<String> {
    let n = art.bin_edges.len().saturating_sub(1);
    if n == 0 {
        return Err(RenderError::Layout(format!("'{}' has no bins", art.name)));
    }
    for s in [&art.truth, &art.reco, &art.corrected, &art.ratio_reco, &art.ratio_corrected] {
        if s.y.len() != n || s.yerr.len() != n {
            return Err(RenderError::Layout(format!(
                "'{}': series length {} does not match {} bins",
                art.name,
                s.y.len(),
                n
            )));
        }
    }

    let mut canvas = Canvas::new(config.figure.width, config.figure.height)?;
    let x_min = art.bin_edges[0];
    let x_max = art.bin_edges[n];

    let upper = |s: &Series| {
        s.y.iter().zip(&s.yerr).map(|(y, e)| y + e).filter(|v| v.is_finite()).fold(0.0, f64::max)
    };
    let y_max = upper(&art.truth).max(upper(&art.reco)).max(upper(&art.corrected));
    let y_axis = match scale {
        YScale::Linear => Axis::auto_linear(0.0, (y_max * 1.3).max(1.0), 5),
        YScale::Log => {
            let y_min_pos = [&art.truth, &art.reco, &art.corrected]
                .iter()
                .flat_map(|s| s.y.iter().copied())
                .filter(|v| *v > 0.0)
                .fold(f64::INFINITY, f64::min);
            Axis::auto_log(y_min_pos * 0.5, y_max * 5.0)
        }
    }
    .with_label(config.triplet.y_label.clone());
    let x_axis = Axis::fixed_linear(x_min, x_max, 6).with_label(art.x_label.clone());
    let ratio_axis = Axis::fixed_linear(art.ratio_range[0], art.ratio_range[1], 5)
        .with_label(config.triplet.ratio_label.clone());

    let margin_l = left_margin(&canvas, &y_axis, config)
        .max(left_margin(&canvas, &ratio_axis, config));
    let top = header_height(config);
    let bottom = config.font.tick_size + config.font.label_size + 24.0;
    let layout = MainRatioLayout::new(
        margin_l,
        top,
        canvas.width - margin_l - 15.0,
        canvas.height - top - bottom,
        4.0,
        config.triplet.ratio_fraction,
    );
    let y_title_offset = margin_l - config.font.label_size;

    draw_experiment_header(&mut canvas, &layout.main, config, &art.name);

    // --- Main panel ---
    let main = layout.main;
    let main_decor = AxesDecor::without_x_labels(y_title_offset);
    draw_axes(&mut canvas, &main, &x_axis, &y_axis, config, main_decor);
    canvas.push_clip(main.left, main.top, main.width, main.height);

    let xs: Vec<f64> =
        art.bin_edges.iter().map(|&e| x_axis.data_to_pixel(e, main.left, main.right())).collect();
    let ys: Vec<f64> =
        art.truth.y.iter().map(|&v| y_axis.data_to_pixel(v, main.bottom(), main.top)).collect();
    canvas.step_line(&xs, &ys, main.bottom(), &LineStyle::solid(config.colors.generated, 1.2));

    let reco_marker = MarkerStyle {
        shape: MarkerShape::Circle,
        size: 2.2,
        color: config.colors.reconstructed,
        fill: false,
    };
    let corr_marker = MarkerStyle {
        shape: MarkerShape::Square,
        size: 2.0,
        color: config.colors.corrected,
        fill: true,
    };
    let edges = &art.bin_edges;
    draw_points(&mut canvas, &main, &x_axis, &y_axis, edges, &art.reco, None, &reco_marker);
    draw_points(&mut canvas, &main, &x_axis, &y_axis, edges, &art.corrected, None, &corr_marker);
    canvas.pop_clip();

    let entries = [
        LegendEntry {
            label: config.triplet.generated_label.clone(),
            color: config.colors.generated,
            kind: LegendKind::Line,
        },
        LegendEntry {
            label: config.triplet.reconstructed_label.clone(),
            color: config.colors.reconstructed,
            kind: LegendKind::Marker(MarkerShape::Circle, false),
        },
        LegendEntry {
            label: format!(
                "{} [\u{03C7}\u{00B2}/ndf = {:.1}]",
                config.triplet.corrected_label, art.chi2.chi2_ndf
            ),
            color: config.colors.corrected,
            kind: LegendKind::Marker(MarkerShape::Square, true),
        },
    ];
    legend::draw_legend(&mut canvas, &main, &entries, config.font.size, art.legend_position);

    // --- Ratio panel ---
    let ratio = layout.ratio;
    draw_axes(&mut canvas, &ratio, &x_axis, &ratio_axis, config, AxesDecor::full(y_title_offset));
    draw_reference_line(&mut canvas, &ratio, &ratio_axis, 1.0, config.colors.reference_line);
    canvas.push_clip(ratio.left, ratio.top, ratio.width, ratio.height);
    let defined = Some(art.truth.y.as_slice());
    let ratios = [(&art.ratio_reco, &reco_marker), (&art.ratio_corrected, &corr_marker)];
    for (series, marker) in ratios {
        draw_points(&mut canvas, &ratio, &x_axis, &ratio_axis, edges, series, defined, marker);
    }
    canvas.pop_clip();

    Ok(canvas.finish_svg())
}

/// Markers with vertical error bars at bin centres. Bins with zero content,
/// or a zero entry in `defined` (empty denominator), are skipped.
#[allow(clippy::too_many_arguments)]
fn draw_points(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    edges: &[f64],
    series: &Series,
    defined: Option<&[f64]>,
    marker: &MarkerStyle,
) {
    let err_style = LineStyle::solid(marker.color, 0.8);
    for (i, (&y, &e)) in series.y.iter().zip(&series.yerr).enumerate() {
        let undefined = defined.is_some_and(|d| d[i] == 0.0);
        if y == 0.0 || undefined || !y.is_finite() {
            continue;
        }
        let px = x_axis.data_to_pixel(0.5 * (edges[i] + edges[i + 1]), area.left, area.right());
        let py = y_axis.data_to_pixel(y, area.bottom(), area.top);
        if e > 0.0 && e.is_finite() {
            let lo = y_axis.data_to_pixel(y - e, area.bottom(), area.top);
            let hi = y_axis.data_to_pixel(y + e, area.bottom(), area.top);
            canvas.error_bar(px, lo, hi, 0.0, &err_style);
        }
        canvas.marker(px, py, marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec_hist::{Binning, Hist1D, chi2_test_ww};
    use ec_viz::{LegendPosition, triplet1d_artifact};

    fn artifact() -> Triplet1DArtifact {
        let b = Binning::uniform(4, 0.0, 4.0).unwrap();
        let mut t = Hist1D::new("h1M", b.clone());
        let mut r = Hist1D::new("h1M_reco", b.clone());
        let mut c = Hist1D::new("h1M_corr", b);
        for x in [0.5, 0.5, 1.5, 2.5] {
            t.fill(x, 1.0);
        }
        r.fill(0.5, 1.0);
        c.fill(0.5, 2.0);
        r.fill(1.5, 1.0);
        c.fill(1.5, 1.0);
        let chi2 = chi2_test_ww(&t, &c).unwrap();
        triplet1d_artifact("M [GeV]", &t, &r, &c, &chi2, LegendPosition::NorthEast).unwrap()
    }

    #[test]
    fn linear_and_log_render() {
        let art = artifact();
        let config = VizConfig::default();
        let lin = render(&art, &config, YScale::Linear).unwrap();
        let log = render(&art, &config, YScale::Log).unwrap();
        assert!(lin.starts_with("<svg"));
        assert!(lin.contains("Generated"));
        assert!(lin.contains("Corrected [\u{03C7}\u{00B2}/ndf ="));
        assert!(lin.contains(">Ratio</text>"));
        assert!(log.contains("10\u{2070}"));
        assert!(!lin.contains("NaN"));
        assert!(!log.contains("NaN"));
    }

    #[test]
    fn series_length_mismatch_is_layout_error() {
        let mut art = artifact();
        art.reco.y.pop();
        let err = render(&art, &VizConfig::default(), YScale::Linear).unwrap_err();
        assert!(matches!(err, RenderError::Layout(_)));
    }
}

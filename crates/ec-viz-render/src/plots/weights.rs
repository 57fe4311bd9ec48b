use ec_viz::WeightDistributionArtifact;

use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::header::draw_experiment_header;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::plots::axes_draw::{AxesDecor, draw_axes};
use crate::primitives::*;

pub fn render(art: &WeightDistributionArtifact, config: &VizConfig) -> crate::Result<String> {
    let n = art.bin_edges.len().saturating_sub(1);
    if n == 0 || art.y.len() != n {
        return Err(crate::RenderError::Layout(format!(
            "'{}': {} counts for {n} bins",
            art.name,
            art.y.len()
        )));
    }

    let mut canvas = Canvas::new(config.figure.width, config.figure.height)?;
    let y_max = art.y.iter().copied().filter(|v| v.is_finite()).fold(0.0, f64::max);
    let x_axis =
        Axis::fixed_linear(art.bin_edges[0], art.bin_edges[n], 6).with_label("Efficiency");
    let y_axis = Axis::auto_linear(0.0, (y_max * 1.2).max(1.0), 5)
        .with_label(config.triplet.y_label.clone());

    let cell = PlotArea::manual(0.0, 0.0, canvas.width, canvas.height);
    let area = PlotArea::within(&canvas, cell, &y_axis, config, false, 0.0);
    draw_experiment_header(&mut canvas, &area, config, &art.name);

    let decor = AxesDecor::full(area.left - config.font.label_size);
    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config, decor);

    let xs: Vec<f64> =
        art.bin_edges.iter().map(|&e| x_axis.data_to_pixel(e, area.left, area.right())).collect();
    let ys: Vec<f64> =
        art.y.iter().map(|&v| y_axis.data_to_pixel(v, area.bottom(), area.top)).collect();
    canvas.push_clip(area.left, area.top, area.width, area.height);
    canvas.step_line(&xs, &ys, area.bottom(), &LineStyle::solid(config.colors.corrected, 1.2));
    canvas.pop_clip();

    // Stat box
    let style = TextStyle::sized(config.font.tick_size)
        .anchored(TextAnchor::End, TextBaseline::Hanging);
    let x = area.right() - 8.0;
    canvas.text(x, area.top + 8.0, &format!("Entries {}", art.entries), &style);
    let line2 = area.top + 12.0 + config.font.tick_size;
    canvas.text(x, line2, &format!("Mean {:.4}", art.mean), &style);

    Ok(canvas.finish_svg())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec_hist::{Binning, Hist1D};
    use ec_viz::weight_distribution_artifact;

    #[test]
    fn stat_box_reports_entries_and_mean() {
        let mut h = Hist1D::new("hx_weights", Binning::uniform(200, 0.0, 1.0).unwrap());
        for e in [0.2526, 0.7526] {
            h.fill(e, 1.0);
        }
        let art = weight_distribution_artifact(&h);
        let svg = render(&art, &VizConfig::default()).unwrap();
        assert!(svg.contains(">Entries 2</text>"));
        assert!(svg.contains(">Mean 0.5025</text>"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn empty_binning_rejected() {
        let mut art = weight_distribution_artifact(&Hist1D::new(
            "hx_weights",
            Binning::uniform(2, 0.0, 1.0).unwrap(),
        ));
        art.y.clear();
        assert!(render(&art, &VizConfig::default()).is_err());
    }
}

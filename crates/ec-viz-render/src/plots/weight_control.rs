use ec_viz::WeightControlArtifact;

use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::header::draw_experiment_header;
use crate::layout::margins::PlotArea;
use crate::plots::heatmap::{HeatmapPanel, draw_panel};

/// Observable vs. `1 / weight` as a single heat map.
pub fn render(art: &WeightControlArtifact, config: &VizConfig) -> crate::Result<String> {
    let mut canvas = Canvas::new(config.figure.width, config.figure.height)?;
    let cell = PlotArea::manual(0.0, 0.0, canvas.width, canvas.height);
    let panel = HeatmapPanel {
        title: "",
        x_label: &art.x_label,
        y_label: &art.y_label,
        x_edges: &art.x_edges,
        y_edges: &art.y_edges,
        z: &art.z,
        z_range: art.z_range,
        cmap: config.heatmap.cmap,
    };
    let area = draw_panel(&mut canvas, cell, &panel, config)?;
    draw_experiment_header(&mut canvas, &area, config, &art.name);
    Ok(canvas.finish_svg())
}

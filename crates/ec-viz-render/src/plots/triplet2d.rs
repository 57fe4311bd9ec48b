use ec_viz::Triplet2DArtifact;

use crate::canvas::Canvas;
use crate::color::Colormap;
use crate::config::VizConfig;
use crate::layout::multi_panel::GridLayout;
use crate::plots::heatmap::{HeatmapPanel, draw_panel};

/// Three distributions on the top row, the two ratios to truth below
/// (bottom-left cell left empty).
pub fn render(art: &Triplet2DArtifact, config: &VizConfig) -> crate::Result<String> {
    let cell_w = config.figure.width * 0.625;
    let cell_h = config.figure.height * 0.64;
    let mut canvas = Canvas::new(3.0 * cell_w, 2.0 * cell_h)?;
    let grid = GridLayout::new(canvas.width, canvas.height, 2, 3);

    let t = &config.triplet;
    let ratio_reco_title = format!("Ratio: {} / {}", t.reconstructed_label, t.generated_label);
    let ratio_corr_title = format!("Ratio: {} / {}", t.corrected_label, t.generated_label);

    let cmap = config.heatmap.cmap;
    let ratio_cmap = config.heatmap.ratio_cmap;
    let panels = [
        (0, panel(art, &t.generated_label, &art.truth, art.z_range, cmap)),
        (1, panel(art, &t.reconstructed_label, &art.reco, art.z_range, cmap)),
        (2, panel(art, &t.corrected_label, &art.corrected, art.z_range, cmap)),
        (4, panel(art, &ratio_reco_title, &art.ratio_reco, art.ratio_range, ratio_cmap)),
        (5, panel(art, &ratio_corr_title, &art.ratio_corrected, art.ratio_range, ratio_cmap)),
    ];
    for (slot, p) in &panels {
        if let Some(cell) = grid.cell(*slot) {
            draw_panel(&mut canvas, cell, p, config)?;
        }
    }

    Ok(canvas.finish_svg())
}

fn panel<'a>(
    art: &'a Triplet2DArtifact,
    title: &'a str,
    z: &'a [f64],
    z_range: [f64; 2],
    cmap: Colormap,
) -> HeatmapPanel<'a> {
    HeatmapPanel {
        title,
        x_label: &art.x_label,
        y_label: &art.y_label,
        x_edges: &art.x_edges,
        y_edges: &art.y_edges,
        z,
        z_range,
        cmap,
    }
}

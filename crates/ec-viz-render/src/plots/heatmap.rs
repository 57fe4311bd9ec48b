use crate::canvas::Canvas;
use crate::color::Colormap;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::plots::axes_draw::{AxesDecor, draw_axes};
use crate::primitives::*;

const COLORBAR_W: f64 = 12.0;
const COLORBAR_GAP: f64 = 8.0;
const COLORBAR_STEPS: usize = 50;

/// One colour-mapped 2D panel.
pub struct HeatmapPanel<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub x_edges: &'a [f64],
    pub y_edges: &'a [f64],
    /// Row-major cell values, `z[iy * nx + ix]`.
    pub z: &'a [f64],
    pub z_range: [f64; 2],
    pub cmap: Colormap,
}

/// Space needed right of the frame for the colour bar and its labels.
pub fn colorbar_extent(config: &VizConfig) -> f64 {
    COLORBAR_GAP + COLORBAR_W + 4.0 + 4.0 * config.font.tick_size
}

/// Draw `panel` inside `cell` and return the frame it occupies. Empty cells
/// (exactly zero) stay blank.
pub fn draw_panel(
    canvas: &mut Canvas,
    cell: PlotArea,
    panel: &HeatmapPanel<'_>,
    config: &VizConfig,
) -> crate::Result<PlotArea> {
    let nx = panel.x_edges.len().saturating_sub(1);
    let ny = panel.y_edges.len().saturating_sub(1);
    if nx == 0 || ny == 0 || panel.z.len() != nx * ny {
        return Err(crate::RenderError::Layout(format!(
            "'{}': {} values for a {nx}x{ny} grid",
            panel.title,
            panel.z.len()
        )));
    }

    let x_axis = Axis::fixed_linear(panel.x_edges[0], panel.x_edges[nx], 5)
        .with_label(panel.x_label);
    let y_axis = Axis::fixed_linear(panel.y_edges[0], panel.y_edges[ny], 5)
        .with_label(panel.y_label);
    let has_title = !panel.title.is_empty();
    let area = PlotArea::within(canvas, cell, &y_axis, config, has_title, colorbar_extent(config));

    if has_title {
        let style = TextStyle::sized(config.font.size)
            .anchored(TextAnchor::Middle, TextBaseline::Alphabetic);
        canvas.text(area.left + area.width / 2.0, area.top - 8.0, panel.title, &style);
    }

    let [lo, hi] = panel.z_range;
    for iy in 0..ny {
        let y0 = y_axis.data_to_pixel(panel.y_edges[iy], area.bottom(), area.top);
        let y1 = y_axis.data_to_pixel(panel.y_edges[iy + 1], area.bottom(), area.top);
        for ix in 0..nx {
            let v = panel.z[iy * nx + ix];
            if v == 0.0 || !v.is_finite() {
                continue;
            }
            let x0 = x_axis.data_to_pixel(panel.x_edges[ix], area.left, area.right());
            let x1 = x_axis.data_to_pixel(panel.x_edges[ix + 1], area.left, area.right());
            // Overlap by half a point so neighbouring cells leave no hairline gaps.
            let style = Style::filled(panel.cmap.scaled(v, lo, hi));
            canvas.rect(x0, y1, x1 - x0 + 0.5, y0 - y1 + 0.5, &style);
        }
    }

    let decor = AxesDecor::full(area.left - cell.left - config.font.label_size);
    draw_axes(canvas, &area, &x_axis, &y_axis, config, decor);
    draw_colorbar(canvas, &area, panel.cmap, panel.z_range, config);
    Ok(area)
}

fn draw_colorbar(
    canvas: &mut Canvas,
    area: &PlotArea,
    cmap: Colormap,
    range: [f64; 2],
    config: &VizConfig,
) {
    let x = area.right() + COLORBAR_GAP;
    let step_h = area.height / COLORBAR_STEPS as f64;
    for i in 0..COLORBAR_STEPS {
        // Top of the bar is the high end.
        let t = 1.0 - (i as f64 + 0.5) / COLORBAR_STEPS as f64;
        let y = area.top + i as f64 * step_h;
        canvas.rect(x, y, COLORBAR_W, step_h + 0.5, &Style::filled(cmap.at(t)));
    }

    let scale = Axis::fixed_linear(range[0], range[1], 4);
    let style = TextStyle::sized(config.font.tick_size * 0.85)
        .anchored(TextAnchor::Start, TextBaseline::Central);
    for tick in &scale.ticks {
        let y = scale.data_to_pixel(tick.value, area.bottom(), area.top);
        canvas.text(x + COLORBAR_W + 3.0, y, &tick.label, &style);
    }
}

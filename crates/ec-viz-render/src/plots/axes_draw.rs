use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Which decorations [`draw_axes`] draws besides the frame and ticks.
#[derive(Debug, Clone, Copy)]
pub struct AxesDecor {
    /// X tick labels and x title (off for a main panel stacked over a ratio panel).
    pub x_labels: bool,
    /// Y title drawn this far left of the frame.
    pub y_title_offset: f64,
}

impl AxesDecor {
    pub fn full(y_title_offset: f64) -> Self {
        Self { x_labels: true, y_title_offset }
    }

    pub fn without_x_labels(y_title_offset: f64) -> Self {
        Self { x_labels: false, y_title_offset }
    }
}

fn in_span(p: f64, a: f64, b: f64) -> bool {
    p >= a.min(b) - 0.5 && p <= a.max(b) + 0.5
}

/// Draw a box frame with ticks on all configured sides, optional grid, and labels.
pub fn draw_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    config: &VizConfig,
    decor: AxesDecor,
) {
    let black = Color::rgb(0, 0, 0);
    let major = LineStyle::solid(black, 0.6);
    let minor = LineStyle::solid(black, 0.4);
    let grid = LineStyle {
        color: config.grid.color.with_alpha(config.grid.alpha),
        width: 0.5,
        dash: Some("3 3"),
    };
    // Tick direction sign: +1 points into the frame.
    let dir = if config.axes.tick_direction == "in" { 1.0 } else { -1.0 };
    let tl = config.axes.tick_length;
    let mtl = config.axes.minor_tick_length;

    draw_frame(canvas, area);

    let x_label_style = TextStyle::sized(config.font.tick_size)
        .anchored(TextAnchor::Middle, TextBaseline::Hanging);
    for tick in &x_axis.ticks {
        let px = x_axis.data_to_pixel(tick.value, area.left, area.right());
        if !in_span(px, area.left, area.right()) {
            continue;
        }
        if config.grid.show {
            canvas.line(px, area.top, px, area.bottom(), &grid);
        }
        canvas.line(px, area.bottom(), px, area.bottom() - dir * tl, &major);
        if config.axes.show_top_ticks {
            canvas.line(px, area.top, px, area.top + dir * tl, &major);
        }
        if decor.x_labels {
            let gap = if dir > 0.0 { 3.0 } else { tl + 3.0 };
            canvas.text(px, area.bottom() + gap, &tick.label, &x_label_style);
        }
    }
    for &val in &x_axis.minor_ticks {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        if in_span(px, area.left, area.right()) {
            canvas.line(px, area.bottom(), px, area.bottom() - dir * mtl, &minor);
        }
    }

    let y_label_style =
        TextStyle::sized(config.font.tick_size).anchored(TextAnchor::End, TextBaseline::Central);
    for tick in &y_axis.ticks {
        let py = y_axis.data_to_pixel(tick.value, area.bottom(), area.top);
        if !in_span(py, area.top, area.bottom()) {
            continue;
        }
        if config.grid.show {
            canvas.line(area.left, py, area.right(), py, &grid);
        }
        canvas.line(area.left, py, area.left + dir * tl, py, &major);
        if config.axes.show_right_ticks {
            canvas.line(area.right(), py, area.right() - dir * tl, py, &major);
        }
        let gap = if dir > 0.0 { 4.0 } else { tl + 4.0 };
        canvas.text(area.left - gap, py, &tick.label, &y_label_style);
    }
    for &val in &y_axis.minor_ticks {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        if in_span(py, area.top, area.bottom()) {
            canvas.line(area.left, py, area.left + dir * mtl, py, &minor);
        }
    }

    let title_style = TextStyle {
        size: config.font.label_size,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };
    if decor.x_labels && !x_axis.label.is_empty() {
        let offset = if dir > 0.0 { 14.0 } else { tl + 14.0 };
        let y = area.bottom() + config.font.tick_size + offset;
        canvas.text(area.left + area.width / 2.0, y, &x_axis.label, &title_style);
    }
    if !y_axis.label.is_empty() {
        let x = area.left - decor.y_title_offset;
        canvas.text_rotated(x, area.top + area.height / 2.0, &y_axis.label, &title_style, -90.0);
    }
}

/// Frame only, no ticks.
pub fn draw_frame(canvas: &mut Canvas, area: &PlotArea) {
    let style = LineStyle::solid(Color::rgb(0, 0, 0), 0.8);
    canvas.line(area.left, area.top, area.right(), area.top, &style);
    canvas.line(area.left, area.bottom(), area.right(), area.bottom(), &style);
    canvas.line(area.left, area.top, area.left, area.bottom(), &style);
    canvas.line(area.right(), area.top, area.right(), area.bottom(), &style);
}

/// Horizontal dashed reference line at `y` across the panel.
pub fn draw_reference_line(
    canvas: &mut Canvas,
    area: &PlotArea,
    y_axis: &Axis,
    y: f64,
    color: Color,
) {
    let py = y_axis.data_to_pixel(y, area.bottom(), area.top);
    if in_span(py, area.top, area.bottom()) {
        canvas.line(area.left, py, area.right(), py, &LineStyle::dashed(color, 1.2));
    }
}

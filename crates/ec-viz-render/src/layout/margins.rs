use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::primitives::TextStyle;

/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn manual(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Plot area inside a cell `[x, y, w, h]` of the canvas, leaving room for
    /// y tick labels, both axis titles, a panel title, and `extra_right`
    /// points on the right (colour bar).
    pub fn within(
        canvas: &Canvas,
        cell: PlotArea,
        y_axis: &Axis,
        config: &VizConfig,
        has_title: bool,
        extra_right: f64,
    ) -> Self {
        let left = cell.left + left_margin(canvas, y_axis, config);
        let top = cell.top
            + if has_title { config.font.size + 12.0 } else { header_height(config) };
        let bottom = cell.bottom() - (config.font.tick_size + config.font.label_size + 20.0);
        let right = cell.right() - 15.0 - extra_right;
        Self { left, top, width: (right - left).max(20.0), height: (bottom - top).max(20.0) }
    }
}

/// Space for y tick labels plus a rotated axis title.
pub fn left_margin(canvas: &Canvas, y_axis: &Axis, config: &VizConfig) -> f64 {
    let style = TextStyle::sized(config.font.tick_size);
    let max_tick_w = y_axis
        .ticks
        .iter()
        .map(|t| canvas.measure_text(&t.label, &style).width)
        .fold(0.0_f64, f64::max);
    let title = if y_axis.label.is_empty() { 0.0 } else { config.font.label_size + 8.0 };
    12.0 + max_tick_w + 8.0 + title
}

/// Space above the main panel for the experiment header.
pub fn header_height(config: &VizConfig) -> f64 {
    if config.experiment.name.is_empty() { 12.0 } else { config.font.label_size * 1.3 + 20.0 }
}

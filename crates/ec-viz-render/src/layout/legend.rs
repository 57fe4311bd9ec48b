use ec_viz::LegendPosition;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub kind: LegendKind,
}

pub enum LegendKind {
    Line,
    Marker(MarkerShape, bool),
}

/// Draw a framed legend in the given corner of the plot area.
pub fn draw_legend(
    canvas: &mut Canvas,
    area: &PlotArea,
    entries: &[LegendEntry],
    font_size: f64,
    position: LegendPosition,
) {
    if entries.is_empty() {
        return;
    }

    let row_height = font_size + 4.0;
    let swatch_w = 14.0;
    let gap = 6.0;
    let padding = 6.0;
    let inset = 8.0;

    let text_style = TextStyle {
        size: font_size * 0.9,
        baseline: TextBaseline::Central,
        ..Default::default()
    };

    let max_w = entries
        .iter()
        .map(|e| canvas.measure_text(&e.label, &text_style).width)
        .fold(0.0_f64, f64::max);

    let legend_w = padding + swatch_w + gap + max_w + padding;
    let legend_h = padding + entries.len() as f64 * row_height + padding;

    let lx = area.right() - legend_w - inset;
    let ly = match position {
        LegendPosition::NorthEast => area.top + inset,
        LegendPosition::SouthEast => area.bottom() - legend_h - inset,
    };

    let bg_style = Style::outlined(Color::rgb(255, 255, 255), Color::rgb(0, 0, 0), 0.5);
    canvas.rect(lx, ly, legend_w, legend_h, &bg_style);

    for (i, entry) in entries.iter().enumerate() {
        let ey = ly + padding + i as f64 * row_height + row_height / 2.0;
        let sx = lx + padding;

        match entry.kind {
            LegendKind::Line => {
                canvas.line(sx, ey, sx + swatch_w, ey, &LineStyle::solid(entry.color, 1.5));
            }
            LegendKind::Marker(shape, fill) => {
                canvas.line(sx, ey, sx + swatch_w, ey, &LineStyle::solid(entry.color, 0.8));
                canvas.marker(
                    sx + swatch_w / 2.0,
                    ey,
                    &MarkerStyle { shape, size: 2.5, color: entry.color, fill },
                );
            }
        }

        canvas.text(sx + swatch_w + gap, ey, &entry.label, &text_style);
    }
}

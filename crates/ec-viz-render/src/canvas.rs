//! Streaming SVG canvas.

use std::fmt::Write as _;

use crate::RenderError;
use crate::primitives::*;
use crate::text::{TextMetrics, measure_text};

/// Font stack written into every text element.
pub const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// SVG canvas written in drawing order. Coordinates in points (1pt = 1/72").
///
/// Elements drawn between [`Canvas::push_clip`] and [`Canvas::pop_clip`] go
/// into one group clipped to that rectangle.
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    defs: String,
    body: String,
    in_clip: bool,
    clip_count: usize,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> crate::Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RenderError::Layout(format!("invalid canvas size {width}x{height}")));
        }
        Ok(Self {
            width,
            height,
            defs: String::new(),
            body: String::with_capacity(32 * 1024),
            in_clip: false,
            clip_count: 0,
        })
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &Style) {
        let _ = write!(self.body, r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}""#);
        area_attrs(&mut self.body, style);
        self.body.push_str(" />\n");
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &Style) {
        let _ = write!(self.body, r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}""#);
        area_attrs(&mut self.body, style);
        self.body.push_str(" />\n");
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        let _ = write!(self.body, r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}""#);
        stroke_attrs(&mut self.body, style);
        self.body.push_str(" />\n");
    }

    /// Open polyline; fewer than two points draws nothing.
    pub fn polyline(&mut self, points: &[(f64, f64)], style: &LineStyle) {
        if points.len() < 2 {
            return;
        }
        self.body.push_str(r#"<polyline points=""#);
        let mut sep = "";
        for (x, y) in points {
            let _ = write!(self.body, "{sep}{x:.2},{y:.2}");
            sep = " ";
        }
        self.body.push_str(r#"" fill="none""#);
        stroke_attrs(&mut self.body, style);
        self.body.push_str(" />\n");
    }

    /// Histogram outline from `baseline` through bin edges `xs` (`n + 1`) at
    /// heights `ys` (`n`), all in canvas coordinates.
    pub fn step_line(&mut self, xs: &[f64], ys: &[f64], baseline: f64, style: &LineStyle) {
        if ys.is_empty() || xs.len() != ys.len() + 1 {
            return;
        }
        let steps = xs.windows(2).zip(ys).flat_map(|(e, &y)| [(e[0], y), (e[1], y)]);
        let points: Vec<(f64, f64)> = std::iter::once((xs[0], baseline))
            .chain(steps)
            .chain(std::iter::once((xs[ys.len()], baseline)))
            .collect();
        self.polyline(&points, style);
    }

    /// Vertical error bar with caps of `cap_width` (none when 0).
    pub fn error_bar(&mut self, x: f64, y_lo: f64, y_hi: f64, cap_width: f64, style: &LineStyle) {
        self.line(x, y_lo, x, y_hi, style);
        if cap_width > 0.0 {
            let half = cap_width / 2.0;
            for y in [y_lo, y_hi] {
                self.line(x - half, y, x + half, y, style);
            }
        }
    }

    pub fn marker(&mut self, x: f64, y: f64, marker: &MarkerStyle) {
        let style = marker.area_style();
        let s = marker.size;
        match marker.shape {
            MarkerShape::Circle => self.circle(x, y, s, &style),
            MarkerShape::Square => self.rect(x - s, y - s, 2.0 * s, 2.0 * s, &style),
        }
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        self.text_element(x, y, content, style, None);
    }

    /// Text rotated by `angle` degrees around its anchor point.
    pub fn text_rotated(&mut self, x: f64, y: f64, content: &str, style: &TextStyle, angle: f64) {
        self.text_element(x, y, content, style, Some(angle));
    }

    fn text_element(
        &mut self,
        x: f64,
        y: f64,
        content: &str,
        style: &TextStyle,
        rotate: Option<f64>,
    ) {
        let out = &mut self.body;
        let _ = write!(
            out,
            r#"<text x="{x:.2}" y="{y:.2}" font-family="{FONT_FAMILY}" font-size="{:.1}" fill="{}" text-anchor="{}" dominant-baseline="{}""#,
            style.size, style.color, style.anchor, style.baseline,
        );
        if style.weight == FontWeight::Bold {
            out.push_str(r#" font-weight="bold""#);
        }
        if style.style == FontStyle::Italic {
            out.push_str(r#" font-style="italic""#);
        }
        if let Some(angle) = rotate {
            let _ = write!(out, r#" transform="rotate({angle:.1},{x:.2},{y:.2})""#);
        }
        out.push('>');
        escape_xml(out, content);
        out.push_str("</text>\n");
    }

    /// Clip what follows to the rectangle; returns the clip path id. Clips do
    /// not nest: an open clip is closed first.
    pub fn push_clip(&mut self, x: f64, y: f64, w: f64, h: f64) -> String {
        self.pop_clip();
        let id = format!("clip{}", self.clip_count);
        self.clip_count += 1;
        let _ = writeln!(
            self.defs,
            r#"<clipPath id="{id}"><rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" /></clipPath>"#
        );
        let _ = writeln!(self.body, r#"<g clip-path="url(#{id})">"#);
        self.in_clip = true;
        id
    }

    pub fn pop_clip(&mut self) {
        if std::mem::take(&mut self.in_clip) {
            self.body.push_str("</g>\n");
        }
    }

    pub fn measure_text(&self, content: &str, style: &TextStyle) -> TextMetrics {
        measure_text(content, style)
    }

    /// Close the document on a white background.
    pub fn finish_svg(mut self) -> String {
        self.pop_clip();
        let (w, h) = (self.width, self.height);
        let mut out = String::with_capacity(self.body.len() + self.defs.len() + 256);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        if !self.defs.is_empty() {
            let _ = write!(out, "<defs>\n{}</defs>\n", self.defs);
        }
        let _ = writeln!(out, r#"<rect width="{w}" height="{h}" fill="white" />"#);
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

fn escape_xml(out: &mut String, content: &str) {
    for ch in content.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

fn area_attrs(out: &mut String, style: &Style) {
    let fill = style.fill.map_or_else(|| "none".to_string(), |c| c.to_string());
    let _ = write!(out, r#" fill="{fill}""#);
    if let Some(stroke) = style.stroke {
        let _ = write!(out, r#" stroke="{stroke}" stroke-width="{:.2}""#, style.stroke_width);
    }
}

fn stroke_attrs(out: &mut String, style: &LineStyle) {
    let _ = write!(out, r#" stroke="{}" stroke-width="{:.2}""#, style.color, style.width);
    if let Some(dash) = style.dash {
        let _ = write!(out, r#" stroke-dasharray="{dash}""#);
    }
}

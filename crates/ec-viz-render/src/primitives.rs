//! Drawing styles passed to [`crate::canvas::Canvas`].

use std::fmt;

use crate::color::Color;

const BLACK: Color = Color::rgb(0, 0, 0);

/// Area style for rectangles and circles. No fill draws an outline only.
#[derive(Debug, Clone, Default)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl Style {
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color), ..Default::default() }
    }

    pub fn stroked(color: Color, width: f64) -> Self {
        Self { fill: None, stroke: Some(color), stroke_width: width }
    }

    /// `fill` with a `stroke` outline of `width`.
    pub fn outlined(fill: Color, stroke: Color, width: f64) -> Self {
        Self { fill: Some(fill), stroke: Some(stroke), stroke_width: width }
    }
}

/// Stroke style of lines, polylines and error bars.
#[derive(Debug, Clone)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    /// SVG `stroke-dasharray`; `None` is solid.
    pub dash: Option<&'static str>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::solid(BLACK, 1.0)
    }
}

impl LineStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    pub fn dashed(color: Color, width: f64) -> Self {
        Self { color, width, dash: Some("6 3") }
    }
}

#[derive(Debug, Clone)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::sized(10.0)
    }
}

impl TextStyle {
    /// Regular black text of the given size, anchored at its start.
    pub fn sized(size: f64) -> Self {
        Self {
            size,
            color: BLACK,
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
        }
    }

    pub fn anchored(self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        Self { anchor, baseline, ..self }
    }

    pub fn bold(self) -> Self {
        Self { weight: FontWeight::Bold, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Italic,
}

/// SVG `text-anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// SVG `dominant-baseline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Central,
    Hanging,
}

impl fmt::Display for TextAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        })
    }
}

impl fmt::Display for TextBaseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Alphabetic => "auto",
            Self::Central => "central",
            Self::Hanging => "hanging",
        })
    }
}

/// Data-point marker. `size` is the half-width (or radius) in points; open
/// markers have a white interior.
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub size: f64,
    pub color: Color,
    pub fill: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
}

impl MarkerStyle {
    /// Area style the marker is drawn with.
    pub fn area_style(&self) -> Style {
        if self.fill {
            Style::outlined(self.color, self.color, 0.5)
        } else {
            Style::outlined(Color::rgb(255, 255, 255), self.color, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_keywords() {
        assert_eq!(TextAnchor::Middle.to_string(), "middle");
        assert_eq!(TextBaseline::Alphabetic.to_string(), "auto");
        assert_eq!(TextBaseline::Hanging.to_string(), "hanging");
    }

    #[test]
    fn open_marker_has_white_interior() {
        let red = Color::rgb(200, 0, 0);
        let open = MarkerStyle { shape: MarkerShape::Circle, size: 2.0, color: red, fill: false };
        let style = open.area_style();
        assert_eq!(style.fill, Some(Color::rgb(255, 255, 255)));
        assert_eq!(style.stroke, Some(red));
    }
}

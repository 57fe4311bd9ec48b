use crate::primitives::{FontWeight, TextStyle};

#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

/// Average advance of a sans-serif glyph, in ems.
const REGULAR_ADVANCE_EM: f64 = 0.55;
const BOLD_ADVANCE_EM: f64 = 0.60;

/// Estimate text extents in points.
///
/// Figures use the viewer's generic sans-serif face, so widths are an
/// average-advance estimate rather than exact glyph metrics. Narrow glyphs
/// (`i`, `l`, `.`, digits `1`) count as half a glyph.
pub fn measure_text(text: &str, style: &TextStyle) -> TextMetrics {
    let em = match style.weight {
        FontWeight::Bold => BOLD_ADVANCE_EM,
        FontWeight::Regular => REGULAR_ADVANCE_EM,
    };
    let glyphs: f64 = text
        .chars()
        .map(|c| match c {
            'i' | 'l' | 'j' | '.' | ',' | ':' | ';' | '1' | '|' | '\'' | ' ' => 0.5,
            'm' | 'w' | 'M' | 'W' => 1.4,
            _ => 1.0,
        })
        .sum();
    TextMetrics {
        width: glyphs * em * style.size,
        height: 1.2 * style.size,
        ascent: 0.9 * style.size,
    }
}

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw the header above a panel: **name** *status* on the left, the free-form
/// label (or `fallback_label` when none is configured) on the right.
pub fn draw_experiment_header(
    canvas: &mut Canvas,
    area: &PlotArea,
    config: &VizConfig,
    fallback_label: &str,
) {
    if config.experiment.name.is_empty() {
        return;
    }

    let header_size = config.font.label_size * 1.3;
    let y = area.top - 6.0;

    let bold_style = TextStyle::sized(header_size).bold();
    canvas.text(area.left, y, &config.experiment.name, &bold_style);
    let name_w = canvas.measure_text(&config.experiment.name, &bold_style).width;

    if !config.experiment.status.is_empty() {
        let italic_style =
            TextStyle { size: header_size * 0.85, style: FontStyle::Italic, ..Default::default() };
        canvas.text(area.left + name_w + 5.0, y, &config.experiment.status, &italic_style);
    }

    let label = if config.experiment.label.is_empty() {
        fallback_label
    } else {
        config.experiment.label.as_str()
    };
    if !label.is_empty() {
        let info_style = TextStyle {
            size: config.font.tick_size,
            color: Color::rgb(80, 80, 80),
            anchor: TextAnchor::End,
            ..Default::default()
        };
        canvas.text(area.right(), y, label, &info_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_uses_fallback_label() {
        let config = VizConfig::default();
        let area = PlotArea::manual(50.0, 40.0, 300.0, 200.0);
        let mut c = Canvas::new(400.0, 300.0).unwrap();
        draw_experiment_header(&mut c, &area, &config, "h1M");
        let svg = c.finish_svg();
        assert!(svg.contains(">effcorr</text>"));
        assert!(svg.contains(">Simulation</text>"));
        assert!(svg.contains(">h1M</text>"));
    }

    #[test]
    fn empty_name_draws_nothing() {
        let mut config = VizConfig::default();
        config.experiment.name.clear();
        let area = PlotArea::manual(50.0, 40.0, 300.0, 200.0);
        let mut c = Canvas::new(400.0, 300.0).unwrap();
        draw_experiment_header(&mut c, &area, &config, "h1M");
        assert!(!c.finish_svg().contains("<text"));
    }
}

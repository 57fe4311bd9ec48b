use serde::{Deserialize, Serialize};

use crate::color::{Color, Colormap};
use crate::theme::BuiltinTheme;

/// Top-level visualization configuration (YAML or programmatic).
///
/// Passed by reference into every renderer; there is no global plot style.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub theme: String,
    pub figure: FigureConfig,
    pub font: FontConfig,
    pub axes: AxesConfig,
    pub grid: GridConfig,
    pub experiment: ExperimentConfig,
    pub colors: ColorsConfig,
    pub output: OutputConfig,
    pub triplet: TripletConfig,
    pub heatmap: HeatmapConfig,
}

impl Default for VizConfig {
    fn default() -> Self {
        BuiltinTheme::Effcorr.base_config()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 576.0,  // 8" * 72
            height: 468.0, // 6.5" * 72
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub size: f64,
    pub label_size: f64,
    pub tick_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { size: 10.0, label_size: 11.0, tick_size: 8.5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub tick_direction: String,
    pub show_top_ticks: bool,
    pub show_right_ticks: bool,
    pub tick_length: f64,
    pub minor_tick_length: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            tick_direction: "in".into(),
            show_top_ticks: true,
            show_right_ticks: true,
            tick_length: 5.0,
            minor_tick_length: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub show: bool,
    pub color: Color,
    pub alpha: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { show: false, color: Color::hex("#CBD5E1"), alpha: 0.55 }
    }
}

/// Header text drawn above the main panel. Empty `name` disables it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub name: String,
    pub status: String,
    pub label: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self { name: "effcorr".into(), status: "Simulation".into(), label: String::new() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub generated: Color,
    pub reconstructed: Color,
    pub corrected: Color,
    pub reference_line: Color,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            generated: Color::hex("#111827"),
            reconstructed: Color::hex("#DC2626"),
            corrected: Color::hex("#1D4ED8"),
            reference_line: Color::hex("#9CA3AF"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File format of saved figures: `svg`, or `png` with the `png` feature.
    pub format: String,
    pub dpi: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: "svg".into(), dpi: 220 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TripletConfig {
    pub generated_label: String,
    pub reconstructed_label: String,
    pub corrected_label: String,
    /// Fraction of the content height given to the ratio panel.
    pub ratio_fraction: f64,
    pub y_label: String,
    pub ratio_label: String,
}

impl Default for TripletConfig {
    fn default() -> Self {
        Self {
            generated_label: "Generated".into(),
            reconstructed_label: "Reconstructed".into(),
            corrected_label: "Corrected".into(),
            ratio_fraction: 0.28,
            y_label: "Events".into(),
            ratio_label: "Ratio".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub cmap: Colormap,
    pub ratio_cmap: Colormap,
}

/// Resolve a VizConfig from an optional YAML string.
///
/// The YAML may name a `theme`; that theme's base config supplies every
/// field the YAML leaves out.
pub fn resolve_config(user_yaml: Option<&str>) -> crate::Result<VizConfig> {
    let Some(yaml) = user_yaml else {
        return Ok(VizConfig::default());
    };
    let value: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(yaml).map_err(|e| crate::RenderError::Config(e.to_string()))?;
    resolve_config_value(value)
}

/// [`resolve_config`] for YAML that is already parsed, e.g. a `viz:` section
/// embedded in a larger config file. `Null` yields the default theme.
pub fn resolve_config_value(value: serde_yaml_ng::Value) -> crate::Result<VizConfig> {
    let theme = value
        .get("theme")
        .and_then(|t| t.as_str())
        .map(BuiltinTheme::parse)
        .unwrap_or(BuiltinTheme::Effcorr);
    theme.overlay(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_yaml() {
        let c = resolve_config(None).unwrap();
        assert_eq!(c.theme, "effcorr");
        assert_eq!(c.output.format, "svg");
        assert_eq!(c.triplet.ratio_label, "Ratio");
    }

    #[test]
    fn partial_yaml_overrides() {
        let c = resolve_config(Some("figure:\n  width: 300\ntriplet:\n  corrected_label: DNN\n"))
            .unwrap();
        assert_eq!(c.figure.width, 300.0);
        assert_eq!(c.figure.height, 468.0);
        assert_eq!(c.triplet.corrected_label, "DNN");
        assert_eq!(c.triplet.generated_label, "Generated");
    }

    #[test]
    fn theme_base_under_overrides() {
        let c = resolve_config(Some("theme: minimal\nfont:\n  size: 12\n")).unwrap();
        assert_eq!(c.theme, "minimal");
        assert!(c.experiment.name.is_empty());
        assert_eq!(c.font.size, 12.0);
        assert_eq!(c.axes.tick_direction, "out");
    }

    #[test]
    fn colormap_by_name() {
        let c = resolve_config(Some("heatmap:\n  cmap: dark_body\n")).unwrap();
        assert_eq!(c.heatmap.cmap, Colormap::DarkBody);
        assert!(resolve_config(Some("heatmap:\n  cmap: nope\n")).is_err());
    }
}

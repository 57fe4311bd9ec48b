use serde_yaml_ng::Value;

use crate::RenderError;
use crate::color::Colormap;
use crate::config::*;

/// Built-in theme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTheme {
    Effcorr,
    Minimal,
}

impl BuiltinTheme {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "minimal" => Self::Minimal,
            _ => Self::Effcorr,
        }
    }

    pub fn base_config(self) -> VizConfig {
        match self {
            Self::Effcorr => effcorr(),
            Self::Minimal => minimal(),
        }
    }

    /// Apply user YAML on top of this theme's base config, field by field.
    pub fn overlay(self, user: Value) -> crate::Result<VizConfig> {
        let mut base = serde_yaml_ng::to_value(self.base_config())
            .map_err(|e| RenderError::Config(e.to_string()))?;
        merge(&mut base, user);
        serde_yaml_ng::from_value(base).map_err(|e| RenderError::Config(e.to_string()))
    }
}

fn merge(base: &mut Value, user: Value) {
    match (base, user) {
        (_, Value::Null) => {}
        (Value::Mapping(b), Value::Mapping(u)) => {
            for (k, v) in u {
                match b.get_mut(&k) {
                    Some(slot) => merge(slot, v),
                    None => {
                        b.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}

fn effcorr() -> VizConfig {
    VizConfig {
        theme: "effcorr".into(),
        figure: FigureConfig::default(),
        font: FontConfig::default(),
        axes: AxesConfig::default(),
        grid: GridConfig::default(),
        experiment: ExperimentConfig::default(),
        colors: ColorsConfig::default(),
        output: OutputConfig::default(),
        triplet: TripletConfig::default(),
        heatmap: HeatmapConfig { cmap: Colormap::Rainbow, ratio_cmap: Colormap::Rainbow },
    }
}

fn minimal() -> VizConfig {
    VizConfig {
        theme: "minimal".into(),
        figure: FigureConfig { width: 432.0, height: 360.0 },
        font: FontConfig { size: 9.0, label_size: 10.0, tick_size: 8.0 },
        axes: AxesConfig {
            tick_direction: "out".into(),
            show_top_ticks: false,
            show_right_ticks: false,
            tick_length: 4.0,
            minor_tick_length: 2.0,
        },
        experiment: ExperimentConfig {
            name: String::new(),
            status: String::new(),
            label: String::new(),
        },
        heatmap: HeatmapConfig { cmap: Colormap::DarkBody, ratio_cmap: Colormap::Rainbow },
        ..effcorr()
    }
}

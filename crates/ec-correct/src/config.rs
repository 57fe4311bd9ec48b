//! Run configuration (YAML).

use std::path::{Path, PathBuf};

use ec_core::{Error, Result};
use ec_viz_render::config::{VizConfig, resolve_config_value};
use serde::{Deserialize, Serialize};

use crate::fiducial::FiducialFilter;

/// Datasets processed when neither the config nor the command line names any.
pub const REFERENCE_DATASETS: [&str; 7] = [
    "tree2track_kPipmExp",
    "tree2track_kPipmOrexp",
    "tree2track_kPipmPower",
    "tree2track_kCohRhoToPi",
    "tree2track_kKpkmExp",
    "tree2track_kKpkmOrexp",
    "tree2track_kKpkmPower",
];

/// Default bound on accepted events per dataset.
pub const DEFAULT_MAX_EVENTS: u64 = 100_000_000;

/// Bins of the per-dataset efficiency distribution over `[0, 1]`.
pub const WEIGHT_HIST_BINS: usize = 200;

/// Everything a correction run needs besides the dataset names on the
/// command line.
///
/// ```yaml
/// datasets: [tree2track_kPipmExp]
/// kinematics_dir: ./data
/// weights_dir: ./output
/// figures_dir: ./figs
/// max_events: 1000000
/// fiducial: { pt_min: 0.1, eta_max: 0.9 }
/// viz: { theme: minimal }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Dataset names, processed in order.
    pub datasets: Vec<String>,
    /// Holds `<dataset>.csv`.
    pub kinematics_dir: PathBuf,
    /// Holds `<dataset>.out`.
    pub weights_dir: PathBuf,
    /// Figures go to `<figures_dir>/<dataset>/`.
    pub figures_dir: PathBuf,
    /// Stop each dataset after this many accepted events.
    pub max_events: u64,
    /// Phase-space cut on the generated pair.
    pub fiducial: FiducialFilter,
    /// Plot style overrides, resolved against the named theme.
    pub viz: serde_yaml_ng::Value,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            datasets: REFERENCE_DATASETS.iter().map(|s| s.to_string()).collect(),
            kinematics_dir: PathBuf::from("./data"),
            weights_dir: PathBuf::from("./output"),
            figures_dir: PathBuf::from("./figs"),
            max_events: DEFAULT_MAX_EVENTS,
            fiducial: FiducialFilter::default(),
            viz: serde_yaml_ng::Value::Null,
        }
    }
}

impl RunConfig {
    /// Parse YAML; missing fields take their defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty document parses to unit; treat it as all defaults.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(text)
            .map_err(|e| Error::Validation(format!("invalid run config: {e}")))
    }

    /// Read and parse a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text).map_err(|e| match e {
            Error::Validation(msg) => Error::Validation(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// `<kinematics_dir>/<dataset>.csv`
    pub fn kinematics_path(&self, dataset: &str) -> PathBuf {
        self.kinematics_dir.join(format!("{dataset}.csv"))
    }

    /// `<weights_dir>/<dataset>.out`
    pub fn weights_path(&self, dataset: &str) -> PathBuf {
        self.weights_dir.join(format!("{dataset}.out"))
    }

    /// `<figures_dir>/<dataset>`
    pub fn figures_path(&self, dataset: &str) -> PathBuf {
        self.figures_dir.join(dataset)
    }

    /// Plot style for this run.
    pub fn viz_config(&self) -> Result<VizConfig> {
        resolve_config_value(self.viz.clone()).map_err(|e| Error::Validation(e.to_string()))
    }
}

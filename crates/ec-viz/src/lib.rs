//! # ec-viz
//!
//! Visualization data artifacts for effcorr.
//!
//! This crate is dependency-light and focuses on emitting plot-friendly JSON
//! structures (flat arrays instead of nested objects). `ec-viz-render` turns
//! them into figures.

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};

/// Triplet comparison artifacts (1D and 2D).
pub mod triplet;

/// Efficiency-weight diagnostics.
pub mod weights;

pub use triplet::{
    Chi2Summary, LegendPosition, Series, Triplet1DArtifact, Triplet2DArtifact, triplet1d_artifact,
    triplet2d_artifact,
};
pub use weights::{
    WeightControlArtifact, WeightDistributionArtifact, weight_control_artifact,
    weight_distribution_artifact,
};

/// Producer metadata stamped into every artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// Producing tool.
    pub tool: String,
    /// Tool version.
    pub tool_version: String,
}

impl ArtifactMeta {
    /// Metadata for the running build.
    pub fn current() -> Self {
        Self { tool: "effcorr".to_string(), tool_version: ec_core::VERSION.to_string() }
    }
}

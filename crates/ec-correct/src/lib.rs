//! # ec-correct
//!
//! Inverse-efficiency correction of two-track events.
//!
//! Each dataset is a pair of aligned streams: kinematic records
//! (`<dataset>.csv`) and raw per-event efficiencies (`<dataset>.out`). Every
//! fiducial event fills a generated / reconstructed / corrected histogram
//! triplet per observable; the corrected histogram carries the inverse of
//! the clamped efficiency as weight. Closure is scored with a weighted
//! chi2/ndf of corrected against generated.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Run configuration.
pub mod config;
/// Per-dataset failures.
pub mod error;
/// Fiducial acceptance of generated track pairs.
pub mod fiducial;
/// Derived observables and the reference histogram set.
pub mod observables;
/// Event loop, saving and per-dataset reports.
pub mod pipeline;
/// Kinematics and weight stream readers.
pub mod reader;
/// Histogram triplets.
pub mod triplet;
/// Efficiency clamping and correction weights.
pub mod weight;

pub use config::{REFERENCE_DATASETS, RunConfig};
pub use error::{DatasetError, Result};
pub use fiducial::FiducialFilter;
pub use observables::{Observable1D, Observable2D, ObservableSet, reference_1d, reference_2d};
pub use pipeline::{CorrectionPipeline, DatasetPass, DatasetReport, ObservableScore, PassStats};
pub use reader::{KinematicStreamReader, WeightStreamReader};
pub use triplet::{Triplet1D, Triplet2D};
pub use weight::{MIN_EFFICIENCY, clamp_efficiency, effective_weight};

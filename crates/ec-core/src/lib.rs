//! # ec-core
//!
//! Shared building blocks for the effcorr efficiency-correction workspace:
//! the flat [`EventRecord`], on-shell [`FourVector`]s with mass assigned from
//! the particle code, and the stream traits the correction pipeline reads
//! through.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod kinematics;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use kinematics::{FourVector, TrackPair};
pub use traits::{RecordSource, WeightSource};
pub use types::{EventRecord, KAON_MASS, PION_MASS, Species, ThreeMomentum};

/// Workspace version, stamped into artifacts and reports.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

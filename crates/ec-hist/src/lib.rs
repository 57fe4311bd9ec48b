//! # ec-hist
//!
//! Weighted binned distributions for effcorr.
//!
//! Every histogram tracks both the sum of weights and the sum of squared
//! weights per bin, so weighted (corrected) and unweighted (generated)
//! distributions can be compared with [`chi2_test_ww`].
//!
//! ```
//! use ec_hist::{Binning, Hist1D, chi2_test_ww};
//!
//! let binning = Binning::uniform(4, 0.0, 4.0).unwrap();
//! let mut truth = Hist1D::new("truth", binning.clone());
//! let mut corr = Hist1D::new("corr", binning);
//! for x in [0.5, 1.5, 1.7, 2.5, 3.5] {
//!     truth.fill(x, 1.0);
//!     corr.fill(x, 1.0);
//! }
//! let res = chi2_test_ww(&truth, &corr).unwrap();
//! assert_eq!(res.chi2, 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binning;
pub mod chi2;
pub mod hist1d;
pub mod hist2d;

pub use binning::Binning;
pub use chi2::{Chi2TestResult, chi2_test_ww};
pub use hist1d::Hist1D;
pub use hist2d::Hist2D;

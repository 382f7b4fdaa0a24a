//! This crate provides ε-approximate quantiles over data streams in bounded
//! memory, following Greenwald and Khanna's "Space-efficient Online
//! Computation of Quantile Summaries".
//!
//! Exact order statistics need every observation kept around. The
//! [`Summary`](greenwald_khanna::Summary) here instead holds a small,
//! rank-annotated subset of the stream and answers any quantile query with
//! an observation whose true rank is within `ε·N` of the one asked for,
//! where `N` is the number of observations inserted so far.
//!
//! ```
//! use gk_quantiles::greenwald_khanna::Summary;
//!
//! let mut summary = Summary::new(0.01).unwrap();
//! for i in 0..10_000i32 {
//!     summary.insert(f64::from(i)).unwrap();
//! }
//! let median = summary.query(0.5).unwrap();
//! assert!((median - 5_000.0).abs() <= 101.0);
//! assert!(summary.len() < 10_000);
//! ```
#![deny(missing_docs, missing_copy_implementations, missing_debug_implementations,
        unstable_features, unused_import_braces)]

pub mod error;
pub mod greenwald_khanna;
#[doc(hidden)]
pub mod util;

pub use error::{Error, Result};
pub use greenwald_khanna::{CompressPolicy, Estimate, Summary, Tuple};

//! Supporting utilities used by models.
//!
//! Modules here are part of the public API because they're useful, but their
//! APIs are not stable. Breaking changes may occur as needed.
//!
//! - [`constraint`]: Type-level numeric constraints checked at construction.
//! - [`interpolate`]: Monotone time-table interpolation with strict domain
//!   handling, plus the column-text parser behind it.
//! - [`laplace`]: Numerical inversion of Laplace-domain solutions.
//! - [`special`]: Special functions not covered by `statrs`.
//! - [`units`]: Extensions to [`uom`].
//! - [`water`]: Liquid water property correlations.

pub mod constraint;
pub mod interpolate;
pub mod laplace;
pub mod special;
pub mod units;
pub mod water;

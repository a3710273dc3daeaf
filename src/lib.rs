//! Natural cubic spline interpolation of tabulated potential-energy curves.
//!
//! Tables are plain text, one `x y` sample per row. Each table becomes a
//! [Spline] with zero second derivative at both ends; outside the sampled range
//! the spline continues with its boundary cubic. A [DatasetRegistry] builds the
//! named splines a program needs once at startup.
//!
//! # Example
//! ```
//! use potential_spline::{SampleTable, Spline};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let table: SampleTable = "0 0\n1 1\n2 0\n3 1\n".parse().unwrap();
//! let spline = Spline::new(table).unwrap();
//!
//! assert_eq!(1.0, spline.interpolate(1.0).unwrap());
//! assert_approx_eq!(0.5, spline.interpolate(1.5).unwrap(), 1e-9);
//! assert_approx_eq!(2.0, spline.extrapolate(4.0), 1e-9);
//! assert!(spline.interpolate(4.0).is_err());
//! ```

mod config;
mod error;
mod knot;
mod polynomial;
mod registry;
mod spline;
mod table;
mod tridiagonal;

pub use config::{InterpolantSource, RegistryConfig, TableSource, SINGLET, TRIPLET};
pub use error::{Error, Result};
pub use knot::Knot;
pub use registry::{global, init_global, DatasetRegistry};
pub use spline::Spline;
pub use table::{SampleTable, TableFormat};

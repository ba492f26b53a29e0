//! File formats read and written by the engine.
//!
//! - [`gb_data`] - Whitespace-separated GB energy / mobility / activation tables
//! - [`points`] - CSV sample points, evaluated outputs and calibration reports
//! - [`traits`] - Common interface for grain-pair data files

pub mod gb_data;
pub mod points;
pub mod traits;

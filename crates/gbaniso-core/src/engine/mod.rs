//! # Engine Module
//!
//! The stateful layer of the library: it turns a raw GB data table into a
//! calibrated, immutable [`model::GbAnisotropyModel`] and evaluates that model at
//! individual sample points.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Unit scales, interface width and solver settings
//! - **Calibration** ([`calibration`]) - The per-pair fixed-point solve for `a*`
//! - **Inclination** ([`inclination`]) - Optional four-fold inclination factors for 2-D runs
//! - **Evaluation** ([`evaluator`]) - Interface-weighted averaging of pair properties
//! - **Model** ([`model`]) - The calibrated model shared by all evaluators
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-level error type
//!
//! Calibration runs once. Evaluation only reads the model, so it may proceed on
//! any number of threads at once.

pub mod calibration;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod inclination;
pub mod model;
pub mod progress;

//! # Core Module
//!
//! Stateless building blocks of the grain-boundary property engine.
//!
//! ## Architecture
//!
//! - **Physical units** ([`units`]) - Constants, the model unit system and Arrhenius factors
//! - **Correlations** ([`correlation`]) - Empirical fits linking `g²`, `γ` and the
//!   interface-energy function of the phase-field model
//! - **Models** ([`models`]) - Grain-pair keys, GB property tables, calibration
//!   records, sample points and output records
//! - **File I/O** ([`io`]) - GB data tables and CSV point/output files
//!
//! Nothing in this module keeps mutable state between calls; the stateful pieces
//! (configuration, calibration, evaluation) live in [`crate::engine`].

pub mod correlation;
pub mod io;
pub mod models;
pub mod units;

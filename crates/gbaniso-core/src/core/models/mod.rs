//! # Core Models Module
//!
//! Data structures describing grain boundaries between pairs of grains.
//!
//! - [`pair`] - Unordered grain-pair keys and dense per-pair storage
//! - [`table`] - Raw input matrices and the unit-converted GB property table
//! - [`calibration`] - Calibrated phase-field parameters for every pair
//! - [`point`] - Per-point field samples and the evaluated output properties
//!
//! Every per-pair quantity is addressed through a [`pair::GrainPair`], which is
//! normalized on construction, so `(m, n)` and `(n, m)` always name the same
//! boundary and each record carries named fields instead of relying on which
//! triangle of a matrix it lives in.

pub mod calibration;
pub mod pair;
pub mod point;
pub mod table;

//! # gbaniso Core Library
//!
//! Calibration and evaluation of anisotropic grain-boundary (GB) properties for
//! multi-grain phase-field models.
//!
//! Given measured GB energies, mobilities and activation energies for every pair
//! of grains, the library solves for the phase-field gradient coefficient `κ` and
//! anisotropy exponent `γ` of each pair, then produces effective, temperature
//! corrected properties at any point of a simulation from its local order
//! parameters and their gradients.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Stateless data models (grain pairs, property
//!   tables, sample points), unit conversion, the empirical correlations and file I/O.
//!
//! - **[`engine`]: The Logic Core.** Configuration, the per-pair calibration solve,
//!   inclination anisotropy and per-point evaluation against an immutable model.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that load data,
//!   calibrate a shareable model and evaluate batches of sample points.

pub mod core;
pub mod engine;
pub mod workflows;

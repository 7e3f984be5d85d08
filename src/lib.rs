//! # Wellfield
//!
//! Models for simulating the multi-decade thermal, hydraulic, and production
//! behavior of a geothermal well field.
//!
//! ## Crate layout
//!
//! - [`models`]: Reservoir and wellbore models — the primary public interface.
//! - [`simulation`]: The time-stepping loop that couples the models and
//!   assembles a [`simulation::ProductionProfile`] for downstream consumers.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Scope
//!
//! This crate produces physically consistent production profiles (wellhead
//! temperature, pressure-drop components, pumping power, annual heat
//! aggregates). Surface-plant conversion, levelized-cost economics, and Monte
//! Carlo drivers are external consumers of those profiles and live elsewhere.
//!
//! A single run is sequential and holds no shared mutable state, so
//! independent runs with independent configurations may be executed
//! concurrently by an external driver.

pub mod diagnostics;
pub mod models;
pub mod simulation;
pub mod support;

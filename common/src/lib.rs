//! Common utilities for the cannonball simulation
//!
//! This crate provides the shared graphics setup, the screen-space camera and
//! GPU buffer helpers used by the simulation binary.

pub mod graphics;
pub mod camera;

pub use graphics::*;
pub use camera::*;

/// Physical constants used in simulations
pub mod constants {
    /// Gravitational constant in N·m²/kg²
    pub const G: f64 = 6.674184e-11;

    /// Mass of the Earth in kg
    pub const EARTH_MASS: f64 = 5.9722e24;

    /// Mean radius of the Earth in m
    pub const EARTH_RADIUS: f64 = 6_371_000.0;
}

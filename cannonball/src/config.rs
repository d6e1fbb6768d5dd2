//! Simulation and display configuration

use std::path::PathBuf;

use common::constants::{EARTH_MASS, EARTH_RADIUS, G};

use crate::coords::UnitScale;

pub const WINDOW_TITLE: &str = "Newton's Cannonball - Rust/wgpu";
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

/// Upper bound on filled circles drawn per frame
pub const MAX_CIRCLES: usize = 64;

/// Environment variable that overrides the bundled planet image
pub const PLANET_IMAGE_ENV: &str = "CANNONBALL_PLANET_IMAGE";

pub type Color = [f32; 4];

/// Physical setup of the experiment, in SI units unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Gravitational constant, m³/(kg·s²)
    pub gravitational_constant: f64,
    pub central_mass: f64,
    pub projectile_mass: f64,
    pub central_radius: f64,
    /// Height of the launch mountain above the surface
    pub mountain_height: f64,
    pub scale: UnitScale,
    /// Simulated seconds advanced per tick
    pub time_step: f64,
    /// Horizontal speed at launch, m/s
    pub launch_speed: f64,
    /// Screen distance above the surface at which the ball counts as landed, px
    pub impact_clearance_px: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            central_mass: EARTH_MASS,
            projectile_mass: 100.0,
            central_radius: EARTH_RADIUS,
            mountain_height: 2_730_000.0,
            scale: UnitScale::EARTH_VIEW,
            time_step: 40.0,
            launch_speed: 6.14e3,
            impact_clearance_px: 8.0,
        }
    }
}

impl PhysicalConstants {
    pub fn central_radius_px(&self) -> f64 {
        self.scale.to_pixels(self.central_radius)
    }

    pub fn mountain_height_px(&self) -> f64 {
        self.scale.to_pixels(self.mountain_height)
    }
}

/// Static decoration drawn around the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub background: wgpu::Color,
    pub projectile_radius: f32,
    pub projectile_color: Color,
    pub marker_radius: f32,
    pub marker_color: Color,
    /// Extra altitude of the markers above the mountain top, m
    pub marker_clearance: f64,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            background: wgpu::Color {
                r: 0.02,
                g: 0.02,
                b: 0.05,
                a: 1.0,
            },
            projectile_radius: 10.0,
            projectile_color: [1.0, 0.0, 0.0, 1.0],
            marker_radius: 5.0,
            marker_color: [0.0, 0.5, 0.0, 1.0],
            marker_clearance: 10.0,
        }
    }
}

/// Location of the planet image, honouring the environment override
pub fn planet_image_path() -> PathBuf {
    std::env::var_os(PLANET_IMAGE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/earth.png"))
}

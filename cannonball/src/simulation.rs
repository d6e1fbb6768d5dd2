//! Simulation state and the per-tick update-and-render step

use glam::DVec2;

use crate::config::{PhysicalConstants, SceneStyle};
use crate::coords::SurfaceSize;
use crate::physics::{
    impact_distance, screen_position, CentralBody, FlightState, GravityIntegrator, ProjectileBody,
};
use crate::scene::{draw_scene, Canvas};

/// Everything that evolves or is read during a tick
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub constants: PhysicalConstants,
    pub central: CentralBody,
    pub projectile: ProjectileBody,
    /// Number of completed physics steps
    pub ticks: u64,
}

impl SimulationState {
    pub fn new(constants: PhysicalConstants) -> Self {
        Self {
            constants,
            central: CentralBody::new(&constants),
            projectile: ProjectileBody::launched(&constants),
            ticks: 0,
        }
    }

    /// Advance the projectile by one time step around the given center
    pub fn step(&mut self, center: DVec2) -> FlightState {
        let was_landed = self.projectile.is_landed();
        let state = GravityIntegrator::new(self.constants).step(&mut self.projectile, center);

        if state == FlightState::Flying {
            self.ticks += 1;
        } else if !was_landed {
            log::info!(
                "Cannonball landed after {} ticks ({:.0} s simulated, impact distance {:.0} km)",
                self.ticks,
                self.elapsed_seconds(),
                impact_distance(&self.constants) / 1000.0,
            );
        }

        state
    }

    /// Simulated time since launch, s
    pub fn elapsed_seconds(&self) -> f64 {
        self.ticks as f64 * self.constants.time_step
    }

    pub fn telemetry(&self) -> Telemetry {
        let constants = &self.constants;
        // Distances are relative to the center, so any center will do
        let position = screen_position(&self.projectile, DVec2::ZERO, constants);
        let distance = constants.scale.to_meters(position.length());

        Telemetry {
            ticks: self.ticks,
            elapsed_seconds: self.elapsed_seconds(),
            altitude: distance - self.central.radius,
            speed: constants.scale.to_meters(self.projectile.velocity.length()),
            state: self.projectile.state,
        }
    }
}

/// Flight readout for the status bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub ticks: u64,
    pub elapsed_seconds: f64,
    /// Height above the planet surface, m
    pub altitude: f64,
    /// m/s
    pub speed: f64,
    pub state: FlightState,
}

/// Owns the simulation and drives one update-and-render step per frame
pub struct Simulation {
    pub state: SimulationState,
    pub style: SceneStyle,
}

impl Simulation {
    pub fn new(constants: PhysicalConstants, style: SceneStyle) -> Self {
        Self {
            state: SimulationState::new(constants),
            style,
        }
    }

    /// One frame: locate the center, integrate, then draw.
    ///
    /// Returns the center used, so callers can reuse it for the same frame.
    pub fn tick<C: Canvas>(&mut self, surface: SurfaceSize, canvas: &mut C, planet: &C::Image) -> DVec2 {
        let center = surface.center();
        self.state.step(center);
        draw_scene(canvas, planet, &self.state, &self.style, center);
        center
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(PhysicalConstants::default(), SceneStyle::default())
    }
}

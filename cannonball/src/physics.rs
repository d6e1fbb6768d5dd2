//! Cannonball physics: a single projectile in the inverse-square field of a
//! fixed planet, advanced with semi-implicit Euler steps.
//!
//! Positions and velocities are kept in screen pixels so that the renderer
//! can use them directly; forces are evaluated in SI units and converted.

use glam::DVec2;

use crate::config::PhysicalConstants;

/// Smallest distance used in the force law, m.
///
/// Keeps the acceleration finite if the projectile ever sits on the center.
pub const DISTANCE_EPSILON: f64 = 1.0;

/// Whether the projectile is still moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightState {
    Flying,
    /// Terminal: the projectile reached the impact distance and is frozen
    Landed,
}

/// The planet. It always sits at the surface center, so only its size is stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralBody {
    pub radius: f64,
    pub mass: f64,
}

impl CentralBody {
    pub fn new(constants: &PhysicalConstants) -> Self {
        Self {
            radius: constants.central_radius,
            mass: constants.central_mass,
        }
    }

    pub fn radius_px(&self, constants: &PhysicalConstants) -> f64 {
        constants.scale.to_pixels(self.radius)
    }
}

/// The cannonball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileBody {
    /// Displacement from the launch point, px
    pub offset: DVec2,
    /// px per simulated second
    pub velocity: DVec2,
    pub state: FlightState,
}

impl ProjectileBody {
    /// Ball resting on the mountain top, fired horizontally
    pub fn launched(constants: &PhysicalConstants) -> Self {
        Self {
            offset: DVec2::ZERO,
            velocity: DVec2::new(constants.scale.to_pixels(constants.launch_speed), 0.0),
            state: FlightState::Flying,
        }
    }

    pub fn is_landed(&self) -> bool {
        self.state == FlightState::Landed
    }
}

/// Top of the mountain, directly above the planet center
pub fn launch_point(center: DVec2, constants: &PhysicalConstants) -> DVec2 {
    center - DVec2::new(0.0, constants.central_radius_px() + constants.mountain_height_px())
}

/// Where the projectile is drawn for a given surface center
pub fn screen_position(body: &ProjectileBody, center: DVec2, constants: &PhysicalConstants) -> DVec2 {
    launch_point(center, constants) + body.offset
}

/// Newton's law of gravitation, F = G·m₁·m₂ / r²
pub fn gravitational_force(gravitational_constant: f64, mass_a: f64, mass_b: f64, distance: f64) -> f64 {
    let distance = distance.max(DISTANCE_EPSILON);
    gravitational_constant * mass_a * mass_b / (distance * distance)
}

/// Distance from the planet center below which the projectile has landed, m
pub fn impact_distance(constants: &PhysicalConstants) -> f64 {
    constants.central_radius + constants.scale.to_meters(constants.impact_clearance_px)
}

/// The projectile keeps flying while it is at or beyond the impact distance
pub fn is_clear_of_surface(distance: f64, constants: &PhysicalConstants) -> bool {
    distance >= impact_distance(constants)
}

/// Gravity acting on the projectile at one position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitySample {
    /// Distance to the planet center, m
    pub distance: f64,
    /// Acceleration towards the center, px/s²
    pub acceleration: DVec2,
}

/// Evaluate the gravitational pull of the planet on the projectile.
///
/// Both positions are in screen pixels.
pub fn sample_gravity(position: DVec2, center: DVec2, constants: &PhysicalConstants) -> GravitySample {
    let scale = constants.scale;
    let to_center = scale.vec_to_meters(center - position);
    let distance = to_center.length();

    let force = gravitational_force(
        constants.gravitational_constant,
        constants.central_mass,
        constants.projectile_mass,
        distance,
    );
    let force_vec = to_center * (force / distance.max(DISTANCE_EPSILON));
    let acceleration = scale.vec_to_pixels(force_vec / constants.projectile_mass);

    GravitySample {
        distance,
        acceleration,
    }
}

/// Advances the projectile by one fixed time step per call
#[derive(Debug, Clone, Copy)]
pub struct GravityIntegrator {
    pub constants: PhysicalConstants,
}

impl GravityIntegrator {
    pub fn new(constants: PhysicalConstants) -> Self {
        Self { constants }
    }

    /// Step the projectile forward, returning its state afterwards.
    ///
    /// Landed is absorbing: a landed projectile is never touched again.
    pub fn step(&self, body: &mut ProjectileBody, center: DVec2) -> FlightState {
        if body.is_landed() {
            return FlightState::Landed;
        }

        let position = screen_position(body, center, &self.constants);
        let gravity = sample_gravity(position, center, &self.constants);

        if !is_clear_of_surface(gravity.distance, &self.constants) {
            body.state = FlightState::Landed;
            return body.state;
        }

        // Semi-implicit Euler: position uses the freshly updated velocity
        let dt = self.constants.time_step;
        body.velocity += gravity.acceleration * dt;
        body.offset += body.velocity * dt;

        body.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: DVec2 = DVec2::new(640.0, 360.0);

    fn place_at_distance(constants: &PhysicalConstants, distance: f64) -> ProjectileBody {
        // Straight above the center, expressed as an offset from the launch point
        let target = CENTER - DVec2::new(0.0, constants.scale.to_pixels(distance));
        ProjectileBody {
            offset: target - launch_point(CENTER, constants),
            velocity: DVec2::ZERO,
            state: FlightState::Flying,
        }
    }

    #[test]
    fn test_launch_state() {
        let constants = PhysicalConstants::default();
        let ball = ProjectileBody::launched(&constants);

        assert_eq!(ball.offset, DVec2::ZERO);
        assert_eq!(ball.velocity.y, 0.0);
        assert!((ball.velocity.x - 6140.0 / 60_000.0).abs() < 1e-12);
        assert_eq!(ball.state, FlightState::Flying);
    }

    #[test]
    fn test_screen_position_follows_center() {
        let constants = PhysicalConstants::default();
        let mut ball = ProjectileBody::launched(&constants);
        ball.offset = DVec2::new(3.0, -2.0);

        let altitude_px = constants.central_radius_px() + constants.mountain_height_px();
        let a = screen_position(&ball, CENTER, &constants);
        assert!((a.x - 643.0).abs() < 1e-9);
        assert!((a.y - (360.0 - altitude_px - 2.0)).abs() < 1e-9);

        let moved = screen_position(&ball, CENTER + DVec2::new(100.0, 50.0), &constants);
        assert!((moved - a - DVec2::new(100.0, 50.0)).length() < 1e-9);
    }

    #[test]
    fn test_gravity_points_at_center() {
        let constants = PhysicalConstants::default();
        let position = CENTER + DVec2::new(120.0, 0.0);
        let gravity = sample_gravity(position, CENTER, &constants);

        assert!(gravity.acceleration.x < 0.0);
        assert!(gravity.acceleration.y.abs() < 1e-15);

        // g at 120 px (7 200 km) is about 7.69 m/s²
        let g = constants.scale.to_meters(gravity.acceleration.length());
        assert!((g - 7.689).abs() < 0.01, "g = {}", g);
    }

    #[test]
    fn test_straight_line_without_gravity() {
        let constants = PhysicalConstants {
            gravitational_constant: 0.0,
            ..PhysicalConstants::default()
        };
        let integrator = GravityIntegrator::new(constants);
        let mut ball = ProjectileBody::launched(&constants);
        let v0 = constants.scale.to_pixels(constants.launch_speed);

        let n = 50;
        for _ in 0..n {
            assert_eq!(integrator.step(&mut ball, CENTER), FlightState::Flying);
        }

        let expected = n as f64 * v0 * constants.time_step;
        assert!((ball.offset.x - expected).abs() < 1e-9 * expected, "x = {}", ball.offset.x);
        assert_eq!(ball.offset.y, 0.0);
        assert_eq!(ball.velocity, DVec2::new(v0, 0.0));
    }

    #[test]
    fn test_velocity_updates_before_position() {
        let constants = PhysicalConstants::default();
        let integrator = GravityIntegrator::new(constants);
        let mut ball = ProjectileBody::launched(&constants);

        let start = screen_position(&ball, CENTER, &constants);
        let gravity = sample_gravity(start, CENTER, &constants);
        let expected_velocity = ball.velocity + gravity.acceleration * constants.time_step;

        integrator.step(&mut ball, CENTER);

        assert_eq!(ball.velocity, expected_velocity);
        assert_eq!(ball.offset, expected_velocity * constants.time_step);
    }

    #[test]
    fn test_speed_grows_while_falling() {
        let constants = PhysicalConstants::default();
        let integrator = GravityIntegrator::new(constants);
        let mut ball = ProjectileBody::launched(&constants);

        let mut previous: Option<(f64, f64)> = None;
        for _ in 0..400 {
            if integrator.step(&mut ball, CENTER) == FlightState::Landed {
                break;
            }
            let position = screen_position(&ball, CENTER, &constants);
            let distance = (position - CENTER).length();
            let speed_sq = ball.velocity.length_squared();

            if let Some((last_distance, last_speed_sq)) = previous {
                if distance < last_distance {
                    assert!(
                        speed_sq >= last_speed_sq * (1.0 - 1e-3),
                        "speed² dropped from {} to {} while falling",
                        last_speed_sq,
                        speed_sq
                    );
                }
            }
            previous = Some((distance, speed_sq));
        }
    }

    #[test]
    fn test_default_launch_stays_in_orbit() {
        // 6 140 m/s from the mountain top gives an ellipse whose periapsis
        // clears the impact distance
        let constants = PhysicalConstants::default();
        let integrator = GravityIntegrator::new(constants);
        let mut ball = ProjectileBody::launched(&constants);

        for _ in 0..400 {
            assert_eq!(integrator.step(&mut ball, CENTER), FlightState::Flying);
        }
    }

    #[test]
    fn test_slow_launch_lands_and_stays_landed() {
        let constants = PhysicalConstants {
            launch_speed: 3_000.0,
            ..PhysicalConstants::default()
        };
        let integrator = GravityIntegrator::new(constants);
        let mut ball = ProjectileBody::launched(&constants);

        let mut ticks = 0;
        while integrator.step(&mut ball, CENTER) == FlightState::Flying {
            ticks += 1;
            assert!(ticks < 1_000, "projectile never landed");
        }

        let frozen = ball;
        for _ in 0..100 {
            assert_eq!(integrator.step(&mut ball, CENTER), FlightState::Landed);
            assert_eq!(ball.offset.x.to_bits(), frozen.offset.x.to_bits());
            assert_eq!(ball.offset.y.to_bits(), frozen.offset.y.to_bits());
            assert_eq!(ball.velocity.x.to_bits(), frozen.velocity.x.to_bits());
            assert_eq!(ball.velocity.y.to_bits(), frozen.velocity.y.to_bits());
        }

        let position = screen_position(&ball, CENTER, &constants);
        let distance = constants.scale.to_meters((position - CENTER).length());
        assert!(distance < impact_distance(&constants));
        assert!(distance > constants.central_radius * 0.9);
    }

    #[test]
    fn test_landed_survives_surface_resize() {
        let constants = PhysicalConstants::default();
        let integrator = GravityIntegrator::new(constants);
        let mut ball = place_at_distance(&constants, constants.central_radius);

        assert_eq!(integrator.step(&mut ball, CENTER), FlightState::Landed);
        let frozen = ball;

        // The whole scene moves with the center, so nothing changes
        assert_eq!(integrator.step(&mut ball, CENTER * 2.0), FlightState::Landed);
        assert_eq!(ball, frozen);
    }

    #[test]
    fn test_impact_boundary_is_inclusive() {
        let constants = PhysicalConstants::default();
        let boundary = impact_distance(&constants);

        assert!((boundary - (6_371_000.0 + 480_000.0)).abs() < 1e-6);
        assert!(is_clear_of_surface(boundary, &constants));
        assert!(!is_clear_of_surface(boundary - 1e-3, &constants));
        assert!(is_clear_of_surface(boundary + 1e-3, &constants));
    }

    #[test]
    fn test_lands_just_inside_boundary() {
        let constants = PhysicalConstants::default();
        let integrator = GravityIntegrator::new(constants);

        let mut inside = place_at_distance(&constants, impact_distance(&constants) - 100.0);
        assert_eq!(integrator.step(&mut inside, CENTER), FlightState::Landed);
        assert_eq!(inside.velocity, DVec2::ZERO);

        let mut outside = place_at_distance(&constants, impact_distance(&constants) + 100.0);
        assert_eq!(integrator.step(&mut outside, CENTER), FlightState::Flying);
        assert!(outside.velocity.y > 0.0, "should start falling towards the center");
    }

    #[test]
    fn test_zero_distance_is_finite() {
        let constants = PhysicalConstants::default();

        let force = gravitational_force(
            constants.gravitational_constant,
            constants.central_mass,
            constants.projectile_mass,
            0.0,
        );
        assert!(force.is_finite());

        let gravity = sample_gravity(CENTER, CENTER, &constants);
        assert_eq!(gravity.distance, 0.0);
        assert!(gravity.acceleration.is_finite());
        assert!(!gravity.acceleration.is_nan());

        let integrator = GravityIntegrator::new(constants);
        let mut ball = place_at_distance(&constants, 0.0);
        assert_eq!(integrator.step(&mut ball, CENTER), FlightState::Landed);
        assert!(ball.offset.is_finite() && ball.velocity.is_finite());
    }

    #[test]
    fn test_force_matches_surface_gravity() {
        // 100 kg on the Earth's surface weighs about 982 N
        let force = gravitational_force(6.674184e-11, 5.9722e24, 100.0, 6_371_000.0);
        assert!((force - 982.0).abs() < 1.0, "force = {}", force);
    }
}

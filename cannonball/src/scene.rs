//! Draw calls for one frame of the simulation

use glam::{DVec2, Vec2};

use crate::config::{Color, SceneStyle};
use crate::physics::screen_position;
use crate::simulation::SimulationState;

/// Axis-aligned rectangle in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Square of side `2 * half_extent` centered on `center`
    pub fn centered_square(center: Vec2, half_extent: f32) -> Self {
        Self {
            origin: center - Vec2::splat(half_extent),
            size: Vec2::splat(half_extent * 2.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }
}

/// A 2D drawing surface.
///
/// Every frame repaints the whole surface, so there is no clear call.
pub trait Canvas {
    /// Handle to an image the canvas can blit
    type Image;

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn draw_image(&mut self, image: &Self::Image, rect: Rect);
}

/// Issue the draw calls for the planet, the altitude markers and the ball.
///
/// Only reads the simulation; `center` is the surface center of this tick.
pub fn draw_scene<C: Canvas>(
    canvas: &mut C,
    planet: &C::Image,
    state: &SimulationState,
    style: &SceneStyle,
    center: DVec2,
) {
    let constants = &state.constants;
    let center_f = center.as_vec2();

    let planet_radius = state.central.radius_px(constants) as f32;
    canvas.draw_image(planet, Rect::centered_square(center_f, planet_radius));

    // Markers at the launch altitude above the planet and mirrored below it
    let marker_altitude = constants.scale.to_pixels(
        constants.central_radius + constants.mountain_height + style.marker_clearance,
    );
    for direction in [-1.0, 1.0] {
        let marker = center + DVec2::new(0.0, direction * marker_altitude);
        canvas.fill_circle(marker.as_vec2(), style.marker_radius, style.marker_color);
    }

    let ball = screen_position(&state.projectile, center, constants);
    canvas.fill_circle(ball.as_vec2(), style.projectile_radius, style.projectile_color);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::PhysicalConstants;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum DrawCall {
        Circle { center: Vec2, radius: f32, color: Color },
        Image { name: &'static str, rect: Rect },
    }

    /// Canvas that remembers what was drawn
    #[derive(Debug, Default)]
    pub(crate) struct RecordingCanvas {
        pub calls: Vec<DrawCall>,
    }

    impl Canvas for RecordingCanvas {
        type Image = &'static str;

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.calls.push(DrawCall::Circle { center, radius, color });
        }

        fn draw_image(&mut self, image: &Self::Image, rect: Rect) {
            self.calls.push(DrawCall::Image { name: *image, rect });
        }
    }

    #[test]
    fn test_draw_order_and_layout() {
        let state = SimulationState::new(PhysicalConstants::default());
        let style = SceneStyle::default();
        let center = DVec2::new(640.0, 360.0);
        let mut canvas = RecordingCanvas::default();

        draw_scene(&mut canvas, &"earth", &state, &style, center);

        assert_eq!(canvas.calls.len(), 4);

        let DrawCall::Image { name, rect } = &canvas.calls[0] else {
            panic!("planet must be drawn first, got {:?}", canvas.calls[0]);
        };
        assert_eq!(*name, "earth");
        assert!((rect.center() - Vec2::new(640.0, 360.0)).length() < 1e-3);
        assert!((rect.size.x - 2.0 * 106.183_33).abs() < 1e-2);
        assert_eq!(rect.size.x, rect.size.y);

        let altitude = ((6_371_000.0 + 2_730_000.0 + 10.0) / 60_000.0) as f32;
        match (&canvas.calls[1], &canvas.calls[2]) {
            (
                DrawCall::Circle { center: above, radius: r1, color: c1 },
                DrawCall::Circle { center: below, radius: r2, color: c2 },
            ) => {
                assert!((above.y - (360.0 - altitude)).abs() < 1e-3);
                assert!((below.y - (360.0 + altitude)).abs() < 1e-3);
                assert_eq!(above.x, 640.0);
                assert_eq!(*r1, style.marker_radius);
                assert_eq!(*r2, style.marker_radius);
                assert_eq!(*c1, style.marker_color);
                assert_eq!(*c2, style.marker_color);
            }
            other => panic!("expected two markers, got {:?}", other),
        }

        let DrawCall::Circle { center: ball, radius, color } = &canvas.calls[3] else {
            panic!("projectile must be drawn last");
        };
        let launch_y = 360.0 - ((6_371_000.0 + 2_730_000.0) / 60_000.0) as f32;
        assert!((ball.y - launch_y).abs() < 1e-3);
        assert_eq!(ball.x, 640.0);
        assert_eq!(*radius, style.projectile_radius);
        assert_eq!(*color, style.projectile_color);
    }
}

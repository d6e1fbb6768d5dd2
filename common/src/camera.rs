//! Screen-space camera for 2D drawing in logical pixels

use glam::{Mat4, Vec3};

/// Orthographic camera covering the whole surface.
///
/// The origin is the top-left corner and y grows downwards, matching the
/// coordinates the simulation draws in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenCamera {
    pub width: f32,
    pub height: f32,
}

impl ScreenCamera {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Get the view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.width, self.height, 0.0, -1.0, 1.0)
    }

    /// Center of the visible area
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.width * 0.5, self.height * 0.5, 0.0)
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn from_screen_camera(camera: &ScreenCamera) -> Self {
        let center = camera.center();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            position: [center.x, center.y, center.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_corners_map_to_clip_space() {
        let camera = ScreenCamera::new(800.0, 600.0);
        let vp = camera.view_projection();

        let top_left = vp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let bottom_right = vp * Vec4::new(800.0, 600.0, 0.0, 1.0);

        assert!((top_left.x + 1.0).abs() < 1e-6 && (top_left.y - 1.0).abs() < 1e-6);
        assert!((bottom_right.x - 1.0).abs() < 1e-6 && (bottom_right.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_center_maps_to_origin() {
        let camera = ScreenCamera::new(1280.0, 720.0);
        let clip = camera.view_projection() * camera.center().extend(1.0);
        assert!(clip.x.abs() < 1e-6 && clip.y.abs() < 1e-6);
    }
}

//! Conversion between physical units and screen pixels

use glam::DVec2;

/// Fixed pixels-per-meter factor between the physical and display spaces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale {
    pixels_per_meter: f64,
}

impl UnitScale {
    /// One pixel covers 60 km, which fits the Earth in a typical window
    pub const EARTH_VIEW: Self = Self::new(1.0 / 60_000.0);

    pub const fn new(pixels_per_meter: f64) -> Self {
        Self { pixels_per_meter }
    }

    pub fn pixels_per_meter(self) -> f64 {
        self.pixels_per_meter
    }

    pub fn to_pixels(self, meters: f64) -> f64 {
        meters * self.pixels_per_meter
    }

    pub fn to_meters(self, pixels: f64) -> f64 {
        pixels / self.pixels_per_meter
    }

    pub fn vec_to_pixels(self, meters: DVec2) -> DVec2 {
        meters * self.pixels_per_meter
    }

    pub fn vec_to_meters(self, pixels: DVec2) -> DVec2 {
        pixels / self.pixels_per_meter
    }
}

/// Drawing surface dimensions in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Convert a physical surface size using the window's scale factor
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self::new(width as f64 / scale_factor, height as f64 / scale_factor)
    }

    /// View center, where the planet sits
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

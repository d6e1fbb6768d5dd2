//! Planet image loading

use std::path::Path;

use anyhow::{ensure, Context};

/// Decoded RGBA8 image, ready for upload
#[derive(Debug, Clone)]
pub struct PlanetImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Load and decode the planet image.
///
/// The animation must not start until this succeeds.
pub fn load_planet_image(path: &Path) -> anyhow::Result<PlanetImage> {
    let image = image::open(path)
        .with_context(|| format!("failed to load planet image {}", path.display()))?
        .to_rgba8();

    let (width, height) = image.dimensions();
    ensure!(width > 0 && height > 0, "planet image {} is empty", path.display());

    log::info!("Loaded planet image {} ({}x{})", path.display(), width, height);

    Ok(PlanetImage {
        width,
        height,
        rgba: image.into_raw(),
    })
}

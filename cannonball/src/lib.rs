//! Newton's Cannonball
//!
//! A cannonball is fired horizontally from a tall mountain and falls around
//! (or onto) the planet under Newtonian gravity:
//!
//! - **Physics**: inverse-square gravity, semi-implicit Euler with a fixed step
//! - **Coordinates**: meters for forces, screen pixels for state and drawing
//! - **Scene**: planet image, altitude markers and the ball, drawn through a
//!   [`scene::Canvas`] so the logic runs without a GPU

pub mod asset;
pub mod config;
pub mod coords;
pub mod equations_ui;
pub mod physics;
pub mod renderer;
pub mod scene;
pub mod simulation;

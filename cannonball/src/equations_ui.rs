//! Equations sidebar and flight readout
//!
//! Displays the physics behind the cannonball using egui. The panels are
//! read-only; no window input is forwarded to egui.

use egui::{Color32, Context, RichText};

use crate::physics::FlightState;
use crate::simulation::Telemetry;

/// An equation with its name and formula
pub struct Equation {
    pub name: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
}

/// Draw the equations sidebar
pub fn draw_equations_sidebar(
    ctx: &Context,
    title: &str,
    equations: &[Equation],
    variables: &[(&str, &str)],
) {
    egui::SidePanel::right("equations_panel")
        .resizable(false)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading(RichText::new(title).color(Color32::LIGHT_BLUE));
            ui.separator();

            for eq in equations {
                ui.group(|ui| {
                    ui.label(RichText::new(eq.name).strong().color(Color32::YELLOW));
                    ui.label(RichText::new(eq.formula).monospace().color(Color32::WHITE));
                    ui.label(RichText::new(eq.description).small().italics());
                });
                ui.add_space(4.0);
            }

            ui.add_space(8.0);

            egui::Grid::new("variables_grid")
                .num_columns(2)
                .spacing([10.0, 4.0])
                .show(ui, |ui| {
                    for (symbol, meaning) in variables {
                        ui.label(RichText::new(*symbol).monospace().color(Color32::LIGHT_GREEN));
                        ui.label(*meaning);
                        ui.end_row();
                    }
                });
        });
}

/// Draw the status bar with the current flight readout
pub fn draw_flight_status(ctx: &Context, telemetry: &Telemetry) {
    egui::TopBottomPanel::top("status").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("t = {:.0} s", telemetry.elapsed_seconds));
            ui.separator();
            ui.label(format!("Altitude: {:.0} km", telemetry.altitude / 1000.0));
            ui.separator();
            ui.label(format!("Speed: {:.0} m/s", telemetry.speed));
            ui.separator();
            ui.label(format!("Ticks: {}", telemetry.ticks));
            ui.separator();
            match telemetry.state {
                FlightState::Flying => {
                    ui.label(RichText::new("FLYING").color(Color32::GREEN));
                }
                FlightState::Landed => {
                    ui.label(RichText::new("LANDED").color(Color32::RED));
                }
            }
        });
    });
}

// ============================================================================
// Cannonball Equations
// ============================================================================

pub const CANNONBALL_EQUATIONS: &[Equation] = &[
    Equation {
        name: "Newton's Law of Gravitation",
        formula: "F = G·M·m / r²",
        description: "Pull of the planet on the cannonball",
    },
    Equation {
        name: "Gravitational Acceleration",
        formula: "a⃗ = (F / m) · r̂",
        description: "Directed at the planet center",
    },
    Equation {
        name: "Velocity Update",
        formula: "v⃗ₙ₊₁ = v⃗ₙ + a⃗ₙ·Δt",
        description: "Semi-implicit Euler, first half",
    },
    Equation {
        name: "Position Update",
        formula: "x⃗ₙ₊₁ = x⃗ₙ + v⃗ₙ₊₁·Δt",
        description: "Uses the freshly updated velocity",
    },
    Equation {
        name: "Impact",
        formula: "r < R + 8 px",
        description: "The ball stops once it reaches the ground",
    },
    Equation {
        name: "Orbital Velocity",
        formula: "v = √(G·M / r)",
        description: "Speed needed for a circular orbit",
    },
];

pub const CANNONBALL_VARIABLES: &[(&str, &str)] = &[
    ("G", "Gravitational constant (6.674×10⁻¹¹)"),
    ("M", "Planet mass"),
    ("m", "Cannonball mass"),
    ("R", "Planet radius"),
    ("r", "Distance to the planet center"),
    ("v⃗", "Velocity"),
    ("a⃗", "Acceleration"),
    ("r̂", "Unit vector toward the planet center"),
    ("Δt", "Time step per frame"),
];

//! Bevy-side collaborators for the vitals core: a seeded hazard loop, the
//! on-screen HUD, and vitals diagnostics. The core itself stays engine-free;
//! this crate decides when and with what arguments to call it.

pub mod diagnostics;
pub mod gameplay;
pub mod ui;

use bevy::prelude::*;

pub use gameplay::{ArenaParams, HazardClock, HazardRng, HazardSettings, PlayerState};

/// The whole sandbox: gameplay, HUD, and diagnostics in one plugin.
pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            gameplay::GameplayPlugin,
            ui::UiPlugin,
            diagnostics::DiagnosticsPlugin,
        ));
    }
}

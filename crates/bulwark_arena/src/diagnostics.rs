use bevy::diagnostic::{
    Diagnostic, DiagnosticPath, Diagnostics, LogDiagnosticsPlugin, RegisterDiagnostic,
};
use bevy::prelude::*;

use crate::gameplay::PlayerState;

pub const HEALTH_PATH: DiagnosticPath = DiagnosticPath::const_new("bulwark/health");
pub const SHIELD_PATH: DiagnosticPath = DiagnosticPath::const_new("bulwark/shield");
pub const LEVEL_PATH: DiagnosticPath = DiagnosticPath::const_new("bulwark/level");

/// Publishes the vitals fields as Bevy diagnostics so they show up in the
/// regular diagnostics log ticker next to frame timings.
pub struct DiagnosticsPlugin;

impl Plugin for DiagnosticsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerState>()
            .register_diagnostic(Diagnostic::new(HEALTH_PATH))
            .register_diagnostic(Diagnostic::new(SHIELD_PATH))
            .register_diagnostic(Diagnostic::new(LEVEL_PATH))
            .add_plugins(LogDiagnosticsPlugin::default())
            .add_systems(Update, record_vitals);
    }
}

fn record_vitals(mut diagnostics: Diagnostics, state: Res<PlayerState>) {
    diagnostics.add_measurement(&HEALTH_PATH, || state.vitals.health() as f64);
    diagnostics.add_measurement(&SHIELD_PATH, || state.vitals.shield() as f64);
    diagnostics.add_measurement(&LEVEL_PATH, || state.vitals.level() as f64);
}

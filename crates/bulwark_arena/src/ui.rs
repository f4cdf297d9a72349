use bevy::prelude::*;

use bulwark_core::hud;

use crate::gameplay::{HazardClock, HazardRng, PlayerState};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb_u8(8, 10, 18)))
            .init_resource::<PlayerState>()
            .add_systems(Startup, spawn_vitals_hud)
            .add_systems(Update, update_vitals_hud);
    }
}

#[derive(Component)]
struct VitalsHud;

fn spawn_vitals_hud(mut commands: Commands) {
    commands.spawn(Camera2d);

    commands.spawn((
        Text::new("Preparing the arena…"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb(0.88, 0.94, 1.0)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            left: Val::Px(16.0),
            ..default()
        },
        VitalsHud,
    ));
}

fn update_vitals_hud(
    mut text: Query<&mut Text, With<VitalsHud>>,
    state: Res<PlayerState>,
    rng: Option<Res<HazardRng>>,
    clock: Option<Res<HazardClock>>,
) {
    if let Ok(mut text) = text.get_single_mut() {
        let seed = rng.map(|r| r.seed()).unwrap_or(0);
        let next_hazard = clock.map(|c| c.hazard.remaining_secs()).unwrap_or(0.0);
        let mut content = format!(
            "{}\nseed: {seed} | next hazard: {next_hazard:.1}s\n[Space] strike  [H] heal kit  [G] shield cell  [Enter] new run",
            hud::status_line(&state.vitals)
        );
        if state.vitals.is_defeated() {
            content.push_str("\nOUT OF LIVES - press Enter for a new run");
        }
        content.clone_into(&mut **text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_reports_the_seed_driving_the_rolls() {
        let mut app = App::new();
        app.insert_resource(HazardRng::new(7));
        app.init_resource::<PlayerState>();
        app.add_systems(Update, update_vitals_hud);
        app.world_mut().spawn((Text::new(""), VitalsHud));
        app.update();

        let mut query = app.world_mut().query::<&Text>();
        let text = query.single(app.world());
        assert!(text.contains("seed: 7"), "unexpected HUD text: {}", **text);
    }
}

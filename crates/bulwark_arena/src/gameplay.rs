use bevy::input::keyboard::KeyCode;
use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::time::{Fixed, Time};
use bulwark_core::PlayerVitals;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::ops::RangeInclusive;
use tracing::{debug, info};

const DEFAULT_SEED: u64 = 42;
const DEFAULT_FIXED_DELTA: f64 = 1.0 / 30.0;
const DEFAULT_HAZARD_INTERVAL: f32 = 2.5;
const DEFAULT_DAMAGE_MIN: i32 = 8;
const DEFAULT_DAMAGE_MAX: i32 = 30;
const DEFAULT_SHIELD_REGEN: i32 = 6;
const DEFAULT_XP_REWARD: i32 = 15;
const SHIELD_REGEN_INTERVAL: f32 = 1.0;
const HEAL_KIT_RESTORE: i32 = 25;
const SHIELD_CELL_RESTORE: i32 = 40;

/// Hazard loop and keyboard actions. Everything that mutates the player's
/// vitals goes through this plugin's systems; randomness is seeded so
/// downstream crates can simulate and test runs reproducibly.
pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<ArenaParams>() {
            app.insert_resource(ArenaParams::from_env());
        }
        if !app.world().contains_resource::<HazardSettings>() {
            app.insert_resource(HazardSettings::from_env());
        }
        if app.world().get_resource::<ButtonInput<KeyCode>>().is_none() {
            app.world_mut()
                .insert_resource(ButtonInput::<KeyCode>::default());
        }

        app.init_resource::<HazardRng>()
            .init_resource::<PlayerState>()
            .init_resource::<HazardClock>()
            .add_systems(Startup, configure_fixed_time)
            .add_systems(
                FixedUpdate,
                (hazard_strikes, shield_trickle.after(hazard_strikes)),
            )
            .add_systems(Update, handle_action_keys);
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse().ok())
        .unwrap_or(fallback)
}

#[derive(Resource, Clone, Debug)]
pub struct ArenaParams {
    pub seed: u64,
    pub fixed_delta: f64,
}

impl ArenaParams {
    pub fn from_env() -> Self {
        Self {
            seed: env_parse("ARENA_SEED", DEFAULT_SEED),
            fixed_delta: env_parse("ARENA_FIXED_DT", DEFAULT_FIXED_DELTA),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

impl Default for ArenaParams {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            fixed_delta: DEFAULT_FIXED_DELTA,
        }
    }
}

/// Cadence and magnitudes for the sandbox hazard loop. These knobs shape the
/// demo arena only; the vitals caps themselves are fixed constants in
/// `bulwark_core`.
#[derive(Resource, Clone, Debug)]
pub struct HazardSettings {
    pub hazard_interval: f32,
    pub damage_min: i32,
    pub damage_max: i32,
    pub shield_regen: i32,
    pub xp_reward: i32,
}

impl HazardSettings {
    pub fn from_env() -> Self {
        Self {
            hazard_interval: env_parse("HAZARD_INTERVAL", DEFAULT_HAZARD_INTERVAL),
            damage_min: env_parse("HAZARD_DAMAGE_MIN", DEFAULT_DAMAGE_MIN),
            damage_max: env_parse("HAZARD_DAMAGE_MAX", DEFAULT_DAMAGE_MAX),
            shield_regen: env_parse("SHIELD_REGEN_RATE", DEFAULT_SHIELD_REGEN),
            xp_reward: env_parse("HAZARD_XP_REWARD", DEFAULT_XP_REWARD),
        }
        .normalized()
    }

    pub fn damage_range(&self) -> RangeInclusive<i32> {
        self.damage_min..=self.damage_max
    }

    // Repairs degenerate env input: swapped damage bounds, zero cadence.
    fn normalized(mut self) -> Self {
        if self.damage_min > self.damage_max {
            std::mem::swap(&mut self.damage_min, &mut self.damage_max);
        }
        self.damage_min = self.damage_min.max(1);
        self.damage_max = self.damage_max.max(self.damage_min);
        self.hazard_interval = self.hazard_interval.max(0.1);
        self.shield_regen = self.shield_regen.max(0);
        self.xp_reward = self.xp_reward.max(0);
        self
    }
}

impl Default for HazardSettings {
    fn default() -> Self {
        Self {
            hazard_interval: DEFAULT_HAZARD_INTERVAL,
            damage_min: DEFAULT_DAMAGE_MIN,
            damage_max: DEFAULT_DAMAGE_MAX,
            shield_regen: DEFAULT_SHIELD_REGEN,
            xp_reward: DEFAULT_XP_REWARD,
        }
    }
}

#[derive(Resource, Debug)]
pub struct HazardRng {
    seed: u64,
    rng: StdRng,
}

impl HazardRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn roll(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.rng.gen_range(range)
    }
}

impl FromWorld for HazardRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world
            .get_resource::<ArenaParams>()
            .cloned()
            .unwrap_or_default()
            .seed;
        Self::new(seed)
    }
}

/// The one player this sandbox tracks. Systems mutate the vitals through its
/// public API only, so the core clamping rules hold in the arena too.
#[derive(Resource, Debug)]
pub struct PlayerState {
    pub vitals: PlayerVitals,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            vitals: PlayerVitals::new(),
        }
    }
}

#[derive(Resource)]
pub struct HazardClock {
    pub hazard: Timer,
    pub regen: Timer,
}

impl FromWorld for HazardClock {
    fn from_world(world: &mut World) -> Self {
        let interval = world
            .get_resource::<HazardSettings>()
            .map(|settings| settings.hazard_interval)
            .unwrap_or(DEFAULT_HAZARD_INTERVAL);
        Self {
            hazard: Timer::from_seconds(interval, TimerMode::Repeating),
            regen: Timer::from_seconds(SHIELD_REGEN_INTERVAL, TimerMode::Repeating),
        }
    }
}

fn configure_fixed_time(mut fixed_time: ResMut<Time<Fixed>>, params: Res<ArenaParams>) {
    fixed_time.set_timestep_seconds(params.fixed_delta);
}

fn hazard_strikes(
    time: Res<Time>,
    settings: Res<HazardSettings>,
    mut clock: ResMut<HazardClock>,
    mut rng: ResMut<HazardRng>,
    mut state: ResMut<PlayerState>,
) {
    if !clock.hazard.tick(time.delta()).just_finished() {
        return;
    }
    if state.vitals.is_defeated() {
        return;
    }

    let roll = rng.roll(settings.damage_range());
    state.vitals.take_damage(roll);
    if state.vitals.is_defeated() {
        info!(target: "bulwark.arena", roll, "hazard finished the run");
        return;
    }
    state.vitals.increase_xp(settings.xp_reward);
    debug!(
        target: "bulwark.arena",
        roll,
        health = state.vitals.health(),
        shield = state.vitals.shield(),
        "hazard strike survived"
    );
}

fn shield_trickle(
    time: Res<Time>,
    settings: Res<HazardSettings>,
    mut clock: ResMut<HazardClock>,
    mut state: ResMut<PlayerState>,
) {
    if !clock.regen.tick(time.delta()).just_finished() {
        return;
    }
    if state.vitals.is_defeated() || settings.shield_regen == 0 {
        return;
    }
    state.vitals.regenerate_shield(settings.shield_regen);
}

fn handle_action_keys(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<HazardSettings>,
    mut rng: ResMut<HazardRng>,
    mut state: ResMut<PlayerState>,
) {
    if keys.just_pressed(KeyCode::Enter) {
        state.vitals.reset();
        info!(target: "bulwark.arena", "new run started");
    }
    if keys.just_pressed(KeyCode::Space) {
        let roll = rng.roll(settings.damage_range());
        state.vitals.take_damage(roll);
    }
    if keys.just_pressed(KeyCode::KeyH) {
        state.vitals.heal(HEAL_KIT_RESTORE);
    }
    if keys.just_pressed(KeyCode::KeyG) {
        state.vitals.regenerate_shield(SHIELD_CELL_RESTORE);
    }
}

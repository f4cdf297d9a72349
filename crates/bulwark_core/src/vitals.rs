//! The `PlayerVitals` state machine: health, shield, lives, XP, level.

use tracing::{debug, info};

/// Upper bound for health.
pub const MAX_HEALTH: i32 = 100;
/// Upper bound for the regenerating shield.
pub const MAX_SHIELD: i32 = 100;
/// Lives granted by a reset.
pub const START_LIVES: i32 = 3;
/// Level granted by a reset.
pub const START_LEVEL: i32 = 1;
/// XP folded into one level step.
pub const XP_PER_LEVEL: i32 = 100;
/// Hard level cap. XP keeps folding past it; the level stays put.
pub const MAX_LEVEL: i32 = 99;

// Range clamp shared by every mutation: cap at `max`, floor at 0.
fn clamp_to(value: i32, max: i32) -> i32 {
    value.min(max).max(0)
}

/// A single player's survivability and progression state.
///
/// Every operation is total over `i32`: out-of-range or adversarial inputs
/// are clamped or ignored, never reported as errors. Callers read the fields
/// back through the getters and decide when to invoke the mutations; the
/// struct itself holds no timers, no RNG, and no engine types.
///
/// Two macro-states exist: alive (lives > 0) and defeated (health, shield,
/// and lives all pinned to exactly 0). Defeated is terminal except for
/// [`PlayerVitals::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerVitals {
    health: i32,
    shield: i32,
    lives: i32,
    xp: i32,
    level: i32,
}

impl PlayerVitals {
    /// A freshly reset player: full bars, three lives, level 1, no XP.
    pub fn new() -> Self {
        let mut vitals = Self {
            health: 0,
            shield: 0,
            lives: 0,
            xp: 0,
            level: 0,
        };
        vitals.reset();
        vitals
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn shield(&self) -> i32 {
        self.shield
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn xp(&self) -> i32 {
        self.xp
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// True once the last life has been spent. Only `reset` leaves this state.
    pub fn is_defeated(&self) -> bool {
        self.lives == 0
    }

    /// Restores the initial state. Doubles as "new game" from defeat.
    pub fn reset(&mut self) {
        self.health = MAX_HEALTH;
        self.shield = MAX_SHIELD;
        self.lives = START_LIVES;
        self.level = START_LEVEL;
        self.xp = 0;
        debug!(target: "bulwark.vitals", "vitals reset");
    }

    /// Applies incoming damage, shield first, then health.
    ///
    /// Each deduction is capped to the current value, so overkill damage is
    /// discarded rather than banked. Dropping to zero health triggers a
    /// revival attempt within the same call; non-positive amounts and calls
    /// made while defeated do nothing.
    pub fn take_damage(&mut self, amount: i32) {
        if self.is_defeated() {
            debug!(target: "bulwark.vitals", amount, "damage ignored while defeated");
            return;
        }
        if amount <= 0 {
            debug!(target: "bulwark.vitals", amount, "non-positive damage ignored");
            return;
        }

        let absorbed = clamp_to(amount, self.shield);
        self.shield -= absorbed;
        let breakthrough = clamp_to(amount - absorbed, self.health);
        self.health -= breakthrough;
        info!(
            target: "bulwark.vitals",
            amount,
            absorbed,
            breakthrough,
            health = self.health,
            shield = self.shield,
            "damage applied"
        );

        if self.health <= 0 {
            self.revive();
        }
    }

    /// Restores health, never past [`MAX_HEALTH`].
    ///
    /// The requested amount is itself clamped into `[0, MAX_HEALTH]` first,
    /// so one call can never ask for more than a full bar and negative
    /// requests neutralize to zero. No effect while defeated.
    pub fn heal(&mut self, amount: i32) {
        if self.is_defeated() {
            debug!(target: "bulwark.vitals", amount, "heal ignored while defeated");
            return;
        }
        let applied = clamp_to(amount, MAX_HEALTH);
        self.health = clamp_to(self.health + applied, MAX_HEALTH);
        debug!(target: "bulwark.vitals", amount, applied, health = self.health, "healed");
    }

    /// Restores shield with the same contract as [`PlayerVitals::heal`].
    pub fn regenerate_shield(&mut self, amount: i32) {
        if self.is_defeated() {
            debug!(target: "bulwark.vitals", amount, "shield regen ignored while defeated");
            return;
        }
        let applied = clamp_to(amount, MAX_SHIELD);
        self.shield = clamp_to(self.shield + applied, MAX_SHIELD);
        debug!(target: "bulwark.vitals", amount, applied, shield = self.shield, "shield regenerated");
    }

    /// Spends a life. With lives to spare the player respawns at full
    /// vitality; otherwise health, shield, and lives are all pinned to
    /// exactly zero until the next `reset`. The zeroing doubles as the floor
    /// on lives, so repeated calls while defeated cannot drive it negative.
    pub fn revive(&mut self) {
        self.lives -= 1;
        if self.lives > 0 {
            self.health = MAX_HEALTH;
            self.shield = MAX_SHIELD;
            info!(target: "bulwark.vitals", lives = self.lives, "respawned at full vitality");
        } else {
            self.health = 0;
            self.shield = 0;
            self.lives = 0;
            info!(target: "bulwark.vitals", "out of lives");
        }
    }

    /// Adds experience and folds every full [`XP_PER_LEVEL`] into a level.
    ///
    /// The level cap is applied before the fold, so at [`MAX_LEVEL`] incoming
    /// XP is still consumed modulo 100 even though the level no longer moves.
    /// Negative input is discarded, not subtracted. No effect while defeated.
    /// The fold runs in `i64`, so any `i32` gain lands without overflow.
    pub fn increase_xp(&mut self, amount: i32) {
        if self.is_defeated() {
            debug!(target: "bulwark.vitals", amount, "xp ignored while defeated");
            return;
        }
        let gained = amount.max(0);
        // Resting xp plus a large valid gain can exceed i32; fold in i64.
        let total = i64::from(self.xp) + i64::from(gained);
        let previous = self.level;
        self.level = (i64::from(self.level) + total / i64::from(XP_PER_LEVEL))
            .min(i64::from(MAX_LEVEL)) as i32;
        self.xp = (total % i64::from(XP_PER_LEVEL)) as i32;
        if self.level > previous {
            info!(target: "bulwark.vitals", level = self.level, xp = self.xp, "level up");
        } else {
            debug!(target: "bulwark.vitals", gained, xp = self.xp, "xp gained");
        }
    }
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shield_absorbs_before_health() {
        let mut vitals = PlayerVitals::new();
        vitals.take_damage(10);
        assert_eq!(90, vitals.shield());
        assert_eq!(100, vitals.health());
        assert_eq!(3, vitals.lives());
    }

    #[test]
    fn overflow_spills_into_health() {
        let mut vitals = PlayerVitals::new();
        vitals.take_damage(150);
        assert_eq!(0, vitals.shield());
        assert_eq!(50, vitals.health());
    }

    #[test]
    fn bare_health_takes_the_full_hit() {
        let mut vitals = PlayerVitals::new();
        vitals.take_damage(100);
        assert_eq!(0, vitals.shield());
        assert_eq!(100, vitals.health());
        vitals.take_damage(25);
        assert_eq!(0, vitals.shield());
        assert_eq!(75, vitals.health());
    }

    #[test]
    fn lethal_hit_consumes_a_life() {
        let mut vitals = PlayerVitals::new();
        vitals.take_damage(100);
        vitals.take_damage(100);
        assert_eq!(100, vitals.health());
        assert_eq!(100, vitals.shield());
        assert_eq!(2, vitals.lives());
    }

    #[test]
    fn massive_hit_exhausts_both_bars_and_revives() {
        let mut vitals = PlayerVitals::new();
        vitals.take_damage(200);
        assert_eq!(100, vitals.health());
        assert_eq!(100, vitals.shield());
        assert_eq!(2, vitals.lives());
    }

    #[test]
    fn non_positive_damage_is_ignored() {
        let mut vitals = PlayerVitals::new();
        vitals.take_damage(-10);
        vitals.take_damage(0);
        assert_eq!(100, vitals.health());
        assert_eq!(100, vitals.shield());
    }

    #[test]
    fn heal_restores_up_to_the_cap() {
        let mut vitals = PlayerVitals::new();
        vitals.take_damage(150);
        assert_eq!(50, vitals.health());
        vitals.heal(25);
        assert_eq!(75, vitals.health());
        vitals.heal(25);
        assert_eq!(100, vitals.health());
        vitals.heal(25);
        assert_eq!(100, vitals.health());
    }

    #[test]
    fn negative_heal_is_neutralized() {
        let mut vitals = PlayerVitals::new();
        vitals.heal(-25);
        assert_eq!(100, vitals.health());
        vitals.take_damage(140);
        vitals.heal(-25);
        assert_eq!(60, vitals.health());
    }

    #[test]
    fn shield_regen_mirrors_heal() {
        let mut vitals = PlayerVitals::new();
        vitals.take_damage(70);
        assert_eq!(30, vitals.shield());
        vitals.regenerate_shield(40);
        assert_eq!(70, vitals.shield());
        vitals.regenerate_shield(1000);
        assert_eq!(100, vitals.shield());
        vitals.regenerate_shield(-5);
        assert_eq!(100, vitals.shield());
    }

    #[test]
    fn revive_respawns_at_full_vitality() {
        let mut vitals = PlayerVitals::new();
        vitals.take_damage(200);
        assert_eq!(2, vitals.lives());
        assert_eq!(100, vitals.health());
        assert_eq!(100, vitals.shield());
        assert!(!vitals.is_defeated());
    }

    #[test]
    fn final_life_pins_everything_to_zero() {
        let mut vitals = PlayerVitals::new();
        vitals.take_damage(200);
        vitals.take_damage(200);
        vitals.take_damage(200);
        assert_eq!(0, vitals.health());
        assert_eq!(0, vitals.shield());
        assert_eq!(0, vitals.lives());
        assert!(vitals.is_defeated());
    }

    #[test]
    fn revive_while_defeated_keeps_lives_at_zero() {
        let mut vitals = PlayerVitals::new();
        for _ in 0..3 {
            vitals.take_damage(200);
        }
        vitals.revive();
        vitals.revive();
        assert_eq!(0, vitals.lives());
        assert_eq!(0, vitals.health());
        assert_eq!(0, vitals.shield());
    }

    #[test]
    fn mutators_are_inert_while_defeated() {
        let mut vitals = PlayerVitals::new();
        vitals.increase_xp(60);
        for _ in 0..3 {
            vitals.take_damage(200);
        }
        let defeated = vitals.clone();
        vitals.take_damage(50);
        vitals.heal(80);
        vitals.regenerate_shield(80);
        vitals.increase_xp(500);
        assert_eq!(defeated, vitals);
    }

    #[test]
    fn xp_accumulates_below_the_threshold() {
        let mut vitals = PlayerVitals::new();
        vitals.increase_xp(20);
        vitals.increase_xp(40);
        assert_eq!(60, vitals.xp());
        assert_eq!(1, vitals.level());
    }

    #[test]
    fn xp_rolls_over_into_levels() {
        let mut vitals = PlayerVitals::new();
        vitals.increase_xp(80);
        vitals.increase_xp(20);
        assert_eq!(0, vitals.xp());
        assert_eq!(2, vitals.level());
        vitals.increase_xp(250);
        assert_eq!(50, vitals.xp());
        assert_eq!(4, vitals.level());
    }

    #[test]
    fn negative_xp_is_discarded() {
        let mut vitals = PlayerVitals::new();
        vitals.increase_xp(50);
        vitals.increase_xp(-20);
        assert_eq!(50, vitals.xp());
        assert_eq!(1, vitals.level());
    }

    #[test]
    fn level_caps_at_ninety_nine() {
        let mut vitals = PlayerVitals::new();
        vitals.increase_xp(9900);
        assert_eq!(99, vitals.level());
        assert_eq!(0, vitals.xp());
        // At the cap XP is still folded modulo 100 even though the level
        // increment is discarded.
        vitals.increase_xp(150);
        assert_eq!(99, vitals.level());
        assert_eq!(50, vitals.xp());
    }

    #[test]
    fn extreme_xp_gain_keeps_the_invariants() {
        let mut vitals = PlayerVitals::new();
        vitals.increase_xp(50);
        vitals.increase_xp(i32::MAX);
        assert_eq!(99, vitals.level());
        assert_eq!(97, vitals.xp());

        // The fold stays consistent afterwards: 97 + 3 rolls the counter over.
        vitals.increase_xp(3);
        assert_eq!(99, vitals.level());
        assert_eq!(0, vitals.xp());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut once = PlayerVitals::new();
        once.take_damage(180);
        once.increase_xp(130);
        once.reset();
        let mut twice = once.clone();
        twice.reset();
        assert_eq!(once, twice);
        assert_eq!(PlayerVitals::new(), twice);
    }

    #[test]
    fn reset_leaves_the_defeated_state() {
        let mut vitals = PlayerVitals::new();
        for _ in 0..3 {
            vitals.take_damage(200);
        }
        assert!(vitals.is_defeated());
        vitals.reset();
        assert!(!vitals.is_defeated());
        assert_eq!(100, vitals.health());
        assert_eq!(100, vitals.shield());
        assert_eq!(3, vitals.lives());
        assert_eq!(1, vitals.level());
        assert_eq!(0, vitals.xp());
    }
}

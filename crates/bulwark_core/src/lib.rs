//! Survivability and progression core.
//!
//! Holds the [`PlayerVitals`] state machine and the status-line formatter
//! that reads it. The crate is engine-free on purpose: the Bevy sandbox, the
//! scenario gauntlet, and the regression suite all drive the same mutation
//! API and read the same getters.

pub mod hud;
pub mod vitals;

pub use hud::{health_label, status_line};
pub use vitals::{
    PlayerVitals, MAX_HEALTH, MAX_LEVEL, MAX_SHIELD, START_LEVEL, START_LIVES, XP_PER_LEVEL,
};

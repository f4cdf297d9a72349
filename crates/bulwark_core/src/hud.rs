//! Status-line rendering for HUD collaborators.
//!
//! Band selection walks an ordered table from the highest threshold down and
//! takes the first entry at or below the current health, so the mapping never
//! depends on the iteration order of an associative container.

use crate::vitals::PlayerVitals;

// Descending thresholds; the first one at or below the health value wins.
const HEALTH_BANDS: [(i32, &str); 6] = [
    (90, "Perfect Health"),
    (75, "Healthy"),
    (50, "Hurt"),
    (10, "Badly Hurt"),
    (1, "Imminent Danger"),
    (0, "Dead"),
];

/// Maps a health value onto its display band.
pub fn health_label(health: i32) -> &'static str {
    HEALTH_BANDS
        .iter()
        .find(|(threshold, _)| health >= *threshold)
        .map(|(_, label)| *label)
        .unwrap_or("Dead")
}

/// Renders the one-line summary of every vitals field.
pub fn status_line(vitals: &PlayerVitals) -> String {
    format!(
        "Health: {} | Shield: {} | Lives: {} | Status: {} | Level: {} | XP: {}",
        vitals.health(),
        vitals.shield(),
        vitals.lives(),
        health_label(vitals.health()),
        vitals.level(),
        vitals.xp()
    )
}

//! Stochastic timing and selection models
//!
//! Pure draws that drive spawning and the difficulty ramp. Every function
//! takes its generator explicitly, so a session replays exactly from a seed.
//! Outputs are bounded or clamped; none of these can fail.

use rand::Rng;
use rand_distr::{Exp1, StandardNormal};

use super::state::ObstacleKind;
use crate::consts::*;

/// Delay until the next obstacle, in seconds.
///
/// Exponential inter-arrival with rate `lambda`, floored so back-to-back
/// spawns stay clearable. Higher `lambda` means shorter average gaps.
pub fn next_obstacle_delay<R: Rng + ?Sized>(rng: &mut R, lambda: f32) -> f32 {
    let unit: f32 = rng.sample(Exp1);
    (unit / lambda).max(MIN_OBSTACLE_GAP)
}

/// Delay until the next cloud, in seconds. Folded normal around the mean,
/// so always non-negative.
pub fn next_cloud_delay<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let z: f32 = rng.sample(StandardNormal);
    (CLOUD_DELAY_MEAN + CLOUD_DELAY_SD * z).abs()
}

/// Per-frame speed increment.
///
/// Log-normal with both location and spread growing slowly over the session,
/// clamped to [`ACCEL_MIN`, `ACCEL_MAX`]. Added to the global speed every
/// frame, this produces a gradual, noisy ramp rather than a deterministic one.
pub fn game_acceleration<R: Rng + ?Sized>(rng: &mut R, elapsed: f32) -> f32 {
    let mean = 0.0225f32.ln() + 5.0e-5 * elapsed;
    let sigma = 0.05 + 1.0e-4 * elapsed;
    let z: f32 = rng.sample(StandardNormal);
    (mean + sigma * z).exp().clamp(ACCEL_MIN, ACCEL_MAX)
}

/// Weighted pick over the obstacle kind table.
pub fn select_obstacle_kind<R: Rng + ?Sized>(rng: &mut R) -> ObstacleKind {
    let total: f32 = ObstacleKind::ALL.iter().map(|k| k.spawn_weight()).sum();
    let mut roll = rng.random::<f32>() * total;
    for kind in ObstacleKind::ALL {
        roll -= kind.spawn_weight();
        if roll < 0.0 {
            return kind;
        }
    }
    // Rounding can leave the roll exactly on the upper edge
    ObstacleKind::BigTree
}

/// Number of trees in a spawned cluster, uniform in `[1, max]`.
pub fn cluster_size<R: Rng + ?Sized>(rng: &mut R, max: u32) -> u32 {
    rng.random_range(1..=max)
}

/// Vertical position for a cloud, uniform over the top half of the play area.
pub fn cloud_vertical_offset<R: Rng + ?Sized>(rng: &mut R, area_height: f32) -> f32 {
    rng.random_range(0..=area_height as i32 / 2) as f32
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only, carried by the session
//! - Wall-clock time enters as a plain number through `tick`
//! - No rendering or platform dependencies

pub mod collision;
pub mod models;
pub mod state;
pub mod tick;

pub use collision::{Rect, check_collision};
pub use state::{Cloud, Dino, Floor, GamePhase, GameState, Obstacle, ObstacleKind};
pub use tick::{TickInput, tick};

//! Entities and the per-session state aggregate
//!
//! Everything a running session owns lives in `GameState`; `tick` is the only
//! mutator. All fields serialize so a session can be captured mid-run and
//! compared or replayed bit-for-bit from its seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::models;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended on a collision; waiting for restart input
    GameOver,
}

/// Dino box size: 88x100 sheet frames shown at 0.8 scale
pub const DINO_WIDTH: f32 = 70.0;
pub const DINO_HEIGHT: f32 = 80.0;

/// Frames 0 and 1 alternate while running; frame 2 is the dead pose
pub const RUN_FRAME_COUNT: usize = 2;
pub const DEAD_FRAME: usize = 2;

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dino {
    /// Feet position; y is measured downward from the top of the viewport
    pub pos: Vec2,
    /// Vertical velocity (units/frame, positive falling)
    pub vel_y: f32,
    pub on_ground: bool,
    /// Current animation frame index
    pub frame: usize,
}

impl Default for Dino {
    fn default() -> Self {
        Self {
            pos: Vec2::new(0.0, GROUND_Y),
            vel_y: 0.0,
            on_ground: true,
            frame: 0,
        }
    }
}

impl Dino {
    /// Start a jump; airborne presses are ignored
    pub fn jump(&mut self) {
        if self.on_ground {
            self.vel_y = -JUMP_IMPULSE;
            self.on_ground = false;
        }
    }

    /// Per-frame physics and animation advance
    pub fn update(&mut self, game_over: bool) {
        if game_over {
            self.frame = DEAD_FRAME;
            return;
        }
        self.vel_y += GRAVITY;
        self.pos.y += self.vel_y;
        if self.pos.y >= GROUND_Y {
            self.pos.y = GROUND_Y;
            self.on_ground = true;
        }
        // Run cycle keeps playing while airborne
        self.frame = (self.frame + 1) % RUN_FRAME_COUNT;
    }

    /// Current bounding box (`pos` is the bottom-left corner)
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y - DINO_HEIGHT, DINO_WIDTH, DINO_HEIGHT)
    }
}

/// Obstacle variants; each carries fixed sprite geometry and spawn tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    SmallTree,
    BigTree,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 2] = [ObstacleKind::SmallTree, ObstacleKind::BigTree];

    /// Width of a single tree of this kind
    pub fn unit_width(self) -> f32 {
        match self {
            Self::SmallTree => 34.0,
            Self::BigTree => 50.0,
        }
    }

    pub fn height(self) -> f32 {
        match self {
            Self::SmallTree => 80.0,
            Self::BigTree => 100.0,
        }
    }

    /// Largest cluster the sheet can show for this kind
    pub fn max_cluster(self) -> u32 {
        match self {
            Self::SmallTree => 6,
            Self::BigTree => 4,
        }
    }

    /// Relative spawn probability
    pub fn spawn_weight(self) -> f32 {
        match self {
            Self::SmallTree => 0.6,
            Self::BigTree => 0.4,
        }
    }
}

/// A tree cluster scrolling toward the dino
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub x: f32,
    /// Trees in this cluster; rendered width is `count * unit_width`
    pub count: u32,
    /// Global speed captured at spawn; never updated afterwards
    pub speed: f32,
}

impl Obstacle {
    /// Spawn at the right viewport edge with a random cluster size
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, kind: ObstacleKind, speed: f32) -> Self {
        Self {
            kind,
            x: VIEW_WIDTH,
            count: models::cluster_size(rng, kind.max_cluster()),
            speed,
        }
    }

    pub fn width(&self) -> f32 {
        self.count as f32 * self.kind.unit_width()
    }

    /// Scroll left at the spawn-time speed
    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    /// Re-roll the cluster and return to the right edge
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.count = models::cluster_size(rng, self.kind.max_cluster());
        self.x = VIEW_WIDTH;
    }

    /// True once the whole cluster has left the viewport
    pub fn offscreen(&self) -> bool {
        self.x + self.width() <= 0.0
    }

    /// Bounding box at the current position, feet on the ground baseline
    pub fn rect(&self) -> Rect {
        let h = self.kind.height();
        Rect::new(self.x, GROUND_Y - h, self.width(), h)
    }

    /// Bounding box advanced one frame of this obstacle's own motion
    pub fn predicted_rect(&self) -> Rect {
        self.rect().translated(Vec2::new(-self.speed, 0.0))
    }
}

pub const CLOUD_WIDTH: f32 = 90.0;
pub const CLOUD_HEIGHT: f32 = 54.0;

/// Background cloud; recycled across the viewport instead of despawned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    /// Half the spawn-time game speed, floored to whole units
    pub speed: f32,
}

impl Cloud {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, game_speed: f32) -> Self {
        Self {
            x: VIEW_WIDTH,
            y: models::cloud_vertical_offset(rng, VIEW_HEIGHT),
            speed: (game_speed / 2.0).floor(),
        }
    }

    /// Drift left; once fully past the left edge, wrap back to the right
    /// edge at a fresh height
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.x -= self.speed;
        if self.x + CLOUD_WIDTH < 0.0 {
            self.x = VIEW_WIDTH;
            self.y = models::cloud_vertical_offset(rng, VIEW_HEIGHT);
        }
    }
}

pub const FLOOR_TILE_WIDTH: f32 = 2400.0;
pub const FLOOR_HEIGHT: f32 = 26.0;

/// Looping ground strip; drawn twice, offset by one tile width
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    /// Scroll offset of the first tile
    pub x: f32,
}

impl Floor {
    /// Scroll by the current game speed, wrapping after one full tile
    pub fn update(&mut self, speed: f32) {
        self.x -= speed;
        if self.x < -FLOOR_TILE_WIDTH {
            self.x = 0.0;
        }
    }
}

/// Complete session state; owned and mutated only by the game loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Global scroll speed; also the harness frame-rate target
    pub speed: f32,
    /// Wall-clock second the session (re)started
    pub started_at: f64,
    /// Next scheduled spawn instants (wall-clock seconds)
    pub next_obstacle_at: f64,
    pub next_cloud_at: f64,
    pub dino: Dino,
    pub floor: Floor,
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
}

impl GameState {
    /// Fresh session starting at wall-clock `now` (seconds)
    pub fn new(seed: u64, now: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let next_obstacle_at = now + models::next_obstacle_delay(&mut rng, INITIAL_LAMBDA) as f64;
        let next_cloud_at = now + models::next_cloud_delay(&mut rng) as f64;
        Self {
            seed,
            rng,
            phase: GamePhase::Playing,
            speed: INITIAL_SPEED,
            started_at: now,
            next_obstacle_at,
            next_cloud_at,
            dino: Dino::default(),
            floor: Floor::default(),
            obstacles: Vec::new(),
            clouds: Vec::new(),
        }
    }

    /// Seconds since the session (re)started
    pub fn elapsed(&self, now: f64) -> f32 {
        (now - self.started_at).max(0.0) as f32
    }

    /// Obstacle spawn rate after the difficulty ramp, clamped at the ceiling
    pub fn current_lambda(&self, now: f64) -> f32 {
        let t = self.elapsed(now);
        (INITIAL_LAMBDA + (MAX_LAMBDA - INITIAL_LAMBDA) * t / LAMBDA_RAMP_SECS).min(MAX_LAMBDA)
    }

    /// Full reset: new dino, cleared spawns, speed and timers back to their
    /// session-start values. The floor keeps its offset so the strip doesn't
    /// visibly snap, and the RNG keeps its stream so a seeded replay covers
    /// restarts too.
    pub fn restart(&mut self, now: f64) {
        self.phase = GamePhase::Playing;
        self.speed = INITIAL_SPEED;
        self.started_at = now;
        self.dino = Dino::default();
        self.obstacles.clear();
        self.clouds.clear();
        self.next_obstacle_at =
            now + models::next_obstacle_delay(&mut self.rng, INITIAL_LAMBDA) as f64;
        self.next_cloud_at = now + models::next_cloud_delay(&mut self.rng) as f64;
    }
}

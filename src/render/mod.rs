//! Presentation contract
//!
//! The simulation never touches pixels: a frame is described as "draw sprite
//! region R into this rectangle" calls against a [`RenderSink`], and the
//! harness owns the actual window, texture, and blitting. Keeping the
//! boundary this narrow lets tests observe exact draw order with a recording
//! sink.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::collision::Rect;
use crate::sim::state::{
    CLOUD_HEIGHT, CLOUD_WIDTH, FLOOR_HEIGHT, FLOOR_TILE_WIDTH, GamePhase, GameState,
};

/// A rectangular area of the sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteRegion {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Sprite sheet coordinates
pub mod atlas {
    use super::SpriteRegion;
    use crate::sim::state::ObstacleKind;

    /// Dino animation frame `i` (0-1 run cycle, 2 dead pose)
    pub fn dino_frame(i: usize) -> SpriteRegion {
        SpriteRegion {
            x: 1514 + i as u32 * 88,
            y: 0,
            w: 88,
            h: 100,
        }
    }

    pub const FLOOR: SpriteRegion = SpriteRegion {
        x: 2,
        y: 104,
        w: 2400,
        h: 26,
    };
    pub const CLOUD: SpriteRegion = SpriteRegion {
        x: 170,
        y: 0,
        w: 90,
        h: 54,
    };
    pub const GAME_OVER: SpriteRegion = SpriteRegion {
        x: 953,
        y: 25,
        w: 380,
        h: 48,
    };
    /// Shown at half its sheet size
    pub const RESTART: SpriteRegion = SpriteRegion {
        x: 0,
        y: 0,
        w: 75,
        h: 67,
    };

    /// A cluster of `count` trees reads as one wide region off the sheet
    pub fn obstacle(kind: ObstacleKind, count: u32) -> SpriteRegion {
        let x = match kind {
            ObstacleKind::SmallTree => 446,
            ObstacleKind::BigTree => 650,
        };
        SpriteRegion {
            x,
            y: 0,
            w: count * kind.unit_width() as u32,
            h: kind.height() as u32,
        }
    }
}

/// Where a frame gets drawn. Implementations map regions of the opaque
/// sprite sheet onto the screen; the simulation never sees a pixel.
pub trait RenderSink {
    /// Wipe the frame to the background color
    fn clear(&mut self);
    /// Blit a sheet region into `dest`, scaling when the sizes differ
    fn draw_sprite(&mut self, src: SpriteRegion, dest: Rect);
    /// Outline a rectangle; debug overlays only
    fn draw_outline(&mut self, _rect: Rect) {}
    /// Flip the finished frame onto the screen
    fn present(&mut self);
}

/// Compose one frame: floor, dino, obstacles, clouds, then the game-over
/// overlay once the run has ended.
pub fn draw_scene<S: RenderSink>(state: &GameState, sink: &mut S, show_hitboxes: bool) {
    sink.clear();

    let floor_dest = Rect::new(
        state.floor.x,
        GROUND_Y - FLOOR_HEIGHT,
        FLOOR_TILE_WIDTH,
        FLOOR_HEIGHT,
    );
    sink.draw_sprite(atlas::FLOOR, floor_dest);
    // Second copy covers the viewport while the first tile wraps
    sink.draw_sprite(
        atlas::FLOOR,
        floor_dest.translated(Vec2::new(FLOOR_TILE_WIDTH, 0.0)),
    );

    sink.draw_sprite(atlas::dino_frame(state.dino.frame), state.dino.rect());

    for obstacle in &state.obstacles {
        sink.draw_sprite(atlas::obstacle(obstacle.kind, obstacle.count), obstacle.rect());
    }

    for cloud in &state.clouds {
        sink.draw_sprite(
            atlas::CLOUD,
            Rect::new(cloud.x, cloud.y, CLOUD_WIDTH, CLOUD_HEIGHT),
        );
    }

    if state.phase == GamePhase::GameOver {
        let (bw, bh) = (atlas::GAME_OVER.w as f32, atlas::GAME_OVER.h as f32);
        sink.draw_sprite(
            atlas::GAME_OVER,
            Rect::new((VIEW_WIDTH - bw) / 2.0, (VIEW_HEIGHT - bh) / 2.0, bw, bh),
        );

        let (rw, rh) = ((atlas::RESTART.w / 2) as f32, (atlas::RESTART.h / 2) as f32);
        sink.draw_sprite(
            atlas::RESTART,
            Rect::new(
                (VIEW_WIDTH - rw) / 2.0,
                (VIEW_HEIGHT - rh) / 2.0 + 30.0,
                rw,
                rh,
            ),
        );
    }

    if show_hitboxes {
        sink.draw_outline(state.dino.rect());
        for obstacle in &state.obstacles {
            sink.draw_outline(obstacle.predicted_rect());
        }
    }

    sink.present();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Cloud, Obstacle, ObstacleKind};

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Sprite(SpriteRegion),
        Outline,
        Present,
    }

    #[derive(Default)]
    struct RecordingSink {
        ops: Vec<Op>,
    }

    impl RenderSink for RecordingSink {
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn draw_sprite(&mut self, src: SpriteRegion, _dest: Rect) {
            self.ops.push(Op::Sprite(src));
        }
        fn draw_outline(&mut self, _rect: Rect) {
            self.ops.push(Op::Outline);
        }
        fn present(&mut self) {
            self.ops.push(Op::Present);
        }
    }

    fn sample_state() -> GameState {
        let mut state = GameState::new(1, 0.0);
        state.obstacles.push(Obstacle {
            kind: ObstacleKind::BigTree,
            x: 600.0,
            count: 2,
            speed: 20.0,
        });
        state.clouds.push(Cloud {
            x: 400.0,
            y: 50.0,
            speed: 10.0,
        });
        state
    }

    #[test]
    fn scene_draws_in_layer_order() {
        let state = sample_state();
        let mut sink = RecordingSink::default();
        draw_scene(&state, &mut sink, false);

        assert_eq!(
            sink.ops,
            vec![
                Op::Clear,
                Op::Sprite(atlas::FLOOR),
                Op::Sprite(atlas::FLOOR),
                Op::Sprite(atlas::dino_frame(0)),
                Op::Sprite(atlas::obstacle(ObstacleKind::BigTree, 2)),
                Op::Sprite(atlas::CLOUD),
                Op::Present,
            ]
        );
    }

    #[test]
    fn game_over_adds_banner_and_restart_prompt() {
        let mut state = sample_state();
        state.phase = GamePhase::GameOver;
        let mut sink = RecordingSink::default();
        draw_scene(&state, &mut sink, false);

        assert!(sink.ops.contains(&Op::Sprite(atlas::GAME_OVER)));
        assert!(sink.ops.contains(&Op::Sprite(atlas::RESTART)));
        // Overlay goes on top, just under the final present
        assert_eq!(sink.ops[sink.ops.len() - 1], Op::Present);
        assert_eq!(sink.ops[sink.ops.len() - 2], Op::Sprite(atlas::RESTART));
    }

    #[test]
    fn hitbox_overlay_outlines_dino_and_obstacles() {
        let state = sample_state();
        let mut sink = RecordingSink::default();
        draw_scene(&state, &mut sink, true);

        let outlines = sink.ops.iter().filter(|op| **op == Op::Outline).count();
        assert_eq!(outlines, 2);
    }

    #[test]
    fn obstacle_region_width_scales_with_cluster() {
        let one = atlas::obstacle(ObstacleKind::SmallTree, 1);
        let three = atlas::obstacle(ObstacleKind::SmallTree, 3);
        assert_eq!(one.w, 34);
        assert_eq!(three.w, 102);
        assert_eq!(one.x, three.x);
    }
}

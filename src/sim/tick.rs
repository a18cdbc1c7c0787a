//! Per-frame simulation advance
//!
//! One `tick` is one rendered frame. Scheduling is wall-clock based: the
//! caller passes monotonic seconds, and the session compares them against its
//! spawn timers, so spawn cadence tracks real time while entity physics
//! advance per frame.

use super::collision::check_collision;
use super::models;
use super::state::{Cloud, GamePhase, GameState, Obstacle};

/// Input edges for a single frame; the harness reports at most one of each
/// per key transition
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Space pressed while playing
    pub jump: bool,
    /// Space pressed on the game-over screen
    pub restart: bool,
}

/// Advance the session by one frame at wall-clock `now` (seconds)
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    let elapsed = state.elapsed(now);
    let lambda = state.current_lambda(now);

    // The ramp never pauses: speed creeps up even on the game-over screen,
    // and the harness frame-rate target with it.
    state.speed += models::game_acceleration(&mut state.rng, elapsed);

    if input.restart && state.phase == GamePhase::GameOver {
        log::info!("restarting session (seed {})", state.seed);
        state.restart(now);
    } else if input.jump && state.phase == GamePhase::Playing {
        state.dino.jump();
    }

    match state.phase {
        GamePhase::Playing => {
            state.floor.update(state.speed);
            state.dino.update(false);

            if now >= state.next_obstacle_at {
                let kind = models::select_obstacle_kind(&mut state.rng);
                let obstacle = Obstacle::spawn(&mut state.rng, kind, state.speed);
                log::debug!(
                    "spawned {:?} x{} at speed {:.1}",
                    kind,
                    obstacle.count,
                    obstacle.speed
                );
                state.obstacles.push(obstacle);
                state.next_obstacle_at =
                    now + models::next_obstacle_delay(&mut state.rng, lambda) as f64;
            }

            if now >= state.next_cloud_at {
                state.clouds.push(Cloud::spawn(&mut state.rng, state.speed));
                state.next_cloud_at = now + models::next_cloud_delay(&mut state.rng) as f64;
            }

            for obstacle in &mut state.obstacles {
                obstacle.update();
                if check_collision(&state.dino, obstacle) {
                    log::info!("collision after {:.1} s at speed {:.1}", elapsed, state.speed);
                    state.phase = GamePhase::GameOver;
                }
            }

            state.obstacles.retain(|o| !o.offscreen());

            for cloud in &mut state.clouds {
                cloud.update(&mut state.rng);
            }

            // Swap to the dead pose on the frame the run ends
            if state.phase == GamePhase::GameOver {
                state.dino.update(true);
            }
        }
        GamePhase::GameOver => {
            // World freezes; only the dead pose is held
            state.dino.update(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::ObstacleKind;

    /// Drive `state` through evenly spaced frames starting after `start`
    fn run_frames(state: &mut GameState, start: f64, frames: u32) {
        for i in 1..=frames {
            tick(state, &TickInput::default(), start + i as f64 / 60.0);
        }
    }

    #[test]
    fn speed_ramps_every_frame() {
        let mut state = GameState::new(1, 0.0);
        run_frames(&mut state, 0.0, 100);
        let lower = INITIAL_SPEED + 100.0 * ACCEL_MIN;
        let upper = INITIAL_SPEED + 100.0 * ACCEL_MAX;
        assert!(state.speed >= lower && state.speed <= upper, "{}", state.speed);
    }

    #[test]
    fn obstacles_spawn_once_scheduled() {
        let mut state = GameState::new(2, 0.0);
        let due = state.next_obstacle_at;
        tick(&mut state, &TickInput::default(), due);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.next_obstacle_at >= due + MIN_OBSTACLE_GAP as f64);

        let obstacle = &state.obstacles[0];
        assert!((1..=obstacle.kind.max_cluster()).contains(&obstacle.count));
        // Spawn-time speed copy includes this frame's acceleration
        assert_eq!(obstacle.speed, state.speed);
    }

    #[test]
    fn offscreen_obstacles_are_pruned() {
        let mut state = GameState::new(3, 0.0);
        state.obstacles.push(Obstacle {
            kind: ObstacleKind::SmallTree,
            x: -10.0,
            count: 1,
            speed: 25.0,
        });
        // One update drags it to x = -35, fully outside
        tick(&mut state, &TickInput::default(), 0.1);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn clouds_survive_the_left_edge() {
        let mut state = GameState::new(4, 0.0);
        state.next_cloud_at = 1_000.0;
        state.clouds.push(Cloud {
            x: -100.0,
            y: 40.0,
            speed: 10.0,
        });
        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.clouds.len(), 1);
        assert_eq!(state.clouds[0].x, VIEW_WIDTH);
    }

    #[test]
    fn collision_ends_the_run() {
        let mut state = GameState::new(5, 0.0);
        state.next_cloud_at = 1_000.0;
        // Predicted rect covers the dino center after this frame's update
        state.obstacles.push(Obstacle {
            kind: ObstacleKind::BigTree,
            x: 60.0,
            count: 1,
            speed: 20.0,
        });
        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.dino.frame, crate::sim::state::DEAD_FRAME);
    }

    #[test]
    fn game_over_freezes_the_world() {
        let mut state = GameState::new(6, 0.0);
        state.phase = GamePhase::GameOver;
        state.obstacles.push(Obstacle {
            kind: ObstacleKind::SmallTree,
            x: 400.0,
            count: 2,
            speed: 20.0,
        });

        let frozen_x = state.obstacles[0].x;
        let frozen_floor = state.floor.x;
        run_frames(&mut state, 0.0, 10);
        assert_eq!(state.obstacles[0].x, frozen_x);
        assert_eq!(state.floor.x, frozen_floor);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn jump_input_ignored_after_game_over() {
        let mut state = GameState::new(7, 0.0);
        state.phase = GamePhase::GameOver;
        let input = TickInput {
            jump: true,
            restart: false,
        };
        tick(&mut state, &input, 0.1);
        assert!(state.dino.on_ground);
    }

    #[test]
    fn restart_resets_the_session() {
        let mut state = GameState::new(8, 0.0);
        run_frames(&mut state, 0.0, 60);
        state.phase = GamePhase::GameOver;
        state.obstacles.push(Obstacle {
            kind: ObstacleKind::BigTree,
            x: 300.0,
            count: 3,
            speed: 22.0,
        });
        state.clouds.push(Cloud {
            x: 500.0,
            y: 30.0,
            speed: 10.0,
        });

        // Space means both things; phase picks restart here
        let input = TickInput {
            jump: true,
            restart: true,
        };
        tick(&mut state, &input, 50.0);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.speed, INITIAL_SPEED);
        assert!(state.obstacles.is_empty());
        assert!(state.clouds.is_empty());
        assert!(state.elapsed(50.0) < 1e-6);
        assert!(state.next_obstacle_at >= 50.0 + MIN_OBSTACLE_GAP as f64);
        assert!(state.next_cloud_at >= 50.0);
        assert!(state.dino.on_ground);
    }

    #[test]
    fn sessions_replay_from_the_same_seed() {
        let mut a = GameState::new(99, 0.0);
        let mut b = GameState::new(99, 0.0);

        for i in 1..600 {
            let now = i as f64 / 60.0;
            let input = TickInput {
                jump: i % 40 == 0,
                restart: false,
            };
            tick(&mut a, &input, now);
            tick(&mut b, &input, now);
        }
        assert_eq!(a, b);
    }
}

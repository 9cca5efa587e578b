//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{WallContact, bounce_off_block, resolve_paddle, resolve_walls};
use super::rect::overlaps;
use super::state::{GameEvent, GamePhase, GameState};

/// Key state for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
    /// Launch / restart (space)
    pub launch: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Paddle direction: -1, 0 or +1
    pub fn direction(&self) -> i32 {
        self.right as i32 - self.left as i32
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Resumed);
                log::info!("Resumed");
                return;
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Start => {
            if input.launch {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Launched);
                log::info!("Game started");
            }
        }

        GamePhase::GameOver => {
            if input.launch {
                state.restart();
            }
        }

        GamePhase::Paused => {}

        GamePhase::Playing => step_playing(state, input),
    }
}

/// One frame of physics: paddle, ball, walls, paddle bounce, blocks
fn step_playing(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    let screen_width = state.config.screen_width;
    state
        .paddle
        .move_by(input.direction() * state.config.paddle_speed, screen_width);

    state.ball.advance();

    match resolve_walls(
        &mut state.ball,
        screen_width,
        state.config.screen_height,
        state.config.ball_speed,
    ) {
        Some(WallContact::Floor) => {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::BallLost);
            log::info!(
                "Game over: score {} (high {})",
                state.scoreboard.score,
                state.scoreboard.high_score
            );
            if state.scoreboard.is_new_high() {
                log::info!("New high score: {}", state.scoreboard.high_score);
            }
            return;
        }
        Some(WallContact::Bounce(wall)) => state.events.push(GameEvent::WallBounce(wall)),
        None => {}
    }

    if let Some(offset) = resolve_paddle(&mut state.ball, &state.paddle.rect, &state.config) {
        state.events.push(GameEvent::PaddleBounce { offset });
    }

    // Each live block the ball overlaps is resolved once, in row order,
    // against the position left by earlier blocks in this scan.
    let shrink = state.config.block_shrink;
    let min_height = state.config.block_min_height;
    for (index, block) in state.blocks.blocks.iter_mut().enumerate() {
        if !block.alive || !overlaps(&state.ball.rect, &block.rect) {
            continue;
        }

        bounce_off_block(&mut state.ball, &block.rect);
        let destroyed = block.take_hit(shrink, min_height);
        state.scoreboard.record_hit();

        log::debug!("Block {} hit, {} hits remaining", index, block.hits_remaining);
        state.events.push(GameEvent::BlockHit {
            index,
            hits_remaining: block.hits_remaining,
        });
        if destroyed {
            log::debug!("Block {} destroyed", index);
            state.events.push(GameEvent::BlockDestroyed { index });
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::rect::Rect;

    fn playing_state() -> GameState {
        let mut state = GameState::new(GameConfig::default());
        state.phase = GamePhase::Playing;
        state
    }

    const LAUNCH: TickInput = TickInput {
        left: false,
        right: false,
        launch: true,
        pause: false,
    };

    #[test]
    fn test_tick_start_to_playing() {
        let mut state = GameState::new(GameConfig::default());
        assert_eq!(state.phase, GamePhase::Start);

        // Tick without launch - should stay on the title screen, nothing moves
        let ball = state.ball;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.ball, ball);

        tick(&mut state, &LAUNCH);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Launched]);
    }

    #[test]
    fn test_tick_moves_ball_and_paddle() {
        let mut state = playing_state();
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.rect.x, 332 - 6);
        assert_eq!(state.ball.rect.x, 336);
        assert_eq!(state.ball.rect.y, 244);
        assert_eq!(state.time_ticks, 1);

        // Both keys cancel out
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.rect.x, 332 - 6);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = playing_state();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        // No physics while paused
        let ball = state.ball;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball, ball);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Resumed]);
    }

    #[test]
    fn test_pause_ignored_on_title_screen() {
        let mut state = GameState::new(GameConfig::default());
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Start);
    }

    #[test]
    fn test_left_wall_scenario() {
        let config = GameConfig {
            ball_speed: 3,
            ..Default::default()
        };
        let mut state = GameState::new(config);
        state.phase = GamePhase::Playing;
        state.ball.rect = Rect::new(2, 100, 15, 15);
        state.ball.vel = IVec2::new(-3, 3);

        tick(&mut state, &TickInput::default());
        assert!(state.ball.rect.x <= 0);
        assert_eq!(state.ball.vel.x, 3);
        assert_eq!(state.ball.vel.y, 3);
    }

    #[test]
    fn test_floor_ends_game() {
        let mut state = playing_state();
        state.ball.rect = Rect::new(50, 462, 15, 15);
        state.ball.vel = IVec2::new(4, 4);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.events, vec![GameEvent::BallLost]);

        // Game over is inert until restart
        let ball = state.ball;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.ball, ball);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut state = playing_state();
        state.scoreboard.record_hit();
        state.scoreboard.record_hit();
        state.scoreboard.record_hit();
        state.phase = GamePhase::GameOver;

        tick(&mut state, &LAUNCH);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score(), 3);
        assert_eq!(state.blocks.alive_count(), 10);
    }

    #[test]
    fn test_paddle_redirects_falling_ball() {
        let mut state = playing_state();
        state.paddle.rect.x = 300;
        // Lands on the paddle this tick, dead center
        state.ball.rect = Rect::new(343, 433, 15, 15);
        state.ball.vel = IVec2::new(0, 4);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.rect.y, 450 - 15);
        assert_eq!(state.ball.vel, IVec2::new(0, -4));
        assert!(matches!(state.events[0], GameEvent::PaddleBounce { .. }));
    }

    #[test]
    fn test_block_three_hits_then_inert() {
        let mut state = playing_state();
        let target = state.blocks.blocks[2].rect;

        for hit in 1..=3u32 {
            // Drop the ball onto the block's bottom edge from just below
            let block = state.blocks.blocks[2].rect;
            state.ball.rect = Rect::new(block.x + 10, block.bottom() + 2, 15, 15);
            state.ball.vel = IVec2::new(0, -4);
            tick(&mut state, &TickInput::default());

            assert_eq!(state.blocks.blocks[2].hits_remaining, 3 - hit);
            assert_eq!(state.ball.vel.y, 4);
            assert_eq!(state.score(), hit);
        }

        let block = state.blocks.blocks[2];
        assert!(!block.alive);
        assert_eq!(block.rect.h, (target.h - 3 * 5).max(1));
        assert_eq!(state.blocks.alive_count(), 9);

        // Ball now passes through the old position untouched
        state.ball.rect = Rect::new(target.x + 10, target.y + 2, 15, 15);
        state.ball.vel = IVec2::new(0, -4);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.vel, IVec2::new(0, -4));
        assert_eq!(state.score(), 3);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_block_hit_events() {
        let mut state = playing_state();
        state.blocks.blocks[0].hits_remaining = 1;
        let block = state.blocks.blocks[0].rect;
        state.ball.rect = Rect::new(block.x + 5, block.bottom() + 2, 15, 15);
        state.ball.vel = IVec2::new(1, -4);

        tick(&mut state, &TickInput::default());
        assert_eq!(
            state.events,
            vec![
                GameEvent::BlockHit {
                    index: 0,
                    hits_remaining: 0
                },
                GameEvent::BlockDestroyed { index: 0 },
            ]
        );
        assert_eq!(state.high_score(), 1);
    }

    #[test]
    fn test_determinism() {
        // Two states fed the same inputs end up identical
        let mut state1 = GameState::new(GameConfig::default());
        let mut state2 = GameState::new(GameConfig::default());

        let inputs = [
            LAUNCH,
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                right: true,
                ..Default::default()
            },
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.ball, state2.ball);
        assert_eq!(state1.paddle, state2.paddle);
        assert_eq!(state1.blocks, state2.blocks);
    }
}

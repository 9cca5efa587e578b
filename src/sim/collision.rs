//! Collision response for the ball
//!
//! Walls overwrite velocity components, the paddle redirects the ball by
//! impact offset, and blocks reflect along the axis of least penetration.

use glam::IVec2;

use super::rect::{Axis, Rect, overlaps, penetration, primary_axis};
use super::state::{Ball, Wall};
use crate::settings::{GameConfig, PaddleBounce};

/// Outcome of the wall check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallContact {
    /// Ball reached the floor: the game is lost
    Floor,
    Bounce(Wall),
}

/// Check the ball against the screen edges.
///
/// Priority chain, first match wins: floor, left, top, right. Each bounce
/// overwrites the velocity component with the base speed rather than
/// negating it, so angled speed does not survive a wall hit.
pub fn resolve_walls(
    ball: &mut Ball,
    screen_width: i32,
    screen_height: i32,
    ball_speed: i32,
) -> Option<WallContact> {
    let r = ball.rect;
    if r.bottom() >= screen_height {
        Some(WallContact::Floor)
    } else if r.x <= 0 {
        ball.vel.x = ball_speed;
        Some(WallContact::Bounce(Wall::Left))
    } else if r.y <= 0 {
        ball.vel.y = ball_speed;
        Some(WallContact::Bounce(Wall::Top))
    } else if r.right() >= screen_width {
        ball.vel.x = -ball_speed;
        Some(WallContact::Bounce(Wall::Right))
    } else {
        None
    }
}

/// Normalized impact offset: -1 at the paddle's left edge, +1 at its right
pub fn impact_offset(ball: &Rect, paddle: &Rect) -> f64 {
    let half = (paddle.w / 2) as f64;
    if half <= 0.0 {
        return 0.0;
    }
    let u = (ball.center_x() - paddle.center_x()) as f64 / half;
    u.clamp(-1.0, 1.0)
}

/// Outgoing angle from vertical for a given impact offset
#[inline]
pub fn bounce_angle(offset: f64, max_angle: f64) -> f64 {
    offset * max_angle
}

/// Velocity after an angled paddle bounce.
///
/// Current speed is kept but never drops below `ball_speed`. The result
/// always points upward, and an off-center hit never leaves straight up.
pub fn angled_velocity(vel: IVec2, offset: f64, max_angle: f64, ball_speed: i32) -> IVec2 {
    let theta = bounce_angle(offset, max_angle);
    let speed = vel.as_dvec2().length().max(ball_speed as f64);

    let mut dx = (speed * theta.sin()).round() as i32;
    let mut dy = (-speed * theta.cos()).round() as i32;

    if dy == 0 {
        dy = -ball_speed;
    }
    if dx == 0 && offset != 0.0 {
        dx = if offset > 0.0 { 1 } else { -1 };
    }
    IVec2::new(dx, dy)
}

/// Bounce the ball off the paddle if it is overlapping and falling.
///
/// Returns the impact offset when a bounce happened. A ball already moving
/// up through the paddle is left alone.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Rect, config: &GameConfig) -> Option<f64> {
    if !overlaps(&ball.rect, paddle) || ball.vel.y <= 0 {
        return None;
    }

    ball.rect.y = paddle.y - ball.rect.h;

    match config.paddle_bounce {
        PaddleBounce::Angled => {
            let u = impact_offset(&ball.rect, paddle);
            ball.vel = angled_velocity(ball.vel, u, config.max_bounce_angle(), config.ball_speed);
            Some(u)
        }
        PaddleBounce::Flip => {
            ball.vel.y = -ball.vel.y;
            Some(0.0)
        }
    }
}

/// Push the ball out of a block and reflect it.
///
/// The axis of least penetration decides which edge was struck; the ball is
/// placed flush against that edge and the matching velocity component is
/// negated. Caller must have confirmed overlap.
pub fn bounce_off_block(ball: &mut Ball, block: &Rect) -> Axis {
    let (overlap_x, overlap_y) = penetration(&ball.rect, block);
    let axis = primary_axis(overlap_x, overlap_y);

    match axis {
        Axis::X => {
            ball.rect.x = if ball.rect.x < block.x {
                block.x - ball.rect.w
            } else {
                block.right()
            };
            ball.vel.x = -ball.vel.x;
        }
        Axis::Y => {
            ball.rect.y = if ball.rect.y < block.y {
                block.y - ball.rect.h
            } else {
                block.bottom()
            };
            ball.vel.y = -ball.vel.y;
        }
    }
    axis
}

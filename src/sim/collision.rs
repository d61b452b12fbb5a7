//! Wall and paddle collisions
//!
//! The left paddle deflects the ball differently depending on where it was
//! struck; the right paddle is a plain mirror.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle};
use crate::config::EnvConfig;
use crate::consts::*;

/// Region of the paddle face the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleZone {
    /// Within one world unit of the paddle center
    Center,
    /// Within a quarter paddle length of the center
    Inner,
    /// Anywhere else on the face
    Outer,
}

impl PaddleZone {
    /// Classify an absolute offset from the paddle center
    pub fn classify(offset: f32, paddle_h: f32) -> Self {
        let offset = offset.abs();
        if offset < CENTER_ZONE_HALF_WIDTH {
            PaddleZone::Center
        } else if offset <= paddle_h / 4.0 {
            PaddleZone::Inner
        } else {
            PaddleZone::Outer
        }
    }
}

/// Bounce off the top or bottom wall. Returns true if the ball bounced.
///
/// Only the velocity flips; the ball is not pushed back inside, so a ball
/// lingering past a wall can flip again on the next tick.
pub fn bounce_walls(ball: &mut Ball, height: f32) -> bool {
    if ball.pos.y <= 0.0 || ball.pos.y >= height {
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// Offset from the paddle center if the ball is within the paddle's span
#[inline]
fn face_offset(ball: &Ball, paddle: &Paddle, paddle_h: f32) -> Option<f32> {
    let offset = paddle.offset_to(ball.pos.y);
    (offset.abs() < paddle_h / 2.0).then_some(offset)
}

/// Left paddle contact: ball inside the left band and level with the paddle
pub fn left_paddle_contact(ball: &Ball, paddle: &Paddle, config: &EnvConfig) -> Option<PaddleZone> {
    if ball.pos.x > config.paddle_w {
        return None;
    }
    face_offset(ball, paddle, config.paddle_h).map(|o| PaddleZone::classify(o, config.paddle_h))
}

/// Right paddle contact: ball inside the right band and level with the paddle
pub fn right_paddle_contact(ball: &Ball, paddle: &Paddle, config: &EnvConfig) -> bool {
    ball.pos.x >= config.width - config.paddle_w && face_offset(ball, paddle, config.paddle_h).is_some()
}

/// Velocity after a left paddle hit
///
/// The horizontal component is reflected first, then adjusted per zone:
/// - center: flatten the trajectory and speed up (capped)
/// - inner: add the capped, incremented component onto itself
/// - outer: bleed horizontal speed and kick vertically
///
/// The inner-zone rule adds `min(max, v + 2)` to `v` rather than assigning it,
/// so a hit can leave the ball faster than `max_speed`.
pub fn deflect_left(vel: Vec2, zone: PaddleZone, max_speed: f32) -> Vec2 {
    let mut vel = Vec2::new(-vel.x, vel.y);
    match zone {
        PaddleZone::Center => {
            vel.x = max_speed.min(vel.x + CENTER_BOOST);
            vel.y = 0.0;
        }
        PaddleZone::Inner => {
            vel.x += max_speed.min(vel.x + INNER_BOOST);
            vel.y += max_speed.min(vel.y + INNER_BOOST);
        }
        PaddleZone::Outer => {
            vel.x = (vel.x - EDGE_DRAG).max(EDGE_MIN_SPEED);
            vel.y += EDGE_SPIN;
        }
    }
    vel
}

/// Velocity after a right paddle hit
#[inline]
pub fn deflect_right(vel: Vec2) -> Vec2 {
    Vec2::new(-vel.x, vel.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
        }
    }

    #[test]
    fn test_zone_boundaries() {
        assert_eq!(PaddleZone::classify(0.0, 80.0), PaddleZone::Center);
        assert_eq!(PaddleZone::classify(-0.99, 80.0), PaddleZone::Center);
        assert_eq!(PaddleZone::classify(1.0, 80.0), PaddleZone::Inner);
        assert_eq!(PaddleZone::classify(20.0, 80.0), PaddleZone::Inner);
        assert_eq!(PaddleZone::classify(-20.5, 80.0), PaddleZone::Outer);
        assert_eq!(PaddleZone::classify(39.0, 80.0), PaddleZone::Outer);
    }

    #[test]
    fn test_wall_bounce() {
        let mut ball = ball_at(100.0, 0.0, 5.0, -1.0);
        assert!(bounce_walls(&mut ball, 400.0));
        assert_eq!(ball.vel.y, 1.0);

        let mut ball = ball_at(100.0, 400.0, 5.0, 1.0);
        assert!(bounce_walls(&mut ball, 400.0));
        assert_eq!(ball.vel.y, -1.0);

        let mut ball = ball_at(100.0, 200.0, 5.0, 1.0);
        assert!(!bounce_walls(&mut ball, 400.0));
        assert_eq!(ball.vel.y, 1.0);
    }

    #[test]
    fn test_left_contact_requires_band_and_span() {
        let config = EnvConfig::default();
        let paddle = Paddle { y: 200.0 };

        assert_eq!(
            left_paddle_contact(&ball_at(20.0, 200.0, -5.0, 0.0), &paddle, &config),
            Some(PaddleZone::Center)
        );
        assert_eq!(
            left_paddle_contact(&ball_at(21.0, 200.0, -5.0, 0.0), &paddle, &config),
            None
        );
        // Exactly half a paddle away is a miss
        assert_eq!(
            left_paddle_contact(&ball_at(10.0, 240.0, -5.0, 0.0), &paddle, &config),
            None
        );
        assert_eq!(
            left_paddle_contact(&ball_at(10.0, 239.0, -5.0, 0.0), &paddle, &config),
            Some(PaddleZone::Outer)
        );
    }

    #[test]
    fn test_right_contact() {
        let config = EnvConfig::default();
        let paddle = Paddle { y: 100.0 };
        assert!(right_paddle_contact(&ball_at(780.0, 100.0, 5.0, 0.0), &paddle, &config));
        assert!(!right_paddle_contact(&ball_at(779.0, 100.0, 5.0, 0.0), &paddle, &config));
        assert!(!right_paddle_contact(&ball_at(790.0, 200.0, 5.0, 0.0), &paddle, &config));
    }

    #[test]
    fn test_center_hit_flattens_and_boosts() {
        let vel = deflect_left(Vec2::new(-5.0, 3.0), PaddleZone::Center, 10.0);
        assert_eq!(vel, Vec2::new(10.0, 0.0));

        // Boost is capped at max speed
        let vel = deflect_left(Vec2::new(-8.0, 1.0), PaddleZone::Center, 10.0);
        assert_eq!(vel.x, 10.0);
    }

    #[test]
    fn test_inner_hit_adds_capped_increment() {
        // vx: 5 + min(10, 7) = 12; vy: 1 + min(10, 3) = 4
        let vel = deflect_left(Vec2::new(-5.0, 1.0), PaddleZone::Inner, 10.0);
        assert_eq!(vel, Vec2::new(12.0, 4.0));
        assert!(vel.x > 10.0, "inner hit is allowed to exceed max speed");

        // Once v + 2 exceeds the cap the increment is the cap itself
        let vel = deflect_left(Vec2::new(-9.0, 9.0), PaddleZone::Inner, 10.0);
        assert_eq!(vel, Vec2::new(19.0, 19.0));
    }

    #[test]
    fn test_outer_hit_slows_and_spins() {
        let vel = deflect_left(Vec2::new(-5.0, -1.0), PaddleZone::Outer, 10.0);
        assert_eq!(vel, Vec2::new(2.0, 4.0));

        // Horizontal speed never drops below one unit per tick
        let vel = deflect_left(Vec2::new(-2.0, 0.0), PaddleZone::Outer, 10.0);
        assert_eq!(vel, Vec2::new(1.0, 5.0));
    }

    #[test]
    fn test_right_deflect_mirrors() {
        assert_eq!(deflect_right(Vec2::new(7.0, -2.0)), Vec2::new(-7.0, -2.0));
    }
}

//! Pitch geometry and ball kinematics used by the reference generators.
//!
//! 좌표계: 원점 = 센터 스팟, +x = 상대 골 방향 (단위: m)

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Half of the pitch length (m).
pub const PITCH_HALF_LENGTH: f64 = 52.5;
/// Half of the pitch width (m).
pub const PITCH_HALF_WIDTH: f64 = 34.0;
/// Penalty area front line x (m).
pub const PENALTY_AREA_X: f64 = PITCH_HALF_LENGTH - 16.5;
/// Penalty area half width (m).
pub const PENALTY_AREA_HALF_WIDTH: f64 = 20.16;
/// Goal half width (m).
pub const GOAL_HALF_WIDTH: f64 = 7.01;

/// Ball speed decay per cycle.
pub const BALL_DECAY: f64 = 0.94;
/// Maximum first ball speed per cycle.
pub const BALL_SPEED_MAX: f64 = 3.0;

/// 2D 벡터
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit-length vector rotated `deg` degrees from +x, scaled by `len`.
    pub fn from_polar(len: f64, deg: f64) -> Self {
        let rad = deg.to_radians();
        Self { x: len * rad.cos(), y: len * rad.sin() }
    }

    #[inline]
    pub fn r(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn dist2(self, other: Vec2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn dist(self, other: Vec2) -> f64 {
        self.dist2(other).sqrt()
    }

    pub fn normalized(self) -> Self {
        let len = self.r();
        if len > 1.0e-6 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::ZERO
        }
    }

    /// Distance from this point to the segment `[from, to]`.
    pub fn dist_to_segment(self, from: Vec2, to: Vec2) -> f64 {
        let seg = to - from;
        let len2 = seg.x * seg.x + seg.y * seg.y;
        if len2 < 1.0e-12 {
            return self.dist(from);
        }
        let rel = self - from;
        let t = ((rel.x * seg.x + rel.y * seg.y) / len2).clamp(0.0, 1.0);
        self.dist(from + seg * t)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Center of the opponent goal.
pub const OPPONENT_GOAL: Vec2 = Vec2::new(PITCH_HALF_LENGTH, 0.0);

#[inline]
pub fn in_pitch(pos: Vec2) -> bool {
    pos.x.abs() <= PITCH_HALF_LENGTH && pos.y.abs() <= PITCH_HALF_WIDTH
}

#[inline]
pub fn in_opponent_penalty_area(pos: Vec2) -> bool {
    pos.x >= PENALTY_AREA_X && pos.x <= PITCH_HALF_LENGTH && pos.y.abs() <= PENALTY_AREA_HALF_WIDTH
}

// =============================================================================
// Ball kinematics (geometric series)
// =============================================================================

/// First speed needed so that the ball arrives at `distance` with `end_speed`.
///
/// Returns `None` when the required speed exceeds [`BALL_SPEED_MAX`].
pub fn first_speed_for(distance: f64, end_speed: f64) -> Option<f64> {
    // sum_{i<n} v0 * d^i = distance,  v0 * d^n = end  =>  v0 = end + distance * (1 - d)
    let speed = end_speed + distance * (1.0 - BALL_DECAY);
    (speed <= BALL_SPEED_MAX).then_some(speed)
}

/// Cycles until a ball kicked at `first_speed` travels `distance`.
///
/// Returns `None` if the ball stops before reaching the distance.
pub fn ball_travel_steps(first_speed: f64, distance: f64) -> Option<u32> {
    if distance <= 0.0 {
        return Some(0);
    }
    if first_speed <= 0.0 {
        return None;
    }
    // distance = v0 * (1 - d^n) / (1 - d)
    let rest = 1.0 - distance * (1.0 - BALL_DECAY) / first_speed;
    if rest <= 0.0 {
        return None;
    }
    let steps = (rest.ln() / BALL_DECAY.ln()).ceil();
    Some(steps.max(1.0) as u32)
}

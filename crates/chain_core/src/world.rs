//! Read-only world snapshot handed to the search once per cycle.
//!
//! The snapshot is the only view the search has of the live world model:
//! it seeds the first predicted state and is passed through untouched to
//! the action generator.

use crate::geom::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation timestamp (`cycle`, `stopped` cycles during play-off stoppages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GameTime {
    pub cycle: u32,
    #[serde(default)]
    pub stopped: u32,
}

impl GameTime {
    pub const fn new(cycle: u32, stopped: u32) -> Self {
        Self { cycle, stopped }
    }

    /// True if `self` is the cycle directly after `prev` in normal play.
    pub fn follows(self, prev: GameTime) -> bool {
        (Some(self.cycle) == prev.cycle.checked_add(1) && self.stopped == 0)
            || (self.cycle == prev.cycle && Some(self.stopped) == prev.stopped.checked_add(1))
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.cycle, self.stopped)
    }
}

/// 선수 상태
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerObject {
    /// Uniform number (1..=11)
    pub unum: u8,
    pub pos: Vec2,
    #[serde(default)]
    pub vel: Vec2,
    /// Remaining stamina (server units, 0..=8000)
    #[serde(default = "default_stamina")]
    pub stamina: f64,
    #[serde(default)]
    pub goalie: bool,
}

fn default_stamina() -> f64 {
    8000.0
}

impl PlayerObject {
    pub fn new(unum: u8, pos: Vec2) -> Self {
        Self { unum, pos, vel: Vec2::ZERO, stamina: default_stamina(), goalie: false }
    }

    pub fn goalie(unum: u8, pos: Vec2) -> Self {
        Self { goalie: true, ..Self::new(unum, pos) }
    }
}

/// 공 상태
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BallObject {
    pub pos: Vec2,
    #[serde(default)]
    pub vel: Vec2,
}

impl BallObject {
    pub fn at(pos: Vec2) -> Self {
        Self { pos, vel: Vec2::ZERO }
    }
}

/// Snapshot of the world as seen by this agent.
///
/// `teammates` includes the agent itself (`self_unum`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: GameTime,
    pub self_unum: u8,
    pub ball: BallObject,
    pub teammates: Vec<PlayerObject>,
    pub opponents: Vec<PlayerObject>,
    #[serde(default)]
    pub self_kickable: bool,
    #[serde(default)]
    pub kickable_teammate: Option<u8>,
}

impl WorldSnapshot {
    pub fn self_player(&self) -> Option<&PlayerObject> {
        self.teammate(self.self_unum)
    }

    pub fn teammate(&self, unum: u8) -> Option<&PlayerObject> {
        self.teammates.iter().find(|p| p.unum == unum)
    }

    /// Who is treated as the ball holder at the first predicted state.
    ///
    /// Self when kickable, then a kickable teammate, then the teammate
    /// closest to the ball. Falls back to `self_unum` when no teammate is known.
    pub fn ball_holder_unum(&self) -> u8 {
        if self.self_kickable {
            return self.self_unum;
        }
        if let Some(unum) = self.kickable_teammate {
            return unum;
        }
        self.teammates
            .iter()
            .min_by(|a, b| a.pos.dist2(self.ball.pos).total_cmp(&b.pos.dist2(self.ball.pos)))
            .map(|p| p.unum)
            .unwrap_or(self.self_unum)
    }
}

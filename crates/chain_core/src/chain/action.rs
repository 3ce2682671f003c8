//! Cooperative action: one candidate step of an action chain.

use crate::geom::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 액션 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    Hold,
    Dribble,
    Pass,
    Shoot,
}

impl ActionCategory {
    pub fn name(self) -> &'static str {
        match self {
            ActionCategory::Hold => "Hold",
            ActionCategory::Dribble => "Dribble",
            ActionCategory::Pass => "Pass",
            ActionCategory::Shoot => "Shoot",
        }
    }
}

/// Estimated interception risk of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum SafetyLevel {
    #[default]
    Safe,
    MaybeDangerous,
    Dangerous,
    Failure,
}

/// A candidate action produced by the action generator.
///
/// Immutable apart from `value` / `penalty`, which the search writes when a
/// chain ending (or starting) with this action is evaluated. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CooperativeAction {
    category: ActionCategory,
    /// Generator-assigned id, unique among siblings.
    index: usize,
    player_unum: u8,
    target_player_unum: Option<u8>,
    target_ball_pos: Vec2,
    first_ball_vel: Vec2,
    kick_count: u32,
    duration_step: u32,
    safety_level: SafetyLevel,
    final_action: bool,
    value: f64,
    penalty: f64,
    description: &'static str,
}

impl CooperativeAction {
    fn base(category: ActionCategory, player_unum: u8, target_ball_pos: Vec2, duration_step: u32) -> Self {
        Self {
            category,
            index: 0,
            player_unum,
            target_player_unum: None,
            target_ball_pos,
            first_ball_vel: Vec2::ZERO,
            kick_count: 0,
            duration_step,
            safety_level: SafetyLevel::Safe,
            final_action: false,
            value: 0.0,
            penalty: 0.0,
            description: category.name(),
        }
    }

    pub fn hold(player_unum: u8, ball_pos: Vec2) -> Self {
        Self::base(ActionCategory::Hold, player_unum, ball_pos, 1)
    }

    pub fn dribble(player_unum: u8, target_ball_pos: Vec2, first_ball_vel: Vec2, kick_count: u32, duration_step: u32) -> Self {
        Self { first_ball_vel, kick_count, ..Self::base(ActionCategory::Dribble, player_unum, target_ball_pos, duration_step) }
    }

    pub fn pass(
        player_unum: u8,
        receiver_unum: u8,
        target_ball_pos: Vec2,
        first_ball_vel: Vec2,
        kick_count: u32,
        duration_step: u32,
    ) -> Self {
        Self {
            target_player_unum: Some(receiver_unum),
            first_ball_vel,
            kick_count,
            ..Self::base(ActionCategory::Pass, player_unum, target_ball_pos, duration_step)
        }
    }

    /// A shot is always a final action.
    pub fn shoot(player_unum: u8, target_ball_pos: Vec2, first_ball_vel: Vec2, kick_count: u32, duration_step: u32) -> Self {
        Self {
            first_ball_vel,
            kick_count,
            final_action: true,
            ..Self::base(ActionCategory::Shoot, player_unum, target_ball_pos, duration_step)
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn with_safety(mut self, level: SafetyLevel) -> Self {
        self.safety_level = level;
        self
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn category(&self) -> ActionCategory {
        self.category
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn player_unum(&self) -> u8 {
        self.player_unum
    }

    pub fn target_player_unum(&self) -> Option<u8> {
        self.target_player_unum
    }

    pub fn target_ball_pos(&self) -> Vec2 {
        self.target_ball_pos
    }

    pub fn first_ball_vel(&self) -> Vec2 {
        self.first_ball_vel
    }

    pub fn kick_count(&self) -> u32 {
        self.kick_count
    }

    pub fn duration_step(&self) -> u32 {
        self.duration_step
    }

    pub fn safety_level(&self) -> SafetyLevel {
        self.safety_level
    }

    /// No further chaining follows this action.
    pub fn is_final_action(&self) -> bool {
        self.final_action
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    pub fn set_penalty(&mut self, penalty: f64) {
        self.penalty = penalty;
    }
}

impl fmt::Display for CooperativeAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}#{} unum={}", self.description, self.index, self.player_unum)?;
        if let Some(target) = self.target_player_unum {
            write!(f, " -> {}", target)?;
        }
        write!(
            f,
            " ({:.1}, {:.1}) {:?} value={:.2}",
            self.target_ball_pos.x, self.target_ball_pos.y, self.safety_level, self.value
        )
    }
}

//! Predicted world state after a (possibly empty) chain of actions.

use crate::geom::Vec2;
use crate::world::{BallObject, PlayerObject, WorldSnapshot};
use std::rc::Rc;

/// Immutable forecast of ball/player state `spend_time` cycles from now.
///
/// Opponents are shared between every state of one search call; only our
/// own players are copied because the ball holder moves with the ball.
#[derive(Debug, Clone)]
pub struct PredictState {
    spend_time: u32,
    ball_holder_unum: u8,
    ball: BallObject,
    our_players: Vec<PlayerObject>,
    opponents: Rc<[PlayerObject]>,
    offside_line_x: f64,
}

impl PredictState {
    /// The `firstState` of a search, built from the live snapshot.
    pub fn from_world(wm: &WorldSnapshot) -> Self {
        let opponents: Rc<[PlayerObject]> = wm.opponents.iter().copied().collect();
        let offside_line_x = offside_line_x(&opponents, wm.ball.pos.x);

        Self {
            spend_time: 0,
            ball_holder_unum: wm.ball_holder_unum(),
            ball: wm.ball,
            our_players: wm.teammates.clone(),
            opponents,
            offside_line_x,
        }
    }

    /// State after an action that takes `spend_time` cycles and leaves the ball
    /// at `ball_pos` under the control of `holder_unum`.
    pub fn after(parent: &PredictState, spend_time: u32, holder_unum: u8, ball_pos: Vec2) -> Self {
        let mut our_players = parent.our_players.clone();
        if let Some(holder) = our_players.iter_mut().find(|p| p.unum == holder_unum) {
            holder.pos = ball_pos;
            holder.vel = Vec2::ZERO;
        }

        Self {
            spend_time: parent.spend_time + spend_time,
            ball_holder_unum: holder_unum,
            ball: BallObject::at(ball_pos),
            our_players,
            opponents: Rc::clone(&parent.opponents),
            offside_line_x: parent.offside_line_x.max(ball_pos.x),
        }
    }

    /// Cycles elapsed since the first state.
    pub fn spend_time(&self) -> u32 {
        self.spend_time
    }

    pub fn ball_holder_unum(&self) -> u8 {
        self.ball_holder_unum
    }

    pub fn ball(&self) -> &BallObject {
        &self.ball
    }

    pub fn ball_holder(&self) -> Option<&PlayerObject> {
        self.teammate(self.ball_holder_unum)
    }

    pub fn teammate(&self, unum: u8) -> Option<&PlayerObject> {
        self.our_players.iter().find(|p| p.unum == unum)
    }

    pub fn our_players(&self) -> &[PlayerObject] {
        &self.our_players
    }

    pub fn opponents(&self) -> &[PlayerObject] {
        &self.opponents
    }

    /// x of the second-last opponent (or the ball if further forward).
    pub fn offside_line_x(&self) -> f64 {
        self.offside_line_x
    }

    pub fn nearest_opponent_dist(&self, pos: Vec2) -> f64 {
        self.opponents.iter().map(|o| o.pos.dist(pos)).fold(f64::INFINITY, f64::min)
    }
}

fn offside_line_x(opponents: &[PlayerObject], ball_x: f64) -> f64 {
    let mut xs: Vec<f64> = opponents.iter().map(|o| o.pos.x).collect();
    xs.sort_by(|a, b| b.total_cmp(a));
    let second_last = xs.get(1).copied().unwrap_or(0.0);
    second_last.max(ball_x).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GameTime;

    fn world() -> WorldSnapshot {
        WorldSnapshot {
            time: GameTime::new(10, 0),
            self_unum: 7,
            ball: BallObject::at(Vec2::new(0.5, 0.0)),
            teammates: vec![PlayerObject::new(7, Vec2::new(0.0, 0.0)), PlayerObject::new(9, Vec2::new(15.0, 5.0))],
            opponents: vec![
                PlayerObject::goalie(1, Vec2::new(50.0, 0.0)),
                PlayerObject::new(2, Vec2::new(30.0, 3.0)),
                PlayerObject::new(3, Vec2::new(20.0, -3.0)),
            ],
            self_kickable: true,
            kickable_teammate: None,
        }
    }

    #[test]
    fn test_first_state_from_world() {
        let state = PredictState::from_world(&world());
        assert_eq!(state.spend_time(), 0);
        assert_eq!(state.ball_holder_unum(), 7);
        assert_eq!(state.opponents().len(), 3);
        // second-last opponent is at x = 30
        assert!((state.offside_line_x() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_after_moves_holder_and_shares_opponents() {
        let first = PredictState::from_world(&world());
        let next = PredictState::after(&first, 6, 9, Vec2::new(16.0, 5.0));

        assert_eq!(next.spend_time(), 6);
        assert_eq!(next.ball_holder_unum(), 9);
        assert_eq!(next.ball_holder().unwrap().pos, Vec2::new(16.0, 5.0));
        assert_eq!(next.ball().pos, Vec2::new(16.0, 5.0));
        // parent untouched
        assert_eq!(first.teammate(9).unwrap().pos, Vec2::new(15.0, 5.0));
        assert!(std::ptr::eq(first.opponents().as_ptr(), next.opponents().as_ptr()));
    }

    #[test]
    fn test_nearest_opponent_dist() {
        let state = PredictState::from_world(&world());
        let d = state.nearest_opponent_dist(Vec2::new(20.0, 0.0));
        assert!((d - 3.0).abs() < 1e-9);
    }
}

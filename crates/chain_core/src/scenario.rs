//! Sample world snapshots for the CLI, benches and tests.

use crate::error::{ChainError, Result};
use crate::geom::{Vec2, PITCH_HALF_LENGTH, PITCH_HALF_WIDTH};
use crate::world::{BallObject, GameTime, PlayerObject, WorldSnapshot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const SCENARIO_NAMES: &[&str] = &["counter-attack", "edge-of-box"];

pub fn by_name(name: &str) -> Result<WorldSnapshot> {
    match name {
        "counter-attack" => Ok(counter_attack()),
        "edge-of-box" => Ok(edge_of_box()),
        other => Err(ChainError::UnknownScenario(other.to_string())),
    }
}

fn team(positions: &[(u8, f64, f64)]) -> Vec<PlayerObject> {
    positions
        .iter()
        .map(|&(unum, x, y)| {
            if unum == 1 {
                PlayerObject::goalie(unum, Vec2::new(x, y))
            } else {
                PlayerObject::new(unum, Vec2::new(x, y))
            }
        })
        .collect()
}

/// #7 holds the ball on the halfway line with forwards ahead.
pub fn counter_attack() -> WorldSnapshot {
    WorldSnapshot {
        time: GameTime::new(1200, 0),
        self_unum: 7,
        ball: BallObject::at(Vec2::new(0.5, 0.0)),
        teammates: team(&[
            (1, -50.0, 0.0),
            (2, -30.0, -15.0),
            (3, -32.0, -5.0),
            (4, -32.0, 5.0),
            (5, -30.0, 15.0),
            (6, -12.0, 0.0),
            (7, 0.0, 0.0),
            (8, -5.0, 18.0),
            (9, 18.0, 10.0),
            (10, 14.0, -12.0),
            (11, 22.0, -1.0),
        ]),
        opponents: team(&[
            (1, 50.0, 0.0),
            (2, 28.0, -12.0),
            (3, 30.0, -3.0),
            (4, 30.0, 6.0),
            (5, 27.0, 16.0),
            (6, 10.0, 2.0),
            (7, 8.0, -6.0),
            (8, 12.0, 20.0),
            (9, -5.0, -4.0),
            (10, -3.0, 8.0),
            (11, -15.0, 0.0),
        ]),
        self_kickable: true,
        kickable_teammate: None,
    }
}

/// #9 holds the ball 18 m out, slightly right of goal.
pub fn edge_of_box() -> WorldSnapshot {
    WorldSnapshot {
        time: GameTime::new(2400, 0),
        self_unum: 9,
        ball: BallObject::at(Vec2::new(34.5, 4.0)),
        teammates: team(&[
            (1, -45.0, 0.0),
            (2, -10.0, -20.0),
            (3, -15.0, -5.0),
            (4, -15.0, 5.0),
            (5, -10.0, 20.0),
            (6, 10.0, 0.0),
            (7, 22.0, 6.0),
            (8, 20.0, -15.0),
            (9, 34.0, 4.0),
            (10, 30.0, -8.0),
            (11, 38.0, -10.0),
        ]),
        opponents: team(&[
            (1, 50.0, 0.0),
            (2, 40.0, -16.0),
            (3, 41.0, 14.0),
            (4, 38.0, -4.0),
            (5, 30.0, 12.0),
            (6, 28.0, 0.0),
            (7, 25.0, -10.0),
            (8, 20.0, 10.0),
            (9, 10.0, -5.0),
            (10, 5.0, 8.0),
            (11, 0.0, 0.0),
        ]),
        self_kickable: true,
        kickable_teammate: None,
    }
}

/// `base` with every player jittered by up to `spread` metres.
///
/// Deterministic for a given seed.
pub fn jittered(base: &WorldSnapshot, seed: u64, spread: f64) -> WorldSnapshot {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut wm = base.clone();
    let mut jitter = |p: &mut PlayerObject| {
        let dx = rng.gen_range(-spread..=spread);
        let dy = rng.gen_range(-spread..=spread);
        p.pos.x = (p.pos.x + dx).clamp(-PITCH_HALF_LENGTH, PITCH_HALF_LENGTH);
        p.pos.y = (p.pos.y + dy).clamp(-PITCH_HALF_WIDTH, PITCH_HALF_WIDTH);
    };
    wm.teammates.iter_mut().for_each(&mut jitter);
    wm.opponents.iter_mut().for_each(&mut jitter);

    // ball stays at the holder's feet
    if let Some(pos) = wm.self_player().map(|p| p.pos) {
        wm.ball.pos = pos + Vec2::new(0.5, 0.0);
    }
    wm
}

pub const DEAD_PENALTY: f32 = -100.0;
pub const MOVE_REWARD: f32 = 5.0;
pub const BLOCKED_PENALTY: f32 = -1.0;
pub const BOMB_REWARD: f32 = 0.0;

/// What happened when an agent's action was applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Agent was already eliminated; nothing changed.
    Eliminated,
    Moved,
    /// Off the edge or into an obstacle; position unchanged.
    Blocked,
    BombPlaced,
}

pub fn reward(outcome: Outcome) -> f32 {
    match outcome {
        Outcome::Eliminated => DEAD_PENALTY,
        Outcome::Moved => MOVE_REWARD,
        Outcome::Blocked => BLOCKED_PENALTY,
        Outcome::BombPlaced => BOMB_REWARD,
    }
}

pub mod store;
pub mod table;

use rand::Rng;
use rand_distr::{Bernoulli, Distribution};
use tracing::{info, warn};

use crate::action::Action;
use crate::error::{Error, Result, StoreError};
use crate::grid::Pos;
use store::TableStore;
use table::ValueTable;

/// Scalar state for a position: `row * cols + col`.
pub fn encode_state(pos: Pos, cols: usize) -> usize {
    pos.row * cols + pos.col
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperparameters {
    pub alpha: f32,   // learning rate
    pub gamma: f32,   // discount
    pub epsilon: f32, // exploration rate
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
        }
    }
}

/// Tabular Q-learning: epsilon-greedy selection and a one-step online
/// Bellman update.
#[derive(Debug, Clone)]
pub struct AgentController {
    table: ValueTable,
    params: Hyperparameters,
    explore: Bernoulli,
}

impl AgentController {
    pub fn new(table: ValueTable, params: Hyperparameters) -> Result<Self> {
        let explore = Bernoulli::new(params.epsilon as f64).map_err(|e| Error::InvalidConfig {
            field: "epsilon",
            reason: e.to_string(),
        })?;

        Ok(Self { table, params, explore })
    }

    /// Loads the stored table for `agent_id`, falling back to a zero table
    /// when none exists or the stored one is unreadable or the wrong shape.
    pub fn restore<S: TableStore + ?Sized>(
        agent_id: usize,
        states: usize,
        params: Hyperparameters,
        store: &S,
    ) -> Result<Self> {
        let table = match store.load(agent_id).and_then(|t| match t {
            Some(table) => table.check_shape(states).map(|_| Some(table)),
            None => Ok(None),
        }) {
            Ok(Some(table)) => {
                info!(agent = agent_id + 1, "loaded value table");
                table
            }
            Ok(None) => {
                info!(agent = agent_id + 1, "no stored value table, starting fresh");
                ValueTable::zeros(states)
            }
            Err(e) => {
                warn!(agent = agent_id + 1, error = %e, "discarding stored value table");
                ValueTable::zeros(states)
            }
        };

        Self::new(table, params)
    }

    pub fn checkpoint<S: TableStore + ?Sized>(&self, agent_id: usize, store: &mut S) -> std::result::Result<(), StoreError> {
        store.save(agent_id, &self.table)
    }

    pub fn table(&self) -> &ValueTable {&self.table}

    pub fn greedy_action(&self, state: usize) -> Action {
        Action::ALL[self.table.argmax(state)]
    }

    pub fn select_action<R: Rng + ?Sized>(&self, state: usize, rng: &mut R) -> Action {
        if self.explore.sample(rng) {
            Action::ALL[rng.random_range(0..Action::COUNT)]
        } else {
            self.greedy_action(state)
        }
    }

    /// `Q[s,a] += alpha * (reward + gamma * max Q[s',.] - Q[s,a])`
    pub fn update(&mut self, state: usize, action: Action, reward: f32, next_state: usize) {
        let best_next = self.table.max(next_state);
        let current = self.table.get(state, action);
        let updated = current + self.params.alpha * (reward + self.params.gamma * best_next - current);
        self.table.set(state, action, updated);
    }
}

/// One player on the board. Vitals are reset every episode; the controller
/// (and its table) is not.
#[derive(Debug, Clone)]
pub struct Agent {
    id: usize,
    pub(crate) pos: Pos,
    pub(crate) lives: u32,
    pub(crate) score: f32,
    pub(crate) brain: AgentController,
}

impl Agent {
    pub fn new(id: usize, pos: Pos, lives: u32, brain: AgentController) -> Self {
        Self {
            id,
            pos,
            lives,
            score: 0.0,
            brain,
        }
    }

    pub fn id(&self) -> usize {self.id}
    pub fn pos(&self) -> Pos {self.pos}
    pub fn lives(&self) -> u32 {self.lives}
    pub fn score(&self) -> f32 {self.score}
    pub fn alive(&self) -> bool {self.lives > 0}
    pub fn brain(&self) -> &AgentController {&self.brain}

    /// Takes one life; returns true if that eliminated the agent.
    /// Already eliminated agents are left untouched.
    pub fn hit(&mut self) -> bool {
        if !self.alive() {
            return false;
        }
        self.lives -= 1;
        !self.alive()
    }

    pub(crate) fn respawn(&mut self, pos: Pos, lives: u32) {
        self.pos = pos;
        self.lives = lives;
        self.score = 0.0;
    }
}

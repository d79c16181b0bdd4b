use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::action::Action;
use crate::agent::store::{FileTableStore, TableStore};
use crate::agent::{encode_state, Agent, AgentController, Hyperparameters};
use crate::bomb::{Blast, BombManager};
use crate::config::Config;
use crate::error::Result;
use crate::grid::{GridWorld, Population, Pos};
use crate::reward::{reward, Outcome};
use crate::snapshot::{AgentView, BombView, Snapshot};

/// One agent's learning step within a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub agent: usize,
    pub state: usize,
    pub action: Action,
    pub outcome: Outcome,
    pub reward: f32,
    pub next_state: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub episode: u64,
    pub ticks: u64,
    pub bombs_placed: u64,
    pub explosions: u64,
    pub total_reward: f32,
}

#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub blasts: Vec<Blast>,
    pub transitions: Vec<Transition>,
    /// Set on the tick that eliminated the last agent.
    pub episode_end: Option<EpisodeSummary>,
}

#[derive(Debug, Clone, Copy, Default)]
struct EpisodeStats {
    bombs_placed: u64,
    explosions: u64,
    total_reward: f32,
}

/// Preferred start for agent `index` is (1, 1 + 3 * index), clamped to the
/// board. If that cell is blocked, the first empty cell after it in
/// row-major order (wrapping) is used instead.
pub fn spawn_point(grid: &GridWorld, index: usize) -> Pos {
    let rows = grid.rows();
    let cols = grid.cols();
    let preferred = Pos::new(1usize.min(rows - 1), (1 + 3 * index).min(cols - 1));

    let start = preferred.row * cols + preferred.col;
    (0..rows * cols)
        .map(|i| {
            let idx = (start + i) % (rows * cols);
            Pos::new(idx / cols, idx % cols)
        })
        .find(|pos| grid.is_empty_at(*pos))
        .unwrap_or(preferred)
}

/// The whole mutable world: board, bombs, agents, RNG and episode counters.
/// Drivers own the clock and call [`Simulation::advance`] or
/// [`Simulation::tick`]; nothing in here knows about frames.
pub struct Simulation<S: TableStore = FileTableStore> {
    config: Config,
    population: Population,
    grid: GridWorld,
    bombs: BombManager,
    agents: Vec<Agent>,
    store: S,
    rng: StdRng,

    episode: u64, // completed episodes
    tick: u64,    // ticks into the current episode
    accumulator: f32,
    stats: EpisodeStats,
}

impl<S: TableStore> Simulation<S> {
    pub fn new(config: Config, store: S) -> Result<Self> {
        config.validate()?;

        let rows = config.rows();
        let cols = config.cols();
        let population = Population::new(config.fill_probability, config.destructible_probability)?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let params = Hyperparameters {
            alpha: config.alpha,
            gamma: config.gamma,
            epsilon: config.epsilon,
        };

        let grid = GridWorld::generate(rows, cols, &population, &mut rng);
        let mut agents = Vec::with_capacity(config.num_agents);
        for id in 0..config.num_agents {
            let brain = AgentController::restore(id, rows * cols, params, &store)?;
            agents.push(Agent::new(id, spawn_point(&grid, id), config.starting_lives, brain));
        }

        info!(rows, cols, agents = config.num_agents, "simulation ready");

        Ok(Self {
            bombs: BombManager::new(config.fuse, config.blast_radius),
            config,
            population,
            grid,
            agents,
            store,
            rng,
            episode: 0,
            tick: 0,
            accumulator: 0.0,
            stats: EpisodeStats::default(),
        })
    }

    pub fn config(&self) -> &Config {&self.config}
    pub fn grid(&self) -> &GridWorld {&self.grid}
    pub fn bombs(&self) -> &BombManager {&self.bombs}
    pub fn agents(&self) -> &[Agent] {&self.agents}
    pub fn store(&self) -> &S {&self.store}
    pub fn episode(&self) -> u64 {self.episode}
    pub fn tick_count(&self) -> u64 {self.tick}

    pub fn is_finished(&self) -> bool {
        self.config.max_episodes.is_some_and(|max| self.episode >= max)
    }

    /// New board, no bombs, every agent back at full lives. Value tables
    /// are untouched.
    pub fn reset(&mut self) {
        self.grid = GridWorld::generate(self.grid.rows(), self.grid.cols(), &self.population, &mut self.rng);
        self.bombs.clear();
        for (i, agent) in self.agents.iter_mut().enumerate() {
            agent.respawn(spawn_point(&self.grid, i), self.config.starting_lives);
        }
        self.tick = 0;
        self.stats = EpisodeStats::default();
    }

    /// Applies `action` for agent `index` and returns what happened along
    /// with its reward. The agent's score accumulates the reward.
    pub fn apply_action(&mut self, index: usize, action: Action) -> (Outcome, f32) {
        let agent = &mut self.agents[index];

        let outcome = if !agent.alive() {
            Outcome::Eliminated
        } else {
            match action.delta() {
                Some(delta) => match self.grid.offset(agent.pos, delta, 1) {
                    Some(target) if self.grid.is_empty_at(target) => {
                        agent.pos = target;
                        Outcome::Moved
                    }
                    _ => Outcome::Blocked,
                },
                None => {
                    self.bombs.place(agent.pos, agent.id());
                    self.stats.bombs_placed += 1;
                    Outcome::BombPlaced
                }
            }
        };

        let reward = reward(outcome);
        agent.score += reward;
        self.stats.total_reward += reward;
        (outcome, reward)
    }

    /// Runs exactly one tick: bombs first, then every agent still alive
    /// acts and learns, then the episode ends if nobody is left.
    pub fn tick(&mut self) -> Result<TickReport> {
        if self.is_finished() {
            return Ok(TickReport::default());
        }
        self.tick += 1;

        let blasts = self.bombs.tick(self.config.tick_interval, &mut self.grid, &mut self.agents)?;
        self.stats.explosions += blasts.len() as u64;

        let cols = self.grid.cols();
        let mut transitions = Vec::with_capacity(self.agents.len());
        for i in 0..self.agents.len() {
            if !self.agents[i].alive() {
                continue;
            }

            let state = encode_state(self.agents[i].pos, cols);
            let action = self.agents[i].brain.select_action(state, &mut self.rng);
            let (outcome, reward) = self.apply_action(i, action);
            let next_state = encode_state(self.agents[i].pos, cols);
            self.agents[i].brain.update(state, action, reward, next_state);

            transitions.push(Transition {
                agent: i,
                state,
                action,
                outcome,
                reward,
                next_state,
            });
        }

        let episode_end = if self.agents.iter().all(|agent| !agent.alive()) {
            Some(self.finish_episode())
        } else {
            None
        };

        Ok(TickReport {
            blasts,
            transitions,
            episode_end,
        })
    }

    /// Wall-clock gate: runs one tick once `tick_interval` has accumulated.
    /// Any leftover time is dropped so steps stay uniform.
    pub fn advance(&mut self, elapsed: f32) -> Result<Option<TickReport>> {
        self.accumulator += elapsed;
        if self.accumulator < self.config.tick_interval {
            return Ok(None);
        }
        self.accumulator = 0.0;

        self.tick().map(Some)
    }

    pub fn step(&mut self, dt: f32) -> Result<Snapshot> {
        self.advance(dt)?;
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            episode: self.episode,
            tick: self.tick,
            grid: self.grid.to_rows(),
            agents: self
                .agents
                .iter()
                .map(|agent| AgentView {
                    id: agent.id(),
                    pos: agent.pos(),
                    alive: agent.alive(),
                    score: agent.score(),
                    lives: agent.lives(),
                })
                .collect(),
            bombs: self
                .bombs
                .bombs()
                .iter()
                .map(|bomb| BombView { pos: bomb.pos, fuse: bomb.fuse })
                .collect(),
        }
    }

    fn finish_episode(&mut self) -> EpisodeSummary {
        self.episode += 1;

        let summary = EpisodeSummary {
            episode: self.episode,
            ticks: self.tick,
            bombs_placed: self.stats.bombs_placed,
            explosions: self.stats.explosions,
            total_reward: self.stats.total_reward,
        };
        let scores: Vec<f32> = self.agents.iter().map(|agent| agent.score()).collect();
        info!(
            episode = summary.episode,
            ticks = summary.ticks,
            ?scores,
            "episode finished, resetting"
        );

        for agent in &self.agents {
            if let Err(e) = agent.brain().checkpoint(agent.id(), &mut self.store) {
                warn!(agent = agent.id() + 1, error = %e, "failed to save value table");
            }
        }

        self.reset();
        summary
    }
}

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const WORLD_WIDTH: u32 = 800; // pixels
pub const WORLD_HEIGHT: u32 = 600; // pixels
pub const CELL_SIZE: u32 = 40; // pixels
pub const STARTING_LIVES: u32 = 3;

/// Everything the simulation needs at construction. Nothing here changes
/// mid-run.
#[derive(Debug, Clone)]
pub struct Config {
    pub num_agents: usize,

    pub world_width: u32,
    pub world_height: u32,
    pub cell_size: u32,

    pub alpha: f32,
    pub gamma: f32,
    pub epsilon: f32,

    pub tick_interval: f32, // seconds
    pub fuse: f32,          // seconds
    pub blast_radius: usize,

    pub fill_probability: f64,         // cell is non-empty
    pub destructible_probability: f64, // non-empty cell is destructible

    pub starting_lives: u32,
    pub seed: Option<u64>,
    pub max_episodes: Option<u64>,
    pub table_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_agents: 2,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            cell_size: CELL_SIZE,
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
            tick_interval: 0.5,
            fuse: 3.0,
            blast_radius: 2,
            fill_probability: 0.2,
            destructible_probability: 0.7,
            starting_lives: STARTING_LIVES,
            seed: None,
            max_episodes: None,
            table_dir: PathBuf::from("tables"),
        }
    }
}

impl Config {
    pub fn rows(&self) -> usize {(self.world_height / self.cell_size) as usize}
    pub fn cols(&self) -> usize {(self.world_width / self.cell_size) as usize}

    /// Defaults overlaid with any parsable `BOMBERS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each `BOMBERS_*`
    /// key. Values that fail to parse leave the default in place.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
            lookup(key).and_then(|val| val.parse::<T>().ok())
        }

        let mut config = Self::default();

        if let Some(n) = parsed(&lookup, "BOMBERS_AGENTS") {
            config.num_agents = n;
        }
        if let Some(seed) = parsed(&lookup, "BOMBERS_SEED") {
            config.seed = Some(seed);
        }
        if let Some(max) = parsed(&lookup, "BOMBERS_MAX_EPISODES") {
            config.max_episodes = Some(max);
        }
        if let Some(epsilon) = parsed(&lookup, "BOMBERS_EPSILON") {
            config.epsilon = epsilon;
        }
        if let Some(interval) = parsed(&lookup, "BOMBERS_TICK_INTERVAL") {
            config.tick_interval = interval;
        }
        if let Some(dir) = lookup("BOMBERS_TABLE_DIR") {
            config.table_dir = PathBuf::from(dir);
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
            Error::InvalidConfig { field, reason: reason.into() }
        }

        if self.num_agents == 0 {
            return Err(invalid("num_agents", "must be at least 1"));
        }
        if self.cell_size == 0 {
            return Err(invalid("cell_size", "must be positive"));
        }
        if self.rows() == 0 || self.cols() == 0 {
            return Err(invalid("world_width/world_height", "must fit at least one cell"));
        }

        for (field, value) in [("alpha", self.alpha), ("gamma", self.gamma), ("epsilon", self.epsilon)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("must be in [0, 1], got {}", value)));
            }
        }
        for (field, value) in [
            ("fill_probability", self.fill_probability),
            ("destructible_probability", self.destructible_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("must be in [0, 1], got {}", value)));
            }
        }

        if !(self.tick_interval > 0.0) {
            return Err(invalid("tick_interval", "must be positive"));
        }
        if !(self.fuse > 0.0) {
            return Err(invalid("fuse", "must be positive"));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "must be at least 1"));
        }

        Ok(())
    }
}

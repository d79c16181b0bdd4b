pub mod action;
pub mod config;
pub mod error;
pub mod grid;
pub mod reward;

pub use action::Action;
pub use config::Config;
pub use error::{
    Error,
    StoreError,
};
pub use grid::{
    Cell,
    GridWorld,
    Pos,
};

pub mod bomb;

pub use bomb::{
    Blast,
    Bomb,
    BombManager,
};

pub mod agent;

pub use agent::{
    Agent,
    AgentController,
    Hyperparameters,
};
pub use agent::table::ValueTable;
pub use agent::store::{
    TableStore,
    FileTableStore,
    MemoryTableStore,
};

pub mod snapshot;
pub mod simulation;

pub use snapshot::Snapshot;
pub use simulation::{
    Simulation,
    EpisodeSummary,
    TickReport,
};

pub mod render;

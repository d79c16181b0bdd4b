use crate::grid::{Cell, Pos};

#[derive(Debug, Clone, PartialEq)]
pub struct AgentView {
    pub id: usize,
    pub pos: Pos,
    pub alive: bool,
    pub score: f32,
    pub lives: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BombView {
    pub pos: Pos,
    pub fuse: f32,
}

/// Read-only copy of the board taken between ticks. Owns its data, so a
/// renderer can hold on to it while the simulation keeps running.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub episode: u64,
    pub tick: u64,
    pub grid: Vec<Vec<Cell>>,
    pub agents: Vec<AgentView>,
    pub bombs: Vec<BombView>,
}

impl Snapshot {
    pub fn rows(&self) -> usize {self.grid.len()}
    pub fn cols(&self) -> usize {self.grid.first().map_or(0, |row| row.len())}
}

use tracing::debug;

use crate::agent::Agent;
use crate::error::Result;
use crate::grid::{Cell, GridWorld, Pos};

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[derive(Debug, Clone, PartialEq)]
pub struct Bomb {
    pub pos: Pos,
    pub owner: usize, // agent id
    pub fuse: f32,    // seconds left
}

/// Result of one explosion.
#[derive(Debug, Clone, PartialEq)]
pub struct Blast {
    pub origin: Pos,
    pub owner: usize,
    pub affected: Vec<Pos>,
    /// Ids of agents this blast took the last life from.
    pub eliminated: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct BombManager {
    bombs: Vec<Bomb>,
    fuse: f32,
    radius: usize,
}

impl BombManager {
    pub fn new(fuse: f32, radius: usize) -> Self {
        Self {
            bombs: Vec::new(),
            fuse,
            radius,
        }
    }

    pub fn bombs(&self) -> &[Bomb] {&self.bombs}
    pub fn len(&self) -> usize {self.bombs.len()}
    pub fn is_empty(&self) -> bool {self.bombs.is_empty()}

    /// No per-owner limit.
    pub fn place(&mut self, pos: Pos, owner: usize) {
        self.bombs.push(Bomb {
            pos,
            owner,
            fuse: self.fuse,
        });
    }

    pub fn clear(&mut self) {
        self.bombs.clear();
    }

    /// Burns `dt` off every fuse, then detonates (and drops) every bomb that
    /// reached zero, in placement order.
    pub fn tick(&mut self, dt: f32, grid: &mut GridWorld, agents: &mut [Agent]) -> Result<Vec<Blast>> {
        let (expired, live): (Vec<Bomb>, Vec<Bomb>) = std::mem::take(&mut self.bombs)
            .into_iter()
            .map(|mut bomb| {
                bomb.fuse -= dt;
                bomb
            })
            .partition(|bomb| bomb.fuse <= 0.0);
        self.bombs = live;

        let mut blasts = Vec::with_capacity(expired.len());
        for bomb in expired {
            let affected = self.explode(&bomb, grid)?;
            let eliminated = damage(&affected, agents);
            debug!(
                origin = %bomb.pos,
                owner = bomb.owner + 1,
                cells = affected.len(),
                eliminated = eliminated.len(),
                "bomb exploded"
            );
            blasts.push(Blast {
                origin: bomb.pos,
                owner: bomb.owner,
                affected,
                eliminated,
            });
        }

        Ok(blasts)
    }

    /// Plus-shaped blast. Each arm stops before an indestructible cell, or on
    /// a destructible one, which is cleared.
    pub fn explode(&self, bomb: &Bomb, grid: &mut GridWorld) -> Result<Vec<Pos>> {
        let mut affected = vec![bomb.pos];

        for direction in DIRECTIONS {
            for distance in 1..=self.radius {
                let Some(pos) = grid.offset(bomb.pos, direction, distance) else {
                    break;
                };
                match grid.cell_at(pos)? {
                    Cell::Indestructible => break,
                    Cell::Destructible => {
                        affected.push(pos);
                        grid.set_cell(pos, Cell::Empty)?;
                        break;
                    }
                    Cell::Empty => affected.push(pos),
                }
            }
        }

        Ok(affected)
    }
}

/// One life off every live agent standing in `affected`. Returns the ids of
/// agents eliminated by this hit.
pub fn damage(affected: &[Pos], agents: &mut [Agent]) -> Vec<usize> {
    agents
        .iter_mut()
        .filter(|agent| agent.alive() && affected.contains(&agent.pos()))
        .filter_map(|agent| agent.hit().then(|| agent.id()))
        .collect()
}

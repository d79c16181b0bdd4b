use std::fmt;

use rand::Rng;
use rand_distr::{Bernoulli, Distribution};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Destructible,
    Indestructible,
}

/// Per-cell draws used by [`GridWorld::generate`].
#[derive(Debug, Clone, Copy)]
pub struct Population {
    filled: Bernoulli,
    destructible: Bernoulli,
}

impl Population {
    pub fn new(fill_probability: f64, destructible_probability: f64) -> Result<Self> {
        let filled = Bernoulli::new(fill_probability).map_err(|e| Error::InvalidConfig {
            field: "fill_probability",
            reason: e.to_string(),
        })?;
        let destructible = Bernoulli::new(destructible_probability).map_err(|e| Error::InvalidConfig {
            field: "destructible_probability",
            reason: e.to_string(),
        })?;

        Ok(Self { filled, destructible })
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        if !self.filled.sample(rng) {
            Cell::Empty
        } else if self.destructible.sample(rng) {
            Cell::Destructible
        } else {
            Cell::Indestructible
        }
    }
}

/// Row-major cell matrix. Only positions inside `[0, rows) x [0, cols)` are
/// ever handed out by the grid itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridWorld {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl GridWorld {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn generate<R: Rng + ?Sized>(rows: usize, cols: usize, population: &Population, rng: &mut R) -> Self {
        let cells = (0..rows * cols).map(|_| population.draw(rng)).collect();
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {self.rows}
    pub fn cols(&self) -> usize {self.cols}

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn index(&self, pos: Pos) -> Result<usize> {
        if !self.in_bounds(pos) {
            return Err(Error::OutOfBounds { pos, rows: self.rows, cols: self.cols });
        }
        Ok(pos.row * self.cols + pos.col)
    }

    pub fn cell_at(&self, pos: Pos) -> Result<Cell> {
        Ok(self.cells[self.index(pos)?])
    }

    pub fn set_cell(&mut self, pos: Pos, cell: Cell) -> Result<()> {
        let idx = self.index(pos)?;
        self.cells[idx] = cell;
        Ok(())
    }

    pub fn is_empty_at(&self, pos: Pos) -> bool {
        matches!(self.cell_at(pos), Ok(Cell::Empty))
    }

    /// Cell reached by walking `distance` steps along `(dr, dc)`, or `None`
    /// once the walk leaves the board.
    pub fn offset(&self, pos: Pos, (dr, dc): (isize, isize), distance: usize) -> Option<Pos> {
        let row = pos.row.checked_add_signed(dr * distance as isize)?;
        let col = pos.col.checked_add_signed(dc * distance as isize)?;
        let next = Pos::new(row, col);
        self.in_bounds(next).then_some(next)
    }

    /// Row-by-row copy of the cell matrix, for presentation.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.cols.max(1)).map(|row| row.to_vec()).collect()
    }

    pub fn cells(&self) -> &[Cell] {&self.cells}
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_cell_at_out_of_bounds() {
        let grid = GridWorld::empty(3, 4);

        assert_eq!(grid.cell_at(Pos::new(2, 3)).unwrap(), Cell::Empty);
        assert!(matches!(grid.cell_at(Pos::new(3, 0)), Err(Error::OutOfBounds { .. })));
        assert!(matches!(grid.cell_at(Pos::new(0, 4)), Err(Error::OutOfBounds { .. })));
    }

    #[test]
    fn test_set_cell() {
        let mut grid = GridWorld::empty(3, 3);
        grid.set_cell(Pos::new(1, 1), Cell::Destructible).unwrap();
        assert_eq!(grid.cell_at(Pos::new(1, 1)).unwrap(), Cell::Destructible);

        grid.set_cell(Pos::new(1, 1), Cell::Empty).unwrap();
        assert!(grid.is_empty_at(Pos::new(1, 1)));

        assert!(grid.set_cell(Pos::new(5, 5), Cell::Empty).is_err());
    }

    #[test]
    fn test_offset_stays_on_board() {
        let grid = GridWorld::empty(3, 3);

        assert_eq!(grid.offset(Pos::new(0, 0), (0, 1), 2), Some(Pos::new(0, 2)));
        assert_eq!(grid.offset(Pos::new(0, 0), (-1, 0), 1), None);
        assert_eq!(grid.offset(Pos::new(2, 2), (0, 1), 1), None);
        assert_eq!(grid.offset(Pos::new(1, 1), (1, 0), 1), Some(Pos::new(2, 1)));
    }

    #[test]
    fn test_generate_matches_probabilities() {
        let population = Population::new(0.2, 0.7).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let mut total = 0usize;
        let mut filled = 0usize;
        let mut destructible = 0usize;

        for _ in 0..20 {
            let grid = GridWorld::generate(50, 50, &population, &mut rng);
            assert_eq!(grid.cells().len(), 2500);

            for cell in grid.cells() {
                total += 1;
                match cell {
                    Cell::Empty => {}
                    Cell::Destructible => {
                        filled += 1;
                        destructible += 1;
                    }
                    Cell::Indestructible => filled += 1,
                }
            }
        }

        let fill_rate = filled as f64 / total as f64;
        let destructible_rate = destructible as f64 / filled as f64;
        assert!((fill_rate - 0.2).abs() < 0.02, "fill rate {}", fill_rate);
        assert!((destructible_rate - 0.7).abs() < 0.03, "destructible rate {}", destructible_rate);
    }

    #[test]
    fn test_generate_extremes() {
        let mut rng = StdRng::seed_from_u64(1);

        let grid = GridWorld::generate(4, 4, &Population::new(0.0, 0.7).unwrap(), &mut rng);
        assert!(grid.cells().iter().all(|c| *c == Cell::Empty));

        let grid = GridWorld::generate(4, 4, &Population::new(1.0, 0.0).unwrap(), &mut rng);
        assert!(grid.cells().iter().all(|c| *c == Cell::Indestructible));
    }

    #[test]
    fn test_population_rejects_bad_probability() {
        assert!(Population::new(1.2, 0.5).is_err());
        assert!(Population::new(0.5, -0.5).is_err());
    }
}

use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::snake::{Direction, Snake};

/// A board position as (column, row). Signed so a step off the edge is representable.
pub type Cell = (i16, i16);

pub const SPAWN_MARGIN: i16 = 4;
pub const SPAWN_LENGTH: usize = 3;

// Uniform resamples before falling back to enumerating the free cells
const FOOD_RESAMPLE_LIMIT: usize = 64;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: i16,
}

impl Grid {
    pub fn new(size: i16) -> Self {
        assert!(size > 2 * SPAWN_MARGIN, "grid side {} leaves no room for the spawn margin", size);
        Grid { size }
    }

    pub fn size(&self) -> i16 {
        self.size
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.size).contains(&cell.0) && (0..self.size).contains(&cell.1)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        (rng.gen_range(0..self.size), rng.gen_range(0..self.size))
    }

    /// Picks a uniformly random cell the snake does not occupy, or `None` when
    /// the snake fills the whole board.
    pub fn random_food_cell<R: Rng + ?Sized>(&self, rng: &mut R, snake: &Snake) -> Option<Cell> {
        for _ in 0..FOOD_RESAMPLE_LIMIT {
            let cell = self.random_cell(rng);
            if !snake.occupies(cell) {
                return Some(cell);
            }
        }

        let free: Vec<Cell> = self.cells().filter(|cell| !snake.occupies(*cell)).collect();
        let res = free.choose(rng).copied();

        if res.is_none() {
            warn!("no free cell left on a {0}x{0} board", self.size);
        }

        res
    }

    pub fn random_snake_spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> Snake {
        let anchor = (
            rng.gen_range(SPAWN_MARGIN..self.size - SPAWN_MARGIN),
            rng.gen_range(SPAWN_MARGIN..self.size - SPAWN_MARGIN),
        );
        let direction = *Direction::ALL.choose(rng).unwrap_or(&Direction::Right);

        Snake::new(anchor, SPAWN_LENGTH, direction)
    }
}

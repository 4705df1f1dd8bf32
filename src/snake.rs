use std::collections::VecDeque;

use crate::grid::{Cell, Grid};
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    Wall,
    Body
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    /// `old_tail` is `None` on a growth step.
    Moved { new_head: Cell, old_tail: Option<Cell> },
    Crashed(Crash)
}

impl Direction {
    pub const ALL: [Direction; 4] = [Right, Left, Down, Up];

    pub fn delta(self) -> (i16, i16) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite_of(self, other: Direction) -> bool {
        let (dx, dy) = self.delta();
        let (ox, oy) = other.delta();
        dx == -ox && dy == -oy
    }
}

pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Lays out `size` cells in a straight line behind `head`.
    pub fn new(head: Cell, size: usize, direction: Direction) -> Self {
        let diff = direction.delta();

        let body = (0..size as i16)
            .map(|i| (head.0 - diff.0 * i, head.1 - diff.1 * i))
            .collect();
        Snake { body, direction, pending_direction: direction }
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Cell>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least a head");
        debug_assert!(body.windows(2).all(|w| (w[0].0 - w[1].0).abs() + (w[0].1 - w[1].1).abs() == 1));

        Snake { body: body.into(), direction, pending_direction: direction }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn submit_direction(&mut self, candidate: Direction) -> bool {
        if candidate.is_opposite_of(self.direction) {
            return false;
        }

        self.pending_direction = candidate;
        true
    }

    /// Advances one cell along the buffered direction. The body is left untouched
    /// on a crash. Self-collision is checked against the whole body, tail
    /// included, before the tail moves.
    pub fn move_step(&mut self, grid: &Grid, food: Cell) -> MoveResult {
        self.direction = self.pending_direction;

        let (dx, dy) = self.direction.delta();
        let old_head = self.head();
        let new_head = (old_head.0 + dx, old_head.1 + dy);

        if !grid.contains(new_head) {
            return Crashed(Crash::Wall);
        }
        if self.occupies(new_head) {
            return Crashed(Crash::Body);
        }

        self.body.push_front(new_head);

        if new_head == food {
            Moved { new_head, old_tail: None }
        } else {
            let old_tail = self.body.pop_back();
            Moved { new_head, old_tail }
        }
    }
}

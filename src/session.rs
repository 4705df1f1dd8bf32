use std::cmp::max;

use log::{debug, info, trace};
use rand::rngs::StdRng;

use crate::grid::{Cell, Grid};
use crate::snake::{Crash, Direction, MoveResult, Snake};

pub const POINTS_PER_FOOD: u32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Moved,
    Ate,
    Crashed(Crash),
    /// The snake filled every cell.
    Cleared,
}

pub struct Snapshot<'a> {
    pub grid: Grid,
    pub snake: &'a Snake,
    pub food: Option<Cell>,
    pub score: u32,
    pub high_score: u32,
    pub status: Status,
    pub cleared: bool,
}

pub struct Session {
    grid: Grid,
    rng: StdRng,
    snake: Snake,
    food: Cell,
    score: u32,
    high_score: u32,
    status: Status,
    cleared: bool,
}

impl Session {
    pub fn new(grid: Grid, mut rng: StdRng) -> Self {
        let (snake, food) = spawn(&grid, &mut rng);
        Self::with_entities(grid, rng, snake, food)
    }

    pub fn with_entities(grid: Grid, rng: StdRng, snake: Snake, food: Cell) -> Self {
        debug_assert!(!snake.occupies(food));

        Session {
            grid,
            rng,
            snake,
            food,
            score: 0,
            high_score: 0,
            status: Status::NotStarted,
            cleared: false,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn start(&mut self) -> bool {
        self.transition(Status::NotStarted, Status::Playing, "start")
    }

    pub fn pause(&mut self) -> bool {
        self.transition(Status::Playing, Status::Paused, "pause")
    }

    /// Only a paused game resumes; a finished one stays finished.
    pub fn resume(&mut self) -> bool {
        self.transition(Status::Paused, Status::Playing, "resume")
    }

    // High score carries over
    pub fn reset(&mut self) {
        let (snake, food) = spawn(&self.grid, &mut self.rng);
        self.snake = snake;
        self.food = food;
        self.score = 0;
        self.cleared = false;
        self.status = Status::NotStarted;

        info!("session reset, best so far {}", self.high_score);
    }

    pub fn submit_direction(&mut self, dir: Direction) -> bool {
        if self.status != Status::Playing {
            trace!("turn {:?} ignored while {:?}", dir, self.status);
            return false;
        }

        let accepted = self.snake.submit_direction(dir);
        if !accepted {
            trace!("reversal {:?} refused while heading {:?}", dir, self.snake.direction());
        }
        accepted
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.status != Status::Playing {
            return TickOutcome::Idle;
        }

        match self.snake.move_step(&self.grid, self.food) {
            MoveResult::Crashed(crash) => {
                info!("crashed into {:?} at {:?} with score {}", crash, self.snake.head(), self.score);
                self.finish();
                TickOutcome::Crashed(crash)
            }
            MoveResult::Moved { old_tail: Some(_), .. } => TickOutcome::Moved,
            MoveResult::Moved { new_head, old_tail: None } => {
                self.score += POINTS_PER_FOOD;
                debug!("ate food at {:?}, length {}, score {}", new_head, self.snake.len(), self.score);

                match self.grid.random_food_cell(&mut self.rng, &self.snake) {
                    Some(food) => {
                        self.food = food;
                        TickOutcome::Ate
                    }
                    None => {
                        info!("board cleared with score {}", self.score);
                        self.cleared = true;
                        self.finish();
                        TickOutcome::Cleared
                    }
                }
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.grid,
            snake: &self.snake,
            food: if self.cleared { None } else { Some(self.food) },
            score: self.score,
            high_score: self.high_score,
            status: self.status,
            cleared: self.cleared,
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn finish(&mut self) {
        self.high_score = max(self.high_score, self.score);
        self.status = Status::GameOver;
    }

    fn transition(&mut self, from: Status, to: Status, action: &str) -> bool {
        if self.status != from {
            trace!("{} ignored while {:?}", action, self.status);
            return false;
        }

        info!("{}: {:?} -> {:?}", action, from, to);
        self.status = to;
        true
    }
}

fn spawn(grid: &Grid, rng: &mut StdRng) -> (Snake, Cell) {
    let snake = grid.random_snake_spawn(rng);
    // A fresh 3-cell snake can't cover a board of at least 9x9
    let food = grid.random_food_cell(rng, &snake).expect("fresh snake leaves free cells");
    (snake, food)
}

use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use log::{error, info};
use rand::rngs::StdRng;

use crate::config::Config;
use crate::grid::Grid;
use crate::input::{action_for, Action};
use crate::session::{Session, Status, TickOutcome};
use crate::term::{screen_size, TermManager};
use crate::timer::TickTimer;

// How long to wait for input while no tick is scheduled
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct SnakeGame {
    session: Session,
    timer: TickTimer,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: &Config, rng: StdRng) -> Self {
        let grid = Grid::new(config.grid_size);
        SnakeGame {
            session: Session::new(grid, rng),
            timer: TickTimer::new(config.tick_period()),
            term: TermManager::new(),
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        let grid = self.session.snapshot().grid;
        if !self.term.fits(&grid).context("reading terminal size")? {
            let (w, h) = screen_size(&grid);
            bail!("terminal must be at least {}x{} for a {} cell board", w, h, grid.size());
        }

        self.term.setup().context("setting up terminal")?;
        self.render()
    }

    pub fn play(&mut self) -> Result<()> {
        loop {
            let timeout = self.timer.time_until(Instant::now()).unwrap_or(IDLE_POLL);

            if let Some(ev) = self.term.poll_key(timeout).context("reading input")? {
                if let Some(action) = action_for(&ev) {
                    if handle_action(&mut self.session, &mut self.timer, action, Instant::now()) == Flow::Quit {
                        info!("quit with best score {}", self.session.high_score());
                        return Ok(());
                    }
                    self.render()?;
                }
            }

            if self.timer.fire(Instant::now()) {
                run_tick(&mut self.session, &mut self.timer);
                self.render()?;
            }
        }
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.term.restore().context("restoring terminal")
    }

    ///////////////////////////////////////////////////////////////////////////

    fn render(&mut self) -> Result<()> {
        self.term.draw(&self.session.snapshot()).context("drawing frame")
    }
}

// Keeps the tick timer armed exactly while the session is playing
pub fn handle_action(session: &mut Session, timer: &mut TickTimer, action: Action, now: Instant) -> Flow {
    let before = session.status();

    match action {
        Action::Turn(dir) => {
            session.submit_direction(dir);
        }
        Action::Confirm => match before {
            Status::NotStarted => {
                session.start();
            }
            Status::Paused => {
                session.resume();
            }
            Status::GameOver => session.reset(),
            Status::Playing => {}
        },
        Action::TogglePause => {
            if !session.pause() {
                session.resume();
            }
        }
        Action::Reset => session.reset(),
        Action::Quit => return Flow::Quit,
    }

    sync_timer(timer, before, session.status(), now);
    Flow::Continue
}

pub fn run_tick(session: &mut Session, timer: &mut TickTimer) -> TickOutcome {
    let outcome = session.tick();
    if session.status() != Status::Playing {
        timer.cancel();
    }
    outcome
}

/// Combines the game result with the terminal restore, keeping the game's
/// error when both fail.
pub fn settle(res: Result<()>, restored: Result<()>) -> Result<()> {
    match (res, restored) {
        (Err(e), Err(restore_err)) => {
            error!("{:#}", restore_err);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), restored) => restored,
    }
}

fn sync_timer(timer: &mut TickTimer, before: Status, after: Status, now: Instant) {
    if after != Status::Playing {
        timer.cancel();
    } else if before != Status::Playing || !timer.is_armed() {
        timer.arm(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::snake::{Direction, Snake};
    use rand::SeedableRng;

    const PERIOD: Duration = Duration::from_millis(120);

    fn fixture(body: Vec<Cell>, dir: Direction, food: Cell) -> (Session, TickTimer) {
        let snake = Snake::from_body(body, dir);
        let session = Session::with_entities(Grid::new(15), StdRng::seed_from_u64(2), snake, food);
        (session, TickTimer::new(PERIOD))
    }

    #[test]
    fn starting_arms_the_timer() {
        let (mut session, mut timer) = fixture(vec![(7, 7), (6, 7), (5, 7)], Direction::Right, (0, 0));
        let now = Instant::now();

        assert!(!timer.is_armed());
        handle_action(&mut session, &mut timer, Action::Confirm, now);

        assert_eq!(session.status(), Status::Playing);
        assert!(timer.is_armed());
        assert!(timer.fire(now + PERIOD));
    }

    #[test]
    fn pausing_twice_is_like_pausing_once() {
        let (mut session, mut timer) = fixture(vec![(7, 7), (6, 7), (5, 7)], Direction::Right, (0, 0));
        let now = Instant::now();
        handle_action(&mut session, &mut timer, Action::Confirm, now);

        assert!(session.pause());
        sync_timer(&mut timer, Status::Playing, session.status(), now);
        assert!(!session.pause());
        sync_timer(&mut timer, Status::Paused, session.status(), now);

        assert_eq!(session.status(), Status::Paused);
        assert!(!timer.is_armed());
        assert!(!timer.fire(now + PERIOD * 3));
    }

    #[test]
    fn toggle_pause_round_trip_rearms_once() {
        let (mut session, mut timer) = fixture(vec![(7, 7), (6, 7), (5, 7)], Direction::Right, (0, 0));
        let start = Instant::now();
        handle_action(&mut session, &mut timer, Action::Confirm, start);

        handle_action(&mut session, &mut timer, Action::TogglePause, start);
        assert_eq!(session.status(), Status::Paused);
        assert!(!timer.is_armed());

        let later = start + PERIOD * 10;
        handle_action(&mut session, &mut timer, Action::TogglePause, later);
        assert_eq!(session.status(), Status::Playing);
        assert_eq!(timer.time_until(later), Some(PERIOD));
    }

    #[test]
    fn crash_stops_the_timer_and_confirm_resets() {
        let (mut session, mut timer) = fixture(vec![(0, 0), (1, 0), (2, 0)], Direction::Left, (9, 9));
        let now = Instant::now();
        handle_action(&mut session, &mut timer, Action::Confirm, now);

        assert_eq!(run_tick(&mut session, &mut timer), TickOutcome::Crashed(crate::snake::Crash::Wall));
        assert!(!timer.is_armed());

        // Resuming a finished game is refused
        handle_action(&mut session, &mut timer, Action::TogglePause, now);
        assert_eq!(session.status(), Status::GameOver);
        assert!(!timer.is_armed());

        handle_action(&mut session, &mut timer, Action::Confirm, now);
        assert_eq!(session.status(), Status::NotStarted);
        assert!(!timer.is_armed());
    }

    #[test]
    fn reset_mid_game_cancels_the_timer() {
        let (mut session, mut timer) = fixture(vec![(7, 7), (6, 7), (5, 7)], Direction::Right, (0, 0));
        let now = Instant::now();
        handle_action(&mut session, &mut timer, Action::Confirm, now);

        handle_action(&mut session, &mut timer, Action::Reset, now);

        assert_eq!(session.status(), Status::NotStarted);
        assert!(!timer.is_armed());
        assert_eq!(session.tick(), TickOutcome::Idle);
    }

    #[test]
    fn game_error_wins_over_restore_error() {
        let res = settle(Err(anyhow::anyhow!("drawing frame")), Err(anyhow::anyhow!("restoring terminal")));
        assert_eq!(res.unwrap_err().to_string(), "drawing frame");

        let res = settle(Ok(()), Err(anyhow::anyhow!("restoring terminal")));
        assert_eq!(res.unwrap_err().to_string(), "restoring terminal");

        assert!(settle(Ok(()), Ok(())).is_ok());
        assert_eq!(settle(Err(anyhow::anyhow!("reading input")), Ok(())).unwrap_err().to_string(), "reading input");
    }

    #[test]
    fn quit_ends_the_loop() {
        let (mut session, mut timer) = fixture(vec![(7, 7), (6, 7), (5, 7)], Direction::Right, (0, 0));
        assert_eq!(handle_action(&mut session, &mut timer, Action::Quit, Instant::now()), Flow::Quit);
    }

    #[test]
    fn turns_reach_the_snake() {
        let (mut session, mut timer) = fixture(vec![(7, 7), (6, 7), (5, 7)], Direction::Right, (0, 0));
        let now = Instant::now();
        handle_action(&mut session, &mut timer, Action::Confirm, now);

        handle_action(&mut session, &mut timer, Action::Turn(Direction::Down), now);
        run_tick(&mut session, &mut timer);

        assert_eq!(session.snapshot().snake.head(), (7, 8));
        assert!(timer.is_armed());
    }
}

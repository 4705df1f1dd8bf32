use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyEvent, poll, read};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::grid::{Cell, Grid};
use crate::session::{Snapshot, Status};
use crate::snake::Direction::{self, *};

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

// Terminal glyphs are about twice as tall as wide, so a cell spans two columns
const CELL_WIDTH: TermInt = 2;
// Row 0 holds the score line, the board border starts below it
const BOARD_TOP: TermInt = 1;

const SNAKE_BODY: &str = "██";
const DEAD_SNAKE: &str = "XX";
const FOOD: &str = "()";
const SNAKE_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Red;

pub struct TermManager {
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), active: false }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        self.active = true;
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)?;
        terminal::enable_raw_mode()
    }

    /// No-op unless `setup` ran.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn fits(&self, grid: &Grid) -> io::Result<bool> {
        let (width, height) = terminal::size()?;
        let (need_w, need_h) = screen_size(grid);
        Ok(width >= need_w && height >= need_h)
    }

    pub fn poll_key(&self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !poll(timeout)? {
            return Ok(None);
        }

        match read()? {
            Event::Key(ev) => Ok(Some(ev)),
            _ => Ok(None),
        }
    }

    pub fn draw(&mut self, snap: &Snapshot) -> io::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;

        self.print_at((0, 0), &status_line(snap))?;
        self.draw_borders(&snap.grid)?;

        if let Some(food) = snap.food {
            queue!(self.stdout, style::SetForegroundColor(FOOD_COLOR))?;
            self.print_at(screen_pos(food), FOOD)?;
        }

        let dead = snap.status == Status::GameOver && !snap.cleared;
        queue!(self.stdout, style::SetForegroundColor(SNAKE_COLOR))?;
        for (i, pos) in snap.snake.body().iter().enumerate() {
            let glyph = if dead {
                DEAD_SNAKE
            } else if i == 0 {
                head_glyph(snap.snake.direction())
            } else {
                SNAKE_BODY
            };
            self.print_at(screen_pos(*pos), glyph)?;
        }
        queue!(self.stdout, style::ResetColor)?;

        let lines = message_lines(snap);
        if !lines.is_empty() {
            self.show_message(&snap.grid, &lines)?;
        }

        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self, grid: &Grid) -> io::Result<()> {
        let (width, bottom) = screen_size(grid);
        let end_x = width - 1;
        let end_y = bottom - 1;

        for x in 0..width {
            let ch = if x == 0 || x == end_x {"+"} else {"-"};
            self.print_at((x, BOARD_TOP), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in BOARD_TOP + 1..end_y {
            self.print_at((0, y), "|")?;
            self.print_at((end_x, y), "|")?;
        }

        Ok(())
    }

    fn show_message(&mut self, grid: &Grid, lines: &[String]) -> io::Result<()> {
        let (width, bottom) = screen_size(grid);
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (width / 2, (BOARD_TOP + bottom) / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        let blank = " ".repeat(msg_width as usize);
        self.print_at(top_left, &blank)?;
        self.print_at((top_left.0, top_left.1 + msg_height - 1), &blank)?;

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            self.print_at((top_left.0, top_left.1 + i as TermInt + 1), &padded_line)?;
        }

        Ok(())
    }

    fn print_at(&mut self, pos: Coords, s: &str) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(s))
    }
}

pub fn screen_size(grid: &Grid) -> Coords {
    let side = grid.size() as TermInt;
    (side * CELL_WIDTH + 2, BOARD_TOP + side + 2)
}

pub fn screen_pos(cell: Cell) -> Coords {
    (1 + cell.0 as TermInt * CELL_WIDTH, BOARD_TOP + 1 + cell.1 as TermInt)
}

pub fn head_glyph(dir: Direction) -> &'static str {
    match dir {
        Up => "^^",
        Down => "vv",
        Left => "<<",
        Right => ">>",
    }
}

pub fn status_line(snap: &Snapshot) -> String {
    format!("SCORE: {}  BEST: {}", snap.score, snap.high_score)
}

// Lines stay within 16 columns so the boxed overlay fits inside a 9-cell board
pub fn message_lines(snap: &Snapshot) -> Vec<String> {
    match snap.status {
        Status::Playing => vec![],
        Status::NotStarted => vec![
            "Arrows/WASD move".into(),
            "Esc to pause".into(),
            "r reset, q quit".into(),
            "".into(),
            "Space to start".into(),
        ],
        Status::Paused => vec![
            "Paused".into(),
            "Esc to resume".into(),
            "q to quit".into(),
        ],
        Status::GameOver => vec![
            (if snap.cleared {"Board cleared!"} else {"Game over!"}).into(),
            format!("Score: {}", snap.score),
            "".into(),
            "Space to replay".into(),
            "q to quit".into(),
        ],
    }
}

use crate::Cell;
use std::time::Instant;

use crossterm::style::Color;
use Direction::*;

/// Cells per second along the vertical axis. Horizontal movement runs at
/// twice this rate because terminal cells are roughly twice as tall as wide,
/// so the on-screen speed looks uniform.
const BASE_SPEED: f32 = 30.0;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [Up, Down, Left, Right];

/// Continuous position in terminal-cell space. The fractional parts carry
/// movement progress between frames; rendering truncates to a cell.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn cell(&self) -> Cell {
        // Truncation toward zero, not rounding.
        (self.x as i32, self.y as i32)
    }
}

/// One discrete cell the head passed through, and when it did.
pub struct TrailCell {
    pub pos: Cell,
    pub time: Instant,
}

pub struct Snake {
    pos: Point,
    direction: Direction,
    controls: [char; 4], // indexed by Direction
    head_color: Color,
    body_color: Color,
    trail: Vec<TrailCell>,
}

impl Snake {
    pub fn new(pos: Point, direction: Direction, controls: [char; 4],
               head_color: Color, body_color: Color) -> Self {
        Snake { pos, direction, controls, head_color, body_color, trail: vec![] }
    }

    /// Turns toward every direction this snake binds `c` to. Keys bound by
    /// other snakes fall through without touching this one.
    pub fn handle_key(&mut self, c: char) {
        for d in ALL_DIRECTIONS.iter().copied() {
            if self.controls[d as usize] == c {
                self.direction = d;
            }
        }
    }

    /// Moves the head by `dt` seconds worth of travel and records every cell
    /// boundary crossed along the way. The head keeps its untruncated
    /// position so sub-cell progress accumulates across frames.
    pub fn advance(&mut self, dt: f32, now: Instant) {
        let mut target = self.pos;
        match self.direction {
            Up => target.y -= dt * BASE_SPEED,
            Down => target.y += dt * BASE_SPEED,
            Left => target.x -= 2.0 * dt * BASE_SPEED,
            Right => target.x += 2.0 * dt * BASE_SPEED,
        }

        // Rasterize the path one unit cell at a time along the movement
        // axis. If the frame was too short to cross a boundary, both
        // positions truncate to the same cell and nothing is appended.
        let mut walker = self.pos;
        while walker.cell() != target.cell() {
            match self.direction {
                Up => walker.y -= 1.0,
                Down => walker.y += 1.0,
                Left => walker.x -= 1.0,
                Right => walker.x += 1.0,
            }
            self.trail.push(TrailCell { pos: walker.cell(), time: now });
        }

        self.pos = target;
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn trail(&self) -> &[TrailCell] {
        &self.trail
    }

    pub fn head_color(&self) -> Color {
        self.head_color
    }

    pub fn body_color(&self) -> Color {
        self.body_color
    }
}

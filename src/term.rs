use crate::{Cell, TermInt};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

const POLL_WAIT: Duration = Duration::from_millis(1);

/// Outcome of one bounded input poll.
pub enum PollResult {
    /// Nothing pending within the poll window.
    None,
    Key(KeyEvent),
    Resize,
    /// The event source failed; the caller treats this as a quit.
    Err,
}

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    restored: bool,
}

impl TermManager {
    pub fn new() -> Self {
        let (width, height) = terminal::size().expect("Error reading size.");
        TermManager { width, height, stdout: stdout(), restored: true }
    }

    pub fn setup(&mut self) {
        execute!(self.stdout, EnterAlternateScreen).expect("Error entering alt screen");
        self.set_raw_mode(true);
        self.set_cursor_visibility(false);
        self.restored = false;
    }

    pub fn restore(&mut self) {
        if self.restored {
            return;
        }

        self.set_raw_mode(false);
        self.set_cursor_visibility(true);
        execute!(self.stdout, LeaveAlternateScreen).expect("Error leaving alt screen");
        self.restored = true;
    }

    /// Waits at most ~1ms for a single event. Events the game doesn't care
    /// about (mouse movement and the like) report as `None`.
    pub fn poll_event(&self) -> PollResult {
        match poll(POLL_WAIT) {
            Err(_) => PollResult::Err,
            Ok(false) => PollResult::None,
            Ok(true) => match read() {
                Err(_) => PollResult::Err,
                Ok(Event::Key(ev)) => PollResult::Key(ev),
                Ok(Event::Resize(_, _)) => PollResult::Resize,
                Ok(_) => PollResult::None,
            },
        }
    }

    pub fn size(&self) -> (TermInt, TermInt) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        execute!(self.stdout, terminal::Clear(ClearType::All)).expect("Error clearing.");
    }

    /// Queues one colored glyph against the default background. Cells
    /// outside the screen rectangle are dropped; trails keep growing off
    /// screen and their coordinates may even go negative.
    pub fn set_cell(&mut self, pos: Cell, ch: char, color: Color) {
        let (x, y) = pos;
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }

        queue!(
            self.stdout,
            cursor::MoveTo(x as TermInt, y as TermInt),
            style::SetForegroundColor(color),
            style::Print(ch),
            style::ResetColor
        ).unwrap();
    }

    pub fn flush(&mut self) {
        self.stdout.flush().expect("Error flushing.");
    }

    ///////////////////////////////////////////////////////////////////////////

    fn set_raw_mode(&self, option: bool) {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.expect("Error setting raw mode.");
    }

    fn set_cursor_visibility(&mut self, option: bool) {
        let res = if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        };

        res.expect("Error setting cursor visibility.");
    }
}

impl Drop for TermManager {
    // The loop has no recovery paths, so restoring here is what guarantees
    // the terminal comes back even when play() bails out early.
    fn drop(&mut self) {
        self.restore();
    }
}

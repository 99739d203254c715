use std::time::Instant;

use crate::term::{PollResult, TermManager};
use crate::snake::{Point, Snake, Direction::*};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;

const TRAIL_CHAR: char = '#';

// Control maps are indexed Up, Down, Left, Right.
const PLAYER1_CONTROLS: [char; 4] = ['w', 's', 'a', 'd'];
const PLAYER2_CONTROLS: [char; 4] = ['i', 'k', 'j', 'l'];

pub struct TrailGame {
    term: TermManager,
    players: [Snake; 2],
    last_update: Instant,
}

impl TrailGame {
    pub fn new() -> Self {
        let term = TermManager::new();
        let (w, h) = term.size();
        let players = initial_players(w as f32, h as f32);

        TrailGame { term, players, last_update: Instant::now() }
    }

    /// Runs the frame loop until an exit key, a resize or an input error,
    /// then puts the terminal back.
    pub fn play(&mut self) {
        self.term.setup();

        // The first frame's dt is measured against loop start rather than
        // a previous frame.
        self.last_update = Instant::now();

        while self.process_input() && self.update() {}

        self.term.restore();
    }

    ///////////////////////////////////////////////////////////////////////////

    fn process_input(&mut self) -> bool {
        apply_event(self.term.poll_event(), &mut self.players)
    }

    fn update(&mut self) -> bool {
        self.term.clear();

        let now = Instant::now();
        let dt = now.duration_since(self.last_update).as_secs_f32();
        self.last_update = now;

        let TrailGame { term, players, .. } = self;
        for snake in players.iter_mut() {
            snake.advance(dt, now);

            for cell in snake.trail() {
                term.set_cell(cell.pos, TRAIL_CHAR, snake.body_color());
            }
            term.set_cell(snake.pos().cell(), TRAIL_CHAR, snake.head_color());
        }

        self.term.flush();
        true
    }
}

fn initial_players(width: f32, height: f32) -> [Snake; 2] {
    [
        Snake::new(Point { x: width / 3.0, y: height / 2.0 }, Right,
                   PLAYER1_CONTROLS, Color::Red, Color::Yellow),
        Snake::new(Point { x: 3.0 * width / 4.0, y: height / 2.0 }, Left,
                   PLAYER2_CONTROLS, Color::Blue, Color::Magenta),
    ]
}

/// Decides whether the loop keeps running and routes key presses to the
/// snakes. Every snake gets a look at each character; the default bindings
/// are disjoint but the dispatch doesn't rely on that.
fn apply_event(event: PollResult, players: &mut [Snake; 2]) -> bool {
    match event {
        PollResult::None => true,
        PollResult::Err => false,
        // No runtime re-layout; resizing the terminal ends the game.
        PollResult::Resize => false,
        PollResult::Key(ev) => {
            if is_exit_key(&ev) {
                return false;
            }

            if let KeyCode::Char(c) = ev.code {
                for snake in players.iter_mut() {
                    snake.handle_key(c);
                }
            }

            true
        }
    }
}

fn is_exit_key(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Esc, modifiers: _ })
        || matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> PollResult {
        PollResult::Key(KeyEvent { code, modifiers })
    }

    fn players() -> [Snake; 2] {
        initial_players(120.0, 40.0)
    }

    fn directions(players: &[Snake; 2]) -> (Direction, Direction) {
        (players[0].direction(), players[1].direction())
    }

    #[test]
    fn players_start_at_thirds_of_the_screen() {
        let [p1, p2] = players();

        assert_eq!(p1.pos(), Point { x: 40.0, y: 20.0 });
        assert_eq!(p2.pos(), Point { x: 90.0, y: 20.0 });
        assert_eq!(p1.direction(), Right);
        assert_eq!(p2.direction(), Left);
    }

    #[test]
    fn escape_stops_the_loop() {
        assert!(!apply_event(key(KeyCode::Esc, KeyModifiers::NONE), &mut players()));
    }

    #[test]
    fn ctrl_c_stops_the_loop() {
        assert!(!apply_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut players()));
    }

    #[test]
    fn plain_c_is_just_a_key() {
        assert!(apply_event(key(KeyCode::Char('c'), KeyModifiers::NONE), &mut players()));
    }

    #[test]
    fn resize_stops_the_loop() {
        assert!(!apply_event(PollResult::Resize, &mut players()));
    }

    #[test]
    fn input_error_stops_the_loop() {
        assert!(!apply_event(PollResult::Err, &mut players()));
    }

    #[test]
    fn no_event_keeps_running() {
        let mut ps = players();
        assert!(apply_event(PollResult::None, &mut ps));
        assert_eq!(directions(&ps), (Right, Left));
    }

    #[test]
    fn wasd_steers_only_player_one() {
        let mut ps = players();

        assert!(apply_event(key(KeyCode::Char('w'), KeyModifiers::NONE), &mut ps));
        assert_eq!(directions(&ps), (Up, Left));

        assert!(apply_event(key(KeyCode::Char('s'), KeyModifiers::NONE), &mut ps));
        assert_eq!(directions(&ps), (Down, Left));
    }

    #[test]
    fn ijkl_steers_only_player_two() {
        let mut ps = players();

        assert!(apply_event(key(KeyCode::Char('k'), KeyModifiers::NONE), &mut ps));
        assert_eq!(directions(&ps), (Right, Down));

        assert!(apply_event(key(KeyCode::Char('l'), KeyModifiers::NONE), &mut ps));
        assert_eq!(directions(&ps), (Right, Right));
    }

    #[test]
    fn unbound_keys_change_nothing() {
        let mut ps = players();
        assert!(apply_event(key(KeyCode::Char('x'), KeyModifiers::NONE), &mut ps));
        assert!(apply_event(key(KeyCode::Up, KeyModifiers::NONE), &mut ps));
        assert_eq!(directions(&ps), (Right, Left));
    }
}

mod game;
mod term;
mod snake;

pub type TermInt = u16;
pub type Cell = (i32, i32);

fn main() {
    // play() returns on Esc/CTRL+C, on a resize, or on an input error.
    // Dropping the game restores the terminal on every exit path.
    let mut game = game::TrailGame::new();
    game.play();
}

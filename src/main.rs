mod apple;
mod clock;
mod engine;
mod game;
mod grid;
mod input;
mod snake;
mod term;

pub type GridInt = i16;
pub type Cell = (GridInt, GridInt);

fn main() {
    // Returns immediately when there is no terminal to draw on;
    // otherwise runs until the user hits CTRL+C.
    game::run();
}

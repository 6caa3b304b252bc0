use crate::grid::Grid;
use crate::Cell;

use rand::Rng;

// One uniform draw per axis. The draw is not retried against the snake
// body, so an apple can land under it; the cell shows up again once the
// body moves off.
pub fn spawn<R: Rng>(grid: &Grid, rng: &mut R) -> Cell {
    (
        rng.gen_range(0..grid.width),
        rng.gen_range(0..grid.height),
    )
}

use crate::input::Direction;
use crate::{Cell, GridInt};

// Playfield extents in grid cells. Positions are wrapped, never clamped:
// leaving one edge re-enters from the opposite one.
#[derive(Copy, Clone)]
pub struct Grid {
    pub width: GridInt,
    pub height: GridInt,
}

impl Grid {
    pub fn new(width: GridInt, height: GridInt) -> Self {
        Grid { width, height }
    }

    // Moves one cell in `direction` and wraps the result back into bounds.
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        self.wrap((cell.0 + dx, cell.1 + dy))
    }

    fn wrap(&self, (x, y): Cell) -> Cell {
        (wrap_axis(x, self.width), wrap_axis(y, self.height))
    }
}

fn wrap_axis(v: GridInt, extent: GridInt) -> GridInt {
    if v < 0 {
        extent - 1
    } else if v >= extent {
        0
    } else {
        v
    }
}

use crate::grid::Grid;
use crate::input::Direction;
use crate::{Cell, GridInt};

// Ordered body cells, tail at index 0 and head last. Length only ever
// grows over a session; each neighboring pair differs by one wrapped step.
pub struct SnakeBody {
    cells: Vec<Cell>,
}

impl SnakeBody {
    // The starting body is a vertical run down the left column,
    // head at the bottom.
    pub fn new_column(len: usize) -> Self {
        let cells = (0..len).map(|y| (0, y as GridInt)).collect();
        SnakeBody { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn head(&self) -> Cell {
        *self.cells.last().unwrap()
    }

    // Appends the wrapped next head and evicts the tail, keeping the length
    // constant. The evicted cell is returned so an eat detected on the same
    // tick can re-attach it.
    pub fn advance(&mut self, grid: &Grid, direction: Direction) -> Cell {
        let new_head = grid.step(self.head(), direction);
        self.cells.push(new_head);
        self.cells.remove(0)
    }

    // Undoes the eviction done by this tick's advance: net length +1,
    // head untouched.
    pub fn grow_tail(&mut self, tail: Cell) {
        self.cells.insert(0, tail);
    }
}

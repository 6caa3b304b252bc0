use std::time::Instant;

use crossterm::event::KeyCode;
use rand::thread_rng;

use crate::apple;
use crate::clock::MotionClock;
use crate::grid::Grid;
use crate::input::{Direction, DirectionArbiter};
use crate::snake::SnakeBody;
use crate::Cell;

const INITIAL_BLOCK_COUNT: usize = 6;

pub type CellHandle = usize;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CellKind {
    Segment,
    Apple,
}

// What the engine needs from a renderer: numbered cells it can place on the
// grid, a live segment count, a score sink and a per-tick batch flush.
// The engine knows nothing about terminals or pixels.
pub trait RenderSurface {
    fn create_cell(&mut self, kind: CellKind) -> CellHandle;
    fn position_cell(&mut self, handle: CellHandle, cell: Cell);
    fn remove_cell(&mut self, handle: CellHandle);
    fn segment_count(&self) -> usize;
    fn set_score(&mut self, score: u32);
    fn present(&mut self);
}

// Orchestrates one game session. Idle until the first accepted key, then
// Running; there is no terminal state, the game cannot currently be lost.
pub struct GameEngine<S: RenderSurface> {
    grid: Grid,
    body: SnakeBody,
    apple: Cell,
    apple_handle: CellHandle,
    growth: u32,
    direction: Direction,
    arbiter: DirectionArbiter,
    clock: MotionClock,
    surface: S,
    segments: Vec<CellHandle>,
    running: bool,
}

impl<S: RenderSurface> GameEngine<S> {
    pub fn new(grid: Grid, mut surface: S) -> Self {
        let apple = apple::spawn(&grid, &mut thread_rng());
        let apple_handle = surface.create_cell(CellKind::Apple);
        surface.position_cell(apple_handle, apple);

        let mut engine = GameEngine {
            grid,
            body: SnakeBody::new_column(INITIAL_BLOCK_COUNT),
            apple,
            apple_handle,
            growth: 0,
            direction: Direction::Down,
            arbiter: DirectionArbiter::new(),
            clock: MotionClock::start(0),
            surface,
            segments: vec![],
            running: false,
        };

        engine.sync_segments();
        engine.surface.set_score(0);
        engine.surface.present();
        engine
    }

    // Feeds one raw key to the arbiter. The first accepted key arms the
    // clock and moves the engine from Idle to Running.
    pub fn handle_key(&mut self, code: KeyCode) {
        if let Some(dir) = self.arbiter.accept(code) {
            self.direction = dir;
            if !self.running {
                self.running = true;
                self.clock.rebuild(self.growth);
            }
        }
    }

    pub fn due(&mut self, now: Instant) -> bool {
        self.running && self.clock.poll(now)
    }

    // One game step: advance under the latest accepted direction, render,
    // then the head-vs-apple test. Eating re-attaches the evicted tail,
    // bumps the score, respawns the apple and rebuilds the clock at the
    // shorter period.
    pub fn tick(&mut self) {
        let evicted = self.body.advance(&self.grid, self.direction);
        self.sync_segments();

        if self.body.head() == self.apple {
            self.surface.remove_cell(self.apple_handle);
            self.body.grow_tail(evicted);
            self.sync_segments();

            self.growth += 1;
            self.surface.set_score(self.growth);

            self.apple = apple::spawn(&self.grid, &mut thread_rng());
            self.apple_handle = self.surface.create_cell(CellKind::Apple);
            self.surface.position_cell(self.apple_handle, self.apple);

            self.clock.rebuild(self.growth);
        }

        self.surface.present();
    }

    // Repositions every live cell; used when an overlay has clobbered
    // the playfield.
    pub fn redraw(&mut self) {
        self.sync_segments();
        self.surface.position_cell(self.apple_handle, self.apple);
        self.surface.set_score(self.growth);
        self.surface.present();
    }

    // Re-arms the tick schedule; deadlines that lapsed while paused are
    // dropped instead of firing as a burst of advances.
    pub fn resume(&mut self) {
        if self.running {
            self.clock.rebuild(self.growth);
        }
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // Pushes the body to the surface 1:1 by sequence index; when the
    // logical length has outgrown the rendered count, fresh cells are
    // appended for the newest positions.
    fn sync_segments(&mut self) {
        while self.surface.segment_count() < self.body.len() {
            self.segments.push(self.surface.create_cell(CellKind::Segment));
        }

        for (i, &cell) in self.body.cells().iter().enumerate() {
            self.surface.position_cell(self.segments[i], cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    struct FakeSurface {
        slots: Vec<Option<(CellKind, Option<Cell>)>>,
        score: u32,
    }

    impl FakeSurface {
        fn new() -> Self {
            FakeSurface { slots: vec![], score: 0 }
        }

        fn live_cells(&self, kind: CellKind) -> Vec<Cell> {
            self.slots
                .iter()
                .flatten()
                .filter(|(k, _)| *k == kind)
                .filter_map(|(_, pos)| *pos)
                .collect()
        }
    }

    impl RenderSurface for FakeSurface {
        fn create_cell(&mut self, kind: CellKind) -> CellHandle {
            self.slots.push(Some((kind, None)));
            self.slots.len() - 1
        }

        fn position_cell(&mut self, handle: CellHandle, cell: Cell) {
            if let Some(Some((_, pos))) = self.slots.get_mut(handle) {
                *pos = Some(cell);
            }
        }

        fn remove_cell(&mut self, handle: CellHandle) {
            if let Some(slot) = self.slots.get_mut(handle) {
                *slot = None;
            }
        }

        fn segment_count(&self) -> usize {
            self.slots
                .iter()
                .flatten()
                .filter(|(kind, _)| *kind == CellKind::Segment)
                .count()
        }

        fn set_score(&mut self, score: u32) {
            self.score = score;
        }

        fn present(&mut self) {}
    }

    fn engine() -> GameEngine<FakeSurface> {
        GameEngine::new(Grid::new(10, 10), FakeSurface::new())
    }

    #[test]
    fn starts_idle_with_the_initial_column_rendered() {
        let mut eng = engine();

        assert_eq!(eng.surface.segment_count(), 6);
        assert_eq!(
            eng.surface.live_cells(CellKind::Segment),
            vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]
        );
        assert_eq!(eng.surface.live_cells(CellKind::Apple).len(), 1);
        assert_eq!(eng.surface.score, 0);

        // Idle: no key yet, so no tick is ever due.
        assert!(!eng.due(Instant::now() + Duration::from_secs(10)));
    }

    #[test]
    fn first_key_starts_the_clock() {
        let mut eng = engine();

        eng.handle_key(KeyCode::Right);

        assert!(!eng.due(Instant::now()));
        assert!(eng.due(Instant::now() + Duration::from_millis(200)));
    }

    #[test]
    fn tick_advances_the_body_by_one_cell() {
        let mut eng = engine();
        eng.apple = (9, 9);

        eng.handle_key(KeyCode::Down);
        eng.tick();

        assert_eq!(
            eng.body.cells(),
            &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6)]
        );
        assert_eq!(
            eng.surface.live_cells(CellKind::Segment),
            vec![(0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6)]
        );
    }

    #[test]
    fn eating_grows_scores_and_speeds_up() {
        let mut eng = engine();
        eng.apple = (0, 6);

        eng.handle_key(KeyCode::Down);
        eng.tick();

        assert_eq!(eng.body.len(), 7);
        assert_eq!(eng.body.head(), (0, 6));
        assert_eq!(eng.growth, 1);
        assert_eq!(eng.surface.score, 1);
        assert_eq!(eng.surface.segment_count(), 7);
        assert_eq!(eng.clock.period(), Duration::from_millis(80));

        // Old apple gone, exactly one new one placed somewhere in bounds.
        let apples = eng.surface.live_cells(CellKind::Apple);
        assert_eq!(apples.len(), 1);
        let (x, y) = eng.apple;
        assert!(x >= 0 && x < 10 && y >= 0 && y < 10);
    }

    #[test]
    fn reversal_key_is_ignored_mid_flight() {
        let mut eng = engine();
        eng.apple = (9, 9);

        eng.handle_key(KeyCode::Up);
        eng.tick();
        assert_eq!(eng.body.head(), (0, 4));

        eng.handle_key(KeyCode::Down);
        eng.tick();
        assert_eq!(eng.body.head(), (0, 3));
    }

    #[test]
    fn wrapping_off_the_top_re_enters_from_the_bottom() {
        let mut eng = engine();
        eng.apple = (9, 9);

        eng.handle_key(KeyCode::Up);
        for _ in 0..6 {
            eng.tick();
        }

        assert_eq!(eng.body.head(), (0, 9));
    }
}

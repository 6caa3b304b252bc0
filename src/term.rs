use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::engine::{CellHandle, CellKind, RenderSurface};
use crate::{Cell, GridInt};

const SEGMENT_CHAR: char = '█';
const APPLE_CHAR: char = 'O';
const MIN_TERM_EXTENT: u16 = 4;

struct Slot {
    kind: CellKind,
    pos: Option<Cell>,
}

// Terminal-backed render surface. The playfield is the area inside a drawn
// border; grid cell (0, 0) maps to terminal position (1, 1).
pub struct TermSurface {
    width: u16,
    height: u16,
    stdout: Stdout,
    slots: Vec<Option<Slot>>,
}

impl TermSurface {
    // None when there is no usable terminal to draw on; the caller is
    // expected to simply not start the game.
    pub fn new() -> Option<Self> {
        let (width, height) = terminal::size().ok()?;
        if width < MIN_TERM_EXTENT || height < MIN_TERM_EXTENT {
            return None;
        }

        Some(TermSurface {
            width,
            height,
            stdout: stdout(),
            slots: vec![],
        })
    }

    pub fn grid_extents(&self) -> (GridInt, GridInt) {
        ((self.width - 2) as GridInt, (self.height - 2) as GridInt)
    }

    pub fn setup(&mut self) {
        execute!(self.stdout, EnterAlternateScreen).expect("Error entering alt screen");
        terminal::enable_raw_mode().expect("Error setting raw mode.");
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
            .expect("Error hiding cursor.");
    }

    pub fn restore(&mut self) {
        terminal::disable_raw_mode().expect("Error setting raw mode.");
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking)
            .expect("Error showing cursor.");
        execute!(self.stdout, LeaveAlternateScreen).expect("Error leaving alt screen");
    }

    pub fn clear(&mut self) {
        execute!(self.stdout, terminal::Clear(ClearType::All)).expect("Error clearing.");
    }

    pub fn draw_borders(&mut self) {
        let end_x = self.width - 1;
        let end_y = self.height - 1;

        for x in 0..self.width {
            let ch = if x == 0 || x == end_x { '+' } else { '-' };
            self.print_at(x, 0, ch);
            self.print_at(x, end_y, ch);
        }

        for y in 1..end_y {
            self.print_at(0, y, '|');
            self.print_at(end_x, y, '|');
        }

        self.flush();
    }

    // Centered overlay. Nothing underneath is saved; after hiding one the
    // caller clears the screen and asks the engine for a full redraw.
    pub fn show_message(&mut self, lines: &[&str]) {
        let msg_width = lines.iter().map(|l| l.len()).max().unwrap_or(0) as u16 + 2;
        let top = self.height / 2 - lines.len() as u16 / 2;
        let left = self.width / 2 - msg_width / 2;

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{: ^width$}", line, width = msg_width as usize);
            for (j, ch) in padded.chars().enumerate() {
                self.print_at(left + j as u16, top + i as u16, ch);
            }
        }

        self.flush();
    }

    pub fn read_key_blocking(&self) -> KeyEvent {
        loop {
            if let Event::Key(ev) = read().unwrap() {
                return ev;
            }
        }
    }

    pub fn read_key_events_queue(&self) -> Vec<KeyEvent> {
        let mut events = vec![];

        while poll(Duration::from_millis(1)).unwrap() {
            if let Event::Key(ev) = read().unwrap() {
                events.push(ev);
            }
        }

        events
    }

    ///////////////////////////////////////////////////////////////////////////

    // Repaints whatever still occupies `cell`, or blanks it. Segments win
    // over an apple sharing the cell.
    fn repaint(&mut self, cell: Cell) {
        let mut ch = ' ';
        for slot in self.slots.iter().flatten() {
            if slot.pos == Some(cell) {
                ch = glyph(slot.kind);
                if slot.kind == CellKind::Segment {
                    break;
                }
            }
        }

        let (x, y) = term_pos(cell);
        self.print_at(x, y, ch);
    }

    fn print_at(&mut self, x: u16, y: u16, ch: char) {
        queue!(self.stdout, cursor::MoveTo(x, y), style::Print(ch)).unwrap();
    }

    fn flush(&mut self) {
        self.stdout.flush().expect("Error flushing.");
    }
}

impl RenderSurface for TermSurface {
    fn create_cell(&mut self, kind: CellKind) -> CellHandle {
        self.slots.push(Some(Slot { kind, pos: None }));
        self.slots.len() - 1
    }

    fn position_cell(&mut self, handle: CellHandle, cell: Cell) {
        let (kind, old) = match self.slots.get_mut(handle) {
            Some(Some(slot)) => (slot.kind, slot.pos.replace(cell)),
            _ => return,
        };

        // The vacated position may still be covered by another cell that
        // was moved earlier in the same batch.
        if let Some(old) = old {
            if old != cell {
                self.repaint(old);
            }
        }

        let (x, y) = term_pos(cell);
        self.print_at(x, y, glyph(kind));
    }

    fn remove_cell(&mut self, handle: CellHandle) {
        if let Some(slot) = self.slots.get_mut(handle).and_then(|slot| slot.take()) {
            if let Some(pos) = slot.pos {
                self.repaint(pos);
            }
        }
    }

    fn segment_count(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|slot| slot.kind == CellKind::Segment)
            .count()
    }

    fn set_score(&mut self, score: u32) {
        let text = format!(" Score: {} ", score);
        for (i, ch) in text.chars().enumerate() {
            self.print_at(2 + i as u16, 0, ch);
        }
    }

    fn present(&mut self) {
        self.flush();
    }
}

fn term_pos(cell: Cell) -> (u16, u16) {
    (cell.0 as u16 + 1, cell.1 as u16 + 1)
}

fn glyph(kind: CellKind) -> char {
    match kind {
        CellKind::Segment => SEGMENT_CHAR,
        CellKind::Apple => APPLE_CHAR,
    }
}

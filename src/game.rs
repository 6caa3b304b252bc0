use std::process::exit;
use std::thread::sleep;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::engine::GameEngine;
use crate::grid::Grid;
use crate::term::TermSurface;

const POLL_INTERVAL_MS: u64 = 5;

pub fn run() {
    let mut term = match TermSurface::new() {
        Some(term) => term,
        // No render surface, nothing to do.
        None => return,
    };

    term.setup();
    show_intro(&mut term);

    let (w, h) = term.grid_extents();
    term.clear();
    term.draw_borders();

    let mut engine = GameEngine::new(Grid::new(w, h), term);
    let mut paused = false;

    loop {
        sleep(Duration::from_millis(POLL_INTERVAL_MS));

        for key_ev in engine.surface_mut().read_key_events_queue() {
            match key_ev {
                ev if is_ctrl_c(&ev) => clean_exit(engine.surface_mut()),
                KeyEvent { code: KeyCode::Esc, .. } => {
                    paused = toggle_pause(&mut engine, paused);
                }
                KeyEvent { code, .. } => {
                    if !paused {
                        engine.handle_key(code);
                    }
                }
            }
        }

        if paused {
            continue;
        }

        if engine.due(Instant::now()) {
            engine.tick();
        }
    }
}

///////////////////////////////////////////////////////////////////////////

fn show_intro(term: &mut TermSurface) {
    term.show_message(&[
        "Arrow keys or WASD to move",
        "Esc to pause",
        "CTRL+C to quit",
        "",
        "Press any key to begin",
    ]);

    if is_ctrl_c(&term.read_key_blocking()) {
        clean_exit(term);
    }
}

fn toggle_pause(engine: &mut GameEngine<TermSurface>, paused: bool) -> bool {
    if !paused {
        engine.surface_mut().show_message(&[
            "Paused",
            "Press Esc to resume,",
            "or CTRL+C to quit",
        ]);
    } else {
        engine.surface_mut().clear();
        engine.surface_mut().draw_borders();
        engine.redraw();
        engine.resume();
    }

    !paused
}

fn clean_exit(term: &mut TermSurface) -> ! {
    term.restore();
    exit(0);
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

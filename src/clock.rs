use std::cmp::max;
use std::time::{Duration, Instant};

const BASE_PERIOD_MS: f64 = 100.0;
const DECAY: f64 = 0.8;

// Drives the game forward at a pace that picks up as the snake grows.
// Exactly one schedule is live at a time: `rebuild` replaces the deadline
// wholesale, so nothing armed under the old period can still fire.
pub struct MotionClock {
    period: Duration,
    next_due: Instant,
}

impl MotionClock {
    // Tick period after `growth` apples, shrinking geometrically and
    // clamped so it never reaches zero.
    pub fn period_millis(growth: u32) -> u64 {
        max((BASE_PERIOD_MS * DECAY.powi(growth as i32)) as u64, 1)
    }

    pub fn start(growth: u32) -> Self {
        let period = Duration::from_millis(Self::period_millis(growth));
        MotionClock {
            period,
            next_due: Instant::now() + period,
        }
    }

    pub fn rebuild(&mut self, growth: u32) {
        *self = Self::start(growth);
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    // Fires at most once per call and re-arms from `now`, so deadlines
    // missed under a slow host don't bank up into a burst of ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now >= self.next_due {
            self.next_due = now + self.period;
            true
        } else {
            false
        }
    }
}

use crate::simulation::Simulation;
use std::time::{Duration, Instant};

/// Upper bound on generations run in one frame; older backlog is dropped.
pub const MAX_TICKS_PER_FRAME: u32 = 4;

/// Fixed-step timer: accumulates wall time and releases it in whole ticks.
#[derive(Debug)]
pub struct Timer {
    target_delta: Option<Duration>,
    last_update: Instant,
    accumulated: Duration,
}

impl Timer {
    pub fn new(ticks_per_second: u16) -> Self {
        let target_delta = match ticks_per_second {
            0 => None,
            n => Some(Duration::from_secs(1) / u32::from(n)),
        };
        Self {
            target_delta,
            last_update: Instant::now(),
            accumulated: Duration::ZERO,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.accumulate(now - self.last_update);
        self.last_update = now;
    }

    pub fn accumulate(&mut self, elapsed: Duration) {
        self.accumulated += elapsed;
    }

    pub fn tick(&mut self) -> bool {
        match self.target_delta {
            Some(delta) if self.accumulated >= delta => {
                self.accumulated -= delta;
                true
            }
            _ => false,
        }
    }

    /// Drop every whole tick still pending, keeping only the partial remainder.
    pub fn discard_backlog(&mut self) {
        if let Some(delta) = self.target_delta {
            let remainder = self.accumulated.as_nanos() % delta.as_nanos();
            self.accumulated = Duration::from_nanos(remainder as u64);
        }
    }
}

/// Drives the simulation from the frame loop: advance if not paused, render always.
#[derive(Debug)]
pub struct Scheduler {
    timer: Timer,
    paused: bool,
}

impl Scheduler {
    pub fn new(ticks_per_second: u16) -> Self {
        Self {
            timer: Timer::new(ticks_per_second),
            paused: false,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            self.paused = paused;
            log::info!("Simulation {}", if paused { "paused" } else { "resumed" });
        }
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Measure elapsed time since the last frame and run the generations that are due.
    pub fn run_due(&mut self, simulation: &mut Simulation) -> u32 {
        self.timer.update();
        self.run_pending(simulation)
    }

    /// Consume due ticks, advancing once per tick unless paused. Returns generations advanced.
    pub fn run_pending(&mut self, simulation: &mut Simulation) -> u32 {
        let mut ticks = 0;
        while ticks < MAX_TICKS_PER_FRAME && self.timer.tick() {
            ticks += 1;
        }
        self.timer.discard_backlog();

        if self.paused || ticks == 0 {
            return 0;
        }
        for _ in 0..ticks {
            simulation.advance_generation();
        }
        log::debug!("Advanced {} generation(s) to {}", ticks, simulation.generation());
        ticks
    }
}

use log::{debug, trace};

use crate::core::rng::ShapeSource;
use crate::core::{Engine, GameSnapshot, RandomShapes};
use crate::types::{GameCommand, LastEvent};

/// Timer-driven loop around an [`Engine`]
///
/// The caller feeds elapsed time through [`GameLoop::advance`] and input
/// through [`GameLoop::handle`], and redraws whenever [`GameLoop::is_dirty`].
/// Once the engine reports game over no further ticks are scheduled.
#[derive(Debug)]
pub struct GameLoop<S = RandomShapes> {
    engine: Engine<S>,
    /// Time accumulated towards the next tick.
    elapsed_ms: u32,
    ticks: u64,
    dirty: bool,
    running: bool,
}

impl<S: ShapeSource> GameLoop<S> {
    pub fn new(engine: Engine<S>) -> Self {
        let running = !engine.is_game_over();
        Self {
            engine,
            elapsed_ms: 0,
            ticks: 0,
            dirty: true,
            running,
        }
    }

    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<S> {
        &mut self.engine
    }

    pub fn into_engine(self) -> Engine<S> {
        self.engine
    }

    /// False once the game is over; nothing is scheduled after that.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Milliseconds until the next tick is due (0 if overdue or stopped)
    pub fn time_until_tick_ms(&self) -> u32 {
        if !self.running {
            return 0;
        }
        self.engine.speed_ms().saturating_sub(self.elapsed_ms)
    }

    /// Add elapsed time and run every tick that became due.
    ///
    /// The interval is re-read after each tick, so a tick that speeds the
    /// game up shortens the wait for the next one. Returns the number of
    /// ticks run.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if !self.running {
            return 0;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);

        let mut ran = 0;
        while self.running && self.elapsed_ms >= self.engine.speed_ms() {
            self.elapsed_ms -= self.engine.speed_ms();
            self.tick();
            ran += 1;
        }
        ran
    }

    /// Run one iteration immediately, regardless of the timer.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.ticks += 1;
        self.running = self.engine.tick();
        self.dirty = true;
        trace!(
            "tick {}: score={} speed={}ms",
            self.ticks,
            self.engine.score(),
            self.engine.speed_ms()
        );
        if !self.running {
            self.elapsed_ms = 0;
            debug!(
                "loop stopped after {} ticks, final score {}",
                self.ticks,
                self.engine.score()
            );
        }
        self.running
    }

    /// Forward an input command. Ignored once the loop has stopped.
    pub fn handle(&mut self, command: GameCommand) -> bool {
        if !self.running {
            return false;
        }
        let changed = self.engine.apply(command);
        // A blocked move down still locks a piece.
        if changed || command == GameCommand::MoveDown {
            self.dirty = true;
        }
        if self.engine.is_game_over() {
            self.running = false;
        }
        changed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_presented(&mut self) {
        self.dirty = false;
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.engine.snapshot_into(out);
    }

    pub fn take_last_event(&mut self) -> Option<LastEvent> {
        self.engine.take_last_event()
    }
}

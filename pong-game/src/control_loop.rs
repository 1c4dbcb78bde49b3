use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::environment::pong::mechanics::TIME_GRANULARITY;
use crate::environment::pong::pong_drawer::{draw_frame, Canvas};
use crate::simulation::Simulation;

/// Events polled from the presentation layer once per iteration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub quit: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Caps the loop at one iteration per frame duration (time based, not work based)
pub struct FramePacer {
    frame_duration: Duration,
    last_frame: Option<Instant>,
}

impl FramePacer {
    pub fn new(frame_duration: Duration) -> Self {
        Self { frame_duration, last_frame: None }
    }

    /// never blocks
    pub fn unlimited() -> Self { Self::new(Duration::ZERO) }

    /// Blocks until the current frame's time budget has elapsed; returns the time since the previous call
    pub fn wait(&mut self) -> Duration {
        let now = Instant::now();
        let Some(last_frame) = self.last_frame else {
            self.last_frame = Some(now);
            return Duration::ZERO;
        };
        let due = last_frame + self.frame_duration;
        if now < due {
            thread::sleep(due - now);
        }
        let now = Instant::now();
        self.last_frame = Some(now);
        now - last_frame
    }
}

impl Default for FramePacer {
    fn default() -> Self { Self::new(TIME_GRANULARITY) }
}

/// One-thread game loop: input, simulation tick, render, pacing
pub struct ControlLoop {
    simulation: Simulation,
    pacer: FramePacer,
}

impl ControlLoop {
    pub fn new(simulation: Simulation, pacer: FramePacer) -> Self {
        Self { simulation, pacer }
    }

    pub fn simulation(&self) -> &Simulation { &self.simulation }

    /// A quit request is honored before anything else happens in that iteration.
    pub fn iterate(&mut self, input: FrameInput, canvas: &mut dyn Canvas) -> Result<LoopControl> {
        if input.quit {
            log::info!("quit requested; score: {:?}", self.simulation.score());
            return Ok(LoopControl::Quit);
        }
        self.simulation.tick()?;
        draw_frame(canvas, self.simulation.environment().mechanics(), &self.simulation.score())?;
        self.pacer.wait();
        Ok(LoopControl::Continue)
    }

    /// Runs until `poll_input` delivers a quit request
    pub fn run<P>(&mut self, mut poll_input: P, canvas: &mut dyn Canvas) -> Result<()>
    where
        P: FnMut() -> FrameInput,
    {
        while self.iterate(poll_input(), canvas)? == LoopControl::Continue {}
        Ok(())
    }
}

//! Lifecycle controller: frame cadence, viewport, and focus policy
//!
//! One frame is: tick the engine, read the balls, clear, draw one circle per
//! ball, request the next frame. Resize and focus events are applied
//! synchronously between frames, so the next frame always sees them.

use glam::Vec2;

use crate::bridge;
use crate::engine::Engine;
use crate::error::IntegrationFault;
use crate::platform::{FrameScheduler, ManualScheduler};
use crate::renderer::DrawSurface;

/// Where the frame loop is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Constructed, `initialize` not called yet
    Created,
    /// Frames are being scheduled
    Running,
    /// The host stopped delivering frames
    Halted,
    /// An integration fault ended the loop
    Faulted,
}

/// What one `render_frame` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub balls_drawn: usize,
    /// False once the host refused the next frame
    pub next_scheduled: bool,
}

pub struct LifecycleController<E, S, F> {
    engine: E,
    surface: S,
    scheduler: F,
    phase: LoopPhase,
    focused: bool,
    frames: u64,
}

impl<E, S, F> LifecycleController<E, S, F>
where
    E: Engine,
    S: DrawSurface,
    F: FrameScheduler,
{
    pub fn new(engine: E, surface: S, scheduler: F) -> Self {
        Self {
            engine,
            surface,
            scheduler,
            phase: LoopPhase::Created,
            focused: true,
            frames: 0,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    /// Whether the view currently has focus
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn require_ready(&self, operation: &'static str) -> Result<(), IntegrationFault> {
        if self.engine.is_ready() {
            Ok(())
        } else {
            Err(IntegrationFault::EngineNotReady { operation })
        }
    }

    /// Refuse to touch an engine that already broke its contract.
    fn require_live(&self) -> Result<(), IntegrationFault> {
        if self.phase == LoopPhase::Faulted {
            Err(IntegrationFault::LoopHalted)
        } else {
            Ok(())
        }
    }

    /// Record a fatal fault and stop the loop.
    fn fault(&mut self, fault: IntegrationFault) -> IntegrationFault {
        log::error!("Frame loop aborted: {}", fault);
        self.phase = LoopPhase::Faulted;
        fault
    }

    /// Ask for the next frame; a refusal ends the loop quietly.
    fn schedule(&mut self) -> bool {
        match self.scheduler.request_frame() {
            Ok(()) => true,
            Err(_) => {
                self.phase = LoopPhase::Halted;
                false
            }
        }
    }

    /// Start the loop with the initial viewport.
    pub fn initialize(&mut self, width: u32, height: u32) -> Result<(), IntegrationFault> {
        if self.phase != LoopPhase::Created {
            return Err(IntegrationFault::AlreadyInitialized);
        }
        if let Err(fault) = self.require_ready("initialize") {
            return Err(self.fault(fault));
        }

        self.surface.resize(width, height);
        self.engine.initialize(width, height);
        self.phase = LoopPhase::Running;
        log::info!("Frame loop initialized at {}x{}", width, height);

        self.schedule();
        Ok(())
    }

    /// Apply a viewport change to the surface and the engine.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<(), IntegrationFault> {
        self.require_live()?;
        if let Err(fault) = self.require_ready("set_viewport") {
            return Err(self.fault(fault));
        }
        self.surface.resize(width, height);
        self.engine.set_viewport(width, height);
        log::debug!("Viewport resized to {}x{}", width, height);
        Ok(())
    }

    /// Tick, read, clear, draw, schedule.
    pub fn render_frame(&mut self) -> Result<FrameReport, IntegrationFault> {
        match self.phase {
            LoopPhase::Running => {}
            LoopPhase::Created => return Err(IntegrationFault::NotInitialized),
            LoopPhase::Halted => return Err(IntegrationFault::LoopStopped),
            LoopPhase::Faulted => return Err(IntegrationFault::LoopHalted),
        }
        if let Err(fault) = self.require_ready("tick") {
            return Err(self.fault(fault));
        }

        self.engine.tick();

        let drawn = match bridge::read_ball_set(&self.engine) {
            Ok(balls) => {
                self.surface.clear();
                for i in 0..balls.count() {
                    self.surface
                        .fill_circle(Vec2::new(balls.x[i], balls.y[i]), balls.radius[i]);
                }
                balls.count()
            }
            Err(fault) => {
                log::error!("Frame loop aborted: {}", fault);
                self.phase = LoopPhase::Faulted;
                return Err(fault);
            }
        };

        self.frames += 1;
        log::trace!("Frame {} drew {} balls", self.frames, drawn);

        let next_scheduled = self.schedule();
        Ok(FrameReport {
            balls_drawn: drawn,
            next_scheduled,
        })
    }

    /// Stop simulated time. Frames keep running.
    pub fn on_focus_lost(&mut self) -> Result<(), IntegrationFault> {
        self.require_live()?;
        if let Err(fault) = self.require_ready("stop_clock") {
            return Err(self.fault(fault));
        }
        self.engine.stop_clock();
        self.focused = false;
        log::debug!("Focus lost, simulated clock stopped");
        Ok(())
    }

    /// Resume simulated time from now.
    pub fn on_focus_regained(&mut self) -> Result<(), IntegrationFault> {
        self.require_live()?;
        if let Err(fault) = self.require_ready("start_clock") {
            return Err(self.fault(fault));
        }
        self.engine.start_clock();
        self.focused = true;
        log::debug!("Focus regained, simulated clock started");
        Ok(())
    }
}

impl<E, S> LifecycleController<E, S, ManualScheduler>
where
    E: Engine,
    S: DrawSurface,
{
    /// Deliver the pending frame, if one was requested.
    pub fn pump(&mut self) -> Option<Result<FrameReport, IntegrationFault>> {
        if self.scheduler.take_pending() {
            Some(self.render_frame())
        } else {
            None
        }
    }
}

//! Bouncy Balls - renders a ball simulation shared through linear memory
//!
//! Core modules:
//! - `bridge`: zero-copy views over the engine's descriptor and ball columns
//! - `lifecycle`: frame loop, resize and focus policy
//! - `engine`: the contract every simulation engine implements
//! - `sim`: reference engine (linear heap, clock, physics)
//! - `renderer`: drawing surfaces (Canvas 2D, recording)
//! - `platform`: time sources and frame schedulers

pub mod bridge;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use bridge::{Ball, BallSet, Descriptor, read_ball_set, with_ball_set};
pub use engine::Engine;
pub use error::{IntegrationFault, SchedulerStopped};
pub use lifecycle::{FrameReport, LifecycleController, LoopPhase};
pub use settings::Settings;

/// Simulation configuration constants
pub mod consts {
    /// Default number of balls
    pub const BALL_COUNT: usize = 20;
    /// Upper bound on configurable ball count
    pub const MAX_BALL_COUNT: usize = 10_000;

    /// Ball radius range (pixels)
    pub const MIN_RADIUS: f32 = 10.0;
    pub const MAX_RADIUS: f32 = 60.0;

    /// Initial ball speed range (pixels/s)
    pub const MIN_SPEED: f32 = 50.0;
    pub const MAX_SPEED: f32 = 100.0;

    /// Longest simulated step a single tick may take (seconds)
    pub const MAX_TICK_DT: f32 = 0.1;

    /// Velocity change per pixel of overlap, scaled by 1/radius
    pub const COLLISION_STIFFNESS: f32 = 20.0;
}

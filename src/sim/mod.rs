//! Reference simulation engine
//!
//! A self-contained [`Engine`](crate::engine::Engine) implementation:
//! - Balls live in a word-aligned linear heap, one column per field
//! - Time advances by real elapsed time, gated by a two-state clock
//! - Physics: soft ball-ball repulsion, optional gravity, wall reflection
//! - Resizing re-bounds every ball into the new viewport

pub mod clock;
pub mod heap;
pub mod physics;
pub mod world;

pub use clock::SimulatedClock;
pub use heap::{Columns, DESCRIPTOR_ADDR, LinearHeap};
pub use world::BallWorld;

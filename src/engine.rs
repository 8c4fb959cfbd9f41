//! The engine contract
//!
//! The simulation engine owns the physics and the memory the balls live in.
//! Everything in this crate that talks to an engine goes through [`Engine`].

/// Width in bytes of one machine word in the engine's linear memory (wasm32).
pub const WORD_SIZE: usize = 4;

/// Number of words in the ball descriptor: `count` plus five column addresses.
pub const DESCRIPTOR_WORDS: usize = 6;

/// Byte address inside the engine's linear memory. Zero is null.
pub type Address = u32;

/// A simulation engine that publishes ball state through linear memory.
///
/// All methods are synchronous and bounded. Calling anything other than
/// [`Engine::is_ready`] before the engine reports ready violates the contract.
pub trait Engine {
    /// Whether the engine has finished loading.
    fn is_ready(&self) -> bool;

    /// One-time setup with the initial viewport. Starts the simulated clock.
    fn initialize(&mut self, width: u32, height: u32);

    /// Push a new viewport. The engine re-bounds balls immediately.
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Advance simulated time by one step, gated by the simulated clock.
    fn tick(&mut self);

    fn start_clock(&mut self);

    fn stop_clock(&mut self);

    /// Address of the current descriptor, valid until the next [`Engine::tick`].
    fn get_descriptor(&self) -> Address;

    /// Read-only view of the engine's linear memory.
    fn memory(&self) -> &[u8];
}

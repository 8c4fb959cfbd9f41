//! Drawing surfaces
//!
//! The frame loop only ever clears and fills circles, so that is the whole
//! surface interface. Colours and styling belong to the implementation.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

pub trait DrawSurface {
    /// Match the backing store to the viewport.
    fn resize(&mut self, width: u32, height: u32);

    /// Clear the whole surface.
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Vec2, radius: f32);
}

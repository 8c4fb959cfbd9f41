//! Browser frame scheduling

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::FrameScheduler;
use crate::error::SchedulerStopped;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame`-backed scheduler.
///
/// The callback is installed after construction because it usually needs a
/// handle to the controller that owns this scheduler.
#[derive(Clone, Default)]
pub struct AnimationFrameScheduler {
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the per-frame callback. Later frames reuse the same closure.
    pub fn set_callback(&self, callback: impl FnMut(f64) + 'static) {
        *self.callback.borrow_mut() = Some(Closure::new(callback));
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) -> Result<(), SchedulerStopped> {
        let window = web_sys::window().ok_or(SchedulerStopped)?;
        let slot = self.callback.borrow();
        let callback = slot.as_ref().ok_or(SchedulerStopped)?;
        window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map(|_| ())
            .map_err(|_| SchedulerStopped)
    }
}

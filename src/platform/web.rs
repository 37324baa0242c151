//! Browser timers with ownership-based cancellation

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// A `setInterval` registration that is cleared when dropped
///
/// Replacing an `Option<Interval>` with a new one therefore cancels the old
/// timer, so two countdowns can never run at once.
pub struct Interval {
    id: i32,
    cancelled: bool,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(timeout_ms: i32, callback: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::<dyn FnMut()>::new(callback);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            timeout_ms,
        )?;
        log::debug!("Installed interval {}", id);
        Ok(Self {
            id,
            cancelled: false,
            _closure: closure,
        })
    }

    /// Stop the timer but keep the callback alive
    ///
    /// Safe to call from inside the callback itself; the owner drops the
    /// handle later, outside the callback.
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
            log::debug!("Cleared interval {}", self.id);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

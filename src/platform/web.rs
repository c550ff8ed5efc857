//! Browser glue: animation-frame driver and pointer helpers

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::FrameHandle;

/// Run `on_frame` on every animation frame until `handle` is cancelled.
///
/// The handle is checked both before the callback runs and before the next
/// frame is requested, so cancelling from inside a frame or from an event
/// handler stops the loop without a stray extra frame.
pub fn drive<F>(handle: FrameHandle, on_frame: F)
where
    F: FnMut(f64) + 'static,
{
    schedule(handle, Rc::new(RefCell::new(on_frame)));
}

fn schedule<F>(handle: FrameHandle, on_frame: Rc<RefCell<F>>)
where
    F: FnMut(f64) + 'static,
{
    if !handle.is_live() {
        log::debug!("Frame loop halted");
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(move |time: f64| {
        if !handle.is_live() {
            return;
        }
        (on_frame.borrow_mut())(time);
        schedule(handle, on_frame);
    });
    let _ = window.request_animation_frame(callback.unchecked_ref());
}

/// Pointer position relative to the event target, in CSS pixels
pub fn pointer_position(event: &web_sys::PointerEvent) -> (f32, f32) {
    (event.offset_x() as f32, event.offset_y() as f32)
}

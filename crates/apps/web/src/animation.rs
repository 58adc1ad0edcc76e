use std::cell::RefCell;
use std::rc::Rc;

use foundation::time::Time;
use runtime::CLOCK_TICK_MS;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::error::PageError;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Runs `on_frame` on every animation frame for the lifetime of the page.
///
/// The closure reschedules itself, so it is kept alive through the shared
/// slot it lives in.
pub fn run_frames<F>(window: &Window, mut on_frame: F) -> Result<(), PageError>
where
    F: FnMut(Time) + 'static,
{
    let slot: FrameCallback = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let win = window.clone();

    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        on_frame(Time(timestamp));
        if let Some(cb) = next.borrow().as_ref() {
            let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));

    let first = slot.borrow();
    let cb = first
        .as_ref()
        .ok_or_else(|| PageError::Js("frame callback not installed".to_string()))?;
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(PageError::js)?;
    Ok(())
}

pub fn on_resize<F>(window: &Window, on_resize: F) -> Result<(), PageError>
where
    F: FnMut() + 'static,
{
    let closure = Closure::wrap(Box::new(on_resize) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .map_err(PageError::js)?;
    closure.forget();
    Ok(())
}

/// Calls `on_tick` now and then once per second.
pub fn every_second<F>(window: &Window, mut on_tick: F) -> Result<(), PageError>
where
    F: FnMut() + 'static,
{
    on_tick();
    let closure = Closure::wrap(Box::new(on_tick) as Box<dyn FnMut()>);
    window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            CLOCK_TICK_MS,
        )
        .map_err(PageError::js)?;
    closure.forget();
    Ok(())
}

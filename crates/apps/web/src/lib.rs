use std::cell::RefCell;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use wasm_bindgen::prelude::*;

pub mod animation;
pub mod canvas;
pub mod clocks;
pub mod config;
pub mod error;
pub mod page;

use clocks::ClockPanel;
use config::PageConfig;
use error::{PageError, console_error};
use page::{PageHost, ScrapbookApp};

// Guard against a second start (hot reload, or the page calling twice).
static INITIALIZED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_SET: OnceLock<()> = OnceLock::new();

thread_local! {
    static APP: RefCell<Option<ScrapbookApp>> = const { RefCell::new(None) };
}

fn init_panic_hook() {
    PANIC_HOOK_SET.get_or_init(|| {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_panic_hook();
    Ok(())
}

/// Wires the globe, the readouts and the clocks into the current page.
///
/// `config_json` is an optional, possibly partial, JSON `PageConfig`.
/// Calling this more than once is a no-op.
#[wasm_bindgen]
pub fn start_scrapbook(config_json: Option<String>) -> Result<(), JsValue> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    init_panic_hook();
    start_inner(config_json.as_deref()).map_err(|err| {
        INITIALIZED.store(false, Ordering::SeqCst);
        console_error(&format!("scrapbook init error: {err}"));
        JsValue::from(err)
    })
}

fn start_inner(config_json: Option<&str>) -> Result<(), PageError> {
    let config = PageConfig::from_json(config_json)?;
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    let document = window.document().ok_or(PageError::NoDocument)?;

    let clocks = ClockPanel::new(&document, &config)?;
    let host = PageHost::new(window.clone(), config)?;
    host.apply_reveals();
    APP.with(|app| *app.borrow_mut() = Some(ScrapbookApp::new(host)));

    animation::every_second(&window, move || clocks.tick())?;
    animation::on_resize(&window, || {
        APP.with(|app| {
            if let Some(app) = app.borrow_mut().as_mut() {
                app.on_resize();
            }
        });
    })?;
    animation::run_frames(&window, |time| {
        APP.with(|app| {
            if let Some(app) = app.borrow_mut().as_mut() {
                app.tick(time);
            }
        });
    })
}

/// Frame-loop counters as JSON, for debugging from the console.
#[wasm_bindgen]
pub fn metrics_json() -> Result<String, JsValue> {
    APP.with(|app| match app.borrow().as_ref() {
        Some(app) => serde_json::to_string(app.frame_loop().metrics())
            .map_err(|err| JsValue::from(PageError::from(err))),
        None => Ok("null".to_string()),
    })
}

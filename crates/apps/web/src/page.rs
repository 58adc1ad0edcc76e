use foundation::time::Time;
use render::GlobeRenderer;
use runtime::{Frame, FrameHost, FrameLoop, ScrollMetrics, TickReport};
use runtime::{distance_readout, is_revealed, progress_css_value};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::canvas::GlobeCanvas;
use crate::config::PageConfig;
use crate::error::{PageError, console_warn};

/// The live document seen through [`FrameHost`].
pub struct PageHost {
    window: Window,
    document: Document,
    root: HtmlElement,
    config: PageConfig,
    renderer: GlobeRenderer,
    canvas: Option<GlobeCanvas>,
    distance_el: Option<Element>,
    reveal_els: Vec<Element>,
    paint_failed: bool,
}

impl PageHost {
    pub fn new(window: Window, config: PageConfig) -> Result<Self, PageError> {
        let document = window.document().ok_or(PageError::NoDocument)?;
        let root = document
            .document_element()
            .ok_or_else(|| PageError::MissingElement("documentElement".to_string()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PageError::Setting("documentElement is not an HTML element".to_string()))?;

        let distance_el = document.get_element_by_id(&config.distance_id);
        if distance_el.is_none() {
            console_warn(&PageError::MissingElement(config.distance_id.clone()).to_string());
        }

        let mut reveal_els = Vec::new();
        let nodes = document
            .query_selector_all(&config.reveal_selector)
            .map_err(PageError::js)?;
        for i in 0..nodes.length() {
            if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                reveal_els.push(el);
            }
        }

        let renderer = GlobeRenderer::default();
        let canvas = GlobeCanvas::find(
            &document,
            &config.canvas_id,
            renderer.config().max_device_pixel_ratio,
        );

        Ok(Self {
            window,
            document,
            root,
            config,
            renderer,
            canvas,
            distance_el,
            reveal_els,
            paint_failed: false,
        })
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    /// The canvas may be inserted after startup; keep looking until found.
    fn ensure_canvas(&mut self) {
        if self.canvas.is_none() {
            self.canvas = GlobeCanvas::find(
                &self.document,
                &self.config.canvas_id,
                self.renderer.config().max_device_pixel_ratio,
            );
        }
    }

    pub fn apply_reveals(&self) {
        let vh = self.viewport_height();
        for el in &self.reveal_els {
            let rect = el.get_bounding_client_rect();
            let on = is_revealed(rect.top(), rect.height(), vh);
            let _ = el.class_list().toggle_with_force("on", on);
        }
    }

    fn apply_distance(&self, progress: f64) {
        let Some(el) = &self.distance_el else {
            return;
        };
        let readout = distance_readout(self.config.start_miles, progress);
        el.set_text_content(Some(&readout.text));
        let _ = el.class_list().toggle_with_force("pulse", readout.pulse);
    }
}

impl FrameHost for PageHost {
    fn revalidate_surface(&mut self) -> bool {
        self.ensure_canvas();
        let dpr = self.window.device_pixel_ratio();
        match self.canvas.as_mut() {
            Some(canvas) => canvas.revalidate(dpr),
            None => false,
        }
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        let scroll_top = self
            .window
            .scroll_y()
            .ok()
            .filter(|y| *y > 0.0)
            .unwrap_or_else(|| self.root.scroll_top() as f64);
        ScrollMetrics::new(
            scroll_top,
            self.root.scroll_height() as f64,
            self.viewport_height(),
        )
    }

    fn publish_progress(&mut self, progress: f64) {
        let _ = self
            .root
            .style()
            .set_property("--p", &progress_css_value(progress));
        self.apply_distance(progress);
        self.apply_reveals();
    }

    fn draw(&mut self, frame: Frame, progress: f64) -> bool {
        self.ensure_canvas();
        let Some(canvas) = self.canvas.as_ref() else {
            return false;
        };
        let display = self
            .renderer
            .render(canvas.surface().size(), progress, frame.time);
        match canvas.paint(&display) {
            Ok(()) => {
                self.paint_failed = false;
                true
            }
            Err(err) => {
                // Report the first failure of a streak only; the next frame retries.
                if !self.paint_failed {
                    console_warn(&format!("globe frame skipped: {:?}", err));
                }
                self.paint_failed = true;
                false
            }
        }
    }
}

/// Frame loop plus the page it drives.
pub struct ScrapbookApp {
    frame_loop: FrameLoop,
    host: PageHost,
}

impl ScrapbookApp {
    pub fn new(host: PageHost) -> Self {
        Self {
            frame_loop: FrameLoop::new(),
            host,
        }
    }

    pub fn tick(&mut self, time: Time) -> TickReport {
        self.frame_loop.tick(&mut self.host, time)
    }

    pub fn on_resize(&mut self) {
        self.host.revalidate_surface();
        self.host.apply_reveals();
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }
}

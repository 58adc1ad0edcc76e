use foundation::time::Time;
use tracing::{debug, trace};

use crate::frame::Frame;
use crate::metrics::LoopMetrics;
use crate::scroll::ScrollMetrics;

/// Smallest progress change that is pushed to the page collaborators.
pub const PROGRESS_EPSILON: f64 = 0.0001;

/// The environment a [`FrameLoop`] drives once per animation frame.
///
/// The browser shell implements this over the live document; tests use a
/// recording host.
pub trait FrameHost {
    /// Re-checks the drawing surface against its layout size, resizing only
    /// when the backing store changed. Returns `true` if it was resized.
    fn revalidate_surface(&mut self) -> bool;

    fn scroll_metrics(&self) -> ScrollMetrics;

    /// Pushes derived values (CSS variable, readouts, reveals) to the page.
    fn publish_progress(&mut self, progress: f64);

    /// Paints the globe. Returns `false` when the surface was unavailable and
    /// the frame was skipped.
    fn draw(&mut self, frame: Frame, progress: f64) -> bool;
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TickReport {
    pub frame: Frame,
    pub progress: f64,
    pub resized: bool,
    pub published: bool,
    pub drawn: bool,
}

/// Per-frame driver: poll scroll, throttle page updates, always redraw.
///
/// Scroll is polled every tick instead of reacting to scroll events, and the
/// globe is redrawn unconditionally because its rotation advances with time.
#[derive(Debug)]
pub struct FrameLoop {
    epsilon: f64,
    frame: Option<Frame>,
    last_published: Option<f64>,
    metrics: LoopMetrics,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::with_epsilon(PROGRESS_EPSILON)
    }

    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            epsilon: epsilon.max(0.0),
            frame: None,
            last_published: None,
            metrics: LoopMetrics::new(),
        }
    }

    pub fn last_published(&self) -> Option<f64> {
        self.last_published
    }

    pub fn metrics(&self) -> &LoopMetrics {
        &self.metrics
    }

    pub fn tick<H: FrameHost + ?Sized>(&mut self, host: &mut H, time: Time) -> TickReport {
        let frame = match self.frame {
            Some(prev) => prev.next(time),
            None => Frame::first(time),
        };
        self.frame = Some(frame);

        let resized = host.revalidate_surface();
        if resized {
            debug!(frame = frame.index, "surface resized");
        }

        let progress = host.scroll_metrics().progress();
        let published = self.should_publish(progress);
        if published {
            trace!(frame = frame.index, progress, "publishing progress");
            host.publish_progress(progress);
            self.last_published = Some(progress);
        }

        let drawn = host.draw(frame, progress);

        self.metrics.frames += 1;
        if drawn {
            self.metrics.frames_drawn += 1;
        }
        if published {
            self.metrics.progress_updates += 1;
        }
        if resized {
            self.metrics.surface_resizes += 1;
        }
        if frame.index > 0 {
            self.metrics.frame_interval_ms.record(frame.dt_ms);
        }

        TickReport {
            frame,
            progress,
            resized,
            published,
            drawn,
        }
    }

    fn should_publish(&self, progress: f64) -> bool {
        match self.last_published {
            None => true,
            Some(last) => (progress - last).abs() > self.epsilon,
        }
    }
}

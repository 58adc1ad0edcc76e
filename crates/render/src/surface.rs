use foundation::math::Vec2;
use serde::Serialize;
use tracing::debug;

/// Highest device pixel ratio the backing store follows. Denser screens are
/// drawn at 2x and upscaled by the compositor.
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

/// Backing-store size of a canvas, in device pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f64 * 0.5, self.height as f64 * 0.5)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height) as f64
    }
}

/// Clamps the reported ratio into `[1, max]`. Missing or nonsensical ratios
/// fall back to 1.
pub fn clamp_device_pixel_ratio(dpr: f64, max: f64) -> f64 {
    if !dpr.is_finite() || dpr <= 0.0 {
        return 1.0;
    }
    dpr.clamp(1.0, max.max(1.0))
}

/// `floor(layout * dpr)` per axis with the ratio clamped.
pub fn backing_size(layout_width: f64, layout_height: f64, dpr: f64, max_dpr: f64) -> SurfaceSize {
    let dpr = clamp_device_pixel_ratio(dpr, max_dpr);
    let axis = |v: f64| (v.max(0.0) * dpr).floor() as u32;
    SurfaceSize::new(axis(layout_width), axis(layout_height))
}

/// Tracks the backing-store size of the globe canvas between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSurface {
    size: SurfaceSize,
    max_dpr: f64,
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self::new(MAX_DEVICE_PIXEL_RATIO)
    }
}

impl CanvasSurface {
    pub fn new(max_dpr: f64) -> Self {
        Self {
            size: SurfaceSize::default(),
            max_dpr,
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Recomputes the backing size from the current layout rectangle.
    ///
    /// Returns `true` only when the size changed; resizing a canvas resets
    /// its context, so callers must skip the write otherwise.
    pub fn revalidate(&mut self, layout_width: f64, layout_height: f64, dpr: f64) -> bool {
        let next = backing_size(layout_width, layout_height, dpr, self.max_dpr);
        if next == self.size {
            return false;
        }
        debug!(
            from_w = self.size.width,
            from_h = self.size.height,
            to_w = next.width,
            to_h = next.height,
            "canvas backing store resized"
        );
        self.size = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasSurface, SurfaceSize, backing_size, clamp_device_pixel_ratio};

    #[test]
    fn dpr_is_clamped_to_one_and_two() {
        assert_eq!(clamp_device_pixel_ratio(0.5, 2.0), 1.0);
        assert_eq!(clamp_device_pixel_ratio(1.5, 2.0), 1.5);
        assert_eq!(clamp_device_pixel_ratio(3.0, 2.0), 2.0);
        assert_eq!(clamp_device_pixel_ratio(f64::NAN, 2.0), 1.0);
        assert_eq!(clamp_device_pixel_ratio(0.0, 2.0), 1.0);
    }

    #[test]
    fn backing_size_floors_scaled_layout() {
        assert_eq!(backing_size(300.5, 200.25, 1.0, 2.0), SurfaceSize::new(300, 200));
        assert_eq!(backing_size(300.5, 200.25, 1.5, 2.0), SurfaceSize::new(450, 300));
        assert_eq!(backing_size(300.5, 200.25, 3.0, 2.0), SurfaceSize::new(601, 400));
        assert_eq!(backing_size(-10.0, 50.0, 2.0, 2.0), SurfaceSize::new(0, 100));
    }

    #[test]
    fn revalidate_reports_only_real_changes() {
        let mut surface = CanvasSurface::default();
        assert!(surface.revalidate(640.0, 480.0, 2.0));
        assert_eq!(surface.size(), SurfaceSize::new(1280, 960));
        assert!(!surface.revalidate(640.0, 480.0, 2.0));
        assert!(!surface.revalidate(640.2, 480.4, 2.0));
        assert!(surface.revalidate(640.0, 480.0, 1.0));
        assert_eq!(surface.size(), SurfaceSize::new(640, 480));
    }

    #[test]
    fn size_helpers() {
        let s = SurfaceSize::new(800, 600);
        assert!(!s.is_empty());
        assert!(SurfaceSize::new(0, 600).is_empty());
        assert_eq!(s.min_side(), 600.0);
        assert_eq!(s.center().x, 400.0);
        assert_eq!(s.center().y, 300.0);
    }
}

/// Snapshot of the document scroll state, read once per frame.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            viewport_height,
        }
    }

    /// Scrollable distance, never below 1 so it is always a safe divisor.
    pub fn scroll_range(&self) -> f64 {
        (self.scroll_height - self.viewport_height).max(1.0)
    }

    /// Normalized scroll position in `[0, 1]`.
    ///
    /// Content that fits in the viewport has nothing to scroll through and
    /// reports 0 regardless of offset. Non-finite inputs also report 0.
    pub fn progress(&self) -> f64 {
        let overflow = self.scroll_height - self.viewport_height;
        if !(overflow > 0.0) {
            return 0.0;
        }
        let p = self.scroll_top / self.scroll_range();
        if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollMetrics;

    #[test]
    fn progress_spans_zero_to_one() {
        let top = ScrollMetrics::new(0.0, 3000.0, 1000.0);
        let mid = ScrollMetrics::new(1000.0, 3000.0, 1000.0);
        let end = ScrollMetrics::new(2000.0, 3000.0, 1000.0);
        assert_eq!(top.progress(), 0.0);
        assert_eq!(mid.progress(), 0.5);
        assert_eq!(end.progress(), 1.0);
    }

    #[test]
    fn progress_is_monotonic_and_bounded() {
        let mut last = -1.0;
        for step in 0..=200 {
            let s = step as f64 * 10.0;
            let p = ScrollMetrics::new(s, 2800.0, 800.0).progress();
            assert!((0.0..=1.0).contains(&p), "progress {p} out of range at {s}");
            assert!(p >= last, "progress decreased at {s}");
            last = p;
        }
    }

    #[test]
    fn overscroll_is_clamped() {
        assert_eq!(ScrollMetrics::new(-40.0, 2000.0, 500.0).progress(), 0.0);
        assert_eq!(ScrollMetrics::new(9000.0, 2000.0, 500.0).progress(), 1.0);
    }

    #[test]
    fn short_documents_report_zero() {
        for s in [0.0, 3.0, 250.0] {
            assert_eq!(ScrollMetrics::new(s, 600.0, 800.0).progress(), 0.0);
            assert_eq!(ScrollMetrics::new(s, 800.0, 800.0).progress(), 0.0);
        }
    }

    #[test]
    fn sub_pixel_range_uses_unit_divisor() {
        let m = ScrollMetrics::new(0.25, 800.5, 800.0);
        assert_eq!(m.scroll_range(), 1.0);
        assert_eq!(m.progress(), 0.25);
    }

    #[test]
    fn non_finite_inputs_report_zero() {
        assert_eq!(ScrollMetrics::new(f64::NAN, 2000.0, 500.0).progress(), 0.0);
        assert_eq!(ScrollMetrics::new(10.0, f64::NAN, 500.0).progress(), 0.0);
    }
}

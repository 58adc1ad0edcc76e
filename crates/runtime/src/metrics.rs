use serde::Serialize;

/// Running min/max/mean over frame intervals.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize)]
pub struct Histogram {
    pub count: u64,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
}

impl Histogram {
    pub fn record(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Counters kept by the frame loop.
///
/// Exposed to the page as JSON for debugging; nothing reads them back.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LoopMetrics {
    pub frames: u64,
    /// Frames where the host actually painted (surface available).
    pub frames_drawn: u64,
    pub progress_updates: u64,
    pub surface_resizes: u64,
    pub frame_interval_ms: Histogram,
}

impl LoopMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames.saturating_sub(self.frames_drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::{Histogram, LoopMetrics};

    #[test]
    fn histogram_tracks_min_max_sum_count() {
        let mut h = Histogram::default();
        assert_eq!(h.mean(), None);
        h.record(16.0);
        h.record(8.0);
        h.record(33.0);
        assert_eq!(h.count, 3);
        assert_eq!(h.sum, 57.0);
        assert_eq!(h.min, 8.0);
        assert_eq!(h.max, 33.0);
        assert_eq!(h.mean(), Some(19.0));
    }

    #[test]
    fn skipped_frames_are_derived() {
        let m = LoopMetrics {
            frames: 10,
            frames_drawn: 7,
            ..LoopMetrics::new()
        };
        assert_eq!(m.frames_skipped(), 3);
    }
}

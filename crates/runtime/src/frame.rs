use foundation::time::Time;
use serde::Serialize;

/// Frame metadata for one animation-frame tick.
///
/// Time comes from the host scheduler, so frames are not evenly spaced.
/// `dt_ms` is the gap to the previous tick (0 for the first one).
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Scheduler timestamp at the start of the frame.
    pub time: Time,
    pub dt_ms: f64,
}

impl Frame {
    pub fn first(time: Time) -> Self {
        Self {
            index: 0,
            time,
            dt_ms: 0.0,
        }
    }

    pub fn next(self, time: Time) -> Self {
        Self {
            index: self.index.wrapping_add(1),
            time,
            dt_ms: time.since(self.time),
        }
    }
}

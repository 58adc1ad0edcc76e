use serde::Serialize;

/// Monotonic timestamp in milliseconds, as handed out by the frame scheduler.
///
/// Only differences are meaningful; the epoch is arbitrary.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize)]
pub struct Time(pub f64);

impl Time {
    pub fn from_secs(secs: f64) -> Self {
        Self(secs * 1000.0)
    }

    pub fn as_millis(self) -> f64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, never negative.
    pub fn since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn since_is_clamped() {
        assert_eq!(Time(1500.0).since(Time(1000.0)), 500.0);
        assert_eq!(Time(1000.0).since(Time(1500.0)), 0.0);
    }

    #[test]
    fn seconds_convert_to_millis() {
        assert_eq!(Time::from_secs(2.5).as_millis(), 2500.0);
    }
}

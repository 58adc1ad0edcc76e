/// Interval of the clock updater. Text only changes once per second, so it
/// runs on its own timer rather than the frame loop.
pub const CLOCK_TICK_MS: i32 = 1000;

/// Elapsed-time readout since the reconnect instant.
///
/// Shows only the units digit of the minutes plus zero-padded seconds
/// (`"m:ss"`). Anything not strictly after the instant reads `"00:00"`.
pub fn since_text(delta_ms: f64) -> String {
    if !(delta_ms > 0.0) {
        return "00:00".to_string();
    }
    let total_seconds = (delta_ms / 1000.0).floor() as u64;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes % 10, seconds)
}

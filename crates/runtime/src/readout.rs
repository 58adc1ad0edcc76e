/// Distance shown before the reader starts scrolling.
pub const DEFAULT_START_MILES: f64 = 8100.0;

/// Fraction of an element's height that must cross the reveal line.
pub const REVEAL_ANCHOR: f64 = 0.35;
/// Reveal line as a fraction of viewport height, measured from the top.
pub const REVEAL_LINE: f64 = 0.82;

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Value written to the root `--p` custom property.
pub fn progress_css_value(progress: f64) -> String {
    format!("{progress:.6}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceReadout {
    pub miles: u64,
    pub text: String,
    /// The counter reached zero; the page pulses the readout.
    pub pulse: bool,
}

/// Distance counting down from `start_miles` to zero as progress goes 0 → 1.
pub fn distance_readout(start_miles: f64, progress: f64) -> DistanceReadout {
    let miles = lerp(start_miles, 0.0, progress.clamp(0.0, 1.0)).round().max(0.0) as u64;
    DistanceReadout {
        miles,
        text: format!("{} miles", group_thousands(miles)),
        pulse: miles == 0,
    }
}

/// Whether a `[data-reveal]` element with the given client rect is shown.
pub fn is_revealed(top: f64, height: f64, viewport_height: f64) -> bool {
    top + height * REVEAL_ANCHOR < viewport_height * REVEAL_LINE
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

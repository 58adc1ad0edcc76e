use runtime::DEFAULT_START_MILES;
use serde::{Deserialize, Serialize};

use crate::error::PageError;

/// One timezone clock: a time readout and a day readout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockConfig {
    pub time_id: String,
    pub day_id: String,
    /// IANA zone name handed to `Intl`.
    pub time_zone: String,
}

/// Page wiring: element ids and readout content.
///
/// Globe geometry is not configurable here; it is fixed in `GlobeConfig`.
/// Every field has a default, so the page may pass a partial JSON object or
/// nothing at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub canvas_id: String,
    pub distance_id: String,
    pub reveal_selector: String,
    pub start_miles: f64,
    pub locale: String,
    pub clocks: Vec<ClockConfig>,
    pub since_id: String,
    pub since_label: String,
    /// ISO-8601 instant the elapsed readout counts from.
    pub reconnect_at: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            canvas_id: "globe".to_string(),
            distance_id: "distanceText".to_string(),
            reveal_selector: "[data-reveal]".to_string(),
            start_miles: DEFAULT_START_MILES,
            locale: "en-US".to_string(),
            clocks: vec![
                ClockConfig {
                    time_id: "ctTime".to_string(),
                    day_id: "ctSmall".to_string(),
                    time_zone: "America/New_York".to_string(),
                },
                ClockConfig {
                    time_id: "hydTime".to_string(),
                    day_id: "hydSmall".to_string(),
                    time_zone: "Asia/Kolkata".to_string(),
                },
            ],
            since_id: "since".to_string(),
            since_label: "but still these numbers feel familiar/common? dont they?  ".to_string(),
            reconnect_at: "2026-02-13T09:00:00-04:00".to_string(),
        }
    }
}

impl PageConfig {
    /// Parses the optional JSON handed over by the page.
    pub fn from_json(json: Option<&str>) -> Result<Self, PageError> {
        let cfg = match json.map(str::trim) {
            None | Some("") => Self::default(),
            Some(text) => serde_json::from_str(text)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), PageError> {
        if !(self.start_miles.is_finite() && self.start_miles >= 0.0) {
            return Err(PageError::Setting(format!(
                "startMiles must be a non-negative number, got {}",
                self.start_miles
            )));
        }
        if self.canvas_id.trim().is_empty() {
            return Err(PageError::Setting("canvasId is empty".to_string()));
        }
        Ok(())
    }
}

use js_sys::{Date, Object, Reflect};
use runtime::since_text;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::config::{ClockConfig, PageConfig};
use crate::error::{PageError, console_warn};

struct ZoneClock {
    time_zone: String,
    time_el: Option<Element>,
    day_el: Option<Element>,
}

/// Dual-timezone clocks plus the elapsed-since readout, refreshed by a
/// one-second interval that runs independently of the frame loop.
pub struct ClockPanel {
    locale: String,
    zones: Vec<ZoneClock>,
    since_el: Option<Element>,
    since_label: String,
    reconnect_ms: f64,
}

fn options(pairs: &[(&str, JsValue)]) -> JsValue {
    let obj = Object::new();
    for (key, value) in pairs {
        let _ = Reflect::set(&obj, &JsValue::from_str(key), value);
    }
    obj.into()
}

fn time_options(time_zone: &str) -> JsValue {
    options(&[
        ("hour", "2-digit".into()),
        ("minute", "2-digit".into()),
        ("second", "2-digit".into()),
        ("hour12", JsValue::TRUE),
        ("timeZone", time_zone.into()),
    ])
}

fn day_options(time_zone: &str) -> JsValue {
    options(&[
        ("weekday", "long".into()),
        ("month", "short".into()),
        ("day", "2-digit".into()),
        ("timeZone", time_zone.into()),
    ])
}

/// Parses an ISO-8601 instant with the browser's `Date`, returning epoch ms.
pub fn parse_instant_ms(iso: &str) -> Result<f64, PageError> {
    let ms = Date::new(&JsValue::from_str(iso)).get_time();
    if ms.is_finite() {
        Ok(ms)
    } else {
        Err(PageError::InvalidReconnect(iso.to_string()))
    }
}

fn lookup(document: &Document, id: &str) -> Option<Element> {
    let el = document.get_element_by_id(id);
    if el.is_none() {
        console_warn(&PageError::MissingElement(id.to_string()).to_string());
    }
    el
}

impl ClockPanel {
    pub fn new(document: &Document, config: &PageConfig) -> Result<Self, PageError> {
        let reconnect_ms = parse_instant_ms(&config.reconnect_at)?;
        let zones = config
            .clocks
            .iter()
            .map(|ClockConfig { time_id, day_id, time_zone }| ZoneClock {
                time_zone: time_zone.clone(),
                time_el: lookup(document, time_id),
                day_el: lookup(document, day_id),
            })
            .collect();
        Ok(Self {
            locale: config.locale.clone(),
            zones,
            since_el: lookup(document, &config.since_id),
            since_label: config.since_label.clone(),
            reconnect_ms,
        })
    }

    pub fn tick(&self) {
        let now = Date::new_0();
        for zone in &self.zones {
            if let Some(el) = &zone.time_el {
                let text = now.to_locale_string(&self.locale, &time_options(&zone.time_zone));
                el.set_text_content(Some(&String::from(text)));
            }
            if let Some(el) = &zone.day_el {
                let text = now.to_locale_string(&self.locale, &day_options(&zone.time_zone));
                el.set_text_content(Some(&String::from(text)));
            }
        }
        if let Some(el) = &self.since_el {
            let delta = now.get_time() - self.reconnect_ms;
            let text = format!("{}{}", self.since_label, since_text(delta));
            el.set_text_content(Some(&text));
        }
    }
}

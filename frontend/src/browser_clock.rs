use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use wasm_bindgen::JsValue;

use shared::dates::{Clock, Zone};

/// Wall clock and zone rules as the browser reports them.
pub struct BrowserClock;

impl Zone for BrowserClock {
    fn offset_at(&self, at: &DateTime<Utc>) -> FixedOffset {
        // getTimezoneOffset is minutes west of UTC, for that date
        let date = js_sys::Date::new(&JsValue::from_f64(at.timestamp_millis() as f64));
        let minutes = date.get_timezone_offset() as i32;
        FixedOffset::west_opt(minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

impl Clock for BrowserClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = js_sys::Date::now() as i64;
        Utc.timestamp_millis_opt(millis).single().unwrap_or_else(Utc::now)
    }
}

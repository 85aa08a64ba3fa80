use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

const INPUT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// The user's time zone. The offset is looked up per instant, so dates on
/// either side of a daylight-saving change each get their own.
pub trait Zone {
    fn offset_at(&self, at: &DateTime<Utc>) -> FixedOffset;

    /// Instant of a wall-clock time; `None` when a clock change skips it.
    fn resolve_local(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        let mut offset = self.offset_at(&Utc.from_utc_datetime(local));
        for _ in 0..2 {
            let at = offset.from_local_datetime(local).single()?.with_timezone(&Utc);
            let actual = self.offset_at(&at);
            if actual == offset {
                return Some(at);
            }
            offset = actual;
        }
        None
    }
}

impl Zone for FixedOffset {
    fn offset_at(&self, _at: &DateTime<Utc>) -> FixedOffset {
        *self
    }
}

/// Source of "now" in the user's zone.
pub trait Clock: Zone {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now: DateTime<Utc>,
    pub offset: FixedOffset,
    /// Offset in force from the given instant on.
    pub change: Option<(DateTime<Utc>, FixedOffset)>,
}

impl FixedClock {
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::zoned(now, Utc.fix())
    }

    pub fn zoned(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset, change: None }
    }

    pub fn changing_at(self, at: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { change: Some((at, offset)), ..self }
    }
}

impl Zone for FixedClock {
    fn offset_at(&self, at: &DateTime<Utc>) -> FixedOffset {
        match self.change {
            Some((from, offset)) if *at >= from => offset,
            _ => self.offset,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

fn local<Z: Zone + ?Sized>(at: &DateTime<Utc>, zone: &Z) -> DateTime<FixedOffset> {
    at.with_timezone(&zone.offset_at(at))
}

pub fn format_date<Z: Zone + ?Sized>(at: &DateTime<Utc>, zone: &Z) -> String {
    local(at, zone).format("%b %-d, %Y").to_string()
}

/// `Today`, `Yesterday`, `<n> days ago` within a week, otherwise the date.
pub fn format_relative<Z: Zone + ?Sized>(at: &DateTime<Utc>, now: &DateTime<Utc>, zone: &Z) -> String {
    let day = local(at, zone).date_naive();
    let today = local(now, zone).date_naive();
    match (today - day).num_days() {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        days @ 2..=6 => format!("{days} days ago"),
        _ => format_date(at, zone),
    }
}

pub fn format_scheduled<Z: Zone + ?Sized>(at: &DateTime<Utc>, zone: &Z) -> String {
    local(at, zone).format("%b %-d, %Y, %-I:%M %p").to_string()
}

pub fn is_overdue(at: &DateTime<Utc>, now: &DateTime<Utc>) -> bool {
    at < now
}

/// Value for a `datetime-local` input.
pub fn schedule_input_value<Z: Zone + ?Sized>(at: &DateTime<Utc>, zone: &Z) -> String {
    local(at, zone).format(INPUT_FORMATS[0]).to_string()
}

/// Reads a `datetime-local` value (or an RFC 3339 timestamp); blank means unscheduled.
pub fn parse_schedule<Z: Zone + ?Sized>(raw: &str, zone: &Z) -> Result<Option<DateTime<Utc>>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }
    INPUT_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| zone.resolve_local(&naive))
        .map(Some)
        .ok_or_else(|| "Please enter a valid date and time.".to_string())
}

use std::fmt::{self, Write as _};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeDelta, TimeZone, Utc};

use super::usable;
use crate::state::State;
use crate::value::Value;
use crate::writer::ValueWriter;

/// Renders date, time and duration values.
///
/// Timestamps use RFC 3339 unless `format` holds a `strftime` pattern. A pattern chrono cannot
/// format falls back to RFC 3339.
#[derive(Debug, Clone, Default)]
pub struct TimeWriter {
	/// `strftime` pattern for timestamps.
	pub format: Option<String>,
}

impl TimeWriter {
	/// Mechanism name and text for a supported time value.
	fn text(&self, value: &Value) -> Option<(&'static str, String)> {
		let pattern = self.format.as_deref();
		if let Some(t) = value.native::<DateTime<Utc>>() {
			return Some(datetime(pattern, t));
		}
		if let Some(t) = value.native::<DateTime<FixedOffset>>() {
			return Some(datetime(pattern, t));
		}
		if let Some(t) = value.native::<DateTime<Local>>() {
			return Some(datetime(pattern, t));
		}
		if let Some(t) = value.native::<SystemTime>() {
			return Some(datetime(pattern, &DateTime::<Utc>::from(*t)));
		}
		if let Some(t) = value.native::<NaiveDateTime>() {
			return Some(naive(pattern, |p| t.format(p), t));
		}
		if let Some(t) = value.native::<NaiveDate>() {
			return Some(naive(pattern, |p| t.format(p), t));
		}
		if let Some(t) = value.native::<NaiveTime>() {
			return Some(naive(pattern, |p| t.format(p), t));
		}
		if let Some(d) = value.native::<Duration>() {
			return Some(("Debug", format!("{d:?}")));
		}
		value.native::<TimeDelta>().map(|d| ("Display", d.to_string()))
	}
}

impl ValueWriter for TimeWriter {
	fn write_value(&self, st: &mut State<'_>, value: &Value) -> bool {
		if !usable(value) {
			return false;
		}
		let Some((via, text)) = self.text(value) else {
			return false;
		};
		write!(st, "=> {via} {text}");
		true
	}
}

fn datetime<Tz>(pattern: Option<&str>, t: &DateTime<Tz>) -> (&'static str, String)
where
	Tz: TimeZone,
	Tz::Offset: fmt::Display,
{
	match with_pattern(pattern, |p| t.format(p)) {
		Some(text) => ("format()", text),
		None => ("to_rfc3339()", t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
	}
}

fn naive<'a, F: fmt::Display>(pattern: Option<&'a str>, format: impl FnOnce(&'a str) -> F, t: &impl fmt::Debug) -> (&'static str, String) {
	match with_pattern(pattern, format) {
		Some(text) => ("format()", text),
		None => ("Debug", format!("{t:?}")),
	}
}

fn with_pattern<'a, F: fmt::Display>(pattern: Option<&'a str>, format: impl FnOnce(&'a str) -> F) -> Option<String> {
	let pattern = pattern?;
	let mut out = String::new();
	write!(out, "{}", format(pattern)).ok()?;
	Some(out)
}

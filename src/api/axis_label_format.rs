use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::error::{ChartError, ChartResult};

/// Rejects strftime patterns chrono cannot format.
pub fn validate_date_pattern(pattern: &str) -> ChartResult<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ChartError::InvalidConfig(format!(
            "axis.x.labels.format `{pattern}` is not a valid strftime pattern"
        )));
    }
    Ok(())
}

/// Formats an x value (UTC milliseconds since the epoch) with `pattern`.
///
/// Values outside chrono's range, or patterns that fail to format, fall back
/// to the plain number so a label is always produced.
#[must_use]
pub fn format_date_label(millis: f64, pattern: &str) -> String {
    let Some(datetime) = to_datetime(millis) else {
        return format_value_label(millis);
    };
    let mut out = String::new();
    match write!(out, "{}", datetime.format_with_items(StrftimeItems::new(pattern))) {
        Ok(()) => out,
        Err(_) => format_value_label(millis),
    }
}

/// Formats a y value the way gridline labels and tooltips show it.
#[must_use]
pub fn format_value_label(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    let millis = millis.round();
    if millis > i64::MAX as f64 || millis < i64::MIN as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
}

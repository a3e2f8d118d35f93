//! Wall-clock arithmetic and service-duration lookup.
//!
//! Appointment times are stored as 12-hour strings ("H:MM AM/PM"); all
//! scheduling math happens in minutes from midnight and converts back at
//! the edges.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

use crate::defaults::{
    BASELINE_APPOINTMENT_MINUTES, FALLBACK_START_MINUTES, PER_PET_SURCHARGE_MINUTES,
    UNKNOWN_SERVICE_MINUTES,
};
use crate::types::ServiceEntry;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("unparseable time-of-day string: {0:?}")]
    Unparseable(String),
    #[error("hour out of range in {0:?}")]
    HourOutOfRange(String),
    #[error("minute out of range in {0:?}")]
    MinuteOutOfRange(String),
}

/// Parse "H:MM AM/PM" into minutes from midnight.
///
/// 12 AM maps to 0, 12 PM to 720. Errors instead of guessing.
pub fn parse_time_of_day(text: &str) -> Result<i32, TimeParseError> {
    let trimmed = text.trim();

    let (clock, meridiem) = trimmed
        .rsplit_once(' ')
        .ok_or_else(|| TimeParseError::Unparseable(text.to_string()))?;

    let pm = match meridiem.to_ascii_uppercase().as_str() {
        "AM" => false,
        "PM" => true,
        _ => return Err(TimeParseError::Unparseable(text.to_string())),
    };

    let (hour_text, minute_text) = clock
        .trim()
        .split_once(':')
        .ok_or_else(|| TimeParseError::Unparseable(text.to_string()))?;

    let hour: i32 = hour_text
        .trim()
        .parse()
        .map_err(|_| TimeParseError::Unparseable(text.to_string()))?;
    let minute: i32 = minute_text
        .trim()
        .parse()
        .map_err(|_| TimeParseError::Unparseable(text.to_string()))?;

    if !(1..=12).contains(&hour) {
        return Err(TimeParseError::HourOutOfRange(text.to_string()));
    }
    if !(0..=59).contains(&minute) {
        return Err(TimeParseError::MinuteOutOfRange(text.to_string()));
    }

    let hour24 = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    Ok(hour24 * 60 + minute)
}

/// Parse a stored time string, defaulting malformed or missing input to
/// noon. The second value is false when the default was used, so callers
/// can flag the computation as best-effort instead of aborting the day.
pub fn parse_time_or_noon(text: &str) -> (i32, bool) {
    match parse_time_of_day(text) {
        Ok(minutes) => (minutes, true),
        Err(_) => (FALLBACK_START_MINUTES, false),
    }
}

/// Format minutes from midnight as "H:MM AM/PM". Hour 0 renders 12 AM,
/// hour 12 renders 12 PM. Input is wrapped into one day.
pub fn format_minutes(minutes: i32) -> String {
    let clamped = minutes.rem_euclid(24 * 60);
    let hour24 = clamped / 60;
    let minute = clamped % 60;

    let (hour12, meridiem) = match hour24 {
        0 => (12, "AM"),
        1..=11 => (hour24, "AM"),
        12 => (12, "PM"),
        _ => (hour24 - 12, "PM"),
    };

    format!("{}:{:02} {}", hour12, minute, meridiem)
}

/// Minutes for a single service code.
static SERVICE_MINUTES: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    HashMap::from([
        ("bath", 30),
        ("bath_brush", 45),
        ("full_groom", 90),
        ("full_groom_large", 120),
        ("nail_trim", 15),
        ("teeth_cleaning", 20),
        ("deshedding", 45),
        ("flea_treatment", 30),
        ("ear_cleaning", 15),
    ])
});

fn is_full_groom(code: &str) -> bool {
    code.starts_with("full_groom")
}

/// Total service minutes for an appointment.
///
/// Unknown codes fall back to a 30-minute baseline. A full-grooming variant
/// is counted once even when listed twice. Each pet beyond the first adds a
/// fixed surcharge. Zero resolvable services defaults to 60 minutes total.
pub fn duration_for_services(services: &[ServiceEntry], pet_count: i32) -> i32 {
    let mut total = 0;
    let mut full_groom_counted = false;

    for service in services {
        let code = service.code();
        if is_full_groom(code) {
            if full_groom_counted {
                continue;
            }
            full_groom_counted = true;
        }
        total += SERVICE_MINUTES
            .get(code)
            .copied()
            .unwrap_or(UNKNOWN_SERVICE_MINUTES);
    }

    if total == 0 {
        total = BASELINE_APPOINTMENT_MINUTES;
    }

    total + (pet_count - 1).max(0) * PER_PET_SURCHARGE_MINUTES
}

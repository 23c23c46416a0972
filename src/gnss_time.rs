//! GPS time system: calendar, week counter and seconds of week.
//!
//! Every conversion is a pure function. Calendar timestamps
//! are interpreted in [TimeScale::GPST].
use hifitime::{Epoch, TimeScale};

use crate::constants::Constants;

/// Resolves a two digit year: 80-99 is the twentieth century,
/// 0-79 is the twenty-first. Four digit years are left untouched.
pub fn window_two_digit_year(year: i32) -> i32 {
    match year {
        0..=79 => year + 2000,
        80..=99 => year + 1900,
        _ => year,
    }
}

/// Builds an [Epoch] in [TimeScale::GPST] from its calendar parts.
/// `seconds` may be fractional and is kept to the microsecond.
pub fn gpst_epoch(
    year: i32,
    month: u8,
    day: u8,
    hours: u8,
    minutes: u8,
    seconds: f64,
) -> Option<Epoch> {
    if !(0.0..60.0).contains(&seconds) {
        return None;
    }
    let micros = (seconds * 1.0E6).round() as u64;
    let (secs, micros) = ((micros / 1_000_000) as u8, (micros % 1_000_000) as u32);
    // GPST and TAI both ignore leap seconds: the calendar
    // difference to the GPS origin is the same in both scales
    let t = Epoch::maybe_from_gregorian_tai(year, month, day, hours, minutes, secs, micros * 1_000)
        .ok()?;
    Some(Epoch::from_gpst_duration(t - gps_origin_tai()))
}

/// GPS origin as a TAI calendar date
fn gps_origin_tai() -> Epoch {
    Epoch::from_gregorian_tai_at_midnight(1980, 1, 6)
}

/// Returns (week counter, seconds of week) for given [Epoch],
/// counted from the GPS origin (1980-01-06T00:00:00 GPST).
pub fn week_seconds(t: Epoch) -> (i64, f64) {
    let elapsed = t.to_time_scale(TimeScale::GPST).to_gpst_seconds();
    let week = elapsed.div_euclid(Constants::SECONDS_PER_WEEK);
    let sow = elapsed - week * Constants::SECONDS_PER_WEEK;
    (week as i64, sow)
}

/// Builds an [Epoch] in [TimeScale::GPST] from a week counter and seconds of week.
pub fn from_week_seconds(week: i64, sow: f64) -> Epoch {
    Epoch::from_gpst_seconds(week as f64 * Constants::SECONDS_PER_WEEK + sow)
}

/// Corrects a time difference for week boundary crossing.
/// Values exactly on the half week boundary are left untouched.
pub fn normalize_tk(tk: f64) -> f64 {
    if tk > Constants::HALF_WEEK {
        tk - Constants::SECONDS_PER_WEEK
    } else if tk < -Constants::HALF_WEEK {
        tk + Constants::SECONDS_PER_WEEK
    } else {
        tk
    }
}

/// Returns t_k: seconds elapsed from `reference` (typically ToE) to `t`,
/// corrected for week crossing. Both epochs carry their week, so `t` weeks
/// away from `reference` does not wrap back into the fit interval.
pub fn t_k(t: Epoch, reference: Epoch) -> f64 {
    normalize_tk((t - reference).to_seconds())
}

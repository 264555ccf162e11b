// SPDX-License-Identifier: MPL-2.0
//! Degrees/minutes/seconds to decimal degree conversion.

use super::tags::Ratio;

/// Divisor applied to the seconds numerator. GPS seconds are commonly stored
/// with a denominator of 1000, and only the numerator is read here.
const SECONDS_DIVISOR: f64 = 3_600_000.0;

/// Converts a `(degrees, minutes, seconds)` triple to a decimal string with
/// five fractional digits.
///
/// Only the numerators are used. Non-positive degrees subtract the minute and
/// second parts. Returns `None` unless exactly three components are given.
#[must_use]
pub fn dms_to_decimal(dms: &[Ratio]) -> Option<String> {
    let [deg, min, sec] = dms else {
        return None;
    };
    let deg = deg.num as f64;
    let min = min.num as f64;
    let sec = sec.num as f64;

    let decimal = if deg > 0.0 {
        deg + min / 60.0 + sec / SECONDS_DIVISOR
    } else {
        deg - min / 60.0 - sec / SECONDS_DIVISOR
    };
    Some(format!("{decimal:.5}"))
}

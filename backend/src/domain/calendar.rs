//! Conversion between the storage calendar and the presentation calendar.
//!
//! Members are stored and filtered by Gregorian year, while users see and
//! type Buddhist Era years, which run 543 years ahead.

use super::errors::{DomainError, DomainResult};

/// Offset between the Buddhist Era and the Gregorian calendar
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Convert a presentation-calendar year to the internal storage year.
pub fn to_internal_year(presentation_year: i32) -> i32 {
    presentation_year - BUDDHIST_ERA_OFFSET
}

/// Convert an internal storage year to the presentation calendar.
pub fn to_presentation_year(internal_year: i32) -> i32 {
    internal_year + BUDDHIST_ERA_OFFSET
}

/// Parse a user-supplied presentation year and convert it to internal calendar.
///
/// The input is taken verbatim: surrounding whitespace or an empty string is
/// rejected like any other malformed year.
pub fn parse_presentation_year(raw: &str) -> DomainResult<i32> {
    raw.parse::<i32>()
        .map(to_internal_year)
        .map_err(|_| DomainError::invalid(format!("Invalid account year: '{}'", raw)))
}

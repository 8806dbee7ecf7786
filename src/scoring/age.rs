//! Whole-year age between two calendar dates

use crate::error::RejectionReason;
use chrono::{Datelike, NaiveDate};

/// Completed years from `birth_date` to `reference_date`.
///
/// A year counts only once its anniversary has been reached, so a 29 February
/// birthday completes on 1 March in non-leap years. A reference date before the
/// birth date is reported as `InvalidBirthDate`.
pub fn age_in_years(birth_date: NaiveDate, reference_date: NaiveDate) -> Result<u32, RejectionReason> {
    if reference_date < birth_date {
        return Err(RejectionReason::InvalidBirthDate {
            birth_date,
            reference_date,
        });
    }

    let mut years = reference_date.year() - birth_date.year();
    if (reference_date.month(), reference_date.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }

    Ok(years.max(0) as u32)
}

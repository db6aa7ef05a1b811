//! Input rules checked before anything goes over the wire

use chrono::{Days, NaiveDate};
use validator::Validate;

use super::error::{LifecycleError, LifecycleResult, RuleViolation};
use crate::models::{DiningTable, Role};

/// Smallest party that can book or be seated
pub const MIN_PARTY_SIZE: u32 = 2;
/// Seat count range of a table
pub const MIN_TABLE_SEATS: u32 = 2;
pub const MAX_TABLE_SEATS: u32 = 20;

/// Party size must fit the table: `[MIN_PARTY_SIZE, table_seats]`
pub fn check_party_size(size: u32, table_seats: u32) -> Result<(), RuleViolation> {
    if (MIN_PARTY_SIZE..=table_seats).contains(&size) {
        return Ok(());
    }
    Err(RuleViolation::PartySizeOutOfRange {
        size,
        min: MIN_PARTY_SIZE,
        max: table_seats,
    })
}

/// Largest party any table can seat
pub fn max_party_size(tables: &[DiningTable]) -> Option<u32> {
    tables.iter().map(|t| t.seats).max()
}

/// New bookings are bounded by the largest table
pub fn check_booking_party(size: u32, tables: &[DiningTable]) -> Result<(), RuleViolation> {
    let max = max_party_size(tables).ok_or(RuleViolation::NoTablesAvailable)?;
    check_party_size(size, max)
}

/// Bookings start tomorrow at the earliest
pub fn earliest_booking_date(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)
}

pub fn check_booking_date(date: NaiveDate, today: NaiveDate) -> Result<(), RuleViolation> {
    let earliest = earliest_booking_date(today);
    if date < earliest {
        return Err(RuleViolation::BookingDateTooEarly { date, earliest });
    }
    Ok(())
}

fn check_seat_range(seats: u32) -> Result<(), RuleViolation> {
    if (MIN_TABLE_SEATS..=MAX_TABLE_SEATS).contains(&seats) {
        return Ok(());
    }
    Err(RuleViolation::SeatCountOutOfRange {
        seats,
        min: MIN_TABLE_SEATS,
        max: MAX_TABLE_SEATS,
    })
}

/// Seat counts a new table may take: in range and not already used, ascending
pub fn available_seat_options(tables: &[DiningTable]) -> Vec<u32> {
    (MIN_TABLE_SEATS..=MAX_TABLE_SEATS)
        .filter(|seats| !tables.iter().any(|t| t.seats == *seats))
        .collect()
}

pub fn check_new_table(seats: u32, tables: &[DiningTable]) -> Result<(), RuleViolation> {
    check_seat_range(seats)?;
    if tables.iter().any(|t| t.seats == seats) {
        return Err(RuleViolation::SeatCountTaken(seats));
    }
    Ok(())
}

/// Seat counts are only ever revised upward
pub fn check_seat_revision(current: u32, requested: u32) -> Result<(), RuleViolation> {
    if requested < current {
        return Err(RuleViolation::SeatCountDecrease { current, requested });
    }
    check_seat_range(requested)
}

pub fn check_password_confirmation(
    password: &str,
    confirmation: &str,
) -> Result<(), RuleViolation> {
    if password != confirmation {
        return Err(RuleViolation::PasswordMismatch);
    }
    Ok(())
}

/// Run the derived field validators of an input
pub fn check_fields(input: &impl Validate) -> Result<(), RuleViolation> {
    input.validate().map_err(RuleViolation::from)
}

pub fn require_role(actual: Role, required: Role) -> LifecycleResult<()> {
    if actual != required {
        return Err(LifecycleError::RoleRequired { required, actual });
    }
    Ok(())
}

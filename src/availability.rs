use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{Booking, BookingStatus};

/// Reasons a requested slot cannot be booked. The messages are the API contract
/// and are surfaced to callers verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Conflict {
    #[error("Court is already booked for this time slot.")]
    Court,
    #[error("Selected coach is unavailable at this time.")]
    Coach,
}

/// Half-open interval overlap; back-to-back slots sharing a boundary do not clash.
pub(crate) fn overlaps(a_start: u8, a_end: u8, b_start: u8, b_end: u8) -> bool {
    a_start < b_end && a_end > b_start
}

/// Scan confirmed bookings for a clash on the court, then on the coach if one is
/// requested. The court check runs first and wins when both would fail.
pub fn check_availability(
    bookings: &[Booking],
    date: NaiveDate,
    start_hour: u8,
    end_hour: u8,
    court_id: &str,
    coach_id: Option<&str>,
) -> Option<Conflict> {
    let same_day = |b: &&Booking| b.status == BookingStatus::Confirmed && b.date == date;

    let court_clash = bookings.iter().filter(same_day).any(|b| {
        b.court_id == court_id && overlaps(start_hour, end_hour, b.start_hour, b.end_hour)
    });
    if court_clash {
        return Some(Conflict::Court);
    }

    if let Some(coach_id) = coach_id {
        // Coach conflicts apply across all courts.
        let coach_clash = bookings.iter().filter(same_day).any(|b| {
            b.resources.coach_id.as_deref() == Some(coach_id)
                && overlaps(start_hour, end_hour, b.start_hour, b.end_hour)
        });
        if coach_clash {
            return Some(Conflict::Coach);
        }
    }

    None
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, ToSchema)]
pub struct HourSlot {
    pub hour: u8,
    pub available: bool,
}

/// Per-hour availability grid for one court and date, bounded by the facility's
/// opening hours.
pub fn day_slots(
    bookings: &[Booking],
    date: NaiveDate,
    court_id: &str,
    open_hour: u8,
    close_hour: u8,
) -> Vec<HourSlot> {
    (open_hour..close_hour)
        .map(|hour| {
            let booked = bookings.iter().any(|b| {
                b.status == BookingStatus::Confirmed
                    && b.date == date
                    && b.court_id == court_id
                    && hour >= b.start_hour
                    && hour < b.end_hour
            });
            HourSlot {
                hour,
                available: !booked,
            }
        })
        .collect()
}

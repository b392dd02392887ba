use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, Event, EventLike};
use url::Url;

use crate::models::{Booking, BookingStatus, Court};

/// Renders confirmed bookings as an iCalendar feed. Slot hours are interpreted
/// in the facility timezone and exported as UTC instants.
#[derive(Clone)]
pub struct CalendarExporter {
    timezone: Tz,
    base_url: Url,
}

impl CalendarExporter {
    pub fn new(timezone: Tz, base_url: Url) -> Self {
        Self { timezone, base_url }
    }

    pub fn generate(&self, bookings: &[Booking], courts: &[Court]) -> Vec<u8> {
        if bookings.is_empty() {
            return Vec::new();
        }

        let mut calendar = Calendar::new();
        calendar.name("Court Reservations");

        for booking in bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Confirmed)
        {
            let Some(start) = self.slot_datetime(booking.date, booking.start_hour) else {
                continue;
            };
            let Some(end) = self.slot_datetime(booking.date, booking.end_hour) else {
                continue;
            };

            let court_name = courts
                .iter()
                .find(|c| c.id == booking.court_id)
                .map(|c| c.name.as_str())
                .unwrap_or("Unknown court");

            let source = self
                .base_url
                .join("bookings")
                .unwrap_or_else(|_| self.base_url.clone());

            let mut event = Event::new();
            event.summary(&format!("Court booking: {court_name}"));
            event.starts(start);
            event.ends(end);
            event.description(&format!(
                "Booked by: {}\nTotal: {}\nSource: {}",
                booking.user_id, booking.pricing.total, source
            ));
            event.uid(&format!("{}@court-booking", booking.id));
            calendar.push(event);
        }

        calendar.to_string().into_bytes()
    }

    fn slot_datetime(&self, date: NaiveDate, hour: u8) -> Option<DateTime<Utc>> {
        // An end hour of 24 rolls over to midnight of the next day.
        let (date, hour) = if hour >= 24 {
            (date.succ_opt()?, hour - 24)
        } else {
            (date, hour)
        };
        let time = NaiveTime::from_hms_opt(u32::from(hour), 0, 0)?;
        let local = NaiveDateTime::new(date, time);
        self.timezone
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

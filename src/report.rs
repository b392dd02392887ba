use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Booking, BookingStatus};

/// The daily series reports the most recent dates with activity, capped here.
const DAILY_WINDOW: usize = 7;

#[derive(Debug, Clone, Serialize, PartialEq, Eq, ToSchema)]
pub struct DailyRevenue {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, ToSchema)]
pub struct RevenueSummary {
    pub total_revenue: Decimal,
    pub confirmed_bookings: usize,
    pub daily: Vec<DailyRevenue>,
}

pub fn revenue_summary(bookings: &[Booking]) -> RevenueSummary {
    let total_revenue = bookings.iter().map(|b| b.pricing.total).sum();
    let confirmed_bookings = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .count();

    let mut per_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for booking in bookings {
        *per_day.entry(booking.date).or_insert(Decimal::ZERO) += booking.pricing.total;
    }

    let skip = per_day.len().saturating_sub(DAILY_WINDOW);
    let daily = per_day
        .into_iter()
        .skip(skip)
        .map(|(date, revenue)| DailyRevenue { date, revenue })
        .collect();

    RevenueSummary {
        total_revenue,
        confirmed_bookings,
        daily,
    }
}

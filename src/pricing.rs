//! Pure pricing math over reference data. No store access, no side effects;
//! safe to call for previews before committing a booking.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::availability::overlaps;
use crate::models::{
    Coach, Court, Equipment, PricingBreakdown, PricingRule, ResourceSelection, RuleKind,
};

/// Equipment fees are looked up by these fixed catalog names.
pub const RACKET_ITEM: &str = "Racket";
pub const SHOES_ITEM: &str = "Shoes";

static WINDOW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):\d{2}$").expect("regex compiles"));

/// Hour component of an `HH:MM` window bound; minutes are not significant.
fn window_hour(raw: &str) -> Option<u8> {
    let caps = WINDOW_RE.captures(raw.trim())?;
    let hour: u8 = caps.get(1)?.as_str().parse().ok()?;
    (hour <= 24).then_some(hour)
}

pub fn calculate_price(
    court: &Court,
    date: NaiveDate,
    start_hour: u8,
    end_hour: u8,
    resources: &ResourceSelection,
    rules: &[PricingRule],
    equipment: &[Equipment],
    coaches: &[Coach],
) -> PricingBreakdown {
    let duration = Decimal::from(end_hour.saturating_sub(start_hour));
    let base_price = court.base_price * duration;

    // First rule of each kind applies; unmatched or malformed rules cost nothing.
    let weekday = date.weekday().num_days_from_sunday() as u8;
    let weekend_fee = match rules.iter().find_map(|rule| match &rule.kind {
        RuleKind::Weekend { surcharge, days } => Some((surcharge, days)),
        _ => None,
    }) {
        Some((surcharge, days)) if days.contains(&weekday) => *surcharge * duration,
        _ => Decimal::ZERO,
    };

    // Any overlap with the peak window applies the multiplier to the whole base,
    // not just the overlapping hours.
    let peak_hour_fee = match rules.iter().find_map(|rule| match &rule.kind {
        RuleKind::PeakHour {
            multiplier,
            start_time,
            end_time,
        } => Some((multiplier, start_time, end_time)),
        _ => None,
    }) {
        Some((multiplier, start_time, end_time)) => {
            match (window_hour(start_time), window_hour(end_time)) {
                (Some(peak_start), Some(peak_end))
                    if overlaps(start_hour, end_hour, peak_start, peak_end) =>
                {
                    base_price * *multiplier - base_price
                }
                (Some(_), Some(_)) => Decimal::ZERO,
                _ => {
                    debug!(%start_time, %end_time, "unparseable peak window, fee skipped");
                    Decimal::ZERO
                }
            }
        }
        None => Decimal::ZERO,
    };

    let unit_price = |item_name: &str| {
        equipment
            .iter()
            .find(|e| e.name == item_name)
            .map(|e| e.price_per_session)
            .unwrap_or(Decimal::ZERO)
    };
    let equipment_fee = Decimal::from(resources.rackets) * unit_price(RACKET_ITEM)
        + Decimal::from(resources.shoes) * unit_price(SHOES_ITEM);

    let coach_fee = resources
        .coach_id
        .as_deref()
        .and_then(|id| coaches.iter().find(|c| c.id == id))
        .map(|coach| coach.hourly_rate * duration)
        .unwrap_or(Decimal::ZERO);

    let total = base_price + weekend_fee + peak_hour_fee + equipment_fee + coach_fee;
    PricingBreakdown {
        base_price,
        weekend_fee,
        peak_hour_fee,
        equipment_fee,
        coach_fee,
        total,
    }
}

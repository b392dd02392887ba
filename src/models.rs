use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum CourtKind {
    Indoor,
    Outdoor,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Court {
    pub id: String,
    pub name: String,
    pub kind: CourtKind,
    /// Hourly base rate.
    pub base_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Coach {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub hourly_rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub total_stock: u32,
    pub price_per_session: Decimal,
}

/// Pricing policy variants, tagged on the wire as `WEEKEND` / `PEAK_HOUR`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    Weekend {
        /// Extra charge per booked hour.
        surcharge: Decimal,
        /// Applicable weekdays, 0=Sunday..6=Saturday.
        days: Vec<u8>,
    },
    PeakHour {
        multiplier: Decimal,
        /// Window bounds as `HH:MM`; only the hour component is significant.
        start_time: String,
        end_time: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PricingRule {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: RuleKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Waitlist,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ResourceSelection {
    #[serde(default)]
    pub rackets: u32,
    #[serde(default)]
    pub shoes: u32,
    #[serde(default)]
    pub coach_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PricingBreakdown {
    pub base_price: Decimal,
    pub weekend_fee: Decimal,
    pub peak_hour_fee: Decimal,
    pub equipment_fee: Decimal,
    pub coach_fee: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: String,
    pub court_id: String,
    #[schema(value_type = String, format = "date", example = "2026-08-01")]
    pub date: NaiveDate,
    /// Half-open hour interval `[start_hour, end_hour)`.
    pub start_hour: u8,
    pub end_hour: u8,
    pub resources: ResourceSelection,
    pub status: BookingStatus,
    pub pricing: PricingBreakdown,
    pub created_at: DateTime<Utc>,
}

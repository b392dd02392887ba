use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::availability::{Conflict, check_availability};
use crate::models::{
    Booking, BookingStatus, Equipment, PricingBreakdown, ResourceSelection,
};
use crate::pricing::calculate_price;
use crate::store::{BookingStore, StoreError};

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    Unavailable(#[from] Conflict),
    #[error("Court not found")]
    CourtNotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub user_id: String,
    pub court_id: String,
    #[schema(value_type = String, format = "date", example = "2026-08-01")]
    pub date: NaiveDate,
    pub start_hour: u8,
    pub end_hour: u8,
    #[serde(default)]
    pub rackets: u32,
    #[serde(default)]
    pub shoes: u32,
    #[serde(default)]
    pub coach_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddEquipmentRequest {
    pub name: String,
    pub total_stock: u32,
    pub price_per_session: Decimal,
}

/// Orchestrates check -> price -> persist over the injected store.
pub struct BookingService {
    store: Arc<BookingStore>,
    // Serializes the whole create sequence; two concurrent requests for the same
    // slot cannot both pass the availability check.
    reserve_gate: Mutex<()>,
}

impl BookingService {
    pub fn new(store: Arc<BookingStore>) -> Self {
        Self {
            store,
            reserve_gate: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    /// Read-only availability probe; takes no gate.
    pub fn check_availability(
        &self,
        date: NaiveDate,
        start_hour: u8,
        end_hour: u8,
        court_id: &str,
        coach_id: Option<&str>,
    ) -> Result<Option<Conflict>, StoreError> {
        let bookings = self.store.bookings()?;
        Ok(check_availability(
            &bookings, date, start_hour, end_hour, court_id, coach_id,
        ))
    }

    /// Identical computation to the one embedded in `create_booking`, without
    /// writing anything.
    pub fn preview_price(
        &self,
        court_id: &str,
        date: NaiveDate,
        start_hour: u8,
        end_hour: u8,
        resources: &ResourceSelection,
    ) -> Result<PricingBreakdown, BookingError> {
        let courts = self.store.courts()?;
        let court = courts
            .iter()
            .find(|c| c.id == court_id)
            .ok_or(BookingError::CourtNotFound)?;
        Ok(calculate_price(
            court,
            date,
            start_hour,
            end_hour,
            resources,
            &self.store.rules()?,
            &self.store.equipment()?,
            &self.store.coaches()?,
        ))
    }

    pub fn create_booking(&self, request: CreateBookingRequest) -> Result<Booking, BookingError> {
        let _guard = self
            .reserve_gate
            .lock()
            .map_err(|_| StoreError::Backend("reserve gate poisoned".into()))?;

        let resources = ResourceSelection {
            rackets: request.rackets,
            shoes: request.shoes,
            coach_id: request.coach_id,
        };

        let bookings = self.store.bookings()?;
        if let Some(conflict) = check_availability(
            &bookings,
            request.date,
            request.start_hour,
            request.end_hour,
            &request.court_id,
            resources.coach_id.as_deref(),
        ) {
            return Err(conflict.into());
        }

        let courts = self.store.courts()?;
        let court = courts
            .iter()
            .find(|c| c.id == request.court_id)
            .ok_or(BookingError::CourtNotFound)?;

        let pricing = calculate_price(
            court,
            request.date,
            request.start_hour,
            request.end_hour,
            &resources,
            &self.store.rules()?,
            &self.store.equipment()?,
            &self.store.coaches()?,
        );

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            court_id: request.court_id,
            date: request.date,
            start_hour: request.start_hour,
            end_hour: request.end_hour,
            resources,
            status: BookingStatus::Confirmed,
            pricing,
            created_at: Utc::now(),
        };
        self.store.append_booking(&booking)?;
        info!(booking_id = %booking.id, court_id = %booking.court_id, "booking confirmed");
        Ok(booking)
    }

    pub fn add_equipment(&self, request: AddEquipmentRequest) -> Result<Equipment, BookingError> {
        let _guard = self
            .reserve_gate
            .lock()
            .map_err(|_| StoreError::Backend("reserve gate poisoned".into()))?;

        let item = Equipment {
            id: format!("eq_{}", Uuid::new_v4().simple()),
            name: request.name,
            total_stock: request.total_stock,
            price_per_session: request.price_per_session,
        };
        self.store.append_equipment(&item)?;
        info!(equipment_id = %item.id, "equipment added");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn service() -> BookingService {
        let store = Arc::new(BookingStore::in_memory());
        store.seed_defaults().unwrap();
        BookingService::new(store)
    }

    fn request(court_id: &str, start_hour: u8, end_hour: u8) -> CreateBookingRequest {
        CreateBookingRequest {
            user_id: "u1".into(),
            court_id: court_id.into(),
            // A Tuesday, outside the seeded peak window unless hours say otherwise.
            date: NaiveDate::from_ymd_opt(2026, 8, 4).unwrap(),
            start_hour,
            end_hour,
            rackets: 0,
            shoes: 0,
            coach_id: None,
        }
    }

    #[test]
    fn test_create_booking_confirms_and_prices() {
        let service = service();
        let booking = service.create_booking(request("c1", 8, 10)).unwrap();

        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.pricing.base_price, dec!(40));
        assert_eq!(booking.pricing.total, dec!(40));
        assert_eq!(service.store().bookings().unwrap().len(), 1);
    }

    #[test]
    fn test_conflicting_booking_leaves_store_unchanged() {
        let service = service();
        service.create_booking(request("c1", 14, 16)).unwrap();

        let err = service.create_booking(request("c1", 15, 17)).unwrap_err();
        assert!(matches!(err, BookingError::Unavailable(Conflict::Court)));
        assert_eq!(
            err.to_string(),
            "Court is already booked for this time slot."
        );
        assert_eq!(service.store().bookings().unwrap().len(), 1);
    }

    #[test]
    fn test_back_to_back_bookings_both_succeed() {
        let service = service();
        service.create_booking(request("c1", 9, 10)).unwrap();
        service.create_booking(request("c1", 10, 11)).unwrap();
        assert_eq!(service.store().bookings().unwrap().len(), 2);
    }

    #[test]
    fn test_coach_double_booking_rejected_across_courts() {
        let service = service();
        let mut first = request("c1", 14, 16);
        first.coach_id = Some("ch1".into());
        service.create_booking(first).unwrap();

        let mut second = request("c2", 15, 17);
        second.coach_id = Some("ch1".into());
        let err = service.create_booking(second).unwrap_err();
        assert!(matches!(err, BookingError::Unavailable(Conflict::Coach)));
        assert_eq!(service.store().bookings().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_court_rejected_without_write() {
        let service = service();
        let err = service.create_booking(request("c9", 8, 10)).unwrap_err();
        assert!(matches!(err, BookingError::CourtNotFound));
        assert!(service.store().bookings().unwrap().is_empty());
    }

    #[test]
    fn test_booking_price_includes_requested_resources() {
        let service = service();
        let mut req = request("c1", 17, 19);
        req.rackets = 2;
        req.shoes = 1;
        req.coach_id = Some("ch1".into());
        let booking = service.create_booking(req).unwrap();

        // base 40, peak 20 (17-19 touches 18-21), equipment 13, coach 50
        assert_eq!(booking.pricing.base_price, dec!(40));
        assert_eq!(booking.pricing.peak_hour_fee, dec!(20));
        assert_eq!(booking.pricing.equipment_fee, dec!(13));
        assert_eq!(booking.pricing.coach_fee, dec!(50));
        assert_eq!(booking.pricing.total, dec!(123));
    }

    #[test]
    fn test_preview_price_matches_created_booking_and_writes_nothing() {
        let service = service();
        let resources = ResourceSelection {
            rackets: 1,
            shoes: 0,
            coach_id: None,
        };
        let date = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();
        let preview = service
            .preview_price("c1", date, 8, 10, &resources)
            .unwrap();
        assert!(service.store().bookings().unwrap().is_empty());

        let mut req = request("c1", 8, 10);
        req.rackets = 1;
        let booking = service.create_booking(req).unwrap();
        assert_eq!(booking.pricing, preview);
    }

    #[test]
    fn test_preview_price_unknown_court() {
        let service = service();
        let date = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();
        let err = service
            .preview_price("c9", date, 8, 10, &ResourceSelection::default())
            .unwrap_err();
        assert!(matches!(err, BookingError::CourtNotFound));
    }

    #[test]
    fn test_add_equipment_generates_distinct_ids() {
        let service = service();
        let first = service
            .add_equipment(AddEquipmentRequest {
                name: "Towel".into(),
                total_stock: 5,
                price_per_session: dec!(1),
            })
            .unwrap();
        let second = service
            .add_equipment(AddEquipmentRequest {
                name: "Grip Tape".into(),
                total_stock: 30,
                price_per_session: dec!(2),
            })
            .unwrap();

        assert!(first.id.starts_with("eq_"));
        assert_ne!(first.id, second.id);

        let all = service.store().equipment().unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].id, "eq1");
        assert_eq!(all[1].id, "eq2");
    }
}

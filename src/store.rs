use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal_macros::dec;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::models::{Booking, Coach, Court, CourtKind, Equipment, PricingRule, RuleKind};

const COURTS: &str = "courts";
const COACHES: &str = "coaches";
const EQUIPMENT: &str = "equipment";
const RULES: &str = "rules";
const BOOKINGS: &str = "bookings";
const INITIALIZED: &str = "initialized";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("corrupt payload in collection `{collection}`: {source}")]
    Corrupt {
        collection: &'static str,
        source: serde_json::Error,
    },
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Flat persistence contract: one JSON payload per collection name.
/// Any durable backend preserving these two operations can replace the default.
pub trait KeyValueStore: Send + Sync {
    fn read(&self, collection: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, collection: &str, payload: String) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, collection: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".into()))?;
        Ok(entries.get(collection).cloned())
    }

    fn write(&self, collection: &str, payload: String) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".into()))?;
        entries.insert(collection.to_string(), payload);
        Ok(())
    }
}

/// Typed repository over the key-value backend. Constructed explicitly and
/// injected through `AppState`; seeding is a separate, idempotent step.
pub struct BookingStore {
    kv: Box<dyn KeyValueStore>,
}

impl BookingStore {
    pub fn new(kv: Box<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    fn read_collection<T: DeserializeOwned>(
        &self,
        collection: &'static str,
    ) -> Result<Vec<T>, StoreError> {
        match self.kv.read(collection)? {
            Some(payload) => serde_json::from_str(&payload)
                .map_err(|source| StoreError::Corrupt { collection, source }),
            None => Ok(Vec::new()),
        }
    }

    fn write_collection<T: Serialize>(
        &self,
        collection: &'static str,
        records: &[T],
    ) -> Result<(), StoreError> {
        let payload = serde_json::to_string(records)
            .map_err(|source| StoreError::Corrupt { collection, source })?;
        self.kv.write(collection, payload)
    }

    pub fn courts(&self) -> Result<Vec<Court>, StoreError> {
        self.read_collection(COURTS)
    }

    pub fn coaches(&self) -> Result<Vec<Coach>, StoreError> {
        self.read_collection(COACHES)
    }

    pub fn equipment(&self) -> Result<Vec<Equipment>, StoreError> {
        self.read_collection(EQUIPMENT)
    }

    pub fn rules(&self) -> Result<Vec<PricingRule>, StoreError> {
        self.read_collection(RULES)
    }

    pub fn bookings(&self) -> Result<Vec<Booking>, StoreError> {
        self.read_collection(BOOKINGS)
    }

    pub fn append_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        let mut all = self.bookings()?;
        all.push(booking.clone());
        self.write_collection(BOOKINGS, &all)
    }

    pub fn append_equipment(&self, item: &Equipment) -> Result<(), StoreError> {
        let mut all = self.equipment()?;
        all.push(item.clone());
        self.write_collection(EQUIPMENT, &all)
    }

    /// Write the default reference data unless the store is already initialized.
    pub fn seed_defaults(&self) -> Result<(), StoreError> {
        if self.kv.read(INITIALIZED)?.is_some() {
            return Ok(());
        }

        self.write_collection(COURTS, &seed_courts())?;
        self.write_collection(COACHES, &seed_coaches())?;
        self.write_collection(EQUIPMENT, &seed_equipment())?;
        self.write_collection(RULES, &seed_rules())?;
        self.write_collection::<Booking>(BOOKINGS, &[])?;
        self.kv.write(INITIALIZED, "true".to_string())?;
        info!("seeded reference data");
        Ok(())
    }
}

fn seed_courts() -> Vec<Court> {
    vec![
        Court {
            id: "c1".into(),
            name: "Badminton A (Indoor)".into(),
            kind: CourtKind::Indoor,
            base_price: dec!(20),
        },
        Court {
            id: "c2".into(),
            name: "Badminton B (Indoor)".into(),
            kind: CourtKind::Indoor,
            base_price: dec!(20),
        },
        Court {
            id: "c3".into(),
            name: "Tennis 1 (Outdoor)".into(),
            kind: CourtKind::Outdoor,
            base_price: dec!(15),
        },
        Court {
            id: "c4".into(),
            name: "Tennis 2 (Outdoor)".into(),
            kind: CourtKind::Outdoor,
            base_price: dec!(15),
        },
    ]
}

fn seed_coaches() -> Vec<Coach> {
    vec![
        Coach {
            id: "ch1".into(),
            name: "John Doe".into(),
            specialty: "Badminton".into(),
            hourly_rate: dec!(25),
        },
        Coach {
            id: "ch2".into(),
            name: "Sarah Smith".into(),
            specialty: "Tennis".into(),
            hourly_rate: dec!(30),
        },
    ]
}

fn seed_equipment() -> Vec<Equipment> {
    vec![
        Equipment {
            id: "eq1".into(),
            name: "Racket".into(),
            total_stock: 20,
            price_per_session: dec!(5),
        },
        Equipment {
            id: "eq2".into(),
            name: "Shoes".into(),
            total_stock: 10,
            price_per_session: dec!(3),
        },
    ]
}

fn seed_rules() -> Vec<PricingRule> {
    vec![
        PricingRule {
            id: "r1".into(),
            name: "Weekend Surcharge".into(),
            kind: RuleKind::Weekend {
                surcharge: dec!(5),
                days: vec![0, 6],
            },
        },
        PricingRule {
            id: "r2".into(),
            name: "Peak Hour".into(),
            kind: RuleKind::PeakHour {
                multiplier: dec!(1.5),
                start_time: "18:00".into(),
                end_time: "21:00".into(),
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::models::{BookingStatus, PricingBreakdown, ResourceSelection};

    fn sample_booking() -> Booking {
        Booking {
            id: Uuid::new_v4(),
            user_id: "u1".into(),
            court_id: "c1".into(),
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            start_hour: 9,
            end_hour: 10,
            resources: ResourceSelection::default(),
            status: BookingStatus::Confirmed,
            pricing: PricingBreakdown {
                base_price: dec!(20),
                weekend_fee: dec!(5),
                peak_hour_fee: dec!(0),
                equipment_fee: dec!(0),
                coach_fee: dec!(0),
                total: dec!(25),
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_unseeded_store_is_empty() {
        let store = BookingStore::in_memory();
        assert!(store.courts().unwrap().is_empty());
        assert!(store.bookings().unwrap().is_empty());
    }

    #[test]
    fn test_seed_defaults() {
        let store = BookingStore::in_memory();
        store.seed_defaults().unwrap();

        assert_eq!(store.courts().unwrap().len(), 4);
        assert_eq!(store.coaches().unwrap().len(), 2);
        assert_eq!(store.equipment().unwrap().len(), 2);
        assert_eq!(store.rules().unwrap().len(), 2);
        assert!(store.bookings().unwrap().is_empty());
    }

    #[test]
    fn test_seed_defaults_is_idempotent() {
        let store = BookingStore::in_memory();
        store.seed_defaults().unwrap();

        let item = Equipment {
            id: "eq_test".into(),
            name: "Towel".into(),
            total_stock: 5,
            price_per_session: dec!(1),
        };
        store.append_equipment(&item).unwrap();

        // Second seed must not reset anything.
        store.seed_defaults().unwrap();
        assert_eq!(store.equipment().unwrap().len(), 3);
    }

    #[test]
    fn test_append_booking_round_trip() {
        let store = BookingStore::in_memory();
        store.seed_defaults().unwrap();

        let booking = sample_booking();
        store.append_booking(&booking).unwrap();

        let all = store.bookings().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], booking);
    }

    #[test]
    fn test_append_equipment_preserves_existing() {
        let store = BookingStore::in_memory();
        store.seed_defaults().unwrap();

        let item = Equipment {
            id: "eq_test".into(),
            name: "Towel".into(),
            total_stock: 5,
            price_per_session: dec!(1),
        };
        store.append_equipment(&item).unwrap();

        let all = store.equipment().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, "eq1");
        assert_eq!(all[1].id, "eq2");
        assert_eq!(all[2].name, "Towel");
    }

    #[test]
    fn test_corrupt_collection_surfaces_error() {
        let kv = MemoryStore::new();
        kv.write("courts", "not json".to_string()).unwrap();
        let store = BookingStore::new(Box::new(kv));

        let err = store.courts().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { collection: "courts", .. }));
    }

    #[test]
    fn test_rule_wire_format() {
        let rules = seed_rules();
        let json = serde_json::to_string(&rules).unwrap();
        assert!(json.contains(r#""type":"WEEKEND""#));
        assert!(json.contains(r#""type":"PEAK_HOUR""#));

        let parsed: Vec<PricingRule> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rules);
    }
}

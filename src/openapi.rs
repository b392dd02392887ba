use utoipa::OpenApi;

use crate::availability::HourSlot;
use crate::booking::{AddEquipmentRequest, CreateBookingRequest};
use crate::handlers::AvailabilityResponse;
use crate::models::{
    Booking, BookingStatus, Coach, Court, CourtKind, Equipment, PricingBreakdown, PricingRule,
    ResourceSelection, RuleKind,
};
use crate::report::{DailyRevenue, RevenueSummary};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::list_courts,
        crate::handlers::list_coaches,
        crate::handlers::list_equipment,
        crate::handlers::list_rules,
        crate::handlers::list_bookings,
        crate::handlers::check_availability,
        crate::handlers::day_availability,
        crate::handlers::price_preview,
        crate::handlers::create_booking,
        crate::handlers::add_equipment,
        crate::handlers::admin_summary,
        crate::handlers::get_ical
    ),
    components(schemas(
        Court,
        CourtKind,
        Coach,
        Equipment,
        PricingRule,
        RuleKind,
        Booking,
        BookingStatus,
        ResourceSelection,
        PricingBreakdown,
        HourSlot,
        AvailabilityResponse,
        CreateBookingRequest,
        AddEquipmentRequest,
        RevenueSummary,
        DailyRevenue
    )),
    tags(
        (name = "booking", description = "Availability, pricing and booking operations"),
        (name = "reference", description = "Read-only reference data"),
        (name = "admin", description = "Inventory and revenue administration")
    )
)]
pub struct ApiDoc;

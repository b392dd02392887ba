use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    AppState,
    availability::HourSlot,
    booking::{AddEquipmentRequest, CreateBookingRequest},
    error::ApiError,
    models::{Booking, Coach, Court, Equipment, PricingBreakdown, PricingRule, ResourceSelection},
    report::{RevenueSummary, revenue_summary},
    validation::{validate_equipment_name, validate_hours},
};

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub start_hour: u8,
    pub end_hour: u8,
    pub court_id: String,
    pub coach_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DayAvailabilityQuery {
    pub date: NaiveDate,
    pub court_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub court_id: String,
    pub date: NaiveDate,
    pub start_hour: u8,
    pub end_hour: u8,
    #[serde(default)]
    pub rackets: u32,
    #[serde(default)]
    pub shoes: u32,
    pub coach_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[utoipa::path(get, path = "/", tag = "booking")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Court Booking API",
        "endpoints": {
            "/courts": "List courts",
            "/coaches": "List coaches",
            "/equipment": "List equipment catalog",
            "/rules": "List pricing rules",
            "/availability": "Check a slot for conflicts",
            "/availability/day": "Per-hour availability grid for one court",
            "/price": "Preview a price breakdown",
            "/bookings": "List or create bookings",
            "/bookings.ical": "Download bookings as an iCal file",
            "/admin/summary": "Revenue summary"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "booking")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "booking")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/courts",
    responses((status = 200, description = "List of courts", body = [Court])),
    tag = "reference"
)]
pub async fn list_courts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let courts = state.service.store().courts()?;
    Ok(Json(courts))
}

#[utoipa::path(
    get,
    path = "/coaches",
    responses((status = 200, description = "List of coaches", body = [Coach])),
    tag = "reference"
)]
pub async fn list_coaches(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let coaches = state.service.store().coaches()?;
    Ok(Json(coaches))
}

#[utoipa::path(
    get,
    path = "/equipment",
    responses((status = 200, description = "Equipment catalog", body = [Equipment])),
    tag = "reference"
)]
pub async fn list_equipment(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let equipment = state.service.store().equipment()?;
    Ok(Json(equipment))
}

#[utoipa::path(
    get,
    path = "/rules",
    responses((status = 200, description = "Pricing rules", body = [PricingRule])),
    tag = "reference"
)]
pub async fn list_rules(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rules = state.service.store().rules()?;
    Ok(Json(rules))
}

#[utoipa::path(
    get,
    path = "/bookings",
    responses((status = 200, description = "All bookings", body = [Booking])),
    tag = "booking"
)]
pub async fn list_bookings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let bookings = state.service.store().bookings()?;
    Ok(Json(bookings))
}

#[utoipa::path(
    get,
    path = "/availability",
    params(
        ("date" = String, Query, description = "Calendar day, YYYY-MM-DD"),
        ("start_hour" = u8, Query, description = "Slot start hour, inclusive"),
        ("end_hour" = u8, Query, description = "Slot end hour, exclusive"),
        ("court_id" = String, Query, description = "Court to check"),
        ("coach_id" = Option<String>, Query, description = "Coach to check, if any")
    ),
    responses(
        (status = 200, description = "Availability verdict", body = AvailabilityResponse),
        (status = 400, description = "Malformed hour range")
    ),
    tag = "booking"
)]
pub async fn check_availability(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    validate_hours(query.start_hour, query.end_hour)?;

    let conflict = state.service.check_availability(
        query.date,
        query.start_hour,
        query.end_hour,
        &query.court_id,
        query.coach_id.as_deref(),
    )?;

    Ok(Json(AvailabilityResponse {
        available: conflict.is_none(),
        reason: conflict.map(|c| c.to_string()),
    }))
}

#[utoipa::path(
    get,
    path = "/availability/day",
    params(
        ("date" = String, Query, description = "Calendar day, YYYY-MM-DD"),
        ("court_id" = String, Query, description = "Court to inspect")
    ),
    responses((status = 200, description = "Per-hour grid over opening hours", body = [HourSlot])),
    tag = "booking"
)]
pub async fn day_availability(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<DayAvailabilityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let bookings = state.service.store().bookings()?;
    let slots = crate::availability::day_slots(
        &bookings,
        query.date,
        &query.court_id,
        state.settings.open_hour,
        state.settings.close_hour,
    );
    Ok(Json(slots))
}

#[utoipa::path(
    get,
    path = "/price",
    params(
        ("court_id" = String, Query, description = "Court to price"),
        ("date" = String, Query, description = "Calendar day, YYYY-MM-DD"),
        ("start_hour" = u8, Query, description = "Slot start hour, inclusive"),
        ("end_hour" = u8, Query, description = "Slot end hour, exclusive"),
        ("rackets" = Option<u32>, Query, description = "Rackets to rent"),
        ("shoes" = Option<u32>, Query, description = "Shoe pairs to rent"),
        ("coach_id" = Option<String>, Query, description = "Requested coach")
    ),
    responses(
        (status = 200, description = "Itemized price", body = PricingBreakdown),
        (status = 400, description = "Malformed hour range"),
        (status = 404, description = "Unknown court")
    ),
    tag = "booking"
)]
pub async fn price_preview(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<PriceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    validate_hours(query.start_hour, query.end_hour)?;

    let resources = ResourceSelection {
        rackets: query.rackets,
        shoes: query.shoes,
        coach_id: query.coach_id,
    };
    let breakdown = state.service.preview_price(
        &query.court_id,
        query.date,
        query.start_hour,
        query.end_hour,
        &resources,
    )?;
    Ok(Json(breakdown))
}

#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking confirmed", body = Booking),
        (status = 400, description = "Malformed hour range"),
        (status = 404, description = "Unknown court"),
        (status = 409, description = "Slot conflict")
    ),
    tag = "booking"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_hours(request.start_hour, request.end_hour)?;

    let booking = state.service.create_booking(request)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[utoipa::path(
    post,
    path = "/equipment",
    request_body = AddEquipmentRequest,
    responses(
        (status = 201, description = "Equipment added", body = Equipment),
        (status = 400, description = "Empty name")
    ),
    tag = "admin"
)]
pub async fn add_equipment(
    State(state): State<AppState>,
    Json(request): Json<AddEquipmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_equipment_name(&request.name)?;

    let item = state.service.add_equipment(request)?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get,
    path = "/admin/summary",
    responses((status = 200, description = "Revenue summary", body = RevenueSummary)),
    tag = "admin"
)]
pub async fn admin_summary(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let bookings = state.service.store().bookings()?;
    Ok(Json(revenue_summary(&bookings)))
}

#[utoipa::path(
    get,
    path = "/bookings.ical",
    responses(
        (status = 200, description = "iCal file", content_type = "text/calendar"),
        (status = 404, description = "No bookings to export")
    ),
    tag = "booking"
)]
pub async fn get_ical(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let bookings = state.service.store().bookings()?;
    if bookings.is_empty() {
        return Err(ApiError::NotFound("No bookings found".into()));
    }

    let courts = state.service.store().courts()?;
    let body = state.exporter.generate(&bookings, &courts);
    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/calendar"),
            (
                "content-disposition",
                "attachment; filename=court_bookings.ics",
            ),
        ],
        body,
    ))
}

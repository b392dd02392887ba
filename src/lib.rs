pub mod availability;
pub mod booking;
pub mod error;
pub mod handlers;
pub mod ical;
pub mod models;
pub mod openapi;
pub mod pricing;
pub mod report;
pub mod settings;
pub mod store;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use handlers::{
    add_equipment, admin_summary, check_availability, create_booking, day_availability, get_ical,
    healthz_live, healthz_ready, list_bookings, list_coaches, list_courts, list_equipment,
    list_rules, price_preview, root,
};
use tower_http::LatencyUnit;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::booking::BookingService;
use crate::ical::CalendarExporter;
use crate::openapi::ApiDoc;
use crate::settings::Settings;
use crate::store::BookingStore;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub service: Arc<BookingService>,
    pub exporter: Arc<CalendarExporter>,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let store = Arc::new(BookingStore::in_memory());
    store.seed_defaults()?;

    let state = AppState {
        service: Arc::new(BookingService::new(store)),
        exporter: Arc::new(CalendarExporter::new(
            settings.facility_timezone(),
            settings.public_base_url.clone(),
        )),
        settings: settings.clone(),
    };

    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!("Starting Court Booking API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/courts", get(list_courts))
        .route("/coaches", get(list_coaches))
        .route("/equipment", get(list_equipment).post(add_equipment))
        .route("/rules", get(list_rules))
        .route("/availability", get(check_availability))
        .route("/availability/day", get(day_availability))
        .route("/price", get(price_preview))
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings.ical", get(get_ical))
        .route("/admin/summary", get(admin_summary))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(trace_layer).layer(CorsLayer::permissive())
}

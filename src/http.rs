use crate::backend::BookingPersistence;
use crate::configuration::Configuration;
use crate::error::BookingError;
use crate::reservation_store::ReservationStore;
use crate::types::{Booking, BookingRequest, Slot};
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, Request};
use axum::middleware::{self, Next};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::Response;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum::{
    routing::{get, post},
    Router,
};
use axum_valid::{Valid, ValidRejection};
use chrono::NaiveDate;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};

pub struct AppState<P: BookingPersistence, C: Configuration> {
    pub store: ReservationStore<P>,
    pub configuration: C,
}

impl<P: BookingPersistence, C: Configuration> Clone for AppState<P, C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            configuration: self.configuration.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotsQuery {
    date: NaiveDate,
}

pub fn create_app<P: BookingPersistence, C: Configuration>(
    store: ReservationStore<P>,
    configuration: C,
) -> Router {
    let state = AppState {
        store,
        configuration,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/slots", get(get_slots::<P, C>))
        .route("/book", post(book::<P, C>))
        .route("/bookings/stream", get(stream_booked_slots::<P, C>));

    let admin = Router::new()
        .route("/bookings", get(get_bookings::<P, C>))
        .route("/clear", post(clear_bookings::<P, C>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::<P, C>,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
}

async fn admin_auth<P: BookingPersistence, C: Configuration>(
    State(state): State<AppState<P, C>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    match request.headers().get("x-admin-password") {
        Some(auth_header) => {
            if auth_header.to_str().unwrap_or("") != state.configuration.password() {
                warn!(path = %request.uri().path(), "Rejected admin request with wrong password");
                return Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()));
            }
        }
        None => return Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string())),
    }
    Ok(next.run(request).await)
}

async fn get_slots<P: BookingPersistence, C: Configuration>(
    State(state): State<AppState<P, C>>,
    Query(query): Query<SlotsQuery>,
) -> Json<Vec<Slot>> {
    debug!(date = %query.date, "Available slots requested");
    Json(state.store.available_slots(query.date))
}

async fn book<P: BookingPersistence, C: Configuration>(
    State(state): State<AppState<P, C>>,
    request: Result<Valid<Json<BookingRequest>>, ValidRejection<JsonRejection>>,
) -> Result<Json<Booking>, (StatusCode, String)> {
    // Malformed bodies are invalid input just like failed validation
    let Valid(Json(request)) =
        request.map_err(|rejection| (StatusCode::BAD_REQUEST, rejection.to_string()))?;
    state.store.submit(&request).map(Json).map_err(|err| {
        let status = match err {
            BookingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BookingError::Conflict { .. } => StatusCode::CONFLICT,
        };
        (status, err.to_string())
    })
}

async fn stream_booked_slots<P: BookingPersistence, C: Configuration>(
    State(state): State<AppState<P, C>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let events = state
        .store
        .subscribe()
        .map(|booked_slots| Event::default().json_data(booked_slots));
    Sse::new(events).keep_alive(KeepAlive::default())
}

async fn get_bookings<P: BookingPersistence, C: Configuration>(
    State(state): State<AppState<P, C>>,
) -> Json<Vec<Booking>> {
    Json(state.store.bookings())
}

async fn clear_bookings<P: BookingPersistence, C: Configuration>(
    State(state): State<AppState<P, C>>,
) -> impl IntoResponse {
    state.store.clear();
    (StatusCode::OK, "All bookings removed successfully".to_string())
}

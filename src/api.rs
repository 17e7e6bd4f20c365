// HTTP layer for the reservation API
// Routes under /api translate requests into store and engine calls; every
// failure is mapped to a JSON response by ApiError

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::engine::BookingEngine;
use crate::error::{ApiError, ErrorBody};
use crate::models::{
    Accommodation, Booking, Credentials, Destination, InsertBooking, InsertUser, Package,
    PublicUser, TravelTip,
};
use crate::store::Storage;

// Shared handler state, cloned cheaply per request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub engine: Arc<BookingEngine>,
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/users", post(register_user))
        .route("/login", post(login))
        .route("/destinations", get(list_destinations))
        .route("/destinations/{id}", get(get_destination))
        .route("/packages", get(list_packages))
        .route("/accommodations", get(list_accommodations))
        .route("/travel-tips", get(list_travel_tips))
        .route("/bookings", post(create_booking).get(list_bookings))
        .fallback(unknown_api_route);

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn(log_api_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Path and query ids must be whole integers; anything else is rejected
// before the store is consulted
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::InvalidId)
}

// Query ids are optional and an empty value counts as omitted
fn optional_id(raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    match raw.filter(|value| !value.is_empty()) {
        Some(value) => parse_id(value).map(Some),
        None => Ok(None),
    }
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::Validation(rejection.body_text())
}

fn bad_query(rejection: QueryRejection) -> ApiError {
    ApiError::Validation(rejection.body_text())
}

async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<InsertUser>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let Json(insert) = payload.map_err(bad_body)?;
    let user = state.store.create_user(insert).await;
    tracing::debug!(user_id = user.id, username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

// Plaintext password equality; the response never discloses whether the
// username exists
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<PublicUser>, ApiError> {
    let Json(credentials) = payload.map_err(bad_body)?;
    match state.store.get_user_by_username(&credentials.username).await {
        Some(user) if user.password == credentials.password => Ok(Json(user.into())),
        _ => Err(ApiError::InvalidCredentials),
    }
}

async fn list_destinations(State(state): State<AppState>) -> Json<Vec<Destination>> {
    Json(state.store.get_all_destinations().await)
}

async fn get_destination(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Destination>, ApiError> {
    let id = parse_id(&id)?;
    let destination = state
        .store
        .get_destination(id)
        .await
        .ok_or(ApiError::NotFound("Destination"))?;
    Ok(Json(destination))
}

async fn list_packages(State(state): State<AppState>) -> Json<Vec<Package>> {
    Json(state.store.get_all_packages().await)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccommodationsQuery {
    destination_id: Option<String>,
}

async fn list_accommodations(
    State(state): State<AppState>,
    query: Result<Query<AccommodationsQuery>, QueryRejection>,
) -> Result<Json<Vec<Accommodation>>, ApiError> {
    let Query(query) = query.map_err(bad_query)?;
    let accommodations = match optional_id(query.destination_id.as_deref())? {
        Some(destination_id) => {
            state
                .store
                .get_accommodations_for_destination(destination_id)
                .await
        }
        None => state.store.get_all_accommodations().await,
    };
    Ok(Json(accommodations))
}

async fn list_travel_tips(State(state): State<AppState>) -> Json<Vec<TravelTip>> {
    Json(state.store.get_all_travel_tips().await)
}

async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<InsertBooking>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let Json(insert) = payload.map_err(bad_body)?;
    let booking = state.engine.create_booking(insert).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingsQuery {
    user_id: Option<String>,
}

async fn list_bookings(
    State(state): State<AppState>,
    query: Result<Query<BookingsQuery>, QueryRejection>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let Query(query) = query.map_err(bad_query)?;
    let bookings = match optional_id(query.user_id.as_deref())? {
        Some(user_id) => state.engine.bookings_for_user(user_id).await,
        None => state.engine.all_bookings().await,
    };
    Ok(Json(bookings))
}

async fn unknown_api_route() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}

// One info line per completed /api request: method, path, status, duration
// and the response JSON, truncated to 80 characters
async fn log_api_requests(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !path.starts_with("/api") {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis();

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(error = %err, "failed to buffer response body for request log");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Internal server error".to_string(),
                }),
            )
                .into_response();
        }
    };

    tracing::info!("{}", request_log_line(&method, &path, status, elapsed_ms, &bytes));

    Response::from_parts(parts, Body::from(bytes))
}

fn request_log_line(
    method: &Method,
    path: &str,
    status: u16,
    elapsed_ms: u128,
    body: &[u8],
) -> String {
    let mut line = format!("{} {} {} in {}ms", method, path, status, elapsed_ms);
    if !body.is_empty() {
        line.push_str(" :: ");
        line.push_str(&String::from_utf8_lossy(body));
    }
    if line.chars().count() > 80 {
        line = line.chars().take(79).collect();
        line.push('…');
    }
    line
}

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Json},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use room_detection::config::CONNECTIVITY_THRESHOLD;
use room_detection::connectivity::find_connected_walls_with_threshold;
use room_detection::{
    detect_rooms, find_walls_for_room, validate_walls, DetectionOptions, Room, RoomDetectionError,
    Wall,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

// Wall lists are small JSON documents; anything bigger is not a floor plan
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectRoomsRequest {
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub options: DetectionOptions,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectRoomsResponse {
    pub rooms: Vec<Room>,
    pub total_rooms: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedWallsRequest {
    pub walls: Vec<Wall>,
    pub starting_wall_ids: Vec<String>,
    #[serde(default = "default_connectivity_threshold")]
    pub threshold: f64,
}

fn default_connectivity_threshold() -> f64 {
    CONNECTIVITY_THRESHOLD
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomWallsRequest {
    pub walls: Vec<Wall>,
    pub room: Room,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallIdsResponse {
    pub wall_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(err: RoomDetectionError) -> ApiError {
    let code = match &err {
        RoomDetectionError::InvalidJson(_) => "INVALID_JSON",
        RoomDetectionError::NonFiniteCoordinate { .. }
        | RoomDetectionError::CoordinateOutOfRange { .. } => "INVALID_POINT",
        RoomDetectionError::InvalidAreaBounds { .. } => "INVALID_THRESHOLD",
        RoomDetectionError::TooManyWalls { .. } => "INPUT_TOO_LARGE",
    };
    warn!("Request rejected: {}", err);

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: code.to_string(),
            message: err.to_string(),
        }),
    )
}

/// Unwrap a JSON body, reporting extractor failures in the same shape as other errors.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!("Request rejected: {}", rejection.body_text());
            Err((
                rejection.status(),
                Json(ErrorResponse {
                    error: "INVALID_JSON".to_string(),
                    message: rejection.body_text(),
                }),
            ))
        }
    }
}

fn invalid_threshold(threshold: f64) -> ApiError {
    warn!("Request rejected: invalid threshold {}", threshold);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "INVALID_THRESHOLD".to_string(),
            message: "Threshold must be a non-negative finite number".to_string(),
        }),
    )
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn detect_rooms_handler(
    payload: Result<Json<DetectRoomsRequest>, JsonRejection>,
) -> Result<Json<DetectRoomsResponse>, ApiError> {
    let request = json_body(payload)?;
    info!("Received detection request with {} walls", request.walls.len());

    validate_walls(&request.walls).map_err(bad_request)?;
    request.options.validate().map_err(bad_request)?;

    let rooms = detect_rooms(&request.walls, &request.options);

    Ok(Json(DetectRoomsResponse {
        total_rooms: rooms.len(),
        rooms,
    }))
}

async fn connected_walls_handler(
    payload: Result<Json<ConnectedWallsRequest>, JsonRejection>,
) -> Result<Json<WallIdsResponse>, ApiError> {
    let request = json_body(payload)?;
    info!(
        "Received connectivity request: {} starting walls, {} walls",
        request.starting_wall_ids.len(),
        request.walls.len()
    );

    validate_walls(&request.walls).map_err(bad_request)?;
    if !request.threshold.is_finite() || request.threshold < 0.0 {
        return Err(invalid_threshold(request.threshold));
    }

    let wall_ids = find_connected_walls_with_threshold(
        &request.starting_wall_ids,
        &request.walls,
        request.threshold,
    );

    Ok(Json(WallIdsResponse { wall_ids }))
}

async fn room_walls_handler(
    payload: Result<Json<RoomWallsRequest>, JsonRejection>,
) -> Result<Json<WallIdsResponse>, ApiError> {
    let request = json_body(payload)?;
    info!(
        "Received room wall lookup for {} ({} vertices)",
        request.room.id,
        request.room.points.len()
    );

    validate_walls(&request.walls).map_err(bad_request)?;

    let wall_ids = find_walls_for_room(&request.room, &request.walls);

    Ok(Json(WallIdsResponse { wall_ids }))
}

pub fn create_app() -> Router {
    // Configure CORS from environment or use localhost for development
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:8080,http://127.0.0.1:8080".to_string());

    let origins: Vec<_> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let cors = if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/detect", post(detect_rooms_handler))
        .route("/walls/connected", post(connected_walls_handler))
        .route("/rooms/walls", post(room_walls_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

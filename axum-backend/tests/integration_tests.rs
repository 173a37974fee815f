use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use room_detection_server::{create_app, DetectRoomsResponse, ErrorResponse, WallIdsResponse};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

fn wall(id: &str, x1: f64, z1: f64, x2: f64, z2: f64) -> Value {
    json!({ "id": id, "start": { "x": x1, "z": z1 }, "end": { "x": x2, "z": z2 } })
}

fn box_walls() -> Value {
    json!([
        wall("wall-1", 0.0, 0.0, 5.0, 0.0),
        wall("wall-2", 5.0, 0.0, 5.0, 4.0),
        wall("wall-3", 5.0, 4.0, 0.0, 4.0),
        wall("wall-4", 0.0, 4.0, 0.0, 0.0),
    ])
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let response = create_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_detect_single_box() {
    let (status, bytes) = post_json(create_app(), "/detect", json!({ "walls": box_walls() })).await;

    assert_eq!(status, StatusCode::OK);
    let body: DetectRoomsResponse = parse(&bytes);
    assert_eq!(body.total_rooms, 1);
    assert_eq!(body.rooms.len(), 1);
    assert!((body.rooms[0].area - 20.0).abs() < 1e-9);
    assert!(body.rooms[0].id.starts_with("room-"));
}

#[tokio::test]
async fn test_detect_respects_options() {
    let request = json!({ "walls": box_walls(), "options": { "maxArea": 10.0 } });
    let (status, bytes) = post_json(create_app(), "/detect", request).await;

    assert_eq!(status, StatusCode::OK);
    let body: DetectRoomsResponse = parse(&bytes);
    assert_eq!(body.total_rooms, 0);
}

#[tokio::test]
async fn test_detect_response_uses_camel_case() {
    let (_, bytes) = post_json(create_app(), "/detect", json!({ "walls": box_walls() })).await;

    let body: Value = parse(&bytes);
    assert_eq!(body["totalRooms"], 1);
    assert!(body["rooms"][0]["center"]["z"].is_number());
}

#[tokio::test]
async fn test_detect_rejects_inverted_area_bounds() {
    let request = json!({
        "walls": box_walls(),
        "options": { "minArea": 10.0, "maxArea": 5.0 }
    });
    let (status, bytes) = post_json(create_app(), "/detect", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: ErrorResponse = parse(&bytes);
    assert_eq!(body.error, "INVALID_THRESHOLD");
}

#[tokio::test]
async fn test_detect_rejects_too_many_walls() {
    let walls: Vec<Value> = (0..10_001)
        .map(|i| wall(&format!("wall-{i}"), 0.0, i as f64, 1.0, i as f64))
        .collect();
    let (status, bytes) = post_json(create_app(), "/detect", json!({ "walls": walls })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: ErrorResponse = parse(&bytes);
    assert_eq!(body.error, "INPUT_TOO_LARGE");
}

#[tokio::test]
async fn test_detect_rejects_malformed_walls() {
    let request = json!({ "walls": [{ "id": "wall-1", "start": { "x": 0, "z": 0 } }] });
    let (status, bytes) = post_json(create_app(), "/detect", request).await;

    assert!(status.is_client_error());
    let body: ErrorResponse = parse(&bytes);
    assert_eq!(body.error, "INVALID_JSON");
    assert!(body.message.contains("end"));
}

#[tokio::test]
async fn test_detect_rejects_huge_coordinates() {
    let request = json!({
        "walls": [
            wall("wall-1", 1e19, 0.0, 1e19, 10.0),
            wall("wall-2", 1e19, 10.0, -1e19, 0.0),
            wall("wall-3", -1e19, 0.0, 1e19, 0.0),
        ]
    });
    let (status, bytes) = post_json(create_app(), "/detect", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: ErrorResponse = parse(&bytes);
    assert_eq!(body.error, "INVALID_POINT");
}

#[tokio::test]
async fn test_connected_walls() {
    let mut walls = box_walls();
    walls
        .as_array_mut()
        .unwrap()
        .push(wall("wall-loose", 20.0, 20.0, 25.0, 20.0));
    let request = json!({ "walls": walls, "startingWallIds": ["wall-1"] });
    let (status, bytes) = post_json(create_app(), "/walls/connected", request).await;

    assert_eq!(status, StatusCode::OK);
    let body: WallIdsResponse = parse(&bytes);
    assert_eq!(body.wall_ids.len(), 4);
    assert_eq!(body.wall_ids[0], "wall-1");
    assert!(!body.wall_ids.contains(&"wall-loose".to_string()));
}

#[tokio::test]
async fn test_connected_walls_rejects_negative_threshold() {
    let request = json!({ "walls": box_walls(), "startingWallIds": ["wall-1"], "threshold": -1.0 });
    let (status, bytes) = post_json(create_app(), "/walls/connected", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: ErrorResponse = parse(&bytes);
    assert_eq!(body.error, "INVALID_THRESHOLD");
}

#[tokio::test]
async fn test_room_walls_round_trip_through_detection() {
    let (_, bytes) = post_json(create_app(), "/detect", json!({ "walls": box_walls() })).await;
    let detected: Value = parse(&bytes);
    let room = detected["rooms"][0].clone();

    let request = json!({ "walls": box_walls(), "room": room });
    let (status, bytes) = post_json(create_app(), "/rooms/walls", request).await;

    assert_eq!(status, StatusCode::OK);
    let mut body: WallIdsResponse = parse(&bytes);
    body.wall_ids.sort();
    assert_eq!(body.wall_ids, vec!["wall-1", "wall-2", "wall-3", "wall-4"]);
}

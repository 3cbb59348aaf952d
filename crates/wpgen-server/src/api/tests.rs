use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use wpgen_core::{OutputNamer, RunCounterNamer, LITCHI_HEADERS};

use crate::{
    api,
    config::{Config, OutputMode},
    state::AppState,
};

fn setup_app() -> (axum::Router, PathBuf) {
    let output_dir = std::env::temp_dir().join(format!("wpgen-api-test-{}", uuid::Uuid::new_v4()));
    let config = Config {
        server_port: 0,
        output_dir: output_dir.clone(),
        output_mode: OutputMode::Counter,
    };
    let namer = Arc::new(RunCounterNamer::new(&output_dir));
    let state = Arc::new(AppState::with_namer(config, namer));
    (api::routes().with_state(state), output_dir)
}

fn post_generate(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn read_body(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

async fn read_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&read_body(response).await).expect("parse json")
}

#[tokio::test]
async fn health_check() {
    let (app, _dir) = setup_app();
    let res = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(read_body(res).await, "OK");
}

#[tokio::test]
async fn generate_returns_csv_attachment_and_saves_file() {
    let (app, dir) = setup_app();

    let body = json!({
        "init_lat": 33.6846,
        "init_lon": -117.8265,
        "init_bearing": 90,
        "speed_start": 5,
        "gimbal_pitch": -30,
        "waypoints": [
            {"horizontal": 100, "vertical": 40, "bearing": 0, "hold_time": 2.5},
            {"Horizontal (m)": 50, "Vertical (m)": 0, "Bearing (°)": 90, "Hold (s)": 0},
            [25, 12, -90, 1]
        ]
    });

    let res = app.clone().oneshot(post_generate(body.to_string())).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"output_1.csv\""
    );
    assert!(res.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let text = read_body(res).await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], LITCHI_HEADERS.join(","));

    let second: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(second[3].parse::<f64>().unwrap(), 90.0);
    assert_eq!(second[9], "2500");
    assert_eq!(second[7].parse::<f64>().unwrap(), -30.0);
    assert_eq!(second[11].parse::<f64>().unwrap(), 5.0);
    let third: Vec<&str> = lines[3].split(',').collect();
    assert_eq!(third[2].parse::<f64>().unwrap(), 2.0);
    assert_eq!(third[3].parse::<f64>().unwrap(), 180.0);

    let saved = std::fs::read_to_string(dir.join("output_1.csv")).unwrap();
    assert_eq!(saved, text);

    let res = app.oneshot(post_generate(body.to_string())).await.unwrap();
    assert_eq!(
        res.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"output_2.csv\""
    );

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn empty_waypoints_yield_home_row_only() {
    let (app, dir) = setup_app();
    let body = json!({"init_lat": 0, "init_lon": 0, "init_bearing": 0});

    let res = app.oneshot(post_generate(body.to_string())).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(read_body(res).await.lines().count(), 2);

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (app, _dir) = setup_app();
    let res = app
        .oneshot(post_generate("{not json".to_string()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid JSON"));
    assert!(body["field"].is_null());
    assert!(body["waypoint_index"].is_null());
}

#[tokio::test]
async fn unencodable_hold_time_is_rejected_without_writing() {
    let (app, dir) = setup_app();
    let body = json!({
        "init_lat": 0, "init_lon": 0, "init_bearing": 0,
        "waypoints": [
            {"horizontal": 10, "vertical": 10, "bearing": 0, "hold_time": 1e300}
        ]
    });

    let res = app.oneshot(post_generate(body.to_string())).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(res).await;
    assert_eq!(body["field"], "hold_time");
    assert_eq!(body["waypoint_index"], 1);
    assert_eq!(body["error"], "hold_time is out of range (waypoint 1)");
    assert!(!dir.join("output_1.csv").exists());
}

#[test]
fn app_state_keeps_config_and_injected_namer() {
    let dir = std::env::temp_dir().join(format!("wpgen-state-test-{}", uuid::Uuid::new_v4()));
    let config = Config {
        server_port: 8080,
        output_dir: dir.clone(),
        output_mode: OutputMode::Counter,
    };
    let state = AppState::with_namer(config, Arc::new(RunCounterNamer::new(&dir)));

    assert_eq!(state.config().output_mode, OutputMode::Counter);
    assert_eq!(state.config().output_dir, dir);
    let target = state.namer().next_destination().unwrap();
    assert_eq!(target.path, dir.join("output_1.csv"));

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn validation_errors_name_the_field() {
    let (app, _dir) = setup_app();

    let missing = json!({"init_lat": 0, "init_bearing": 0});
    let res = app.clone().oneshot(post_generate(missing.to_string())).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(res).await;
    assert_eq!(body["field"], "init_lon");
    assert!(body["waypoint_index"].is_null());

    let non_finite = json!({
        "init_lat": 0, "init_lon": 0, "init_bearing": 0,
        "waypoints": [
            {"horizontal": 10},
            {"horizontal": "inf"}
        ]
    });
    let res = app.oneshot(post_generate(non_finite.to_string())).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(res).await;
    assert_eq!(body["field"], "horizontal");
    assert_eq!(body["waypoint_index"], 1);
}

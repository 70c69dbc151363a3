//! Drive the dashboard API while a background simulator serves requests.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use aumvion::analyst::playbook::PlaybookAnalyst;
use aumvion::config::SimulationConfig;
use aumvion::dashboard::build_router;
use aumvion::engine::simulator::Simulator;
use aumvion::session::{Session, SessionState};

async fn call(session: &Arc<Session>, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let resp = build_router(session.clone())
        .oneshot(req.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1_000_000).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_manual_attack_through_api() {
    let config = SimulationConfig::instant();
    let session = Arc::new(Session::new(SessionState::from_config(&config)));
    let handle = tokio::spawn(
        Simulator::with_seed(session.clone(), Box::new(PlaybookAnalyst::new()), config, 5).run(),
    );

    let (status, _) = call(&session, "POST", "/api/attack", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let ledger = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let (_, ledger) = call(&session, "GET", "/api/ledger", None).await;
            if ledger.as_array().map(|a| a.len()) == Some(1) {
                break ledger;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .unwrap();

    let row = &ledger[0];
    for field in ["time", "threat", "location", "defense_strategy", "healing_time_secs", "hash"] {
        assert!(!row[field].is_null(), "missing {field}");
    }

    let (_, map) = call(&session, "GET", "/api/map", None).await;
    assert_eq!(map["label"], row["location"]);
    assert_eq!(map["zoom"], 6);

    let (_, series) = call(&session, "GET", "/api/attack-series", None).await;
    assert_eq!(series.as_array().unwrap().len(), 1);

    let (_, notes) = call(&session, "GET", "/api/notifications", None).await;
    let levels: Vec<&str> = notes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["level"].as_str().unwrap())
        .collect();
    assert_eq!(levels, vec!["alert", "defending", "healed"]);

    handle.abort();
}

#[tokio::test]
async fn test_auto_mode_toggle_through_api() {
    let config = SimulationConfig::instant();
    let session = Arc::new(Session::new(SessionState::from_config(&config)));

    let (status, body) = call(&session, "POST", "/api/auto-mode", Some(r#"{"enabled":true}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["auto_mode"], true);
    assert_eq!(body["attack_in_progress"], true);

    let (status, body) = call(&session, "POST", "/api/attack", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "auto_mode_active");

    let (_, body) = call(&session, "POST", "/api/auto-mode", Some(r#"{"enabled":false}"#)).await;
    assert_eq!(body["auto_mode"], false);

    let (_, status_body) = call(&session, "GET", "/api/status", None).await;
    assert_eq!(status_body["auto_mode"], false);
    assert_eq!(status_body["attack_in_progress"], false);
}

#[tokio::test]
async fn test_malformed_auto_mode_body_rejected() {
    let session = Arc::new(Session::default());
    let resp = build_router(session)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auto-mode")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"enabled":"yes"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
}

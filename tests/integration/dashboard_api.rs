//! End-to-end flows through the dashboard router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bakura::config::AppConfig;
use bakura::dashboard::{build_router, DashboardState};
use bakura::engine::Session;
use bakura::strategy::{DAlembertProgression, MetaAdvisor};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app_from_config(cfg: &AppConfig) -> Router {
    let session = Session::new(cfg.session_config().unwrap()).unwrap();
    let dalembert = DAlembertProgression::new(cfg.dalembert.unit).unwrap();
    let advisor = MetaAdvisor::new(cfg.meta_config());
    build_router(Arc::new(DashboardState::new(session, dalembert, advisor)))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1_000_000).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[test]
fn test_shoe_through_api() {
    let app = app_from_config(&AppConfig::default());

    tokio_test::block_on(async {
        let (status, snap) = call(&app, "POST", "/api/hands", Some(r#"{"text":"B,P,P,P,B"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snap["board"], "BPPPB");
        assert_eq!(snap["banker_count"], 2);
        assert_eq!(snap["player_count"], 3);

        // Banker Only: 3 misses then a hit at 25 arms the doubling
        let banker = &snap["bettors"][0];
        assert_eq!(banker["double_pending"], true);
        assert_eq!(banker["next_stake"].as_f64().unwrap(), 50.0);

        let (_, snap) = call(&app, "POST", "/api/hand", Some(r#"{"outcome":"banker"}"#)).await;
        assert_eq!(snap["bettors"][0]["next_stake"].as_f64().unwrap(), 10.0);
        assert_eq!(snap["bettors"][0]["rung"], 0);

        let (status, suggestion) = call(&app, "GET", "/api/suggestion", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(suggestion["expected_value"].as_f64().unwrap() < 0.0);

        let (_, snap) = call(&app, "POST", "/api/reset", None).await;
        assert_eq!(snap["shoe"], 2);
        assert_eq!(snap["hands"], 0);
    });
}

#[test]
fn test_unit_change_rescales_stakes() {
    let app = app_from_config(&AppConfig::default());

    tokio_test::block_on(async {
        call(&app, "POST", "/api/hands", Some(r#"{"text":"P"}"#)).await;
        let (status, snap) = call(&app, "PUT", "/api/unit", Some(r#"{"unit":20}"#)).await;
        assert_eq!(status, StatusCode::OK);
        // Banker Only sits on rung 0 after an uncounted first miss
        assert_eq!(snap["bettors"][0]["next_stake"].as_f64().unwrap(), 20.0);
    });
}

#[test]
fn test_custom_roster_from_toml() {
    let cfg: AppConfig = toml::from_str(
        r#"
        [session]
        unit = 5

        [[session.roster]]
        name = "Chopper"
        pattern = "chop"

        [[session.roster]]
        pattern = "pattern_1313"
        "#,
    )
    .unwrap();
    cfg.validate().unwrap();
    let app = app_from_config(&cfg);

    tokio_test::block_on(async {
        let (_, snap) = call(&app, "GET", "/api/snapshot", None).await;
        let bettors = snap["bettors"].as_array().unwrap();
        assert_eq!(bettors.len(), 2);
        assert_eq!(bettors[0]["name"], "Chopper");
        // Unseeded patterns wait for the first outcome
        assert!(bettors[0]["next_side"].is_null());

        let (_, snap) = call(&app, "POST", "/api/hand", Some(r#"{"outcome":"P"}"#)).await;
        assert_eq!(snap["bettors"][0]["next_side"], "Banker");
        assert_eq!(snap["bettors"][1]["next_side"], "Banker");
        assert_eq!(snap["bettors"][0]["last_result"], "Free");
    });
}

#[test]
fn test_rejected_input_leaves_state_alone() {
    let app = app_from_config(&AppConfig::default());

    tokio_test::block_on(async {
        let (status, err) = call(&app, "POST", "/api/hands", Some(r#"{"text":"BPX"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].as_str().unwrap().contains("position 3"));

        let (status, _) = call(&app, "PUT", "/api/unit", Some(r#"{"unit":0}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, snap) = call(&app, "GET", "/api/snapshot", None).await;
        assert_eq!(snap["hands"], 0);
        assert_eq!(snap["unit"].as_f64().unwrap(), 10.0);
    });
}

#[test]
fn test_dalembert_session() {
    let app = app_from_config(&AppConfig::default());

    tokio_test::block_on(async {
        for result in ["L", "L", "W", "T"] {
            let body = format!(r#"{{"result":"{result}"}}"#);
            let (status, _) = call(&app, "POST", "/api/dalembert/hand", Some(&body)).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (_, state) = call(&app, "GET", "/api/dalembert", None).await;
        // -10, -20, +30: bet walks 10 -> 20 -> 30 -> 20
        assert_eq!(state["profit"].as_f64().unwrap(), 0.0);
        assert_eq!(state["current_bet"].as_f64().unwrap(), 20.0);
        assert_eq!(state["history"].as_array().unwrap().len(), 4);

        let (_, state) = call(&app, "POST", "/api/dalembert/reset", Some("{}")).await;
        assert_eq!(state["current_bet"].as_f64().unwrap(), 10.0);
        assert!(state["history"].as_array().unwrap().is_empty());

        call(&app, "POST", "/api/dalembert/hand", Some(r#"{"result":"L"}"#)).await;
        let (status, state) = call(&app, "POST", "/api/dalembert/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state["current_bet"].as_f64().unwrap(), 10.0);

        let (status, err) = call(&app, "PUT", "/api/unit", Some(r#"{"unit":"abc"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].is_string());
    });
}

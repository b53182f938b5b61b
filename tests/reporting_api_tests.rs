//! Reporting API 集成测试
//!
//! 在临时 SQLite 上构造数据，通过 actix-web test 服务调用只读端点。

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use serde_json::Value;
use tempfile::TempDir;

use pulso::api::services::{AppStartTime, DataResponse, MessageResponse, health_routes, reporting_routes};
use pulso::storage::backend::SeaOrmStorage;
use pulso::storage::{ClubDailyRow, NewMetric, PipelineStore};

async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("api.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite", 1, std::time::Duration::from_secs(5))
        .await
        .expect("Failed to create storage");
    (Arc::new(storage), temp_dir)
}

macro_rules! reporting_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: Utc::now(),
                }))
                .service(health_routes())
                .configure(reporting_routes),
        )
        .await
    };
}

fn v2_row(club_id: i64, hour: u32) -> ClubDailyRow {
    let at = Utc.with_ymd_and_hms(2026, 10, 20, hour, 0, 0).unwrap();
    ClubDailyRow {
        club_id,
        aggregation_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
        volume_total: 100 + hour as i64,
        volume_normalized: Some(80.0),
        sentiment_score: Some(0.1),
        calculated_at: at,
        created_at: at,
    }
}

#[actix_rt::test]
async fn test_root_message() {
    let (storage, _dir) = create_temp_storage().await;
    let app = reporting_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: MessageResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "Pulso API running");
}

#[actix_rt::test]
async fn test_clubs_and_sources_pass_through() {
    let (storage, _dir) = create_temp_storage().await;
    storage.insert_club("Grêmio", true).await.unwrap();
    storage.insert_club("Internacional", false).await.unwrap();
    storage.insert_source("tw", "Twitter", true).await.unwrap();
    let app = reporting_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/clubs").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: DataResponse<Vec<Value>> = test::read_body_json(resp).await;
    assert_eq!(body.data.len(), 2);
    assert_eq!(body.data[0]["name"], "Grêmio");
    assert_eq!(body.data[1]["active"], false);

    let resp = test::call_service(&app, TestRequest::get().uri("/sources").to_request()).await;
    let body: DataResponse<Vec<Value>> = test::read_body_json(resp).await;
    assert_eq!(body.data.len(), 1);
    assert_eq!(body.data[0]["code"], "tw");
}

#[actix_rt::test]
async fn test_time_bucket_metrics_serializes_nulls() {
    let (storage, _dir) = create_temp_storage().await;
    let club = storage.insert_club("Bahia", true).await.unwrap();
    let source = storage.insert_source("ig", "Instagram", true).await.unwrap();
    storage
        .insert_metrics(vec![NewMetric {
            club_id: club,
            source_id: source,
            bucket_start: Utc.with_ymd_and_hms(2026, 10, 20, 7, 0, 0).unwrap(),
            bucket_size_minutes: 60,
            volume_raw: Some(33),
            sentiment_score: None,
        }])
        .await
        .unwrap();
    let app = reporting_app!(storage);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/time_bucket_metrics").to_request(),
    )
    .await;
    let body: DataResponse<Vec<Value>> = test::read_body_json(resp).await;

    assert_eq!(body.data.len(), 1);
    assert_eq!(body.data[0]["volume_raw"], 33);
    assert!(body.data[0]["volume_normalized"].is_null());
    assert!(body.data[0]["sentiment_score"].is_null());
}

#[actix_rt::test]
async fn test_daily_v2_latest_dedups() {
    let (storage, _dir) = create_temp_storage().await;
    let a = storage.insert_club("Fortaleza", true).await.unwrap();
    let b = storage.insert_club("Ceará", true).await.unwrap();
    storage
        .insert_club_daily(vec![v2_row(a, 0), v2_row(b, 0)])
        .await
        .unwrap();
    storage.insert_club_daily(vec![v2_row(a, 6)]).await.unwrap();
    let app = reporting_app!(storage);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/daily_aggregations_v2").to_request(),
    )
    .await;
    let body: DataResponse<Vec<Value>> = test::read_body_json(resp).await;
    assert_eq!(body.data.len(), 3);

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/daily_aggregations_v2?latest=true")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: DataResponse<Vec<Value>> = test::read_body_json(resp).await;
    assert_eq!(body.data.len(), 2);

    let for_a: Vec<&Value> = body.data.iter().filter(|r| r["club_id"] == a).collect();
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0]["volume_total"], 106);
}

#[actix_rt::test]
async fn test_daily_aggregations_empty_table() {
    let (storage, _dir) = create_temp_storage().await;
    let app = reporting_app!(storage);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/daily_aggregations").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: DataResponse<Vec<Value>> = test::read_body_json(resp).await;
    assert!(body.data.is_empty());
}

#[actix_rt::test]
async fn test_store_error_returns_500_with_message() {
    let (storage, _dir) = create_temp_storage().await;
    let app = reporting_app!(storage);

    // 关闭连接池后所有查询都会失败
    storage.get_db().clone().close().await.unwrap();

    let resp = test::call_service(&app, TestRequest::get().uri("/clubs").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    assert!(body.get("data").is_none());
}

#[actix_rt::test]
async fn test_health_reports_backend() {
    let (storage, _dir) = create_temp_storage().await;
    let app = reporting_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["backend"], "sqlite");

    let resp = test::call_service(&app, TestRequest::get().uri("/health/live").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_rt::test]
async fn test_window_rows_visible_after_rollup() {
    use pulso::pipeline::{ClubDailyRollup, StageOutcome, daily_window, run_daily_rollup};

    let (storage, _dir) = create_temp_storage().await;
    let club = storage.insert_club("Sport", true).await.unwrap();
    let source = storage.insert_source("tw", "Twitter", true).await.unwrap();
    let now = Utc.with_ymd_and_hms(2026, 10, 20, 3, 30, 0).unwrap();
    let window = daily_window(now);
    storage
        .insert_metrics(vec![NewMetric {
            club_id: club,
            source_id: source,
            bucket_start: window.end - Duration::hours(2),
            bucket_size_minutes: 60,
            volume_raw: Some(12),
            sentiment_score: Some(0.5),
        }])
        .await
        .unwrap();

    let outcome = run_daily_rollup(&ClubDailyRollup, storage.as_ref(), window, now)
        .await
        .unwrap();
    assert_eq!(outcome, StageOutcome::Inserted(1));

    let app = reporting_app!(storage);
    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/daily_aggregations_v2").to_request(),
    )
    .await;
    let body: DataResponse<Vec<Value>> = test::read_body_json(resp).await;
    assert_eq!(body.data[0]["volume_total"], 12);
    assert!(body.data[0]["volume_normalized"].is_null());
    assert_eq!(body.data[0]["aggregation_date"], "2026-10-20");
}

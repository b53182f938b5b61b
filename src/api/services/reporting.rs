//! 报表只读接口
//!
//! 每个端点把一张表整表透传为 `{"data": [...]}`，按 id 升序。

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{error, trace};

use super::helpers::{data_response, error_from_pulso, message_response};
use crate::errors::Result;
use crate::storage::SeaOrmStorage;

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct DailyV2Query {
    /// 为 true 时每个 (club_id, aggregation_date) 只返回最新一次计算
    #[serde(default)]
    pub latest: bool,
}

fn respond<T: Serialize>(table: &str, result: Result<Vec<T>>) -> HttpResponse {
    match result {
        Ok(rows) => {
            trace!("Serving {} rows from {}", rows.len(), table);
            data_response(rows)
        }
        Err(e) => {
            error!("Failed to read {}: {}", table, e);
            error_from_pulso(&e)
        }
    }
}

pub struct ReportingService;

impl ReportingService {
    pub async fn root() -> impl Responder {
        message_response("Pulso API running")
    }

    pub async fn clubs(storage: web::Data<Arc<SeaOrmStorage>>) -> impl Responder {
        respond("clubs", storage.list_clubs().await)
    }

    pub async fn sources(storage: web::Data<Arc<SeaOrmStorage>>) -> impl Responder {
        respond("sources", storage.list_sources().await)
    }

    pub async fn time_bucket_metrics(storage: web::Data<Arc<SeaOrmStorage>>) -> impl Responder {
        respond(
            "time_bucket_metrics",
            storage.list_time_bucket_metrics().await,
        )
    }

    pub async fn daily_aggregations(storage: web::Data<Arc<SeaOrmStorage>>) -> impl Responder {
        respond("daily_aggregations", storage.list_daily_aggregations().await)
    }

    pub async fn daily_aggregations_v2(
        storage: web::Data<Arc<SeaOrmStorage>>,
        query: web::Query<DailyV2Query>,
    ) -> impl Responder {
        let result = if query.latest {
            storage.latest_daily_aggregations_v2().await
        } else {
            storage.list_daily_aggregations_v2().await
        };
        respond("daily_aggregations_v2", result)
    }
}

/// 报表路由配置
pub fn reporting_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(ReportingService::root))
        .route("/clubs", web::get().to(ReportingService::clubs))
        .route("/sources", web::get().to(ReportingService::sources))
        .route(
            "/time_bucket_metrics",
            web::get().to(ReportingService::time_bucket_metrics),
        )
        .route(
            "/daily_aggregations",
            web::get().to(ReportingService::daily_aggregations),
        )
        .route(
            "/daily_aggregations_v2",
            web::get().to(ReportingService::daily_aggregations_v2),
        );
}

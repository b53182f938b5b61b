//! 响应构造辅助

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::errors::PulsoError;

/// 表数据响应 `{"data": [...]}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DataResponse<T> {
    pub data: T,
}

/// 错误响应 `{"error": "..."}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageResponse {
    pub message: String,
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

pub fn data_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, &DataResponse { data })
}

pub fn message_response(message: &str) -> HttpResponse {
    json_response(
        StatusCode::OK,
        &MessageResponse {
            message: message.to_string(),
        },
    )
}

/// 存储错误一律 500，正文只带错误信息
pub fn error_from_pulso(err: &PulsoError) -> HttpResponse {
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &ErrorResponse {
            error: err.to_string(),
        },
    )
}

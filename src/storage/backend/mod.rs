//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod pipeline;
mod reference;
pub mod reporting;

use std::time::Duration;

use sea_orm::DatabaseConnection;
use tracing::debug;

use crate::errors::{PulsoError, Result};
use crate::storage::models::StorageConfig;

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(PulsoError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 规范化 backend 名称
pub fn normalize_backend_name(backend: &str) -> String {
    match backend {
        "mariadb" => "mysql".to_string(),
        other => other.to_string(),
    }
}

/// SeaORM-based storage backend
///
/// 由每次调用显式构造并持有，不存在进程级单例。
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(
        database_url: &str,
        backend_name: &str,
        pool_size: u32,
        timeout: Duration,
    ) -> Result<Self> {
        if database_url.is_empty() {
            return Err(PulsoError::database_config("DATABASE_URL 未设置".to_string()));
        }

        let backend_name = normalize_backend_name(backend_name);
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url, timeout).await?
        } else {
            connect_generic(database_url, &backend_name, pool_size, timeout).await?
        };

        let storage = SeaOrmStorage { db, backend_name };

        // 运行迁移
        run_migrations(&storage.db).await?;

        debug!(
            "{} storage initialized",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn get_backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: self.backend_name.clone(),
        }
    }

    /// 获取数据库连接（测试和报表查询直接使用）
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 连通性检查
    pub async fn ping(&self) -> Result<()> {
        self.db.ping().await.map_err(PulsoError::from)
    }
}

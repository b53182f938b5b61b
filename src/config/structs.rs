use serde::{Deserialize, Serialize};

use crate::errors::{PulsoError, Result};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 小时桶大小（分钟）
pub const BUCKET_SIZE_MINUTES: i32 = 60;

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: 报表服务地址、端口
/// - database: 数据库连接配置
/// - logging: 日志配置
/// - pipeline: 采集/归一化/汇总参数
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：PULSO，分隔符：__
    /// 示例：PULSO__DATABASE__DATABASE_URL=sqlite://pulso.db
    ///
    /// 文件不存在时使用默认值；文件或环境变量无效时返回错误。
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let config = Self::try_load(path)?;
        if std::path::Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }
        Ok(config)
    }

    /// 加载并校验配置，不输出任何信息
    pub fn try_load(path: &str) -> Result<Self> {
        use config::{Config, Environment, File};

        let settings = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 PULSO，分隔符 __
            .add_source(
                Environment::with_prefix("PULSO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| PulsoError::validation(format!("Failed to build config: {}", e)))?;

        let config = settings.try_deserialize::<StaticConfig>().map_err(|e| {
            PulsoError::validation(format!("Failed to deserialize config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 校验取值范围
    pub fn validate(&self) -> Result<()> {
        // 时钟只产生整点桶，写入的桶大小必须与之一致
        if self.pipeline.bucket_size_minutes != BUCKET_SIZE_MINUTES {
            return Err(PulsoError::validation(format!(
                "pipeline.bucket_size_minutes must be {}, got {}",
                BUCKET_SIZE_MINUTES, self.pipeline.bucket_size_minutes
            )));
        }
        if self.database.timeout == 0 {
            return Err(PulsoError::validation(
                "database.timeout must be at least 1 second",
            ));
        }
        self.pipeline.mock.validate()
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PulsoError::serialization(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 报表服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 流水线配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// 桶大小（分钟），写入每条指标；只接受 60
    #[serde(default = "default_bucket_size_minutes")]
    pub bucket_size_minutes: i32,
    #[serde(default)]
    pub mock: MockProducerConfig,
}

/// 模拟指标生成器的取值范围
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockProducerConfig {
    #[serde(default = "default_volume_min")]
    pub volume_min: i64,
    #[serde(default = "default_volume_max")]
    pub volume_max: i64,
    #[serde(default = "default_sentiment_min")]
    pub sentiment_min: f64,
    #[serde(default = "default_sentiment_max")]
    pub sentiment_max: f64,
}

impl MockProducerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.volume_min < 0 || self.volume_min > self.volume_max {
            return Err(PulsoError::validation(format!(
                "Invalid mock volume range: [{}, {}]",
                self.volume_min, self.volume_max
            )));
        }
        if self.sentiment_min > self.sentiment_max {
            return Err(PulsoError::validation(format!(
                "Invalid mock sentiment range: [{}, {}]",
                self.sentiment_min, self.sentiment_max
            )));
        }
        Ok(())
    }
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_database_url() -> String {
    "sqlite://pulso.db?mode=rwc".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_bucket_size_minutes() -> i32 {
    BUCKET_SIZE_MINUTES
}

fn default_volume_min() -> i64 {
    10
}

fn default_volume_max() -> i64 {
    80
}

fn default_sentiment_min() -> f64 {
    -0.4
}

fn default_sentiment_max() -> f64 {
    0.7
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            bucket_size_minutes: default_bucket_size_minutes(),
            mock: MockProducerConfig::default(),
        }
    }
}

impl Default for MockProducerConfig {
    fn default() -> Self {
        Self {
            volume_min: default_volume_min(),
            volume_max: default_volume_max(),
            sentiment_min: default_sentiment_min(),
            sentiment_max: default_sentiment_max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_hourly_mock_collection() {
        let config = StaticConfig::default();
        assert_eq!(config.pipeline.bucket_size_minutes, 60);
        assert_eq!(config.pipeline.mock.volume_min, 10);
        assert_eq!(config.pipeline.mock.volume_max, 80);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_volume_range_rejected() {
        let mock = MockProducerConfig {
            volume_min: 90,
            volume_max: 10,
            ..Default::default()
        };
        assert!(matches!(mock.validate(), Err(PulsoError::Validation(_))));
    }

    #[test]
    fn test_bucket_size_other_than_hour_rejected() {
        for minutes in [0, 15, 30, 120] {
            let mut config = StaticConfig::default();
            config.pipeline.bucket_size_minutes = minutes;
            assert!(matches!(config.validate(), Err(PulsoError::Validation(_))));
        }
    }

    #[test]
    fn test_zero_database_timeout_rejected() {
        let mut config = StaticConfig::default();
        config.database.timeout = 0;
        assert!(matches!(config.validate(), Err(PulsoError::Validation(_))));
    }

    #[test]
    fn test_negative_volume_rejected() {
        let mock = MockProducerConfig {
            volume_min: -1,
            ..Default::default()
        };
        assert!(mock.validate().is_err());
    }

    #[test]
    fn test_sample_config_round_trips_through_toml() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[pipeline.mock]"));
        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.server.port, 8000);
        assert_eq!(parsed.database.database_url, default_database_url());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: StaticConfig = toml::from_str("[server]\nport = 9100\n").unwrap();
        assert_eq!(parsed.server.port, 9100);
        assert_eq!(parsed.server.host, "127.0.0.1");
        assert_eq!(parsed.logging.level, "info");
    }
}

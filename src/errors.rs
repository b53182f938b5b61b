use std::fmt;

#[derive(Debug, Clone)]
pub enum PulsoError {
    ReferenceDataMissing(String),
    StoreOperationFailed(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    Validation(String),
    Serialization(String),
    FileOperation(String),
}

impl PulsoError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            PulsoError::ReferenceDataMissing(_) => "E001",
            PulsoError::StoreOperationFailed(_) => "E002",
            PulsoError::DatabaseConfig(_) => "E003",
            PulsoError::DatabaseConnection(_) => "E004",
            PulsoError::Validation(_) => "E005",
            PulsoError::Serialization(_) => "E006",
            PulsoError::FileOperation(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            PulsoError::ReferenceDataMissing(_) => "Reference Data Missing",
            PulsoError::StoreOperationFailed(_) => "Store Operation Failed",
            PulsoError::DatabaseConfig(_) => "Database Configuration Error",
            PulsoError::DatabaseConnection(_) => "Database Connection Error",
            PulsoError::Validation(_) => "Validation Error",
            PulsoError::Serialization(_) => "Serialization Error",
            PulsoError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            PulsoError::ReferenceDataMissing(msg) => msg,
            PulsoError::StoreOperationFailed(msg) => msg,
            PulsoError::DatabaseConfig(msg) => msg,
            PulsoError::DatabaseConnection(msg) => msg,
            PulsoError::Validation(msg) => msg,
            PulsoError::Serialization(msg) => msg,
            PulsoError::FileOperation(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于控制台汇报）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于日志）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PulsoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PulsoError {}

// 便捷的构造函数
impl PulsoError {
    pub fn reference_data_missing<T: Into<String>>(msg: T) -> Self {
        PulsoError::ReferenceDataMissing(msg.into())
    }

    pub fn store_operation_failed<T: Into<String>>(msg: T) -> Self {
        PulsoError::StoreOperationFailed(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        PulsoError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        PulsoError::DatabaseConnection(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PulsoError::Validation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PulsoError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        PulsoError::FileOperation(msg.into())
    }
}

// 所有存储层错误统一视为 StoreOperationFailed，不做重试
impl From<sea_orm::DbErr> for PulsoError {
    fn from(err: sea_orm::DbErr) -> Self {
        PulsoError::StoreOperationFailed(err.to_string())
    }
}

impl From<std::io::Error> for PulsoError {
    fn from(err: std::io::Error) -> Self {
        PulsoError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PulsoError {
    fn from(err: serde_json::Error) -> Self {
        PulsoError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PulsoError>;

//! 系统工具：日志初始化

pub mod logging;

pub use logging::init_logging;

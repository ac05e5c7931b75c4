//! 应用运行配置加载。

use std::env;

pub const ENV_LISTEN_ADDR: &str = "AUTOBUS_TCP_HOST";
pub const ENV_ACCEPT_WORKERS: &str = "AUTOBUS_CORE_ACCEPT";
pub const ENV_HANDLER_WORKERS: &str = "AUTOBUS_CORE_HANDLERS";
pub const ENV_DEBUG: &str = "AUTOBUS_CORE_DEBUG";
pub const ENV_LOG_MESSAGES: &str = "AUTOBUS_CORE_LOG_MESSAGES";

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 监听地址；为空时由 hub 使用默认地址并告警
    pub listen_addr: String,
    /// 未设置时使用 hub 默认值
    pub accept_workers: Option<usize>,
    /// 未设置时使用 hub 默认值
    pub handler_workers: Option<usize>,
    pub debug: bool,
    /// 是否在处理链上挂载日志装饰器
    pub log_messages: bool,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = env::var(ENV_LISTEN_ADDR).unwrap_or_default();
        let accept_workers = read_optional_usize(ENV_ACCEPT_WORKERS)?;
        let handler_workers = read_optional_usize(ENV_HANDLER_WORKERS)?;
        let debug = read_flag(ENV_DEBUG);
        let log_messages = read_flag(ENV_LOG_MESSAGES);

        Ok(Self {
            listen_addr,
            accept_workers,
            handler_workers,
            debug,
            log_messages,
        })
    }
}

/// 未设置或仅含空白时返回 `None`。
fn read_optional_usize(key: &str) -> Result<Option<usize>, ConfigError> {
    let Ok(value) = env::var(key) else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<usize>()
        .map(Some)
        .map_err(|_| ConfigError::Invalid(key.to_string(), value.clone()))
}

/// 开关类变量：无法识别的取值按关闭处理。
fn read_flag(key: &str) -> bool {
    env::var(key)
        .ok()
        .and_then(|value| parse_flag(value.trim()))
        .unwrap_or(false)
}

/// 接受 `1 t T TRUE true True` 与 `0 f F FALSE false False`。
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

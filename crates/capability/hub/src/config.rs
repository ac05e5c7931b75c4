//! hub 配置与构造器

use crate::error::ConfigError;
use crate::hub::ConnectionHub;
use autobus_pipeline::Protocol;
use autobus_telemetry::TelemetryMetrics;
use std::sync::Arc;
use tracing::warn;

/// 未指定监听地址时使用的默认地址
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9009";
/// accept worker 默认数量
pub const DEFAULT_ACCEPT_WORKERS: usize = 1024;
/// handler worker 默认数量
pub const DEFAULT_HANDLER_WORKERS: usize = 2048;

/// hub 配置（构造后不可变）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    pub listen_addr: String,
    /// accept worker 数量。多个 worker 共享同一个监听器，只增加冗余，不提高接入吞吐
    pub accept_workers: usize,
    /// handler worker 数量，即可同时服务的连接数上限
    pub handler_workers: usize,
    /// 打开后记录逐条报文的丢弃原因
    pub debug: bool,
}

/// [`ConnectionHub`] 构造器。
///
/// 选项按调用顺序生效，[`HubBuilder::build`] 统一校验。
pub struct HubBuilder {
    listen_addr: Option<String>,
    accept_workers: usize,
    handler_workers: usize,
    debug: bool,
    protocol: Option<Arc<dyn Protocol>>,
    metrics: Option<Arc<TelemetryMetrics>>,
}

impl Default for HubBuilder {
    fn default() -> Self {
        Self {
            listen_addr: None,
            accept_workers: DEFAULT_ACCEPT_WORKERS,
            handler_workers: DEFAULT_HANDLER_WORKERS,
            debug: false,
            protocol: None,
            metrics: None,
        }
    }
}

impl HubBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 监听地址。空串使用 [`DEFAULT_LISTEN_ADDR`] 并告警。
    pub fn listen_on(mut self, addr: impl Into<String>) -> Self {
        let addr = addr.into();
        self.listen_addr = if addr.trim().is_empty() {
            None
        } else {
            Some(addr)
        };
        self
    }

    pub fn accept_workers(mut self, count: usize) -> Self {
        self.accept_workers = count;
        self
    }

    pub fn handler_workers(mut self, count: usize) -> Self {
        self.handler_workers = count;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        if debug {
            warn!(target: "autobus.hub", "debug enabled, be aware that debug can slow things down");
        }
        self.debug = debug;
        self
    }

    /// 处理链（通常是 `decorate` 的结果）。
    pub fn protocol(mut self, protocol: Arc<dyn Protocol>) -> Self {
        self.protocol = Some(protocol);
        self
    }

    /// 共享计数器；未指定时 hub 自建一个。
    pub fn metrics(mut self, metrics: Arc<TelemetryMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn build(self) -> Result<ConnectionHub, ConfigError> {
        if self.accept_workers == 0 {
            return Err(ConfigError::InvalidPoolSize {
                option: "accept_workers",
                value: self.accept_workers,
            });
        }
        if self.handler_workers == 0 {
            return Err(ConfigError::InvalidPoolSize {
                option: "handler_workers",
                value: self.handler_workers,
            });
        }
        let protocol = self.protocol.ok_or(ConfigError::MissingProtocol)?;

        let listen_addr = match self.listen_addr {
            Some(addr) => addr,
            None => {
                warn!(
                    target: "autobus.hub",
                    addr = DEFAULT_LISTEN_ADDR,
                    "no listen address given, the connection hub will start at the default port"
                );
                DEFAULT_LISTEN_ADDR.to_string()
            }
        };

        let config = HubConfig {
            listen_addr,
            accept_workers: self.accept_workers,
            handler_workers: self.handler_workers,
            debug: self.debug,
        };
        let metrics = self
            .metrics
            .unwrap_or_else(|| Arc::new(TelemetryMetrics::new()));
        Ok(ConnectionHub::new(config, protocol, metrics))
    }
}

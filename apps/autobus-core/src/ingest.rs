//! 接入链路装配模块
//!
//! 将解码、发布、计数与日志装饰器组装成处理链，再交给连接中心。

use autobus_config::AppConfig;
use autobus_hub::{ConfigError, ConnectionHub};
use autobus_pipeline::{DecodingProtocol, Protocol, TracingSink, decorate, logging, metered};
use autobus_telemetry::TelemetryMetrics;
use std::sync::Arc;

/// 处理链：`DecodingProtocol` ← 计数 ← 日志（可选，最外层）。
pub fn build_protocol(config: &AppConfig, metrics: Arc<TelemetryMetrics>) -> Arc<dyn Protocol> {
    let base: Arc<dyn Protocol> =
        Arc::new(DecodingProtocol::new(TracingSink, Arc::clone(&metrics)));
    let mut decorators = vec![metered(metrics)];
    if config.log_messages {
        decorators.push(logging("autobus-core"));
    }
    decorate(base, decorators)
}

/// 按配置构造连接中心；未配置的 worker 数量沿用 hub 默认值。
pub fn build_hub(
    config: &AppConfig,
    protocol: Arc<dyn Protocol>,
    metrics: Arc<TelemetryMetrics>,
) -> Result<ConnectionHub, ConfigError> {
    let mut builder = ConnectionHub::builder()
        .debug(config.debug)
        .listen_on(config.listen_addr.as_str())
        .protocol(protocol)
        .metrics(metrics);
    if let Some(count) = config.accept_workers {
        builder = builder.accept_workers(count);
    }
    if let Some(count) = config.handler_workers {
        builder = builder.handler_workers(count);
    }
    builder.build()
}

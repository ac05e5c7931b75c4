//! 设备 TCP 接入服务：读取配置、装配处理链、启动连接中心。

mod ingest;

use autobus_config::AppConfig;
use autobus_telemetry::{TelemetryMetrics, init_tracing};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志（debug 模式默认打开 debug 级别）
    init_tracing(if config.debug { "debug" } else { "info" });

    let metrics = Arc::new(TelemetryMetrics::new());
    let protocol = ingest::build_protocol(&config, Arc::clone(&metrics));
    let mut hub = ingest::build_hub(&config, protocol, Arc::clone(&metrics))?;

    hub.start().await?;
    hub.wait().await;

    info!(metrics = ?metrics.snapshot(), "connection hub stopped");
    Ok(())
}

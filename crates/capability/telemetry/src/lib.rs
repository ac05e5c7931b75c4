//! 日志初始化、连接 ID 与基础计数器。

use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 基础指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub connections_accepted: u64,
    pub connection_errors: u64,
    pub accept_errors: u64,
    pub frames_received: u64,
    pub frames_decoded: u64,
    pub frames_dropped: u64,
    pub responses_written: u64,
    pub publish_success: u64,
    pub publish_failure: u64,
}

/// 基础指标。
///
/// 由装配方创建后显式注入 hub 与装饰器，不使用全局实例。
#[derive(Debug, Default)]
pub struct TelemetryMetrics {
    connections_accepted: AtomicU64,
    connection_errors: AtomicU64,
    accept_errors: AtomicU64,
    frames_received: AtomicU64,
    frames_decoded: AtomicU64,
    frames_dropped: AtomicU64,
    responses_written: AtomicU64,
    publish_success: AtomicU64,
    publish_failure: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_accepted: self.connections_accepted.load(Ordering::Relaxed),
            connection_errors: self.connection_errors.load(Ordering::Relaxed),
            accept_errors: self.accept_errors.load(Ordering::Relaxed),
            frames_received: self.frames_received.load(Ordering::Relaxed),
            frames_decoded: self.frames_decoded.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
            responses_written: self.responses_written.load(Ordering::Relaxed),
            publish_success: self.publish_success.load(Ordering::Relaxed),
            publish_failure: self.publish_failure.load(Ordering::Relaxed),
        }
    }

    /// 记录连接接入次数。
    pub fn record_connection_accepted(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录连接读写失败（不含正常 EOF）。
    pub fn record_connection_error(&self) {
        self.connection_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录 accept 失败次数（每次都意味着一个 accept worker 退出）。
    pub fn record_accept_error(&self) {
        self.accept_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录收到的读缓冲次数。
    pub fn record_frame_received(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录解码成功次数。
    pub fn record_frame_decoded(&self) {
        self.frames_decoded.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录报文丢弃次数。
    pub fn record_frame_dropped(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录回写响应次数。
    pub fn record_response_written(&self) {
        self.responses_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_publish_success(&self) {
        self.publish_success.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_publish_failure(&self) {
        self.publish_failure.fetch_add(1, Ordering::Relaxed);
    }
}

/// 初始化 tracing。`RUST_LOG` 优先，否则使用 `default_directive`。
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 connection_id。
pub fn new_connection_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

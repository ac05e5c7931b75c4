//! 横切装饰器：日志计时、计数。

use crate::protocol::{Decorator, Protocol};
use crate::PipelineError;
use async_trait::async_trait;
use autobus_telemetry::TelemetryMetrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

struct Logging {
    label: String,
    inner: Arc<dyn Protocol>,
}

#[async_trait]
impl Protocol for Logging {
    async fn handle_message(&self, msg: &[u8]) -> Result<Option<Vec<u8>>, PipelineError> {
        let start = Instant::now();
        info!(
            target: "autobus.pipeline",
            label = %self.label,
            payload = %String::from_utf8_lossy(msg),
            "message_received"
        );
        let ret = self.inner.handle_message(msg).await;
        let response = match &ret {
            Ok(Some(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
            Ok(None) => String::new(),
            Err(err) => format!("error: {err}"),
        };
        info!(
            target: "autobus.pipeline",
            label = %self.label,
            response = %response,
            took_us = start.elapsed().as_micros() as u64,
            "message_handled"
        );
        ret
    }
}

/// 记录每条报文、响应与耗时。
pub fn logging(label: impl Into<String>) -> Decorator {
    let label = label.into();
    Box::new(move |inner| {
        Arc::new(Logging {
            label: label.clone(),
            inner,
        })
    })
}

struct Metered {
    metrics: Arc<TelemetryMetrics>,
    inner: Arc<dyn Protocol>,
}

#[async_trait]
impl Protocol for Metered {
    async fn handle_message(&self, msg: &[u8]) -> Result<Option<Vec<u8>>, PipelineError> {
        self.metrics.record_frame_received();
        let ret = self.inner.handle_message(msg).await;
        if ret.is_err() {
            self.metrics.record_frame_dropped();
        }
        ret
    }
}

/// 统计收到的读缓冲数与处理失败（被丢弃）的次数。
pub fn metered(metrics: Arc<TelemetryMetrics>) -> Decorator {
    Box::new(move |inner| {
        Arc::new(Metered {
            metrics: Arc::clone(&metrics),
            inner,
        })
    })
}

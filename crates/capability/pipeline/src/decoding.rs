use crate::PipelineError;
use crate::protocol::Protocol;
use crate::sink::Sink;
use async_trait::async_trait;
use autobus_protocol::FrameDecoder;
use autobus_telemetry::TelemetryMetrics;
use std::sync::Arc;
use tracing::{debug, warn};

/// 基础处理器：解码报文，序列化为 JSON 后发布一次，不产生响应。
///
/// 解码失败返回 [`PipelineError::Decode`]；发布失败只记录日志并丢弃该报文，不重试。
pub struct DecodingProtocol<S> {
    decoder: FrameDecoder,
    sink: S,
    metrics: Arc<TelemetryMetrics>,
}

impl<S: Sink> DecodingProtocol<S> {
    pub fn new(sink: S, metrics: Arc<TelemetryMetrics>) -> Self {
        Self {
            decoder: FrameDecoder::new(),
            sink,
            metrics,
        }
    }
}

#[async_trait]
impl<S: Sink> Protocol for DecodingProtocol<S> {
    async fn handle_message(&self, msg: &[u8]) -> Result<Option<Vec<u8>>, PipelineError> {
        let message = self.decoder.decode(msg)?;
        self.metrics.record_frame_decoded();
        debug!(
            target: "autobus.pipeline",
            device_id = %message.device_id,
            valid = message.valid,
            "frame_decoded"
        );

        let payload =
            serde_json::to_vec(&message).map_err(|err| PipelineError::Encode(err.to_string()))?;
        match self.sink.publish(&payload).await {
            Ok(()) => self.metrics.record_publish_success(),
            Err(err) => {
                self.metrics.record_publish_failure();
                warn!(
                    target: "autobus.pipeline",
                    device_id = %message.device_id,
                    error = %err,
                    "publish_failed"
                );
            }
        }
        Ok(None)
    }
}

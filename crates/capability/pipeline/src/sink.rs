//! 解码结果的下游出口。
//!
//! 消息总线、存储等都在本仓库之外，通过 [`Sink`] 接入。

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::info;

/// 位置更新的发布主题
pub const SUBJECT_MESSAGE_RECEIVED: &str = "gps.update";

/// Sink 发布错误。
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("sink closed")]
    Closed,
    #[error("publish failed: {0}")]
    Publish(String),
}

/// 下游发布能力：每条解码成功的报文调用一次。
#[async_trait]
pub trait Sink: Send + Sync {
    async fn publish(&self, payload: &[u8]) -> Result<(), SinkError>;
}

/// 空 Sink（用于接线与测试）。
#[derive(Debug, Default)]
pub struct NoopSink;

#[async_trait]
impl Sink for NoopSink {
    async fn publish(&self, _payload: &[u8]) -> Result<(), SinkError> {
        Ok(())
    }
}

/// 把每条报文写入日志。
#[derive(Debug, Default)]
pub struct TracingSink;

#[async_trait]
impl Sink for TracingSink {
    async fn publish(&self, payload: &[u8]) -> Result<(), SinkError> {
        info!(
            target: "autobus.sink",
            subject = SUBJECT_MESSAGE_RECEIVED,
            payload = %String::from_utf8_lossy(payload),
            "gps_update"
        );
        Ok(())
    }
}

/// 转发到 tokio mpsc 通道，由外部消费者（总线桥接、测试）读取。
///
/// 通道满时等待，接收端关闭时返回 [`SinkError::Closed`]。
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<Vec<u8>>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Vec<u8>>) -> Self {
        Self { tx }
    }

    /// 创建 Sink 及其接收端。
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Vec<u8>>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl Sink for ChannelSink {
    async fn publish(&self, payload: &[u8]) -> Result<(), SinkError> {
        self.tx
            .send(payload.to_vec())
            .await
            .map_err(|_| SinkError::Closed)
    }
}

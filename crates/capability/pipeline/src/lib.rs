//! # 消息处理链能力模块
//!
//! hub 每读到一段字节就调用一次 [`Protocol::handle_message`]。处理链由一个基础
//! 处理器加若干装饰器组成：
//!
//! ```text
//! decorate(base, [d1, d2])  =>  d2( d1( base ) )
//!
//! 进入：d2 前置 → d1 前置 → base
//! 返回：base → d1 后置 → d2 后置
//! ```
//!
//! 基础处理器 [`DecodingProtocol`] 负责解码并把结果交给 [`Sink`]。

mod decorators;
mod decoding;
mod protocol;
mod sink;

pub use decorators::{logging, metered};
pub use decoding::DecodingProtocol;
pub use protocol::{Decorator, Protocol, ProtocolFn, decorate};
pub use sink::{ChannelSink, NoopSink, SUBJECT_MESSAGE_RECEIVED, Sink, SinkError, TracingSink};

/// 处理链错误。
///
/// hub 对任何处理链错误的处理方式相同：丢弃当前报文，继续读取。
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("decode error: {0}")]
    Decode(#[from] autobus_protocol::DecodeError),
    #[error("encode error: {0}")]
    Encode(String),
    #[error("handler error: {0}")]
    Handler(String),
}

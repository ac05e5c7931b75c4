//! # 连接中心能力模块
//!
//! 以固定规模的 worker 池管理大量设备 TCP 长连接，把每次读到的字节交给处理链。
//!
//! ## 架构设计
//!
//! ```text
//! 设备 socket
//!       │
//!       ▼
//! accept worker × N ──(无缓冲分发)──▶ handler worker × M
//!       │                                   │
//!       │                                   ├── Protocol::handle_message
//!       │                                   │        └── FrameDecoder → Sink
//!       │                                   └── 可选响应写回同一 socket
//!       ▼                                   ▼
//!              错误通道 ──▶ 错误拦截循环（仅记录日志）
//! ```
//!
//! 分发通道无缓冲：accept worker 交出连接时会阻塞到有 handler 空闲，
//! 这是系统唯一的准入控制，超出部分由内核的 accept 队列承接。
//!
//! ## 已知限制
//!
//! - 读取没有超时，静默的客户端会一直占用一个 handler worker
//! - 没有停机信号
//! - accept worker 遇到第一个错误即退出，不会重启

mod config;
mod dispatch;
mod error;
mod hub;

pub use config::{
    DEFAULT_ACCEPT_WORKERS, DEFAULT_HANDLER_WORKERS, DEFAULT_LISTEN_ADDR, HubBuilder, HubConfig,
};
pub use error::{ConfigError, HubError};
pub use hub::{ConnectionHub, READ_BUFFER_SIZE};

//! hub 错误类型定义

use std::io;
use std::net::SocketAddr;

/// 构造 hub 时的配置错误（启动前致命）
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// worker 数量必须为正
    #[error("invalid pool size for {option}: {value}")]
    InvalidPoolSize { option: &'static str, value: usize },

    /// 未指定处理链
    #[error("no protocol configured")]
    MissingProtocol,
}

/// hub 运行错误
///
/// 除 `Bind` / `AlreadyStarted` 外都只发往错误拦截循环记录，不影响其他连接。
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// 监听失败
    #[error("bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// 重复启动
    #[error("hub already started")]
    AlreadyStarted,

    /// accept 失败（对应 accept worker 随即退出）
    #[error("accept error: {0}")]
    Accept(#[source] io::Error),

    /// 读取失败
    #[error("read error from {peer}: {source}")]
    Read {
        peer: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// 回写失败
    #[error("write error to {peer}: {source}")]
    Write {
        peer: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// 对端关闭连接
    #[error("connection closed by {peer}")]
    Eof { peer: SocketAddr },
}

impl HubError {
    /// 是否为正常的流结束
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Eof { .. })
    }
}

//! 解码错误类型定义

/// 报文解码错误
///
/// 所有错误对连接都是非致命的：调用方丢弃该报文后继续读取。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// 缺少起始标记 `*`
    #[error("malformed message: no beginning")]
    NoBeginning,

    /// 缺少结束标记 `#`（或 `#` 只出现在 `*` 之前）
    #[error("malformed message: no end")]
    NoEnd,

    /// 标记之间的数据不足
    #[error("the raw data has insufficient data (len: {0})")]
    InsufficientData(usize),

    /// 字段数量不足
    #[error("missing field {field} (index {index})")]
    MissingField { field: &'static str, index: usize },

    /// 有效标志既不是 A 也不是 S
    #[error("error decoding valid (raw: {0})")]
    InvalidValidity(String),

    /// 方向标志非法
    #[error("{field} direction should be either {expected}, it is {raw}")]
    InvalidHemisphere {
        field: &'static str,
        expected: &'static str,
        raw: String,
    },

    /// 数值字段解析失败
    #[error("error decoding {field} (raw: {raw})")]
    InvalidNumber { field: &'static str, raw: String },

    /// 日期时间解析失败
    #[error("error decoding time (raw: time: {time} - date: {date})")]
    InvalidDateTime { time: String, date: String },
}

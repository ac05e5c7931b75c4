//! # 报文解码能力模块
//!
//! 将设备经 TCP 上报的定长 ASCII 报文解析为 [`domain::GpsMessage`]。
//!
//! ## 报文格式
//!
//! ```text
//! *HQ,1400046168,V1,055600,A,2234.3066,N,11351.6829,E,000.0,000,080813,FFFFFBFF#
//! ```
//!
//! | 序号 | 字段 | 说明 |
//! |---|---|---|
//! | 0 | 报文头 | 含起始 `*` |
//! | 1 | 设备 ID | |
//! | 2 | 设备型号 | |
//! | 3 | 时间 | HHMMSS |
//! | 4 | 有效标志 | `A` / `S` |
//! | 5-8 | 经纬度块 | `ddmm.mmmm,N,dddmm.mmmm,E` |
//! | 9 | 速度 | 空串视为 0 |
//! | 10 | 航向 | 空串视为 0 |
//! | 11 | 日期 | DDMMYY |
//! | 12 | 状态位 | 十六进制，原样透传 |
//!
//! 解码是纯函数：不做 I/O，不跨读缓冲重组，不完整的帧直接失败。

mod coordinate;
mod error;
mod frame;

pub use coordinate::decode_location;
pub use error::DecodeError;
pub use frame::{FrameDecoder, MIN_FRAME_LEN};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 定位信息（GeoJSON Point）。
///
/// `coordinates` 固定为 `[longitude, latitude]`，下游地理查询依赖该顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl Location {
    /// 由十进制度数构造定位点。
    pub fn point(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: crate::GEOJSON_POINT.to_string(),
            coordinates: [longitude, latitude],
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

/// 设备上报的 GPS 报文（解码成功后才会构造）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsMessage {
    /// 报文头（包含起始的 `*`）
    pub message_head: String,
    /// 设备 ID
    pub device_id: String,
    /// 设备型号
    pub device_type: String,
    /// 定位是否有效（`A` 有效，`S` 无效）
    pub valid: bool,
    pub location: Location,
    /// 日期 + 时间（设备时钟，无时区）
    pub date_time: NaiveDateTime,
    /// 速度，缺省 0
    pub speed: f64,
    /// 航向，缺省 0
    pub direction: i64,
    /// 状态位（十六进制字符串，原样透传）
    pub status: String,
}

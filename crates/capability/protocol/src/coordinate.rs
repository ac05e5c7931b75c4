//! 度分格式经纬度换算

use crate::error::DecodeError;
use domain::Location;

/// 坐标轴描述（纬度 / 经度）。
struct Axis {
    degree_field: &'static str,
    minute_field: &'static str,
    hemisphere_field: &'static str,
    /// 度数固定宽度（纬度 2 位，经度 3 位）
    degree_width: usize,
    positive: &'static str,
    negative: &'static str,
    expected: &'static str,
    /// 在整帧中的字段序号
    value_index: usize,
}

const LATITUDE: Axis = Axis {
    degree_field: "latitude degree",
    minute_field: "latitude minute",
    hemisphere_field: "latitude",
    degree_width: 2,
    positive: "N",
    negative: "S",
    expected: "S or N (south or north)",
    value_index: 5,
};

const LONGITUDE: Axis = Axis {
    degree_field: "longitude degree",
    minute_field: "longitude minute",
    hemisphere_field: "longitude",
    degree_width: 3,
    positive: "E",
    negative: "W",
    expected: "E or W (east or west)",
    value_index: 7,
};

/// 解析经纬度块：`<纬度度(2)><纬度分>,<N|S>,<经度度(3)><经度分>,<E|W>`。
///
/// 方向标志只作用于度数部分，分钟始终按正数累加：
/// `结果 = (带符号的度) + 分 / 60`。
pub fn decode_location(raw: &str) -> Result<Location, DecodeError> {
    decode_location_fields(raw.as_bytes().split(|byte| *byte == b','))
}

/// 按字节逐字段解析经纬度块（帧内字段 5..9）。
pub(crate) fn decode_location_fields<'a, I>(mut fields: I) -> Result<Location, DecodeError>
where
    I: Iterator<Item = &'a [u8]>,
{
    let latitude = decode_axis(&LATITUDE, fields.next(), fields.next())?;
    let longitude = decode_axis(&LONGITUDE, fields.next(), fields.next())?;
    Ok(Location::point(longitude, latitude))
}

fn decode_axis(
    axis: &Axis,
    value: Option<&[u8]>,
    hemisphere: Option<&[u8]>,
) -> Result<f64, DecodeError> {
    let value = value.ok_or(DecodeError::MissingField {
        field: axis.hemisphere_field,
        index: axis.value_index,
    })?;
    let value = std::str::from_utf8(value).map_err(|_| DecodeError::InvalidNumber {
        field: axis.degree_field,
        raw: String::from_utf8_lossy(value).into_owned(),
    })?;

    let (degree_raw, minute_raw) =
        value
            .split_at_checked(axis.degree_width)
            .ok_or_else(|| DecodeError::InvalidNumber {
                field: axis.degree_field,
                raw: value.to_string(),
            })?;
    let mut degree = degree_raw
        .parse::<i64>()
        .map_err(|_| DecodeError::InvalidNumber {
            field: axis.degree_field,
            raw: degree_raw.to_string(),
        })?;
    let minute = minute_raw
        .parse::<f64>()
        .ok()
        .filter(|minute| minute.is_finite())
        .ok_or_else(|| DecodeError::InvalidNumber {
            field: axis.minute_field,
            raw: minute_raw.to_string(),
        })?;

    let hemisphere = hemisphere.ok_or(DecodeError::MissingField {
        field: axis.hemisphere_field,
        index: axis.value_index + 1,
    })?;
    if hemisphere == axis.negative.as_bytes() {
        degree = -degree;
    } else if hemisphere != axis.positive.as_bytes() {
        return Err(DecodeError::InvalidHemisphere {
            field: axis.hemisphere_field,
            expected: axis.expected,
            raw: String::from_utf8_lossy(hemisphere).into_owned(),
        });
    }

    Ok(degree as f64 + minute / 60.0)
}

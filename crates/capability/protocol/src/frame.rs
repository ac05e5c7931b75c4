//! `*...#` 帧提取与字段解析

use crate::coordinate::decode_location_fields;
use crate::error::DecodeError;
use chrono::{NaiveDate, NaiveDateTime};
use domain::GpsMessage;
use std::str::FromStr;

/// 标记之间（含 `*`，不含 `#`）的最小字节数
pub const MIN_FRAME_LEN: usize = 60;

const FRAME_BEGIN: u8 = b'*';
const FRAME_END: u8 = b'#';

/// 日期 + 时间拼接后的长度：DDMMYYHHMMSS
const DATE_TIME_LEN: usize = 12;
/// 两位年份 >= 69 归入 19xx，否则归入 20xx
const YEAR_PIVOT: i32 = 69;

const FIELD_NAMES: [&str; 13] = [
    "message head",
    "device id",
    "device type",
    "time",
    "valid",
    "latitude",
    "latitude direction",
    "longitude",
    "longitude direction",
    "speed",
    "direction",
    "date",
    "status",
];

const IDX_HEAD: usize = 0;
const IDX_ID: usize = 1;
const IDX_TYPE: usize = 2;
const IDX_TIME: usize = 3;
const IDX_VALID: usize = 4;
const IDX_LOCATION: usize = 5;
const IDX_SPEED: usize = 9;
const IDX_DIRECTION: usize = 10;
const IDX_DATE: usize = 11;
const IDX_STATUS: usize = 12;

/// 帧解码器（无状态）。
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameDecoder;

impl FrameDecoder {
    pub fn new() -> Self {
        Self
    }

    /// 截取第一个 `*` 到最后一个 `#` 之间的字节（保留 `*`，丢弃 `#` 及其后内容）。
    pub fn extract_frame<'a>(&self, raw: &'a [u8]) -> Result<&'a [u8], DecodeError> {
        let beginning = raw
            .iter()
            .position(|byte| *byte == FRAME_BEGIN)
            .ok_or(DecodeError::NoBeginning)?;
        let end = raw
            .iter()
            .rposition(|byte| *byte == FRAME_END)
            .filter(|end| *end > beginning)
            .ok_or(DecodeError::NoEnd)?;

        let frame = &raw[beginning..end];
        if frame.len() < MIN_FRAME_LEN {
            return Err(DecodeError::InsufficientData(frame.len()));
        }
        Ok(frame)
    }

    /// 解码一次读取得到的缓冲区。任一字段失败即整体失败，不产生半成品。
    ///
    /// 按字节切分字段：文本字段（报文头、设备号、类型、状态）按有损 UTF-8 原样保留，
    /// 数值与标志字段中的非文本字节按对应字段报错。
    pub fn decode(&self, raw: &[u8]) -> Result<GpsMessage, DecodeError> {
        let frame = self.extract_frame(raw)?;

        let parts: Vec<&[u8]> = frame.split(|byte| *byte == b',').collect();
        if parts.len() < FIELD_NAMES.len() {
            return Err(DecodeError::MissingField {
                field: FIELD_NAMES[parts.len()],
                index: parts.len(),
            });
        }

        let valid = match parts[IDX_VALID] {
            b"A" => true,
            b"S" => false,
            other => return Err(DecodeError::InvalidValidity(lossy(other))),
        };
        let location = decode_location_fields(parts[IDX_LOCATION..IDX_SPEED].iter().copied())?;
        let speed = parse_or_zero::<f64>(FIELD_NAMES[IDX_SPEED], parts[IDX_SPEED])?;
        let direction = parse_or_zero::<i64>(FIELD_NAMES[IDX_DIRECTION], parts[IDX_DIRECTION])?;
        let date_time = parse_date_time(parts[IDX_DATE], parts[IDX_TIME])?;

        Ok(GpsMessage {
            message_head: lossy(parts[IDX_HEAD]),
            device_id: lossy(parts[IDX_ID]),
            device_type: lossy(parts[IDX_TYPE]),
            valid,
            location,
            date_time,
            speed,
            direction,
            status: lossy(parts[IDX_STATUS]),
        })
    }
}

fn lossy(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// 空串视为缺省值 0。
fn parse_or_zero<T>(field: &'static str, raw: &[u8]) -> Result<T, DecodeError>
where
    T: FromStr + Default,
{
    if raw.is_empty() {
        return Ok(T::default());
    }
    std::str::from_utf8(raw)
        .ok()
        .and_then(|text| text.parse::<T>().ok())
        .ok_or_else(|| DecodeError::InvalidNumber {
            field,
            raw: lossy(raw),
        })
}

fn parse_date_time(date: &[u8], time: &[u8]) -> Result<NaiveDateTime, DecodeError> {
    let invalid = || DecodeError::InvalidDateTime {
        time: lossy(time),
        date: lossy(date),
    };
    let stamp: Vec<u32> = date
        .iter()
        .chain(time)
        .map(|byte| byte.is_ascii_digit().then(|| u32::from(byte - b'0')))
        .collect::<Option<_>>()
        .ok_or_else(invalid)?;
    if stamp.len() != DATE_TIME_LEN {
        return Err(invalid());
    }

    let pair = |at: usize| stamp[at] * 10 + stamp[at + 1];
    let (day, month, yy) = (pair(0), pair(2), pair(4) as i32);
    let (hour, minute, second) = (pair(6), pair(8), pair(10));
    let year = if yy >= YEAR_PIVOT { 1900 + yy } else { 2000 + yy };

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_time_uses_two_digit_year_pivot() {
        let parsed = parse_date_time(b"311299", b"235959").unwrap();
        assert_eq!(parsed.to_string(), "1999-12-31 23:59:59");

        let parsed = parse_date_time(b"080869", b"055600").unwrap();
        assert_eq!(parsed.to_string(), "1969-08-08 05:56:00");

        let parsed = parse_date_time(b"311268", b"235959").unwrap();
        assert_eq!(parsed.to_string(), "2068-12-31 23:59:59");

        let parsed = parse_date_time(b"010100", b"000000").unwrap();
        assert_eq!(parsed.to_string(), "2000-01-01 00:00:00");
    }

    #[test]
    fn date_time_rejects_wrong_width() {
        assert!(parse_date_time(b"0808", b"055600").is_err());
        assert!(parse_date_time(b"080813", b"05560").is_err());
        assert!(parse_date_time(b"08081a", b"055600").is_err());
        assert!(parse_date_time(b"080813", b"0556000").is_err());
    }

    #[test]
    fn date_time_rejects_impossible_calendar() {
        assert!(parse_date_time(b"290213", b"000000").is_err());
        assert!(parse_date_time(b"080813", b"246000").is_err());

        let err = parse_date_time(b"320813", b"055600").unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidDateTime {
                time: "055600".to_string(),
                date: "320813".to_string(),
            }
        );
    }

    #[test]
    fn empty_numbers_default_to_zero() {
        assert_eq!(parse_or_zero::<f64>("speed", b"").unwrap(), 0.0);
        assert_eq!(parse_or_zero::<i64>("direction", b"").unwrap(), 0);
        assert!(parse_or_zero::<i64>("direction", b"1x").is_err());
    }
}

use chrono::NaiveDate;
use domain::{GpsMessage, Location};

fn sample_message() -> GpsMessage {
    GpsMessage {
        message_head: "*HQ".to_string(),
        device_id: "1400046168".to_string(),
        device_type: "V1".to_string(),
        valid: true,
        location: Location::point(113.5, 22.5),
        date_time: NaiveDate::from_ymd_opt(2013, 8, 8)
            .and_then(|date| date.and_hms_opt(5, 56, 0))
            .expect("date"),
        speed: 0.0,
        direction: 0,
        status: "FFFFFBFF".to_string(),
    }
}

#[test]
fn location_keeps_longitude_first() {
    let location = Location::point(113.5, 22.5);
    assert_eq!(location.longitude(), 113.5);
    assert_eq!(location.latitude(), 22.5);
    assert_eq!(location.coordinates, [113.5, 22.5]);
}

#[test]
fn location_serializes_as_geojson_point() {
    let json = serde_json::to_value(Location::point(-46.6, -23.5)).expect("json");
    assert_eq!(
        json,
        serde_json::json!({ "type": "Point", "coordinates": [-46.6, -23.5] })
    );
}

#[test]
fn gps_message_json_shape() {
    let json = serde_json::to_value(sample_message()).expect("json");
    assert_eq!(json["device_id"], "1400046168");
    assert_eq!(json["device_type"], "V1");
    assert_eq!(json["valid"], true);
    assert_eq!(json["location"]["type"], "Point");
    assert_eq!(json["date_time"], "2013-08-08T05:56:00");
    assert_eq!(json["status"], "FFFFFBFF");

    let back: GpsMessage = serde_json::from_value(json).expect("decode");
    assert_eq!(back, sample_message());
}

pub mod data;

pub use data::{GpsMessage, Location};

/// GeoJSON 几何类型：定位点。
pub const GEOJSON_POINT: &str = "Point";

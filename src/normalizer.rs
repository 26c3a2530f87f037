use crate::domain::LocationSample;
use crate::extensions::ToIso8601;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

/// Turns a realtime push or a poll response into a [`LocationSample`].
///
/// Three payload shapes are understood, tried in order:
/// 1. `{ "location": { "lat": .., "lng": .. }, "timestamp": .. }`
/// 2. `{ "location": { "latitude": .., "longitude": .. }, "timestamp": .. }`
/// 3. `{ "lat" | "latitude": .., "lng" | "longitude": .., "timestamp": .. }`
///
/// Coordinates may be JSON numbers or numeric strings. A missing or empty timestamp defaults to now.
pub fn normalize(raw: &Value) -> Result<LocationSample, InvalidLocation> {
    normalize_at(raw, Utc::now())
}

pub fn normalize_at(raw: &Value, now: DateTime<Utc>) -> Result<LocationSample, InvalidLocation> {
    let Value::Object(payload) = raw else {
        return Err(InvalidLocation::UnknownShape);
    };

    let (latitude, longitude) = match payload.get("location") {
        Some(Value::Object(location)) if is_present(location, "lat") && is_present(location, "lng") => {
            (coordinate(location, "lat")?, coordinate(location, "lng")?)
        }
        Some(Value::Object(location)) if is_present(location, "latitude") && is_present(location, "longitude") => {
            (coordinate(location, "latitude")?, coordinate(location, "longitude")?)
        }
        Some(Value::Object(_)) => return Err(InvalidLocation::UnknownShape),
        _ if is_present(payload, "latitude") || is_present(payload, "lat") => {
            let latitude_field = if is_present(payload, "latitude") { "latitude" } else { "lat" };
            let longitude_field = if is_present(payload, "longitude") { "longitude" } else { "lng" };
            (coordinate(payload, latitude_field)?, coordinate(payload, longitude_field)?)
        }
        _ => return Err(InvalidLocation::UnknownShape),
    };

    let timestamp = match payload.get("timestamp") {
        Some(Value::String(timestamp)) if !timestamp.is_empty() => timestamp.clone(),
        Some(Value::Number(timestamp)) => timestamp.to_string(),
        _ => now.to_iso8601(),
    };

    Ok(LocationSample::new(latitude, longitude, timestamp))
}

fn is_present(object: &Map<String, Value>, field: &str) -> bool {
    object.get(field).is_some_and(|value| !value.is_null())
}

fn coordinate(object: &Map<String, Value>, field: &'static str) -> Result<f64, InvalidLocation> {
    let value = object.get(field).ok_or(InvalidLocation::MissingCoordinate(field))?;
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(InvalidLocation::NotANumber {
            field,
            value: value.to_string(),
        }),
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidLocation {
    #[error("payload does not match a known location shape")]
    UnknownShape,
    #[error("missing coordinate '{0}'")]
    MissingCoordinate(&'static str),
    #[error("coordinate '{field}' is not a finite number: {value}")]
    NotANumber { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 10, 8, 30, 0).unwrap()
    }

    #[rstest]
    #[case(json!({ "hash": "orderId9:riderId2", "location": { "lat": 12.97, "lng": 77.65 }, "timestamp": "T1" }))]
    #[case(json!({ "location": { "latitude": 12.97, "longitude": 77.65 }, "timestamp": "T1" }))]
    #[case(json!({ "lat": 12.97, "lng": 77.65, "timestamp": "T1" }))]
    #[case(json!({ "latitude": 12.97, "longitude": 77.65, "timestamp": "T1" }))]
    #[case(json!({ "latitude": "12.97", "lng": " 77.65 ", "timestamp": "T1" }))]
    #[case(json!({ "location": { "lat": "12.97", "lng": 77.65 }, "timestamp": "T1" }))]
    fn every_shape_yields_the_same_sample(#[case] raw: Value) {
        let result = normalize_at(&raw, now());

        assert_eq!(result, Ok(LocationSample::new(12.97, 77.65, "T1")));
    }

    #[rstest]
    #[case(json!({ "location": { "lat": 1.0, "lng": 2.0 } }))]
    #[case(json!({ "location": { "lat": 1.0, "lng": 2.0 }, "timestamp": "" }))]
    #[case(json!({ "location": { "lat": 1.0, "lng": 2.0 }, "timestamp": null }))]
    fn defaults_the_timestamp_to_now(#[case] raw: Value) {
        let result = normalize_at(&raw, now());

        assert_eq!(result, Ok(LocationSample::new(1.0, 2.0, "2025-05-10T08:30:00.000Z")));
    }

    #[test]
    fn prefers_the_long_field_names_in_the_flat_shape() {
        let raw = json!({ "latitude": 1.0, "lat": 5.0, "longitude": 2.0, "lng": 6.0, "timestamp": "T1" });

        assert_eq!(normalize_at(&raw, now()), Ok(LocationSample::new(1.0, 2.0, "T1")));
    }

    #[test]
    fn keeps_a_numeric_timestamp() {
        let raw = json!({ "lat": 1.0, "lng": 2.0, "timestamp": 1746865800000_u64 });

        assert_eq!(normalize_at(&raw, now()), Ok(LocationSample::new(1.0, 2.0, "1746865800000")));
    }

    #[rstest]
    #[case(json!(null), InvalidLocation::UnknownShape)]
    #[case(json!("12.97,77.65"), InvalidLocation::UnknownShape)]
    #[case(json!({}), InvalidLocation::UnknownShape)]
    #[case(json!({ "message": "No location found" }), InvalidLocation::UnknownShape)]
    #[case(json!({ "location": { "x": 1.0, "y": 2.0 } }), InvalidLocation::UnknownShape)]
    #[case(json!({ "location": { "lat": 1.0 }, "lng": 2.0 }), InvalidLocation::UnknownShape)]
    #[case(json!({ "lng": 2.0 }), InvalidLocation::UnknownShape)]
    #[case(json!({ "lat": 1.0 }), InvalidLocation::MissingCoordinate("lng"))]
    #[case(json!({ "lat": "north", "lng": 2.0 }), InvalidLocation::NotANumber { field: "lat", value: "\"north\"".to_string() })]
    #[case(json!({ "lat": "NaN", "lng": 2.0 }), InvalidLocation::NotANumber { field: "lat", value: "\"NaN\"".to_string() })]
    #[case(json!({ "lat": 1.0, "lng": "inf" }), InvalidLocation::NotANumber { field: "lng", value: "\"inf\"".to_string() })]
    #[case(json!({ "lat": 1.0, "lng": "" }), InvalidLocation::NotANumber { field: "lng", value: "\"\"".to_string() })]
    #[case(json!({ "location": { "lat": true, "lng": 2.0 } }), InvalidLocation::NotANumber { field: "lat", value: "true".to_string() })]
    #[case(json!({ "location": { "latitude": [1.0], "longitude": 2.0 } }), InvalidLocation::NotANumber { field: "latitude", value: "[1.0]".to_string() })]
    fn rejects_malformed_payloads(#[case] raw: Value, #[case] expected: InvalidLocation) {
        assert_eq!(normalize_at(&raw, now()), Err(expected));
    }
}

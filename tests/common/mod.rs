#![allow(dead_code)]

use std::sync::Arc;

use waymark::prelude::*;

pub fn waypoint(
    index: u32,
    city: &str,
    coordinate: (f64, f64),
    arrival: i64,
    stoppage: i64,
    delivered: u64,
    consumed: u64,
) -> Waypoint {
    Waypoint {
        index,
        city: city.into(),
        region: "Testland".into(),
        coordinate: coordinate.into(),
        timezone: "UTC".into(),
        population: None,
        wikipedia: None,
        arrival: Timestamp::from_seconds(arrival),
        stoppage: Duration::from_seconds(stoppage),
        delivered,
        consumed,
    }
}

/// Normalized stop with counters taken as already cumulative.
pub fn stop(index: u32, coordinate: (f64, f64), arrival: i64, departure: i64, delivered: u64) -> Stop {
    Stop {
        index,
        city: format!("Stop {index}").into(),
        region: "Testland".into(),
        coordinate: coordinate.into(),
        timezone: "UTC".into(),
        population: None,
        wikipedia: None,
        arrival: Timestamp::from_seconds(arrival),
        departure: Timestamp::from_seconds(departure),
        delivered,
        consumed: delivered / 2,
    }
}

/// Three stops in the reference year, starting one hour after the anchor.
pub fn reference_itinerary() -> Itinerary {
    let anchor = calendar::anchor(calendar::REFERENCE_YEAR).unwrap().as_seconds();
    let waypoints: Arc<[Waypoint]> = vec![
        waypoint(0, "Tarawa", (1.4518, 172.9717), anchor + 3_600, 600, 8, 4),
        waypoint(1, "Auckland", (-36.8485, 174.7633), anchor + 10_800, 900, 80, 40),
        waypoint(2, "Sydney", (-33.8688, 151.2093), anchor + 18_000, 1_200, 400, 200),
    ]
    .into();
    Itinerary::normalize(waypoints, calendar::REFERENCE_YEAR).unwrap()
}

pub const ROUTE_JSON: &str = r#"{
  "route": [
    {
      "City": "Tarawa",
      "Region": "Kiribati",
      "Latitude": "1.4518",
      "Longitude": "172.9717",
      "Timezone": "Pacific/Tarawa",
      "Unix Arrival": "1680951600",
      "Arrival Stoppage Time": "600",
      "Eggs Delivered": "8",
      "Carrots eaten": "4",
      "Population Num": "64011",
      "Population Year": "2020",
      "Wikipedia attr": "https://en.wikipedia.org/wiki/Tarawa"
    },
    {
      "City": "Auckland",
      "Region": "New Zealand",
      "Latitude": "-36.8485",
      "Longitude": "174.7633",
      "Timezone": "Pacific/Auckland",
      "Unix Arrival": "1680958800",
      "Arrival Stoppage Time": "900",
      "Eggs Delivered": "80",
      "Carrots eaten": "40"
    }
  ]
}"#;

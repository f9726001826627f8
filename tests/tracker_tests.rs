mod common;

use approx::assert_relative_eq;
use waymark::prelude::*;
use waymark::tracker::{
    Sample, SpeedWindow, accumulate_distance, classify, estimate_speed, interpolate_counters,
    interpolate_position, nearest, visit_estimate,
};

const ORIGIN: Coordinate = Coordinate::new(0.0, 0.0);
const ANCHOR: Timestamp = Timestamp::from_seconds(0);

fn two_stops() -> Vec<Stop> {
    vec![
        common::stop(0, (0.0, 10.0), 1000, 1100, 10),
        common::stop(1, (0.0, 20.0), 1300, 1400, 30),
    ]
}

#[test]
fn between_stops_test() {
    let stops = two_stops();
    let classification = classify(&stops, ANCHOR, Timestamp::from_seconds(1200));
    assert_eq!(classification.phase, Phase::InTransit);
    assert_eq!(classification.previous.map(|stop| stop.index), Some(0));
    assert_eq!(classification.next.map(|stop| stop.index), Some(1));

    let counters = interpolate_counters(&classification, FINAL_DELIVERED_TOTAL);
    assert_eq!(counters.delivered, 20);
    assert_eq!(counters.consumed, 10);

    let position = interpolate_position(&classification, ORIGIN);
    assert_relative_eq!(position.latitude, 0.0);
    assert_relative_eq!(position.longitude, 15.0);
}

#[test]
fn phases_cover_timeline_test() {
    let stops = two_stops();
    let phase_at = |seconds| classify(&stops, ANCHOR, Timestamp::from_seconds(seconds)).phase;

    assert_eq!(phase_at(-1), Phase::PreJourney);
    assert_eq!(phase_at(0), Phase::InTransit);
    assert_eq!(phase_at(999), Phase::InTransit);
    assert_eq!(phase_at(1000), Phase::AtStop);
    assert_eq!(phase_at(1099), Phase::AtStop);
    assert_eq!(phase_at(1100), Phase::InTransit);
    assert_eq!(phase_at(1300), Phase::AtStop);
    assert_eq!(phase_at(1400), Phase::AtOriginPostJourney);
    assert_eq!(phase_at(100_000), Phase::AtOriginPostJourney);
}

#[test]
fn classify_is_idempotent_test() {
    let stops = two_stops();
    for seconds in (-100..1600).step_by(37) {
        let now = Timestamp::from_seconds(seconds);
        assert_eq!(classify(&stops, ANCHOR, now), classify(&stops, ANCHOR, now));
    }
}

#[test]
fn empty_stops_test() {
    let classification = classify(&[], ANCHOR, Timestamp::from_seconds(500));
    assert_eq!(classification.phase, Phase::PreJourney);
    assert_eq!(interpolate_position(&classification, ORIGIN), ORIGIN);
    assert_eq!(
        interpolate_counters(&classification, FINAL_DELIVERED_TOTAL).delivered,
        0
    );
}

#[test]
fn arrival_is_exact_test() {
    let stops = two_stops();
    let classification = classify(&stops, ANCHOR, Timestamp::from_seconds(1300));
    assert_eq!(classification.phase, Phase::AtStop);
    assert_eq!(interpolate_position(&classification, ORIGIN), stops[1].coordinate);
    // Counting starts from the previous stop's total when a stop is reached.
    assert_eq!(
        interpolate_counters(&classification, FINAL_DELIVERED_TOTAL).delivered,
        10
    );

    let leaving = classify(&stops, ANCHOR, Timestamp::from_seconds(1399));
    assert_eq!(
        interpolate_counters(&leaving, FINAL_DELIVERED_TOTAL).delivered,
        30
    );
}

#[test]
fn journey_end_reports_final_total_test() {
    let stops = two_stops();
    let classification = classify(&stops, ANCHOR, Timestamp::from_seconds(5000));
    assert_eq!(classification.phase, Phase::AtOriginPostJourney);
    assert_eq!(interpolate_position(&classification, ORIGIN), ORIGIN);
    let counters = interpolate_counters(&classification, FINAL_DELIVERED_TOTAL);
    assert_eq!(counters.delivered, FINAL_DELIVERED_TOTAL);
    assert_eq!(counters.consumed, 15);
}

#[test]
fn collinear_distance_test() {
    let stops = vec![
        common::stop(0, (1.0, 0.0), 100, 110, 1),
        common::stop(1, (2.0, 0.0), 200, 210, 2),
        common::stop(2, (3.0, 0.0), 300, 310, 3),
    ];
    let distance = accumulate_distance(&stops, ORIGIN, Timestamp::from_seconds(200), None);
    let expected = ORIGIN.haversine(&Coordinate::new(2.0, 0.0));
    assert_relative_eq!(distance.as_meters(), expected.as_meters(), max_relative = 1e-9);

    let before = accumulate_distance(&stops, ORIGIN, Timestamp::from_seconds(50), None);
    assert_eq!(before, Distance::default());
}

#[test]
fn distance_in_transit_test() {
    let stops = two_stops();
    let now = Timestamp::from_seconds(1200);
    let classification = classify(&stops, ANCHOR, now);
    let position = interpolate_position(&classification, ORIGIN);
    let distance = accumulate_distance(&stops, ORIGIN, now, Some(position));
    let expected = ORIGIN.haversine(&Coordinate::new(0.0, 15.0));
    assert_relative_eq!(distance.as_meters(), expected.as_meters(), max_relative = 1e-9);
}

#[test]
fn nearest_first_wins_test() {
    let stops = vec![
        common::stop(0, (10.0, 10.0), 100, 110, 1),
        common::stop(1, (10.0, 10.0), 200, 210, 2),
        common::stop(2, (40.0, 40.0), 300, 310, 3),
    ];
    let observer = Coordinate::new(11.0, 11.0);
    assert_eq!(nearest(&stops, &observer).map(|stop| stop.index), Some(0));
    assert_eq!(
        nearest(&stops, &Coordinate::new(39.0, 41.0)).map(|stop| stop.index),
        Some(2)
    );
    assert!(nearest(&[], &observer).is_none());
}

#[test]
fn visit_estimate_test() {
    let stops = two_stops();
    let now = Timestamp::from_seconds(900);
    assert_eq!(
        visit_estimate(&stops, &stops[0], now),
        Visit::Upcoming {
            arrival: stops[0].arrival,
            remaining: Duration::from_seconds(100),
            is_next: true,
        }
    );
    assert_eq!(
        visit_estimate(&stops, &stops[1], now),
        Visit::Upcoming {
            arrival: stops[1].arrival,
            remaining: Duration::from_seconds(400),
            is_next: false,
        }
    );
    assert_eq!(
        visit_estimate(&stops, &stops[0], Timestamp::from_seconds(1000)),
        Visit::Visited {
            arrival: stops[0].arrival
        }
    );
}

#[test]
fn speed_needs_two_samples_test() {
    let mut window = SpeedWindow::default();
    let speed = window.push(Sample {
        coordinate: ORIGIN,
        at: Timestamp::from_seconds(0),
    });
    assert_eq!(speed, 0.0);

    let speed = window.push(Sample {
        coordinate: Coordinate::new(1.0, 0.0),
        at: Timestamp::from_seconds(3600),
    });
    let expected = 6371.0 * 1.0_f64.to_radians();
    assert_relative_eq!(speed, expected, max_relative = 1e-9);
}

#[test]
fn speed_window_evicts_oldest_test() {
    let mut window = SpeedWindow::new(3);
    for i in 0..5 {
        window.push(Sample {
            coordinate: Coordinate::new(i as f64, 0.0),
            at: Timestamp::from_seconds(i * 3600),
        });
    }
    assert_eq!(window.len(), 3);
    // Oldest kept sample is at latitude 2, newest at 4, two hours apart.
    let expected = 6371.0 * 2.0_f64.to_radians() / 2.0;
    assert_relative_eq!(window.speed(), expected, max_relative = 1e-9);

    let same_instant = [
        Sample {
            coordinate: ORIGIN,
            at: Timestamp::from_seconds(10),
        },
        Sample {
            coordinate: Coordinate::new(5.0, 5.0),
            at: Timestamp::from_seconds(10),
        },
    ];
    assert_eq!(estimate_speed(&same_instant), 0.0);
}

#[test]
fn engine_tick_test() {
    let itinerary = common::reference_itinerary();
    let anchor = itinerary.anchor();
    let mut state = EngineState::new(TrackerConfig::default(), Some(itinerary));

    let waiting = state.tick(anchor - Duration::from_hours(1)).unwrap();
    assert_eq!(waiting.phase, Phase::PreJourney);
    assert_eq!(waiting.boundary, anchor);
    assert_eq!(waiting.position, Origin::default().coordinate);
    assert_eq!(waiting.stats, Stats::default());

    let visiting = state.tick(anchor + Duration::from_seconds(3_900)).unwrap();
    assert_eq!(visiting.phase, Phase::AtStop);
    assert_eq!(visiting.stop.city, "Tarawa");
    assert_eq!(visiting.boundary, anchor + Duration::from_seconds(4_200));
    assert!(visiting.last_seen.is_none());
    assert_eq!(visiting.stats.speed_kmh, 0);

    let first = state.tick(anchor + Duration::from_seconds(6_000)).unwrap();
    assert_eq!(first.phase, Phase::InTransit);
    assert_eq!(first.stop.city, "Auckland");
    assert_eq!(first.last_seen.as_ref().map(|stop| stop.city.as_str()), Some("Tarawa"));
    assert_eq!(state.speed().len(), 1);

    let second = state.tick(anchor + Duration::from_seconds(7_000)).unwrap();
    assert!(second.stats.speed_kmh > 0);
    assert!(second.stats.distance_km > first.stats.distance_km);
    assert!(second.stats.delivered >= first.stats.delivered);

    let done = state.tick(anchor + Duration::from_hours(20)).unwrap();
    assert_eq!(done.phase, Phase::AtOriginPostJourney);
    assert_eq!(done.stats.delivered, FINAL_DELIVERED_TOTAL);
    assert_eq!(done.stats.speed_kmh, 0);
    assert_eq!(done.boundary, calendar::anchor(2024).unwrap());
    assert!(state.speed().is_empty());
}

#[test]
fn engine_rolls_over_test() {
    let itinerary = common::reference_itinerary();
    let mut state = EngineState::new(TrackerConfig::default(), Some(itinerary));
    state
        .tick(calendar::anchor(2023).unwrap() + Duration::from_hours(2))
        .unwrap();
    assert!(state.distance() > Distance::default());

    let lingering = calendar::tracking_end(2023).unwrap() + Duration::from_days(6);
    assert_eq!(state.tick(lingering).unwrap().year, 2023);

    let later = calendar::tracking_end(2023).unwrap() + Duration::from_days(8);
    let snapshot = state.tick(later).unwrap();
    assert_eq!(snapshot.year, 2024);
    assert_eq!(snapshot.phase, Phase::PreJourney);
    assert_eq!(snapshot.boundary, calendar::anchor(2024).unwrap());
    assert_eq!(state.distance(), Distance::default());
    assert_eq!(state.itinerary().map(Itinerary::year), Some(2024));
}

#[test]
fn idle_engine_test() {
    let mut state = EngineState::new(TrackerConfig::default(), None);
    let now = calendar::anchor(2025).unwrap() + Duration::from_hours(3);
    let snapshot = state.tick(now).unwrap();
    assert_eq!(snapshot.phase, Phase::PreJourney);
    assert_eq!(snapshot.year, 2025);
    assert_eq!(snapshot.stop.city, Origin::default().city.to_string());
    assert!(state.nearest(&Coordinate::new(0.0, 0.0)).is_none());
}

#[test]
fn observe_matches_tick_test() {
    let itinerary = common::reference_itinerary();
    let config = TrackerConfig::default();
    let now = itinerary.anchor() + Duration::from_seconds(3_700);
    let observed = Snapshot::observe(&itinerary, &config, now).unwrap();
    let mut state = EngineState::new(config, Some(itinerary));
    let ticked = state.tick(now).unwrap();
    assert_eq!(observed.phase, ticked.phase);
    assert_eq!(observed.position, ticked.position);
    assert_eq!(observed.stats.delivered, ticked.stats.delivered);
}

#[test]
fn engine_skips_failed_tick_test() {
    let anchor = calendar::anchor(calendar::REFERENCE_YEAR).unwrap();
    let start = anchor.as_seconds();
    let waypoints: std::sync::Arc<[Waypoint]> = vec![
        common::waypoint(0, "Tarawa", (1.4518, 172.9717), start + 3_600, 600, 8, 4),
        common::waypoint(1, "Nowhere", (f64::NAN, 174.7633), start + 10_800, 900, 80, 40),
    ]
    .into();
    let itinerary = Itinerary::normalize(waypoints, calendar::REFERENCE_YEAR).unwrap();
    let mut state = EngineState::new(TrackerConfig::default(), Some(itinerary));

    let flying = state.tick(anchor + Duration::from_seconds(1_800)).unwrap();
    assert_eq!(flying.phase, Phase::InTransit);
    let distance = state.distance();
    assert!(distance > Distance::default());
    assert_eq!(state.speed().len(), 1);

    let err = state
        .tick(anchor + Duration::from_seconds(6_000))
        .unwrap_err();
    assert!(matches!(err, Error::Tick(_)));
    assert!(!err.is_data_error());
    assert_eq!(state.distance(), distance);
    assert_eq!(state.speed().len(), 1);

    // The next cycle picks up where the last good one left off.
    let visiting = state.tick(anchor + Duration::from_seconds(3_700)).unwrap();
    assert_eq!(visiting.phase, Phase::AtStop);
    assert_eq!(visiting.stop.city, "Tarawa");
}

#[test]
fn failed_rollover_keeps_state_test() {
    let anchor = calendar::anchor(calendar::REFERENCE_YEAR).unwrap();
    let start = anchor.as_seconds();
    let waypoints: std::sync::Arc<[Waypoint]> = vec![
        common::waypoint(0, "Tarawa", (1.4518, 172.9717), start + 3_600, 600, 8, 4),
        common::waypoint(1, "Nowhere", (f64::NAN, 174.7633), start + 10_800, 900, 80, 40),
    ]
    .into();
    let itinerary = Itinerary::normalize(waypoints, calendar::REFERENCE_YEAR).unwrap();
    let mut state = EngineState::new(TrackerConfig::default(), Some(itinerary));
    state.tick(anchor + Duration::from_seconds(1_800)).unwrap();
    let distance = state.distance();

    // The first tick of the next year fails, the old year stays loaded.
    let next_anchor = calendar::anchor(2024).unwrap();
    let err = state
        .tick(next_anchor + Duration::from_seconds(6_000))
        .unwrap_err();
    assert!(matches!(err, Error::Tick(_)));
    assert_eq!(state.itinerary().map(Itinerary::year), Some(2023));
    assert_eq!(state.distance(), distance);
    assert_eq!(state.speed().len(), 1);
}

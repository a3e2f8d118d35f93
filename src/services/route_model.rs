//! Day-route construction.
//!
//! Walks the stops in display order and asks the travel-time provider for
//! every leg: base -> first, each consecutive pair, last -> base. Calls are
//! issued sequentially in route order so repeated runs against the same
//! provider responses produce identical results.

use tracing::debug;

use crate::services::travel_time::TravelTimeProvider;
use crate::types::{Route, RouteLeg, Stop};

/// Build an anchored route from a day's stops.
///
/// Stops without an address keep their display position but contribute no
/// travel legs. The input slice is not mutated.
pub async fn build_route(
    stops: &[Stop],
    base_location: &str,
    provider: &dyn TravelTimeProvider,
) -> Route {
    let mut legs: Vec<RouteLeg> = Vec::new();
    let mut total_travel_minutes = 0;

    let mut previous_address = base_location;
    let mut previous_id: Option<uuid::Uuid> = None;

    for stop in stops.iter().filter(|s| s.has_address()) {
        let address = stop.address.as_deref().unwrap_or_default();
        let minutes = provider.estimate(previous_address, address).await;

        legs.push(RouteLeg {
            from_appointment_id: previous_id,
            to_appointment_id: Some(stop.appointment_id),
            travel_minutes: minutes,
        });
        total_travel_minutes += minutes;

        previous_address = address;
        previous_id = Some(stop.appointment_id);
    }

    // Return leg, only when at least one stop was routable.
    if previous_id.is_some() {
        let minutes = provider.estimate(previous_address, base_location).await;
        legs.push(RouteLeg {
            from_appointment_id: previous_id,
            to_appointment_id: None,
            travel_minutes: minutes,
        });
        total_travel_minutes += minutes;
    }

    debug!(
        "Built route: {} stops, {} legs, {} travel minutes",
        stops.len(),
        legs.len(),
        total_travel_minutes
    );

    Route {
        stops: stops.to_vec(),
        legs,
        total_travel_minutes,
        total_distance_miles: Route::miles_for_minutes(total_travel_minutes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::travel_time::testing::FixedTravelTimes;
    use uuid::Uuid;

    const BASE: &str = "Base";

    fn stop(name: &str, address: Option<&str>) -> Stop {
        Stop {
            appointment_id: Uuid::new_v4(),
            client_name: name.to_string(),
            address: address.map(str::to_string),
            estimated_duration_minutes: 60,
        }
    }

    #[tokio::test]
    async fn empty_day_has_no_legs() {
        let provider = FixedTravelTimes::new(&[]);
        let route = build_route(&[], BASE, &provider).await;

        assert!(route.legs.is_empty());
        assert_eq!(route.total_travel_minutes, 0);
        assert_eq!(route.total_distance_miles, 0.0);
    }

    #[tokio::test]
    async fn anchored_totals_include_return_leg() {
        let provider =
            FixedTravelTimes::new(&[(BASE, "A", 10), ("A", "B", 5), ("B", BASE, 15)]);
        let stops = vec![stop("a", Some("A")), stop("b", Some("B"))];

        let route = build_route(&stops, BASE, &provider).await;

        assert_eq!(route.legs.len(), 3);
        assert_eq!(route.total_travel_minutes, 30);
        assert_eq!(route.legs[0].from_appointment_id, None);
        assert_eq!(route.legs[2].to_appointment_id, None);
        assert!((route.total_distance_miles - Route::miles_for_minutes(30)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn address_less_stop_is_kept_but_not_routed() {
        let provider = FixedTravelTimes::new(&[(BASE, "A", 10), ("A", BASE, 10)]);
        let stops = vec![stop("walk-in", None), stop("a", Some("A"))];

        let route = build_route(&stops, BASE, &provider).await;

        // Display order retained, including the unroutable stop.
        assert_eq!(route.stops.len(), 2);
        assert_eq!(route.stops[0].client_name, "walk-in");
        // Travel math skips it: base -> A -> base only.
        assert_eq!(route.legs.len(), 2);
        assert_eq!(route.total_travel_minutes, 20);
    }

    #[tokio::test]
    async fn input_is_not_mutated() {
        let provider = FixedTravelTimes::new(&[]);
        let stops = vec![stop("a", Some("A"))];
        let before: Vec<String> = stops.iter().map(|s| s.client_name.clone()).collect();

        let _ = build_route(&stops, BASE, &provider).await;

        let after: Vec<String> = stops.iter().map(|s| s.client_name.clone()).collect();
        assert_eq!(before, after);
    }
}
